use serde::{Deserialize, Serialize};

use super::binding::{FieldBinding, FormStore};

pub mod fields {
    pub const NAME: &str = "name";
    pub const SECTOR: &str = "sector";
    pub const MODALITY: &str = "modality";
    pub const LOCATION: &str = "location";
    pub const NUMBER_OPENINGS: &str = "numberOpenings";
    pub const DESCRIPTION: &str = "description";
    pub const EXPERIENCE: &str = "experience";
    pub const GENDER: &str = "gender";
    pub const MIN_AGE: &str = "minAge";
    pub const MAX_AGE: &str = "maxAge";
    pub const REQUIRED_DEGREE: &str = "requiredDegree";
    pub const CURRENCY: &str = "currency";
    pub const MIN_SALARY: &str = "minSalary";
    pub const MAX_SALARY: &str = "maxSalary";
    pub const BENEFITS: &str = "benefits";
    pub const WORKING_DAYS: &str = "workingDays";
    pub const WORK_SHIFT: &str = "workShift";
    pub const WORK_HOUR_START: &str = "workHourStart";
    pub const WORK_HOUR_END: &str = "workHourEnd";
    pub const ADDITIONAL_INFORMATION: &str = "additionalInformation";
}

/// Separator used to keep the working-day list in a single text field.
const LIST_SEPARATOR: &str = ",";

/// Everything the posting form holds, as the user entered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyFormValues {
    pub name: String,
    pub sector: String,
    pub modality: String,
    pub location: String,
    pub number_openings: String,
    pub description: String,
    pub experience: String,
    pub gender: String,
    pub min_age: String,
    pub max_age: String,
    pub required_degree: String,
    pub currency: String,
    pub min_salary: String,
    pub max_salary: String,
    pub benefits: String,
    pub working_days: Vec<String>,
    pub work_shift: String,
    pub work_hour_start: String,
    pub work_hour_end: String,
    pub additional_information: String,
}

impl Default for VacancyFormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            sector: String::new(),
            modality: "PRESENCIAL".into(),
            location: String::new(),
            number_openings: "1".into(),
            description: String::new(),
            experience: String::new(),
            gender: String::new(),
            min_age: String::new(),
            max_age: String::new(),
            required_degree: "INDIFERENTE".into(),
            currency: "mxn".into(),
            min_salary: "1000".into(),
            max_salary: String::new(),
            benefits: String::new(),
            working_days: Vec::new(),
            work_shift: "TIEMPO_COMPLETO".into(),
            work_hour_start: String::new(),
            work_hour_end: String::new(),
            additional_information: String::new(),
        }
    }
}

impl VacancyFormValues {
    pub(crate) fn text_fields(&self) -> [(&'static str, &str); 19] {
        [
            (fields::NAME, self.name.as_str()),
            (fields::SECTOR, self.sector.as_str()),
            (fields::MODALITY, self.modality.as_str()),
            (fields::LOCATION, self.location.as_str()),
            (fields::NUMBER_OPENINGS, self.number_openings.as_str()),
            (fields::DESCRIPTION, self.description.as_str()),
            (fields::EXPERIENCE, self.experience.as_str()),
            (fields::GENDER, self.gender.as_str()),
            (fields::MIN_AGE, self.min_age.as_str()),
            (fields::MAX_AGE, self.max_age.as_str()),
            (fields::REQUIRED_DEGREE, self.required_degree.as_str()),
            (fields::CURRENCY, self.currency.as_str()),
            (fields::MIN_SALARY, self.min_salary.as_str()),
            (fields::MAX_SALARY, self.max_salary.as_str()),
            (fields::BENEFITS, self.benefits.as_str()),
            (fields::WORK_SHIFT, self.work_shift.as_str()),
            (fields::WORK_HOUR_START, self.work_hour_start.as_str()),
            (fields::WORK_HOUR_END, self.work_hour_end.as_str()),
            (fields::ADDITIONAL_INFORMATION, self.additional_information.as_str()),
        ]
    }

    /// Builds a store with every posting field registered at these values.
    pub fn to_store(&self) -> FormStore {
        let mut store = FormStore::new();
        for (name, value) in self.text_fields() {
            store.register(name, value);
        }
        store.register(fields::WORKING_DAYS, join_list(&self.working_days));
        store
    }

    /// Reads a snapshot back out of a binding; unknown fields read as empty.
    pub fn from_binding(binding: &dyn FieldBinding) -> Self {
        let text = |name: &str| binding.value(name).unwrap_or_default();
        Self {
            name: text(fields::NAME),
            sector: text(fields::SECTOR),
            modality: text(fields::MODALITY),
            location: text(fields::LOCATION),
            number_openings: text(fields::NUMBER_OPENINGS),
            description: text(fields::DESCRIPTION),
            experience: text(fields::EXPERIENCE),
            gender: text(fields::GENDER),
            min_age: text(fields::MIN_AGE),
            max_age: text(fields::MAX_AGE),
            required_degree: text(fields::REQUIRED_DEGREE),
            currency: text(fields::CURRENCY),
            min_salary: text(fields::MIN_SALARY),
            max_salary: text(fields::MAX_SALARY),
            benefits: text(fields::BENEFITS),
            working_days: split_list(&text(fields::WORKING_DAYS)),
            work_shift: text(fields::WORK_SHIFT),
            work_hour_start: text(fields::WORK_HOUR_START),
            work_hour_end: text(fields::WORK_HOUR_END),
            additional_information: text(fields::ADDITIONAL_INFORMATION),
        }
    }
}

pub fn join_list(items: &[String]) -> String {
    items.join(LIST_SEPARATOR)
}

pub fn split_list(text: &str) -> Vec<String> {
    text.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trips_working_days() {
        let values = VacancyFormValues {
            working_days: vec!["lunes".into(), "martes".into()],
            ..VacancyFormValues::default()
        };
        let store = values.to_store();
        assert_eq!(store.value(fields::WORKING_DAYS).as_deref(), Some("lunes,martes"));
        assert_eq!(VacancyFormValues::from_binding(&store), values);
    }

    #[test]
    fn split_list_drops_blank_items() {
        assert_eq!(split_list(" lunes, ,viernes,"), vec!["lunes", "viernes"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn defaults_match_the_blank_posting_form() {
        let values = VacancyFormValues::default();
        assert_eq!(values.modality, "PRESENCIAL");
        assert_eq!(values.number_openings, "1");
        assert_eq!(values.min_salary, "1000");
        assert_eq!(values.work_shift, "TIEMPO_COMPLETO");
        assert!(values.work_hour_start.is_empty());
    }
}
