use serde::{Deserialize, Serialize};

use crate::form::VacancyFormValues;
use crate::range::{
    BoundedPair, CanonicalEndpoint, Normalizer, RangeKind, AMOUNT_CEILING, AMOUNT_MAX_RAW_LEN,
};

pub const DEFAULT_GENDER: &str = "INDIFERENTE";
pub const DEFAULT_AGE: i64 = 18;
pub const DEFAULT_OPENINGS: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPayload {
    pub coin: String,
    pub min: u64,
    pub max: u64,
}

impl SalaryPayload {
    /// Applies the currency repair policy: `max` becomes `min + 1` when it
    /// does not exceed `min`. Returns whether the salary changed; `false`
    /// with `max <= min` means no repair was possible.
    pub fn enforce_order(&mut self) -> bool {
        let pair = BoundedPair::new(
            RangeKind::CurrencyAmount,
            Some(CanonicalEndpoint::Amount(self.min)),
            Some(CanonicalEndpoint::Amount(self.max)),
        );
        match pair.validate().corrected_upper {
            Some(CanonicalEndpoint::Amount(corrected)) => {
                tracing::warn!(
                    min = self.min,
                    max = self.max,
                    corrected,
                    "adjusted salary.max to stay above salary.min"
                );
                self.max = corrected;
                true
            }
            _ => false,
        }
    }
}

/// Request body for `POST /companies/{companyId}/vacancies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub name: String,
    pub business_sector: String,
    pub modality: String,
    pub location: String,
    pub number_openings: i64,
    pub description: String,
    pub experience: String,
    pub gender: String,
    pub age_range: [i64; 2],
    pub required_degree: String,
    pub salary: SalaryPayload,
    pub benefits: String,
    pub working_day: Vec<String>,
    pub work_shift: String,
    pub work_schedule: [String; 2],
    pub additional_information: String,
}

impl SubmissionPayload {
    /// Shapes a snapshot for the wire. Salary endpoints are committed again
    /// with `salary_floor`, as a blur would, before the ordering repair.
    pub fn from_values(values: &VacancyFormValues, salary_floor: u64) -> Self {
        let min_age = parse_int(&values.min_age);
        let max_age = parse_int(&values.max_age)
            .or_else(|| min_age.filter(|age| *age != 0))
            .unwrap_or(DEFAULT_AGE);

        let gender = values.gender.trim();
        let gender = if gender.is_empty() {
            DEFAULT_GENDER.to_string()
        } else {
            gender.to_uppercase()
        };

        let clock = Normalizer::new(RangeKind::ClockTime);
        let currency = Normalizer::new(RangeKind::CurrencyAmount).with_floor(salary_floor);

        let mut payload = Self {
            name: values.name.clone(),
            business_sector: values.sector.clone(),
            modality: values.modality.clone(),
            location: values.location.clone(),
            number_openings: parse_int(&values.number_openings).unwrap_or(DEFAULT_OPENINGS),
            description: values.description.clone(),
            experience: values.experience.clone(),
            gender,
            age_range: [min_age.unwrap_or(DEFAULT_AGE), max_age],
            required_degree: values.required_degree.clone(),
            salary: SalaryPayload {
                coin: values.currency.trim().to_uppercase(),
                min: salary_amount(&currency, &values.min_salary),
                max: salary_amount(&currency, &values.max_salary),
            },
            benefits: values.benefits.clone(),
            working_day: values
                .working_days
                .iter()
                .map(|day| day.trim().to_uppercase())
                .collect(),
            work_shift: values.work_shift.clone(),
            work_schedule: [
                clock.strict(&values.work_hour_start),
                clock.strict(&values.work_hour_end),
            ],
            additional_information: values.additional_information.clone(),
        };
        payload.salary.enforce_order();
        payload
    }
}

fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

// Blank or unreadable amounts fall back to the floor. Amounts longer than a
// keystroke could produce are capped so `max + 1` always exists.
fn salary_amount(currency: &Normalizer, text: &str) -> u64 {
    let committed = currency.strict(text);
    let digits = committed.trim();
    if digits.len() > AMOUNT_MAX_RAW_LEN && digits.bytes().all(|b| b.is_ascii_digit()) {
        return AMOUNT_CEILING;
    }
    digits.parse().unwrap_or_else(|_| currency.floor())
}
