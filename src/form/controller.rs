use std::rc::Rc;

use crate::errors::{FormError, Result};
use crate::range::{BoundedPair, Normalizer, PairVerdict, RangeKind};

use super::binding::{BindingHandle, FieldWatch};

/// One side of a bounded pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Lower,
    Upper,
}

/// Describes which form fields a range control drives and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFieldSpec {
    pub normalizer: Normalizer,
    pub lower: String,
    pub upper: String,
    /// Seeded into empty endpoints once, at mount.
    pub defaults: Option<(String, String)>,
    /// Read-only unit field (e.g. the currency) pinned to a single value.
    pub fixed_unit: Option<(String, String)>,
}

impl RangeFieldSpec {
    pub fn new(normalizer: Normalizer, lower: impl Into<String>, upper: impl Into<String>) -> Self {
        Self {
            normalizer,
            lower: lower.into(),
            upper: upper.into(),
            defaults: None,
            fixed_unit: None,
        }
    }

    pub fn salary(lower: impl Into<String>, upper: impl Into<String>, floor: u64) -> Self {
        Self::new(
            Normalizer::new(RangeKind::CurrencyAmount).with_floor(floor),
            lower,
            upper,
        )
    }

    pub fn schedule(lower: impl Into<String>, upper: impl Into<String>) -> Self {
        Self::new(Normalizer::new(RangeKind::ClockTime), lower, upper)
    }

    pub fn with_defaults(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
        self.defaults = Some((lower.into(), upper.into()));
        self
    }

    pub fn with_fixed_unit(mut self, field: impl Into<String>, unit: impl Into<String>) -> Self {
        self.fixed_unit = Some((field.into(), unit.into()));
        self
    }

    pub fn field(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Lower => &self.lower,
            Endpoint::Upper => &self.upper,
        }
    }
}

/// Keeps a bounded pair of form fields normalized and validated.
pub struct RangeFieldController {
    binding: BindingHandle,
    spec: RangeFieldSpec,
    lower_watch: FieldWatch,
    upper_watch: FieldWatch,
    verdict: PairVerdict,
}

impl RangeFieldController {
    /// Attaches the control to `binding`. Fails when the binding does not
    /// register every field `spec` names.
    pub fn mount(binding: BindingHandle, spec: RangeFieldSpec) -> Result<Self> {
        if spec.lower == spec.upper {
            return Err(FormError::Configuration(format!(
                "range endpoints must be distinct fields (both are `{}`)",
                spec.lower
            )));
        }
        {
            let store = binding.borrow();
            let unit_field = spec.fixed_unit.as_ref().map(|(field, _)| field);
            for name in [&spec.lower, &spec.upper].into_iter().chain(unit_field) {
                if !store.contains(name) {
                    return Err(FormError::Configuration(format!(
                        "field `{}` is not registered with the form binding",
                        name
                    )));
                }
            }
        }

        {
            let mut store = binding.borrow_mut();
            if let Some((lower, upper)) = &spec.defaults {
                for (name, default) in [(&spec.lower, lower), (&spec.upper, upper)] {
                    let unset = store.value(name).map_or(true, |value| value.is_empty());
                    if !unset {
                        continue;
                    }
                    let seeded = spec.normalizer.strict(default);
                    if spec.normalizer.canonical(&seeded).is_none() {
                        tracing::warn!(
                            field = %name,
                            default = %default,
                            "range default is not a valid value, not seeded"
                        );
                        continue;
                    }
                    tracing::debug!(field = %name, default = %seeded, "seeding range default");
                    store.set_value(name, &seeded);
                }
            }
            if let Some((field, unit)) = &spec.fixed_unit {
                store.set_value(field, unit);
            }
        }

        let (lower_watch, upper_watch) = {
            let store = binding.borrow();
            (
                FieldWatch::new(&*store, spec.lower.as_str()),
                FieldWatch::new(&*store, spec.upper.as_str()),
            )
        };
        let verdict = Self::current_pair(&binding, &spec).validate();
        tracing::debug!(
            kind = spec.normalizer.kind().label(),
            lower = %spec.lower,
            upper = %spec.upper,
            "range control mounted"
        );

        let mut controller = Self {
            binding,
            spec,
            lower_watch,
            upper_watch,
            verdict,
        };
        controller.publish();
        Ok(controller)
    }

    /// Mirrors a keystroke: loose-parses `raw` and stores it without judging
    /// the pair.
    pub fn input(&mut self, endpoint: Endpoint, raw: &str) -> String {
        let cleaned = self.spec.normalizer.loose(raw);
        let name = self.spec.field(endpoint).to_string();
        self.binding.borrow_mut().set_value(&name, &cleaned);
        let binding = Rc::clone(&self.binding);
        let store = binding.borrow();
        self.watch_mut(endpoint).sync(&*store);
        cleaned
    }

    /// Commits an endpoint on loss of focus: strict rewrite, the currency
    /// repair when the upper endpoint is committed, then validation.
    pub fn blur(&mut self, endpoint: Endpoint) -> PairVerdict {
        let name = self.spec.field(endpoint).to_string();
        let stored = self.binding.borrow().value(&name).unwrap_or_default();
        let committed = self.spec.normalizer.strict(&stored);
        if committed != stored {
            tracing::debug!(field = %name, from = %stored, to = %committed, "normalized on blur");
            self.binding.borrow_mut().set_value(&name, &committed);
        }

        if endpoint == Endpoint::Upper {
            if let Some(corrected) = Self::current_pair(&self.binding, &self.spec)
                .validate()
                .corrected_upper
            {
                let corrected = self.spec.normalizer.format(&corrected);
                tracing::debug!(field = %name, to = %corrected, "raised upper endpoint above lower");
                self.binding.borrow_mut().set_value(&name, &corrected);
            }
        }

        self.sync_watches();
        self.publish()
    }

    /// Re-validates when either endpoint was written from outside the control.
    pub fn refresh(&mut self) -> Option<PairVerdict> {
        let changed = {
            let store = self.binding.borrow();
            let lower = self.lower_watch.changed(&*store);
            let upper = self.upper_watch.changed(&*store);
            lower || upper
        };
        changed.then(|| self.publish())
    }

    pub fn verdict(&self) -> PairVerdict {
        self.verdict
    }

    pub fn kind(&self) -> RangeKind {
        self.spec.normalizer.kind()
    }

    pub fn spec(&self) -> &RangeFieldSpec {
        &self.spec
    }

    pub fn value(&self, endpoint: Endpoint) -> String {
        self.binding
            .borrow()
            .value(self.spec.field(endpoint))
            .unwrap_or_default()
    }

    /// Error currently published on the upper endpoint.
    pub fn error(&self) -> Option<String> {
        self.binding.borrow().error(&self.spec.upper)
    }

    fn publish(&mut self) -> PairVerdict {
        let verdict = Self::current_pair(&self.binding, &self.spec).validate();
        {
            let mut store = self.binding.borrow_mut();
            match verdict.message {
                Some(message) if !verdict.valid => store.set_error(&self.spec.upper, message),
                _ => store.clear_error(&self.spec.upper),
            }
        }
        self.verdict = verdict;
        verdict
    }

    fn current_pair(binding: &BindingHandle, spec: &RangeFieldSpec) -> BoundedPair {
        let store = binding.borrow();
        let lower = store.value(&spec.lower).unwrap_or_default();
        let upper = store.value(&spec.upper).unwrap_or_default();
        BoundedPair::from_text(&spec.normalizer, &lower, &upper)
    }

    fn watch_mut(&mut self, endpoint: Endpoint) -> &mut FieldWatch {
        match endpoint {
            Endpoint::Lower => &mut self.lower_watch,
            Endpoint::Upper => &mut self.upper_watch,
        }
    }

    fn sync_watches(&mut self) {
        let store = self.binding.borrow();
        self.lower_watch.sync(&*store);
        self.upper_watch.sync(&*store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::binding::{FieldBinding, FormStore};
    use crate::range::{SALARY_RANGE_MESSAGE, SCHEDULE_RANGE_MESSAGE};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn salary_store(min: &str, max: &str) -> Rc<RefCell<FormStore>> {
        FormStore::new()
            .with_field("minSalary", min)
            .with_field("maxSalary", max)
            .with_field("currency", "")
            .into_handle()
    }

    fn salary(store: &Rc<RefCell<FormStore>>) -> RangeFieldController {
        RangeFieldController::mount(
            store.clone(),
            RangeFieldSpec::salary("minSalary", "maxSalary", 1000).with_fixed_unit("currency", "mxn"),
        )
        .unwrap()
    }

    #[test]
    fn keystrokes_never_validate() {
        let store = salary_store("2000", "");
        let mut control = salary(&store);
        assert_eq!(control.input(Endpoint::Upper, "15x0"), "150");
        assert!(control.error().is_none());
        assert_eq!(store.borrow().value("maxSalary").as_deref(), Some("150"));
    }

    #[test]
    fn upper_blur_repairs_salary() {
        let store = salary_store("1500", "");
        let mut control = salary(&store);
        control.input(Endpoint::Upper, "1500");
        let verdict = control.blur(Endpoint::Upper);
        assert!(verdict.valid);
        assert_eq!(control.value(Endpoint::Upper), "1501");
        assert!(control.error().is_none());
    }

    #[test]
    fn lower_blur_flags_without_repair() {
        let store = salary_store("", "3000");
        let mut control = salary(&store);
        control.input(Endpoint::Lower, "5000");
        let verdict = control.blur(Endpoint::Lower);
        assert!(!verdict.valid);
        assert_eq!(control.value(Endpoint::Upper), "3000");
        assert_eq!(control.error().as_deref(), Some(SALARY_RANGE_MESSAGE));
    }

    #[test]
    fn fixed_unit_is_written_at_mount() {
        let store = salary_store("", "");
        let _control = salary(&store);
        assert_eq!(store.borrow().value("currency").as_deref(), Some("mxn"));
    }

    #[test]
    fn external_reset_triggers_validation() {
        let store = FormStore::new()
            .with_field("start", "")
            .with_field("end", "")
            .into_handle();
        let mut control =
            RangeFieldController::mount(store.clone(), RangeFieldSpec::schedule("start", "end"))
                .unwrap();
        assert!(control.refresh().is_none());

        store.borrow_mut().set_value("start", "20:10");
        store.borrow_mut().set_value("end", "09:00");
        let verdict = control.refresh().expect("change observed");
        assert!(!verdict.valid);
        assert_eq!(control.error().as_deref(), Some(SCHEDULE_RANGE_MESSAGE));
        assert!(control.refresh().is_none());

        store.borrow_mut().set_value("end", "21:00");
        assert!(control.refresh().unwrap().valid);
        assert!(control.error().is_none());
    }

    #[test]
    fn defaults_are_committed_before_seeding() {
        let store = FormStore::new()
            .with_field("start", "")
            .with_field("end", "")
            .into_handle();
        let control = RangeFieldController::mount(
            store.clone(),
            RangeFieldSpec::schedule("start", "end").with_defaults("830", "9:00"),
        )
        .unwrap();
        assert_eq!(control.value(Endpoint::Lower), "08:30");
        assert_eq!(control.value(Endpoint::Upper), "");
        assert_eq!(store.borrow().revision("end"), 0);
    }

    #[test]
    fn unregistered_field_is_a_configuration_error() {
        let store = FormStore::new().with_field("start", "").into_handle();
        let err = RangeFieldController::mount(store, RangeFieldSpec::schedule("start", "end"))
            .err()
            .expect("mount must fail");
        assert!(matches!(err, FormError::Configuration(message) if message.contains("`end`")));
    }

    #[test]
    fn identical_endpoint_fields_are_rejected() {
        let store = FormStore::new().with_field("start", "").into_handle();
        let result = RangeFieldController::mount(store, RangeFieldSpec::schedule("start", "start"));
        assert!(matches!(result, Err(FormError::Configuration(_))));
    }
}
