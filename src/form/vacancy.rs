use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::errors::{FormError, Result};
use crate::submission::{
    ConfirmResult, FailureReason, SubmissionOrchestrator, SubmissionOutcome, SubmissionState,
    SubmissionTransport,
};

use super::binding::{BindingHandle, FieldBinding, FormStore};
use super::controller::{RangeFieldController, RangeFieldSpec};
use super::surfaces::{
    ConfirmationSurface, Notice, NotificationSurface, FAILURE_NOTICE_TITLE, PUBLISH_CONFIRMATION,
    REJECTED_NOTICE_TITLE, SUCCESS_NOTICE_MESSAGE, SUCCESS_NOTICE_TITLE,
};
use super::values::{fields, join_list, VacancyFormValues};

/// The posting form: one store, the salary and schedule controls mounted on
/// it, and the submission pipeline.
pub struct VacancyForm {
    store: Rc<RefCell<FormStore>>,
    salary: RangeFieldController,
    schedule: RangeFieldController,
    submission: SubmissionOrchestrator,
}

impl VacancyForm {
    pub fn new(config: &Config) -> Result<Self> {
        let values = VacancyFormValues {
            currency: config.currency.clone(),
            ..VacancyFormValues::default()
        };
        Self::with_values(config, values)
    }

    pub fn with_values(config: &Config, values: VacancyFormValues) -> Result<Self> {
        let store = values.to_store().into_handle();
        let handle: BindingHandle = store.clone();

        let salary = RangeFieldController::mount(
            Rc::clone(&handle),
            RangeFieldSpec::salary(fields::MIN_SALARY, fields::MAX_SALARY, config.salary_floor)
                .with_fixed_unit(fields::CURRENCY, config.currency.as_str()),
        )?;
        let schedule = RangeFieldController::mount(
            handle,
            RangeFieldSpec::schedule(fields::WORK_HOUR_START, fields::WORK_HOUR_END)
                .with_defaults(config.schedule_start.as_str(), config.schedule_end.as_str()),
        )?;

        Ok(Self {
            store,
            salary,
            schedule,
            submission: SubmissionOrchestrator::new(config.company_id.clone())
                .with_salary_floor(config.salary_floor),
        })
    }

    pub fn store(&self) -> &Rc<RefCell<FormStore>> {
        &self.store
    }

    pub fn salary_mut(&mut self) -> &mut RangeFieldController {
        &mut self.salary
    }

    pub fn schedule_mut(&mut self) -> &mut RangeFieldController {
        &mut self.schedule
    }

    pub fn submission(&self) -> &SubmissionOrchestrator {
        &self.submission
    }

    pub fn submission_mut(&mut self) -> &mut SubmissionOrchestrator {
        &mut self.submission
    }

    /// Writes a field from outside the range controls and lets them react.
    pub fn set_field(&mut self, name: &str, value: &str) {
        self.store.borrow_mut().set_value(name, value);
        self.refresh();
    }

    /// Overwrites every field, the way a form reset does. The currency
    /// stays pinned to the configured unit.
    pub fn reset(&mut self, values: &VacancyFormValues) {
        {
            let mut store = self.store.borrow_mut();
            for (name, value) in values.text_fields() {
                if name != fields::CURRENCY {
                    store.set_value(name, value);
                }
            }
            store.set_value(fields::WORKING_DAYS, &join_list(&values.working_days));
        }
        self.refresh();
    }

    pub fn snapshot(&self) -> VacancyFormValues {
        VacancyFormValues::from_binding(&*self.store.borrow())
    }

    /// Field errors currently published on the form.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.store.borrow().errors()
    }

    /// Snapshots the form and waits for confirmation. Refused while any field
    /// error is showing.
    pub fn submit(&mut self) -> Result<()> {
        self.refresh();
        let errors = self.errors();
        if !errors.is_empty() {
            let messages: Vec<String> = errors.into_iter().map(|(_, message)| message).collect();
            tracing::warn!(errors = messages.len(), "publish blocked by field errors");
            return Err(FormError::Blocked(messages.join(" ")));
        }
        self.submission.submit(self.snapshot())
    }

    /// Full publish flow: submit, confirm with the user, send, then notify.
    pub fn publish(
        &mut self,
        confirmation: &mut dyn ConfirmationSurface,
        notifications: &mut dyn NotificationSurface,
        transport: &dyn SubmissionTransport,
    ) -> Result<SubmissionState> {
        self.submit()?;
        if !confirmation.ask(&PUBLISH_CONFIRMATION) {
            self.submission.cancel()?;
            return Ok(self.submission.state());
        }

        match self.submission.confirm(transport) {
            ConfirmResult::Ignored => {}
            ConfirmResult::Completed(SubmissionOutcome::Succeeded { .. }) => {
                notifications.notify(&Notice::success(
                    SUCCESS_NOTICE_TITLE,
                    SUCCESS_NOTICE_MESSAGE,
                ));
            }
            ConfirmResult::Completed(SubmissionOutcome::Failed { reason, message }) => {
                let title = match reason {
                    FailureReason::ValidationRejected => REJECTED_NOTICE_TITLE,
                    _ => FAILURE_NOTICE_TITLE,
                };
                notifications.notify(&Notice::error(title, message));
            }
        }
        Ok(self.submission.state())
    }

    fn refresh(&mut self) {
        self.salary.refresh();
        self.schedule.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::controller::Endpoint;
    use crate::range::SCHEDULE_RANGE_MESSAGE;

    #[test]
    fn mount_seeds_schedule_and_currency() {
        let form = VacancyForm::new(&Config::default()).unwrap();
        let values = form.snapshot();
        assert_eq!(values.work_hour_start, "09:00");
        assert_eq!(values.work_hour_end, "17:00");
        assert_eq!(values.currency, "mxn");
        assert_eq!(values.min_salary, "1000");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn external_write_is_validated() {
        let mut form = VacancyForm::new(&Config::default()).unwrap();
        form.set_field(fields::WORK_HOUR_START, "18:00");
        assert_eq!(
            form.errors(),
            vec![(fields::WORK_HOUR_END.to_string(), SCHEDULE_RANGE_MESSAGE.to_string())]
        );
        form.set_field(fields::WORK_HOUR_END, "19:00");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn submit_is_blocked_by_field_errors() {
        let mut form = VacancyForm::new(&Config::default()).unwrap();
        form.schedule_mut().input(Endpoint::Lower, "20:10");
        form.schedule_mut().blur(Endpoint::Lower);
        let err = form.submit().unwrap_err();
        assert!(matches!(err, FormError::Blocked(_)));
        assert_eq!(form.submission().state(), SubmissionState::Idle);
        assert_eq!(form.snapshot().work_hour_start, "20:10");
    }

    #[test]
    fn reset_overwrites_values_and_revalidates() {
        let mut form = VacancyForm::new(&Config::default()).unwrap();
        let values = VacancyFormValues {
            name: "Soporte".into(),
            work_hour_start: "10:00".into(),
            work_hour_end: "08:00".into(),
            ..VacancyFormValues::default()
        };
        form.reset(&values);
        assert_eq!(form.snapshot().name, "Soporte");
        assert_eq!(form.errors().len(), 1);
    }
}
