use serde_json::Value;
use uuid::Uuid;

use crate::errors::{FormError, Result};
use crate::form::VacancyFormValues;
use crate::range::DEFAULT_SALARY_FLOOR;

use super::payload::SubmissionPayload;
use super::transport::{SubmissionTransport, TransportError, TransportResponse};

pub const REJECTED_MESSAGE: &str = "Petición incorrecta, Revisa los datos o intenta mas tarde";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "No se pudo crear la vacante";
pub const NETWORK_FAILURE_MESSAGE: &str = "No se pudo conectar con el servidor, intenta mas tarde";
pub const MISSING_COMPANY_MESSAGE: &str = "No se encontró companyId en sesión";

/// Why a confirmed submission did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Backend answered 400 or 409.
    ValidationRejected,
    /// Backend answered with any other failure status.
    Unknown,
    /// No response at all.
    Network,
    /// The session has no company to post under.
    MissingCompany,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    PendingConfirmation,
    Submitting,
    Failed(FailureReason),
    Succeeded,
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "IDLE",
            SubmissionState::PendingConfirmation => "PENDING_CONFIRMATION",
            SubmissionState::Submitting => "SUBMITTING",
            SubmissionState::Failed(_) => "FAILED",
            SubmissionState::Succeeded => "SUCCEEDED",
        }
    }

    /// Idle and failed both leave the form editable and submittable.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Succeeded { body: Option<Value> },
    Failed { reason: FailureReason, message: String },
}

impl SubmissionOutcome {
    fn failed(reason: FailureReason, message: impl Into<String>) -> Self {
        SubmissionOutcome::Failed {
            reason,
            message: message.into(),
        }
    }
}

/// Result of asking the orchestrator to dispatch the pending snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Nothing is pending confirmation; the call was a no-op.
    Ignored,
    /// The attempt failed before any request was made.
    Aborted(SubmissionOutcome),
    /// The request may now be sent; finish with [`SubmissionOrchestrator::complete`].
    Ready(PreparedSubmission),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmResult {
    Ignored,
    Completed(SubmissionOutcome),
}

/// A confirmed attempt whose request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSubmission {
    pub attempt: Uuid,
    pub path: String,
    pub payload: SubmissionPayload,
    pub body: Value,
}

/// Drives submit → confirm → send → classify for one form.
#[derive(Debug)]
pub struct SubmissionOrchestrator {
    company_id: Option<String>,
    salary_floor: u64,
    state: SubmissionState,
    snapshot: Option<VacancyFormValues>,
    last_message: Option<String>,
}

impl SubmissionOrchestrator {
    pub fn new(company_id: Option<String>) -> Self {
        Self {
            company_id,
            salary_floor: DEFAULT_SALARY_FLOOR,
            state: SubmissionState::Idle,
            snapshot: None,
            last_message: None,
        }
    }

    /// Floor applied when salary endpoints are committed into the payload.
    pub fn with_salary_floor(mut self, floor: u64) -> Self {
        self.salary_floor = floor;
        self
    }

    pub fn salary_floor(&self) -> u64 {
        self.salary_floor
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn snapshot(&self) -> Option<&VacancyFormValues> {
        self.snapshot.as_ref()
    }

    /// User-facing message of the last failed attempt.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Holds `values` until the user confirms. Never touches the network.
    pub fn submit(&mut self, values: VacancyFormValues) -> Result<()> {
        if !self.state.accepts_submit() {
            return Err(FormError::InvalidTransition {
                action: "submit",
                state: self.state.label(),
            });
        }
        self.snapshot = Some(values);
        self.last_message = None;
        self.transition(SubmissionState::PendingConfirmation);
        Ok(())
    }

    /// Drops the pending snapshot and returns to idle.
    pub fn cancel(&mut self) -> Result<()> {
        if self.state != SubmissionState::PendingConfirmation {
            return Err(FormError::InvalidTransition {
                action: "cancel",
                state: self.state.label(),
            });
        }
        self.snapshot = None;
        self.transition(SubmissionState::Idle);
        Ok(())
    }

    /// Confirms the pending snapshot and sends it. Outside the pending state
    /// this is a no-op, so at most one request is ever in flight.
    pub fn confirm(&mut self, transport: &dyn SubmissionTransport) -> ConfirmResult {
        let prepared = match self.begin() {
            Dispatch::Ignored => return ConfirmResult::Ignored,
            Dispatch::Aborted(outcome) => return ConfirmResult::Completed(outcome),
            Dispatch::Ready(prepared) => prepared,
        };
        let result = transport.post_json(
            &prepared.path,
            &prepared.attempt.to_string(),
            &prepared.body,
        );
        ConfirmResult::Completed(self.complete(&prepared, result))
    }

    /// First half of [`confirm`](Self::confirm): builds the payload and moves
    /// to `Submitting`.
    pub fn begin(&mut self) -> Dispatch {
        if self.state != SubmissionState::PendingConfirmation {
            tracing::debug!(state = self.state.label(), "confirm ignored");
            return Dispatch::Ignored;
        }
        let Some(snapshot) = self.snapshot.take() else {
            return Dispatch::Aborted(self.fail(FailureReason::Unknown, UNKNOWN_FAILURE_MESSAGE));
        };
        let Some(company_id) = self.company_id.as_deref().filter(|id| !id.trim().is_empty())
        else {
            tracing::error!("no company id in session, vacancy not sent");
            return Dispatch::Aborted(
                self.fail(FailureReason::MissingCompany, MISSING_COMPANY_MESSAGE),
            );
        };
        let path = format!("/companies/{}/vacancies", company_id.trim());

        let payload = SubmissionPayload::from_values(&snapshot, self.salary_floor);
        if payload.salary.max <= payload.salary.min {
            tracing::error!(
                min = payload.salary.min,
                max = payload.salary.max,
                "salary range could not be repaired, vacancy not sent"
            );
            return Dispatch::Aborted(self.fail(FailureReason::Unknown, UNKNOWN_FAILURE_MESSAGE));
        }
        let body = match serde_json::to_value(&payload) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = %err, "could not encode vacancy payload");
                return Dispatch::Aborted(
                    self.fail(FailureReason::Unknown, UNKNOWN_FAILURE_MESSAGE),
                );
            }
        };

        let attempt = Uuid::new_v4();
        tracing::info!(%attempt, %path, "submitting vacancy");
        self.transition(SubmissionState::Submitting);
        Dispatch::Ready(PreparedSubmission {
            attempt,
            path,
            payload,
            body,
        })
    }

    /// Second half of [`confirm`](Self::confirm): classifies what the
    /// transport returned.
    pub fn complete(
        &mut self,
        prepared: &PreparedSubmission,
        result: std::result::Result<TransportResponse, TransportError>,
    ) -> SubmissionOutcome {
        let attempt = prepared.attempt;
        match result {
            Err(err) => {
                tracing::error!(%attempt, error = %err, "vacancy request failed");
                self.fail(FailureReason::Network, NETWORK_FAILURE_MESSAGE)
            }
            Ok(response) if response.is_success() => {
                tracing::info!(%attempt, status = response.status, "vacancy published");
                self.last_message = None;
                self.transition(SubmissionState::Succeeded);
                SubmissionOutcome::Succeeded {
                    body: response.body,
                }
            }
            Ok(response) if matches!(response.status, 400 | 409) => {
                tracing::error!(
                    %attempt,
                    status = response.status,
                    body = ?response.body,
                    "backend rejected vacancy"
                );
                self.fail(FailureReason::ValidationRejected, REJECTED_MESSAGE)
            }
            Ok(response) => {
                tracing::error!(
                    %attempt,
                    status = response.status,
                    body = ?response.body,
                    "backend failed to create vacancy"
                );
                let message = response.message().unwrap_or(UNKNOWN_FAILURE_MESSAGE);
                self.fail(FailureReason::Unknown, message.to_string())
            }
        }
    }

    fn fail(&mut self, reason: FailureReason, message: impl Into<String>) -> SubmissionOutcome {
        let message = message.into();
        self.last_message = Some(message.clone());
        self.transition(SubmissionState::Failed(reason));
        SubmissionOutcome::failed(reason, message)
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::debug!(from = self.state.label(), to = next.label(), "submission state");
        self.state = next;
    }
}
