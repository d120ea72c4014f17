//! Confirm-then-send pipeline: payload shaping, transport and the
//! submission state machine.

pub mod orchestrator;
pub mod payload;
pub mod transport;

pub use orchestrator::{
    ConfirmResult, Dispatch, FailureReason, PreparedSubmission, SubmissionOrchestrator,
    SubmissionOutcome, SubmissionState, MISSING_COMPANY_MESSAGE, NETWORK_FAILURE_MESSAGE,
    REJECTED_MESSAGE, UNKNOWN_FAILURE_MESSAGE,
};
pub use payload::{SalaryPayload, SubmissionPayload};
pub use transport::{
    HttpTransport, SubmissionTransport, TransportError, TransportResponse, REQUEST_ID_HEADER,
};
