#![doc(test(attr(deny(warnings))))]

//! Vacancy Form provides the validated salary/schedule range controls and the
//! confirm-then-send submission pipeline behind the job-vacancy posting form.

pub mod cli;
pub mod config;
pub mod errors;
pub mod form;
pub mod range;
pub mod submission;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Vacancy form tracing initialized.");
    });
}
