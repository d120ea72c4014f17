#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde_json::Value;
use tempfile::TempDir;
use vacancy_form::config::{Config, ConfigManager};
use vacancy_form::form::{ConfirmationSurface, ConfirmationTexts, Notice, NotificationSurface};
use vacancy_form::submission::{SubmissionTransport, TransportError, TransportResponse};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a config manager backed by a unique directory for each test.
pub fn setup_config_env() -> (ConfigManager, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let manager = ConfigManager::with_base_dir(base.clone()).expect("create config manager");
    (manager, base)
}

pub fn company_config() -> Config {
    Config {
        company_id: Some("acme".into()),
        ..Config::default()
    }
}

/// A posted request as seen by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub request_id: String,
    pub body: Value,
}

/// Answers every request with a fixed status and remembers what was sent.
pub struct RecordingTransport {
    status: u16,
    body: Option<Value>,
    offline: bool,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: Option<Value>) -> Self {
        Self {
            status,
            body,
            offline: false,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::replying(0, None)
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.requests.borrow().last().map(|request| request.body.clone())
    }
}

impl SubmissionTransport for RecordingTransport {
    fn post_json(
        &self,
        path: &str,
        request_id: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        self.requests.borrow_mut().push(RecordedRequest {
            path: path.to_string(),
            request_id: request_id.to_string(),
            body: body.clone(),
        });
        if self.offline {
            return Err(TransportError::Request("connection refused".into()));
        }
        Ok(TransportResponse::new(self.status, self.body.clone()))
    }
}

/// Confirmation surface that always gives the same answer.
pub struct ScriptedConfirmation {
    pub answer: bool,
    pub asked: Cell<usize>,
    pub last_title: RefCell<Option<String>>,
}

impl ScriptedConfirmation {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Cell::new(0),
            last_title: RefCell::new(None),
        }
    }
}

impl ConfirmationSurface for ScriptedConfirmation {
    fn ask(&mut self, texts: &ConfirmationTexts) -> bool {
        self.asked.set(self.asked.get() + 1);
        *self.last_title.borrow_mut() = Some(texts.title.to_string());
        self.answer
    }
}

#[derive(Default)]
pub struct CollectedNotices {
    pub notices: Vec<Notice>,
}

impl NotificationSurface for CollectedNotices {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
