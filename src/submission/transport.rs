use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Status and (JSON) body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl TransportResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `message` field of an error body, when the backend sent one.
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref()?.get("message")?.as_str()
    }
}

/// No response was obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Request(err.to_string())
    }
}

/// Sends a JSON body to the vacancy backend.
pub trait SubmissionTransport {
    fn post_json(
        &self,
        path: &str,
        request_id: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError>;
}

/// Blocking HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpTransport {
    pub fn new(
        base_url: impl Into<String>,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Setup(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            auth_token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Self::new(
            config.api_base_url.clone(),
            config.auth_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl SubmissionTransport for HttpTransport {
    fn post_json(
        &self,
        path: &str,
        request_id: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.url(path);
        tracing::debug!(%url, request_id, "posting vacancy");

        let mut request = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id)
            .json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        Ok(TransportResponse::new(status, decode_body(status, response.text())))
    }
}

/// Once a status line arrived the response counts, even when its body
/// cannot be read or is not JSON.
fn decode_body<E: std::fmt::Display>(status: u16, text: Result<String, E>) -> Option<Value> {
    let text = match text {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(status, error = %err, "response body could not be read");
            return None;
        }
    };
    let body = serde_json::from_str(&text).ok();
    if body.is_none() && !text.is_empty() {
        tracing::debug!(status, "response body is not JSON");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_joins_without_double_slashes() {
        let transport =
            HttpTransport::new("http://api.local/v1/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(
            transport.url("/companies/7/vacancies"),
            "http://api.local/v1/companies/7/vacancies"
        );
    }

    #[test]
    fn unreadable_body_keeps_the_status() {
        let body = decode_body(409, Err::<String, _>("connection reset"));
        assert_eq!(body, None);
        let response = TransportResponse::new(409, body);
        assert!(!response.is_success());
        assert_eq!(response.message(), None);
    }

    #[test]
    fn body_decoding_tolerates_plain_text() {
        assert_eq!(decode_body(500, Ok::<_, String>("oops".into())), None);
        assert_eq!(
            decode_body(201, Ok::<_, String>(r#"{"id":1}"#.into())),
            Some(json!({ "id": 1 }))
        );
    }

    #[test]
    fn message_reads_error_body() {
        let response = TransportResponse::new(500, Some(json!({ "message": "boom" })));
        assert_eq!(response.message(), Some("boom"));
        assert!(!response.is_success());
        assert_eq!(TransportResponse::new(201, None).message(), None);
        assert!(TransportResponse::new(201, None).is_success());
    }
}
