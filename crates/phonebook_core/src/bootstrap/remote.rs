//! Remote bootstrap source.
//!
//! # Responsibility
//! - Fetch a JSON array of contact-shaped objects with a single GET.
//! - Classify transport, status and payload failures.
//!
//! # Invariants
//! - `fetch` performs at most one request; there is no retry.
//! - Anything other than a 2xx response carrying a JSON array is an error.

use crate::model::contact::ContactRecord;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Default bound on the bootstrap request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a remote bootstrap attempt produced no contacts.
#[derive(Debug)]
pub enum RemoteLoadError {
    /// Request could not be sent or the response body could not be read.
    Transport(String),
    /// Server answered with a non-success status.
    Status(u16),
    /// Body is not JSON, not an array, or has malformed entries.
    Payload(String),
}

impl Display for RemoteLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "remote fetch failed: {message}"),
            Self::Status(code) => write!(f, "remote fetch returned status {code}"),
            Self::Payload(message) => write!(f, "invalid remote payload: {message}"),
        }
    }
}

impl Error for RemoteLoadError {}

/// A one-shot provider of bootstrap contacts.
pub trait RemoteSource {
    fn fetch(&self) -> Result<Vec<ContactRecord>, RemoteLoadError>;
}

/// Decodes a response body, requiring a top-level JSON array.
pub fn parse_remote_payload(body: &str) -> Result<Vec<ContactRecord>, RemoteLoadError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|err| RemoteLoadError::Payload(err.to_string()))?;
    if !value.is_array() {
        return Err(RemoteLoadError::Payload(
            "expected a JSON array of contacts".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|err| RemoteLoadError::Payload(err.to_string()))
}

/// HTTP GET source backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpRemoteSource {
    url: String,
    timeout: Duration,
}

impl HttpRemoteSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl RemoteSource for HttpRemoteSource {
    fn fetch(&self) -> Result<Vec<ContactRecord>, RemoteLoadError> {
        let started_at = Instant::now();
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| RemoteLoadError::Transport(err.to_string()))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|err| RemoteLoadError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteLoadError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|err| RemoteLoadError::Transport(err.to_string()))?;
        let contacts = parse_remote_payload(&body)?;
        info!(
            "event=remote_fetch module=bootstrap status=ok count={} duration_ms={}",
            contacts.len(),
            started_at.elapsed().as_millis()
        );
        Ok(contacts)
    }
}
