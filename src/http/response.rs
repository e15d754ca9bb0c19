use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::RequestError;

/// Outcome of one request of a run.
///
/// After execution exactly one of `status` and `error` is set, except for a
/// failed body read, which keeps the status alongside the error.
#[derive(Debug, Clone)]
pub struct SingleResponse {
    pub request_index: usize,
    /// Id sent with the request, replaced by the server's echo when present.
    pub correlation_id: String,
    pub status: Option<u16>,
    pub status_text: String,
    /// First value per header name.
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub duration: Duration,
    pub started_at: DateTime<Utc>,
    pub error: Option<RequestError>,
}

impl SingleResponse {
    #[must_use]
    pub fn new(request_index: usize, correlation_id: String, started_at: DateTime<Utc>) -> Self {
        Self {
            request_index,
            correlation_id,
            status: None,
            status_text: String::new(),
            headers: BTreeMap::new(),
            body: String::new(),
            duration: Duration::ZERO,
            started_at,
            error: None,
        }
    }

    /// Response for a unit that never dispatched.
    #[must_use]
    pub fn not_dispatched(
        request_index: usize,
        correlation_id: String,
        error: RequestError,
    ) -> Self {
        let mut response = Self::new(request_index, correlation_id, Utc::now());
        response.error = Some(error);
        response
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// No error and a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.status.is_some_and(|code| (200..300).contains(&code))
    }

    /// Leading digit of the status (2 for 2xx), only for error-free responses.
    #[must_use]
    pub fn status_class(&self) -> Option<u16> {
        if self.error.is_some() {
            return None;
        }
        self.status.map(|code| code.checked_div(100).unwrap_or_default())
    }

    /// Wall-clock time at which the request finished.
    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        TimeDelta::from_std(self.duration)
            .ok()
            .and_then(|delta| self.started_at.checked_add_signed(delta))
            .unwrap_or(self.started_at)
    }
}
