use std::time::Duration;

use reqwest::{Client, redirect};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Builds the client shared by every request of a run.
///
/// Redirects are never followed so the first response, including 3xx, is the
/// one reported. The connect phase is bounded by the run timeout.
///
/// # Errors
///
/// Returns an error when the TLS backend or resolver cannot be initialized.
pub fn build_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .redirect(redirect::Policy::none())
        .user_agent(DEFAULT_USER_AGENT)
        .connect_timeout(timeout)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
