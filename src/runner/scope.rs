use std::time::Duration;

use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::RequestError;

/// Cancellation scope shared by every unit of a run.
///
/// Combines a child of the caller's token with the run deadline. Cancelling
/// the scope never cancels the caller's token.
#[derive(Debug, Clone)]
pub struct RunScope {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RunScope {
    /// Scope whose deadline is `timeout` from now.
    ///
    /// A timeout too large to represent as an instant means no deadline.
    #[must_use]
    pub fn new(parent: &CancellationToken, timeout: Duration) -> Self {
        Self {
            token: parent.child_token(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Cancels the scope when the returned guard is dropped.
    ///
    /// Held by the run so that abandoning it stops every unit still waiting
    /// or in flight.
    #[must_use]
    pub fn drop_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    /// The interruption that has already happened, if any.
    #[must_use]
    pub fn check(&self) -> Option<RequestError> {
        if self.token.is_cancelled() {
            return Some(RequestError::Cancelled);
        }
        self.deadline
            .filter(|deadline| Instant::now() >= *deadline)
            .map(|_deadline| RequestError::Timeout)
    }

    /// Resolves when the token fires or the deadline passes.
    pub async fn interrupted(&self) -> RequestError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                () = self.token.cancelled() => RequestError::Cancelled,
                () = sleep_until(deadline) => RequestError::Timeout,
            },
            None => {
                self.token.cancelled().await;
                RequestError::Cancelled
            }
        }
    }

    /// Waits for `duration` unless the scope is interrupted first.
    ///
    /// # Errors
    ///
    /// Returns the interruption when the scope is already interrupted or
    /// becomes interrupted while waiting, including for a zero duration.
    pub async fn sleep(&self, duration: Duration) -> Result<(), RequestError> {
        if let Some(err) = self.check() {
            return Err(err);
        }
        if duration.is_zero() {
            return Ok(());
        }
        tokio::select! {
            biased;
            err = self.interrupted() => Err(err),
            () = sleep(duration) => Ok(()),
        }
    }
}
