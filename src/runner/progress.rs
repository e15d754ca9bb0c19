use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::error::RequestError;
use crate::http::SingleResponse;

/// Live stream of lifecycle events, drained by the caller during a run.
pub type ProgressReceiver = mpsc::Receiver<ProgressEvent>;

/// Events a single request can emit: pending, running, terminal.
pub(super) const EVENTS_PER_REQUEST: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ProgressState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProgressState::Pending => "pending",
            ProgressState::Running => "running",
            ProgressState::Completed => "completed",
            ProgressState::Failed => "failed",
        }
    }
}

/// One lifecycle transition of one request.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub index: usize,
    pub correlation_id: String,
    pub state: ProgressState,
    /// Set on `Completed`, and on `Failed` after a body read failure.
    pub status: Option<u16>,
    /// Set on `Failed` only.
    pub error: Option<RequestError>,
    /// When the state was entered.
    pub at: DateTime<Utc>,
    /// Dispatch time, set on `Running` and terminal states.
    pub started_at: Option<DateTime<Utc>>,
    /// Elapsed request time, set on terminal states.
    pub duration: Option<Duration>,
}

/// Sending half owned by one execution unit.
///
/// Emission never blocks: the channel is sized for every event of the run,
/// and events are discarded once the receiver is gone.
#[derive(Debug, Clone)]
pub(super) struct ProgressEmitter {
    tx: mpsc::Sender<ProgressEvent>,
    index: usize,
}

impl ProgressEmitter {
    pub(super) const fn new(tx: mpsc::Sender<ProgressEvent>, index: usize) -> Self {
        Self { tx, index }
    }

    pub(super) fn pending(&self, correlation_id: &str) {
        self.emit(ProgressEvent {
            index: self.index,
            correlation_id: correlation_id.to_owned(),
            state: ProgressState::Pending,
            status: None,
            error: None,
            at: Utc::now(),
            started_at: None,
            duration: None,
        });
    }

    pub(super) fn running(&self, correlation_id: &str, started_at: DateTime<Utc>) {
        self.emit(ProgressEvent {
            index: self.index,
            correlation_id: correlation_id.to_owned(),
            state: ProgressState::Running,
            status: None,
            error: None,
            at: started_at,
            started_at: Some(started_at),
            duration: None,
        });
    }

    pub(super) fn finished(&self, response: &SingleResponse) {
        let state = if response.is_error() {
            ProgressState::Failed
        } else {
            ProgressState::Completed
        };
        self.emit(ProgressEvent {
            index: self.index,
            correlation_id: response.correlation_id.clone(),
            state,
            status: response.status,
            error: response.error.clone(),
            at: Utc::now(),
            started_at: Some(response.started_at),
            duration: Some(response.duration),
        });
    }

    fn emit(&self, event: ProgressEvent) {
        drop(self.tx.try_send(event));
    }
}
