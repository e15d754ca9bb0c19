//! Concurrent fan-out of the configured requests and fan-in of their
//! responses.
mod aggregate;
mod progress;
mod scope;


use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{CorrelationMode, RequestConfig};
use crate::correlation::{CorrelationIdProvider, UuidProvider};
use crate::error::AppResult;
use crate::http::{Dispatch, SingleResponse, build_client, execute};

pub use aggregate::{BASIS_POINTS, RunResult, format_bp};
pub use progress::{ProgressEvent, ProgressReceiver, ProgressState};
pub use scope::RunScope;

use progress::{EVENTS_PER_REQUEST, ProgressEmitter};

/// Runs the configured number of requests concurrently.
pub struct Runner {
    config: Arc<RequestConfig>,
    client: Client,
    ids: Arc<dyn CorrelationIdProvider>,
    progress_tx: mpsc::Sender<ProgressEvent>,
    progress_rx: Option<ProgressReceiver>,
}

impl Runner {
    /// Creates a runner for an already validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: RequestConfig) -> AppResult<Self> {
        let client = build_client(config.timeout)?;
        let capacity = config.count().saturating_mul(EVENTS_PER_REQUEST).max(1);
        let (progress_tx, progress_rx) = mpsc::channel(capacity);
        Ok(Self {
            config: Arc::new(config),
            client,
            ids: Arc::new(UuidProvider),
            progress_tx,
            progress_rx: Some(progress_rx),
        })
    }

    /// Replaces the default UUID provider.
    #[must_use]
    pub fn with_id_provider(mut self, ids: Arc<dyn CorrelationIdProvider>) -> Self {
        self.ids = ids;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<RequestConfig> {
        &self.config
    }

    /// Takes the progress stream. Only the first call returns it.
    ///
    /// The stream closes once every request has reached a terminal state.
    pub fn progress(&mut self) -> Option<ProgressReceiver> {
        self.progress_rx.take()
    }

    /// Runs every request to completion and collects the responses.
    ///
    /// Per-request failures, including cancellation through `cancel`, are
    /// recorded in the responses; the result always holds one response per
    /// request.
    pub async fn run(self, cancel: CancellationToken) -> RunResult {
        let Runner {
            config,
            client,
            ids,
            progress_tx,
            progress_rx,
        } = self;
        drop(progress_rx);

        let started_at = Utc::now();
        let scope = RunScope::new(&cancel, config.timeout);
        let _abandon = scope.drop_guard();
        let count = config.count();

        let shared_id = match &config.correlation {
            CorrelationMode::Fixed(id) => Some(id.clone()),
            CorrelationMode::Shared => Some(ids.generate()),
            CorrelationMode::PerRequest => None,
        };
        debug!(
            "Starting run: {} {} x{} (delay {:?}, timeout {:?})",
            config.method.as_str(),
            config.url,
            count,
            config.delay,
            config.timeout
        );

        let (response_tx, mut response_rx) = mpsc::channel(count.max(1));
        for index in 0..count {
            let unit = Unit {
                index,
                config: Arc::clone(&config),
                client: client.clone(),
                scope: scope.clone(),
                ids: Arc::clone(&ids),
                shared_id: shared_id.clone(),
                progress: ProgressEmitter::new(progress_tx.clone(), index),
            };
            let response_tx = response_tx.clone();
            tokio::spawn(async move {
                let response = unit.run().await;
                drop(response_tx.send(response).await);
            });
        }
        drop(response_tx);
        drop(progress_tx);

        let mut responses = Vec::with_capacity(count);
        while let Some(response) = response_rx.recv().await {
            responses.push(response);
        }

        let finished_at = Utc::now();
        debug!(
            "Run finished: {}/{} responses in {:?}",
            responses.len(),
            count,
            finished_at.signed_duration_since(started_at)
        );
        RunResult {
            responses,
            started_at,
            finished_at,
            config,
        }
    }
}

/// One request of a run, executed on its own task.
struct Unit {
    index: usize,
    config: Arc<RequestConfig>,
    client: Client,
    scope: RunScope,
    ids: Arc<dyn CorrelationIdProvider>,
    shared_id: Option<String>,
    progress: ProgressEmitter,
}

impl Unit {
    async fn run(self) -> SingleResponse {
        let correlation_id = self
            .shared_id
            .clone()
            .unwrap_or_else(|| self.ids.generate());
        self.progress.pending(&correlation_id);

        let factor = u32::try_from(self.index).unwrap_or(u32::MAX);
        let delay = self.config.delay.saturating_mul(factor);
        if let Err(err) = self.scope.sleep(delay).await {
            debug!("Request {} aborted before dispatch: {}", self.index, err);
            let response = SingleResponse::not_dispatched(self.index, correlation_id, err);
            self.progress.finished(&response);
            return response;
        }

        let dispatched_at = Utc::now();
        self.progress.running(&correlation_id, dispatched_at);
        debug!("Request {} dispatched with id {}", self.index, correlation_id);
        let response = execute(
            &self.client,
            &self.config,
            Dispatch {
                index: self.index,
                correlation_id: Some(&correlation_id),
                started_at: dispatched_at,
            },
            &self.scope,
        )
        .await;
        self.progress.finished(&response);
        response
    }
}
