use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::RequestConfig;
use crate::http::SingleResponse;

/// Denominator of rates expressed in basis points.
pub const BASIS_POINTS: u64 = 10_000;

/// Completed run: every response in arrival order plus run timestamps.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub responses: Vec<SingleResponse>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config: Arc<RequestConfig>,
}

impl RunResult {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.responses.len()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.responses.iter().any(SingleResponse::is_error)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_error()).count()
    }

    /// Responses without error and with a 2xx status.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    #[must_use]
    pub fn count_2xx(&self) -> usize {
        self.count_class(2)
    }

    #[must_use]
    pub fn count_3xx(&self) -> usize {
        self.count_class(3)
    }

    #[must_use]
    pub fn count_4xx(&self) -> usize {
        self.count_class(4)
    }

    #[must_use]
    pub fn count_5xx(&self) -> usize {
        self.count_class(5)
    }

    /// Mean duration of successful responses, zero when there are none.
    #[must_use]
    pub fn average_duration(&self) -> Duration {
        let (total, count) = self
            .successes()
            .fold((Duration::ZERO, 0_u32), |(total, count), response| {
                (
                    total.saturating_add(response.duration),
                    count.saturating_add(1),
                )
            });
        total.checked_div(count).unwrap_or_default()
    }

    #[must_use]
    pub fn min_duration(&self) -> Option<Duration> {
        self.successes().map(|response| response.duration).min()
    }

    #[must_use]
    pub fn max_duration(&self) -> Option<Duration> {
        self.successes().map(|response| response.duration).max()
    }

    /// Occurrences of each status code among error-free responses.
    #[must_use]
    pub fn status_code_counts(&self) -> BTreeMap<u16, usize> {
        let mut counts = BTreeMap::new();
        for response in &self.responses {
            if response.is_error() {
                continue;
            }
            if let Some(status) = response.status {
                let entry = counts.entry(status).or_insert(0_usize);
                *entry = entry.saturating_add(1);
            }
        }
        counts
    }

    /// Share of successful responses in basis points.
    #[must_use]
    pub fn success_rate_bp(&self) -> u64 {
        rate_bp(self.success_count(), self.total())
    }

    /// Share of errored responses in basis points.
    #[must_use]
    pub fn error_rate_bp(&self) -> u64 {
        rate_bp(self.error_count(), self.total())
    }

    /// Wall-clock span of the whole run.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.finished_at
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn sorted_by_index(&self) -> Vec<&SingleResponse> {
        let mut sorted: Vec<&SingleResponse> = self.responses.iter().collect();
        sorted.sort_by_key(|response| response.request_index);
        sorted
    }

    fn successes(&self) -> impl Iterator<Item = &SingleResponse> {
        self.responses.iter().filter(|r| r.is_success())
    }

    fn count_class(&self, class: u16) -> usize {
        self.responses
            .iter()
            .filter(|response| response.status_class() == Some(class))
            .count()
    }
}

fn rate_bp(part: usize, total: usize) -> u64 {
    let part = u64::try_from(part).unwrap_or(u64::MAX);
    let total = u64::try_from(total).unwrap_or(u64::MAX);
    part.saturating_mul(BASIS_POINTS)
        .checked_div(total)
        .unwrap_or_default()
}

/// Formats basis points as a percentage with one decimal, e.g. `66.7`.
#[must_use]
pub fn format_bp(bp: u64) -> String {
    let rounded = bp.saturating_add(5).checked_div(10).unwrap_or_default();
    format!(
        "{}.{}",
        rounded.checked_div(10).unwrap_or_default(),
        rounded.checked_rem(10).unwrap_or_default()
    )
}
