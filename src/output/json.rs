use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::{AppError, AppResult, OutputError, RequestError};
use crate::http::{SingleResponse, outgoing_headers};
use crate::runner::RunResult;

use super::duration_ms;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    metadata: Metadata<'a>,
    results: Vec<JsonResult<'a>>,
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    url: &'a str,
    method: &'static str,
    concurrent: usize,
    total_requests: usize,
    started_at: String,
    completed_at: String,
    total_duration_ms: u64,
}

#[derive(Debug, Serialize)]
struct JsonResult<'a> {
    index: usize,
    request_id: &'a str,
    started_at: String,
    completed_at: String,
    duration_ms: u64,
    request: JsonRequest<'a>,
    response: Option<JsonResponse<'a>>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonRequest<'a> {
    method: &'static str,
    url: &'a str,
    headers: BTreeMap<String, String>,
    body: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct JsonResponse<'a> {
    status_code: u16,
    status_text: &'a str,
    headers: &'a BTreeMap<String, String>,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct Summary {
    total: usize,
    successful: usize,
    failed: usize,
    success_rate: Percent,
    average_duration_ms: u64,
    min_duration_ms: u64,
    max_duration_ms: u64,
    status_codes: BTreeMap<String, usize>,
    status_code_breakdown: Breakdown,
}

#[derive(Debug, Serialize)]
struct Breakdown {
    #[serde(rename = "2xx")]
    count_2xx: usize,
    #[serde(rename = "3xx")]
    count_3xx: usize,
    #[serde(rename = "4xx")]
    count_4xx: usize,
    #[serde(rename = "5xx")]
    count_5xx: usize,
    network_errors: usize,
}

/// Pretty-printed JSON report with metadata, per-request results in index
/// order and a summary.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(result: &RunResult) -> AppResult<String> {
    let config = &result.config;
    let report = JsonReport {
        metadata: Metadata {
            url: config.url.as_str(),
            method: config.method.as_str(),
            concurrent: config.count(),
            total_requests: result.total(),
            started_at: timestamp(result.started_at),
            completed_at: timestamp(result.finished_at),
            total_duration_ms: duration_ms(result.total_duration()),
        },
        results: result
            .sorted_by_index()
            .into_iter()
            .map(|response| json_result(result, response))
            .collect(),
        summary: summary(result),
    };

    let mut rendered = serde_json::to_string_pretty(&report)
        .map_err(|err| AppError::output(OutputError::SerializeJson { source: err }))?;
    rendered.push('\n');
    Ok(rendered)
}

fn json_result<'a>(result: &'a RunResult, response: &'a SingleResponse) -> JsonResult<'a> {
    let config = &result.config;
    let sent_id =
        (!response.correlation_id.is_empty()).then_some(response.correlation_id.as_str());
    let headers = outgoing_headers(config, sent_id)
        .map(|headers| {
            headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_owned(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    JsonResult {
        index: response.request_index.saturating_add(1),
        request_id: &response.correlation_id,
        started_at: timestamp(response.started_at),
        completed_at: timestamp(response.completed_at()),
        duration_ms: duration_ms(response.duration),
        request: JsonRequest {
            method: config.method.as_str(),
            url: config.url.as_str(),
            headers,
            body: config.body.as_deref(),
        },
        response: response.status.map(|status_code| JsonResponse {
            status_code,
            status_text: &response.status_text,
            headers: &response.headers,
            body: &response.body,
        }),
        error: response.error.as_ref().map(error_message),
    }
}

fn error_message(err: &RequestError) -> String {
    match err {
        RequestError::Timeout => format!("request timeout: {}", err),
        RequestError::Build { .. }
        | RequestError::Connect { .. }
        | RequestError::Transport { .. }
        | RequestError::Cancelled
        | RequestError::BodyRead { .. } => err.to_string(),
    }
}

fn summary(result: &RunResult) -> Summary {
    let successful = result.success_count();
    let total = result.total();
    Summary {
        total,
        successful,
        failed: total.saturating_sub(successful),
        success_rate: Percent(result.success_rate_bp()),
        average_duration_ms: duration_ms(result.average_duration()),
        min_duration_ms: result.min_duration().map_or(0, duration_ms),
        max_duration_ms: result.max_duration().map_or(0, duration_ms),
        status_codes: result
            .status_code_counts()
            .into_iter()
            .map(|(code, count)| (code.to_string(), count))
            .collect(),
        status_code_breakdown: Breakdown {
            count_2xx: result.count_2xx(),
            count_3xx: result.count_3xx(),
            count_4xx: result.count_4xx(),
            count_5xx: result.count_5xx(),
            network_errors: result.error_count(),
        },
    }
}

/// Basis points written as a JSON number with exactly two decimals.
#[derive(Debug, Clone, Copy)]
pub(super) struct Percent(pub(super) u64);

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let whole = self.0.checked_div(100).unwrap_or_default();
        let fraction = self.0.checked_rem(100).unwrap_or_default();
        let raw = RawValue::from_string(format!("{}.{:02}", whole, fraction))
            .map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
