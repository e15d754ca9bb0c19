use super::progress::format_elapsed;
use super::*;
use crate::config::RequestConfig;
use crate::error::RequestError;
use crate::http::SingleResponse;
use crate::runner::{ProgressEvent, ProgressState, RunResult};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use url::Url;

fn config() -> Result<RequestConfig, String> {
    let url = Url::parse("http://localhost:3000/api").map_err(|err| err.to_string())?;
    let mut config = RequestConfig::new(url);
    config.count = crate::args::RequestCount::try_from(3_u64).map_err(|err| err.to_string())?;
    Ok(config)
}

fn ok(index: usize, status: u16, millis: u64, body: &str) -> SingleResponse {
    let mut response = SingleResponse::new(index, format!("id-{}", index), Utc::now());
    response.status = Some(status);
    response.status_text = "OK".to_owned();
    response.body = body.to_owned();
    response.duration = Duration::from_millis(millis);
    response
        .headers
        .insert("content-type".to_owned(), "application/json".to_owned());
    response
}

fn failed(index: usize, error: RequestError) -> SingleResponse {
    let mut response = SingleResponse::new(index, format!("id-{}", index), Utc::now());
    response.duration = Duration::from_millis(30);
    response.error = Some(error);
    response
}

fn run_result(config: RequestConfig, responses: Vec<SingleResponse>) -> RunResult {
    let now = Utc::now();
    RunResult {
        responses,
        started_at: now,
        finished_at: now,
        config: Arc::new(config),
    }
}

fn mixed_result() -> Result<RunResult, String> {
    Ok(run_result(
        config()?,
        vec![
            failed(2, RequestError::Timeout),
            ok(0, 200, 100, "{\"ok\":true}"),
            ok(1, 404, 40, "missing"),
        ],
    ))
}

#[test]
fn text_report_lists_results_in_index_order() -> Result<(), String> {
    let text = render_text(&mixed_result()?).map_err(|err| err.to_string())?;

    for expected in [
        "=== Request Summary ===\nURL: http://localhost:3000/api\nMethod: GET\nConcurrent: 3\nTotal Requests: 3\n",
        "| Status: 200 | Time: 100ms | X-Request-ID: id-0\n{\"ok\":true}\n",
        "| Status: 404 | Time: 40ms | X-Request-ID: id-1\nmissing\n",
        "| Status: ERROR | Time: 30ms | X-Request-ID: id-2\nError: deadline exceeded\n",
        "Success: 1/3 (33.3%)",
        "2xx (Success): 1\n4xx (Client Error): 1\nNetwork/Timeout Errors: 1\n",
        "Failed: 1/3 (33.3%)",
        "Average Response Time: 100ms",
    ] {
        if !text.contains(expected) {
            return Err(format!("Missing '{}' in:\n{}", expected, text));
        }
    }
    let first = text.find("[1] ").ok_or_else(|| "Missing [1]".to_owned())?;
    let third = text.find("[3] ").ok_or_else(|| "Missing [3]".to_owned())?;
    if first > third {
        return Err("Results are not in index order".to_owned());
    }
    if text.contains("3xx") || text.contains("5xx") {
        return Err("Zero buckets should be omitted".to_owned());
    }
    Ok(())
}

#[test]
fn text_report_respects_no_body_and_keeps_body_read_status() -> Result<(), String> {
    let mut config = config()?;
    config.no_body = true;
    let mut truncated = ok(1, 200, 10, "");
    truncated.error = Some(RequestError::BodyRead {
        message: "unexpected eof".to_owned(),
    });
    let result = run_result(config, vec![ok(0, 200, 10, "secret"), truncated]);

    let text = render_text(&result).map_err(|err| err.to_string())?;
    if text.contains("secret") || !text.contains("[Body omitted]") {
        return Err(format!("Body should be omitted:\n{}", text));
    }
    if !text.contains(
        "| Status: 200 | Time: 10ms | X-Request-ID: id-1\nError: failed to read response body: unexpected eof",
    ) {
        return Err(format!("Body read failure should show status and error:\n{}", text));
    }
    if !text.contains("Success: 1/2 (50.0%)") {
        return Err(format!("Unexpected summary:\n{}", text));
    }
    Ok(())
}

#[test]
fn json_report_structure() -> Result<(), String> {
    let mut config = config()?;
    config.body = Some("{\"a\":1}".to_owned());
    let result = run_result(
        config,
        vec![
            failed(2, RequestError::Timeout),
            ok(0, 200, 100, "{\"ok\":true}"),
            ok(1, 404, 40, "missing"),
        ],
    );
    let rendered = render_json(&result).map_err(|err| err.to_string())?;
    let value: serde_json::Value =
        serde_json::from_str(&rendered).map_err(|err| err.to_string())?;

    if value["metadata"]["total_requests"] != 3 || value["metadata"]["method"] != "GET" {
        return Err(format!("Unexpected metadata: {}", value["metadata"]));
    }
    let results = value["results"]
        .as_array()
        .ok_or_else(|| "results should be an array".to_owned())?;
    let indices: Vec<_> = results.iter().map(|r| r["index"].as_u64()).collect();
    if indices != [Some(1), Some(2), Some(3)] {
        return Err(format!("Unexpected indices: {:?}", indices));
    }
    let first = results
        .first()
        .ok_or_else(|| "Missing first result".to_owned())?;
    if first["request"]["headers"]["x-request-id"] != "id-0"
        || first["request"]["headers"]["content-type"] != "application/json"
        || first["request"]["body"] != "{\"a\":1}"
    {
        return Err(format!("Unexpected request: {}", first["request"]));
    }
    if first["response"]["status_code"] != 200 || !first["error"].is_null() {
        return Err(format!("Unexpected first result: {}", first));
    }
    let timed_out = results
        .get(2)
        .ok_or_else(|| "Missing third result".to_owned())?;
    if !timed_out["response"].is_null()
        || timed_out["error"] != "request timeout: deadline exceeded"
    {
        return Err(format!("Unexpected timeout result: {}", timed_out));
    }

    let summary = &value["summary"];
    if summary["total"] != 3 || summary["successful"] != 1 || summary["failed"] != 2 {
        return Err(format!("Unexpected summary counts: {}", summary));
    }
    if summary["success_rate"].to_string() != "33.33" {
        return Err(format!("Unexpected success rate: {}", summary["success_rate"]));
    }
    if summary["status_codes"]["404"] != 1
        || summary["status_code_breakdown"]["network_errors"] != 1
    {
        return Err(format!("Unexpected breakdown: {}", summary));
    }
    if summary["average_duration_ms"] != 100 || summary["min_duration_ms"] != 100 {
        return Err(format!("Unexpected durations: {}", summary));
    }
    Ok(())
}

#[test]
fn json_body_is_null_without_payload() -> Result<(), String> {
    let result = run_result(config()?, vec![ok(0, 204, 5, "")]);
    let rendered = render(&result, ReportFormat::Json).map_err(|err| err.to_string())?;
    let value: serde_json::Value =
        serde_json::from_str(&rendered).map_err(|err| err.to_string())?;
    if !value["results"][0]["request"]["body"].is_null() {
        return Err("Expected null request body".to_owned());
    }
    if value["results"][0]["request"]["headers"]
        .get("content-type")
        .is_some()
    {
        return Err("No content type expected without body".to_owned());
    }
    Ok(())
}

#[test]
fn progress_lines_are_plain_without_color() -> Result<(), String> {
    let mut printer = ProgressPrinter::new(Vec::new(), 2, false);
    printer.start().map_err(|err| err.to_string())?;
    let now = Utc::now();
    let events = [
        ProgressEvent {
            index: 0,
            correlation_id: "id-0".to_owned(),
            state: ProgressState::Pending,
            status: None,
            error: None,
            at: now,
            started_at: None,
            duration: None,
        },
        ProgressEvent {
            index: 0,
            correlation_id: "id-0".to_owned(),
            state: ProgressState::Completed,
            status: Some(201),
            error: None,
            at: now,
            started_at: Some(now),
            duration: Some(Duration::from_millis(42)),
        },
        ProgressEvent {
            index: 1,
            correlation_id: "id-1".to_owned(),
            state: ProgressState::Failed,
            status: None,
            error: Some(RequestError::Cancelled),
            at: now,
            started_at: Some(now),
            duration: Some(Duration::ZERO),
        },
    ];
    for event in &events {
        printer.event(event).map_err(|err| err.to_string())?;
    }
    printer.finish().map_err(|err| err.to_string())?;

    let output = String::from_utf8(printer.into_inner()).map_err(|err| err.to_string())?;
    for expected in [
        "Starting 2 concurrent requests",
        "Request-ID",
        "PENDING",
        "DONE",
        " 201 ",
        "42ms",
        "FAILED: request cancelled",
        "All requests completed",
    ] {
        if !output.contains(expected) {
            return Err(format!("Missing '{}' in:\n{}", expected, output));
        }
    }
    if output.contains('\u{1b}') {
        return Err("Unexpected escape sequences without color".to_owned());
    }
    Ok(())
}

#[test]
fn elapsed_formatting() -> Result<(), String> {
    let cases = [
        (Duration::from_micros(250), "250µs"),
        (Duration::from_millis(42), "42ms"),
        (Duration::from_millis(1_234), "1.23s"),
        (Duration::from_secs(12), "12.00s"),
    ];
    for (duration, expected) in cases {
        let formatted = format_elapsed(duration);
        if formatted != expected {
            return Err(format!("{:?}: expected {}, got {}", duration, expected, formatted));
        }
    }
    Ok(())
}

#[test]
fn write_report_to_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("report.txt");
    std::fs::write(&path, "stale content that is longer").map_err(|err| err.to_string())?;

    write_report("fresh\n", Some(&path)).map_err(|err| err.to_string())?;
    let content = std::fs::read_to_string(&path).map_err(|err| err.to_string())?;
    if content != "fresh\n" {
        return Err(format!("Unexpected file content: {:?}", content));
    }

    let missing = dir.path().join("missing").join("report.txt");
    if write_report("x", Some(&missing)).is_ok() {
        return Err("Expected create failure for missing directory".to_owned());
    }
    Ok(())
}

#[test]
fn success_rate_keeps_two_decimals() -> Result<(), String> {
    for (bp, expected) in [(10_000, "100.00"), (6_667, "66.67"), (5, "0.05"), (0, "0.00")] {
        let text = serde_json::to_string(&super::json::Percent(bp)).map_err(|err| err.to_string())?;
        if text != expected {
            return Err(format!("Unexpected rate for {} bp: {}", bp, text));
        }
    }
    Ok(())
}
