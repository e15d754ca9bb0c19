use std::fmt::Write as _;

use chrono::Local;

use crate::error::{AppError, AppResult, OutputError};
use crate::http::SingleResponse;
use crate::runner::{RunResult, format_bp};

use super::duration_ms;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Plain text report: request summary, per-request results in index order,
/// then the aggregated summary.
///
/// # Errors
///
/// Returns an error when the report cannot be formatted.
pub fn render_text(result: &RunResult) -> AppResult<String> {
    let mut out = String::new();
    write_text(&mut out, result)
        .map_err(|err| AppError::output(OutputError::Format { source: err }))?;
    Ok(out)
}

fn write_text(out: &mut String, result: &RunResult) -> std::fmt::Result {
    let config = &result.config;
    writeln!(out, "=== Request Summary ===")?;
    writeln!(out, "URL: {}", config.url)?;
    writeln!(out, "Method: {}", config.method.as_str())?;
    writeln!(out, "Concurrent: {}", config.count())?;
    writeln!(out, "Total Requests: {}", result.total())?;

    writeln!(out)?;
    writeln!(out, "=== Results ===")?;
    let sorted = result.sorted_by_index();
    for (position, response) in sorted.iter().enumerate() {
        if position > 0 {
            writeln!(out)?;
        }
        write_entry(out, response, &config.correlation_label, config.no_body)?;
    }

    write_summary(out, result)
}

fn write_entry(
    out: &mut String,
    response: &SingleResponse,
    header_label: &str,
    no_body: bool,
) -> std::fmt::Result {
    let status = response
        .status
        .map_or_else(|| "ERROR".to_owned(), |code| code.to_string());
    writeln!(
        out,
        "[{}] {} | Status: {} | Time: {}ms | {}: {}",
        response.request_index.saturating_add(1),
        response
            .started_at
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT),
        status,
        duration_ms(response.duration),
        header_label,
        response.correlation_id
    )?;

    if let Some(err) = response.error.as_ref() {
        return writeln!(out, "Error: {}", err);
    }
    if no_body {
        writeln!(out, "[Body omitted]")
    } else {
        writeln!(out, "{}", response.body)
    }
}

fn write_summary(out: &mut String, result: &RunResult) -> std::fmt::Result {
    let total = result.total();
    let success = result.success_count();
    let errors = result.error_count();

    writeln!(out)?;
    writeln!(out, "=== Summary ===")?;
    writeln!(
        out,
        "Success: {}/{} ({}%)",
        success,
        total,
        format_bp(result.success_rate_bp())
    )?;

    writeln!(out)?;
    writeln!(out, "=== Status Code Breakdown ===")?;
    for (count, label) in [
        (result.count_2xx(), "2xx (Success)"),
        (result.count_3xx(), "3xx (Redirect)"),
        (result.count_4xx(), "4xx (Client Error)"),
        (result.count_5xx(), "5xx (Server Error)"),
        (errors, "Network/Timeout Errors"),
    ] {
        if count > 0 {
            writeln!(out, "{}: {}", label, count)?;
        }
    }

    if errors > 0 {
        writeln!(
            out,
            "Failed: {}/{} ({}%)",
            errors,
            total,
            format_bp(result.error_rate_bp())
        )?;
    }
    if success > 0 {
        writeln!(
            out,
            "Average Response Time: {}ms",
            duration_ms(result.average_duration())
        )?;
    }
    Ok(())
}
