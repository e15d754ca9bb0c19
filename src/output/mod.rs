//! Report rendering and delivery.
mod json;
mod progress;
mod text;

#[cfg(test)]
mod tests;

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::error::{AppError, AppResult, OutputError};
use crate::runner::RunResult;

pub use json::render_json;
pub use progress::ProgressPrinter;
pub use text::render_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Renders the full report for a finished run.
///
/// # Errors
///
/// Returns an error when the report cannot be formatted or serialized.
pub fn render(result: &RunResult, format: ReportFormat) -> AppResult<String> {
    match format {
        ReportFormat::Text => render_text(result),
        ReportFormat::Json => render_json(result),
    }
}

/// Writes a rendered report to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error when the file cannot be created or the write fails.
pub fn write_report(report: &str, path: Option<&Path>) -> AppResult<()> {
    match path {
        Some(path) => {
            let mut file = std::fs::File::create(path).map_err(|err| {
                AppError::output(OutputError::CreateFile {
                    path: path.to_path_buf(),
                    source: err,
                })
            })?;
            write_all(&mut file, report)
        }
        None => write_all(&mut std::io::stdout().lock(), report),
    }
}

fn write_all<W: Write>(out: &mut W, report: &str) -> AppResult<()> {
    out.write_all(report.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|err| AppError::output(OutputError::Write { source: err }))
}

pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
