use std::io::Write;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::error::{AppError, AppResult, OutputError};
use crate::runner::{ProgressEvent, ProgressState};

const RULE_WIDTH: usize = 110;
const MIN_REQUEST_WIDTH: usize = "Request".len();

/// Renders progress events as one line each while a run is in flight.
pub struct ProgressPrinter<W: Write> {
    out: W,
    started: Instant,
    total: usize,
    request_width: usize,
    color: bool,
}

impl<W: Write> ProgressPrinter<W> {
    #[must_use]
    pub fn new(out: W, total: usize, color: bool) -> Self {
        let digits = total.saturating_sub(1).to_string().len();
        Self {
            out,
            started: Instant::now(),
            total,
            request_width: digits.saturating_add(MIN_REQUEST_WIDTH).max(MIN_REQUEST_WIDTH),
            color,
        }
    }

    /// Prints the banner and the column header.
    ///
    /// # Errors
    ///
    /// Returns an error when the writer fails.
    pub fn start(&mut self) -> AppResult<()> {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S");
        let header = format!(
            "{:<10} {:<12} | {:<width$}  {} {:<7}  {:>4}  {:>9}  {}",
            "+Time",
            "Time",
            "Request",
            " ",
            "Status",
            "Code",
            "Duration",
            "Request-ID",
            width = self.request_width
        );
        let banner = format!(
            "Starting {} concurrent requests at {}\n\n{}\n{}\n",
            self.total,
            now,
            header,
            "-".repeat(RULE_WIDTH)
        );
        self.print(None, &banner)
    }

    /// Prints one event line.
    ///
    /// # Errors
    ///
    /// Returns an error when the writer fails.
    pub fn event(&mut self, event: &ProgressEvent) -> AppResult<()> {
        let (icon, label, color) = describe(event);
        let code = match event.state {
            ProgressState::Completed => event
                .status
                .map_or_else(|| "-".to_owned(), |status| status.to_string()),
            ProgressState::Pending | ProgressState::Running | ProgressState::Failed => {
                "-".to_owned()
            }
        };
        let duration = event
            .duration
            .filter(|_duration| event.state == ProgressState::Completed)
            .map_or_else(|| "-".to_owned(), format_elapsed);
        let request = format!("Request {}", event.index);
        let line = format!(
            "[{:>8}] {} | {:<width$}  {} {:<7}  {:>4}  {:>9}  {}\n",
            format_elapsed(self.started.elapsed()),
            event.at.with_timezone(&Local).format("%H:%M:%S%.3f"),
            request,
            icon,
            label,
            code,
            duration,
            event.correlation_id,
            width = self.request_width
        );
        self.print(Some(color), &line)
    }

    /// Prints the completion line.
    ///
    /// # Errors
    ///
    /// Returns an error when the writer fails.
    pub fn finish(&mut self) -> AppResult<()> {
        let line = format!(
            "\nAll requests completed in {} at {}\n{}\n",
            format_elapsed(self.started.elapsed()),
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(RULE_WIDTH)
        );
        self.print(None, &line)
    }

    /// Hands back the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, color: Option<Color>, text: &str) -> AppResult<()> {
        let result = match color {
            Some(color) if self.color => queue!(
                self.out,
                SetForegroundColor(color),
                Print(text),
                ResetColor
            ),
            Some(_) | None => queue!(self.out, Print(text)),
        };
        result
            .and_then(|()| self.out.flush())
            .map_err(|err| AppError::output(OutputError::Progress { source: err }))
    }
}

fn describe(event: &ProgressEvent) -> (&'static str, String, Color) {
    match event.state {
        ProgressState::Pending => (".", "PENDING".to_owned(), Color::DarkGrey),
        ProgressState::Running => (">", "RUNNING".to_owned(), Color::Cyan),
        ProgressState::Completed => match event.status.unwrap_or_default() {
            500.. => ("x", "DONE".to_owned(), Color::Red),
            400..=499 => ("!", "DONE".to_owned(), Color::Yellow),
            0..=399 => ("+", "DONE".to_owned(), Color::Green),
        },
        ProgressState::Failed => {
            let label = event
                .error
                .as_ref()
                .map_or_else(|| "FAILED".to_owned(), |err| format!("FAILED: {}", err));
            ("x", label, Color::Red)
        }
    }
}

/// `µs` below a millisecond, `ms` below a second, seconds with two decimals
/// above.
#[must_use]
pub fn format_elapsed(duration: Duration) -> String {
    if duration < Duration::from_millis(1) {
        return format!("{}µs", duration.as_micros());
    }
    if duration < Duration::from_secs(1) {
        return format!("{}ms", duration.as_millis());
    }
    let centis = duration.subsec_millis().checked_div(10).unwrap_or_default();
    format!("{}.{:02}s", duration.as_secs(), centis)
}
