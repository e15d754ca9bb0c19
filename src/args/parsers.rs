use std::time::Duration;

use super::types::RequestCount;
use crate::error::{AppError, AppResult, ValidationError};

/// Parses a `Key: Value` header argument.
///
/// # Errors
///
/// Returns an error when the value has no `:` separator.
pub fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) => Ok((key.trim().to_owned(), value.trim().to_owned())),
        None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

pub(super) fn parse_request_count(s: &str) -> AppResult<RequestCount> {
    s.parse::<RequestCount>().map_err(AppError::from)
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

/// Parses a strictly positive duration such as `30s`, `250ms` or `1m30s`.
///
/// # Errors
///
/// Returns an error when the value is malformed or zero.
pub fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let duration = parse_delay_arg(s)?;
    if duration.is_zero() {
        return Err(AppError::validation(ValidationError::DurationZero));
    }
    Ok(duration)
}

/// Parses a non-negative duration; `0` and `0s` are accepted.
///
/// A bare number is read as seconds. Segments may be chained (`1m30s`).
///
/// # Errors
///
/// Returns an error when the value is malformed or overflows.
pub fn parse_delay_arg(s: &str) -> AppResult<Duration> {
    let value = s.trim();
    if value.is_empty() {
        return Err(AppError::validation(ValidationError::DurationEmpty));
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits_len = rest
            .char_indices()
            .find(|(_, ch)| !ch.is_ascii_digit())
            .map_or(rest.len(), |(idx, _)| idx);
        if digits_len == 0 {
            return Err(AppError::validation(
                ValidationError::InvalidDurationFormat {
                    value: value.to_owned(),
                },
            ));
        }
        let (num_part, after_num) = rest.split_at(digits_len);
        let unit_len = after_num
            .char_indices()
            .find(|(_, ch)| ch.is_ascii_digit())
            .map_or(after_num.len(), |(idx, _)| idx);
        let (unit_part, remaining) = after_num.split_at(unit_len);

        let number: u64 = num_part.parse().map_err(|err| {
            AppError::validation(ValidationError::InvalidDurationNumber {
                value: value.to_owned(),
                source: err,
            })
        })?;

        if unit_part.is_empty() && !remaining.is_empty() {
            return Err(AppError::validation(
                ValidationError::InvalidDurationFormat {
                    value: value.to_owned(),
                },
            ));
        }
        let unit = if unit_part.is_empty() { "s" } else { unit_part };
        let segment = duration_segment(number, unit)?;
        total = total
            .checked_add(segment)
            .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
        rest = remaining;
    }

    Ok(total)
}

fn duration_segment(number: u64, unit: &str) -> AppResult<Duration> {
    let overflow = || AppError::validation(ValidationError::DurationOverflow);
    let duration = match unit {
        "ns" => Duration::from_nanos(number),
        "us" | "µs" => Duration::from_micros(number),
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => Duration::from_secs(number.checked_mul(60).ok_or_else(overflow)?),
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|minutes| minutes.checked_mul(60))
                .ok_or_else(overflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(AppError::validation(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            }));
        }
    };
    Ok(duration)
}
