use std::time::Duration;

use super::types::DurationValue;
use crate::args::{parse_delay_arg, parse_duration_arg};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

pub(crate) fn parse_delay_value(value: &DurationValue, field: &'static str) -> AppResult<Duration> {
    match value {
        DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
        DurationValue::Text(text) => parse_delay_arg(text).map_err(|err| wrap(err, field)),
    }
}

pub(crate) fn parse_timeout_value(
    value: &DurationValue,
    field: &'static str,
) -> AppResult<Duration> {
    match value {
        DurationValue::Seconds(0) => Err(AppError::config(ConfigError::InvalidDuration {
            field,
            source: ValidationError::DurationZero,
        })),
        DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
        DurationValue::Text(text) => parse_duration_arg(text).map_err(|err| wrap(err, field)),
    }
}

fn wrap(err: AppError, field: &'static str) -> AppError {
    if let AppError::Validation(source) = err {
        AppError::config(ConfigError::InvalidDuration { field, source })
    } else {
        err
    }
}
