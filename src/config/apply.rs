use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{RequestArgs, RequestCount, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::parse::{parse_delay_value, parse_timeout_value};
use super::types::ConfigFile;

/// Applies configuration values to CLI arguments that were not given on the
/// command line.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut RequestArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "concurrent")
        && let Some(value) = config.concurrent
    {
        args.concurrent = RequestCount::try_from(value)?;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        args.headers = parse_headers(headers)?;
    }

    if !is_cli(matches, "data")
        && let Some(data) = config.data.clone()
    {
        args.data = Some(data);
    }

    if !is_cli(matches, "request_id")
        && let Some(request_id) = config.request_id.clone()
    {
        args.request_id = Some(request_id);
    }

    if !is_cli(matches, "same_request_id")
        && let Some(value) = config.same_request_id
    {
        args.same_request_id = value;
    }

    if !is_cli(matches, "request_id_header")
        && let Some(header) = config.request_id_header.clone()
    {
        args.request_id_header = header;
    }

    if !is_cli(matches, "delay")
        && let Some(delay) = config.delay.as_ref()
    {
        args.delay = parse_delay_value(delay, "delay")?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = parse_timeout_value(timeout, "timeout")?;
    }

    if !is_cli(matches, "no_body")
        && let Some(value) = config.no_body
    {
        args.no_body = value;
    }

    if !is_cli(matches, "json")
        && let Some(value) = config.json
    {
        args.json = value;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = Some(output);
    }

    if !is_cli(matches, "stream")
        && let Some(value) = config.stream
    {
        args.stream = value;
    }

    if !is_cli(matches, "no_color")
        && let Some(value) = config.no_color
    {
        args.no_color = value;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn parse_headers(headers: &[String]) -> AppResult<Vec<(String, String)>> {
    let mut parsed = Vec::with_capacity(headers.len());
    for header in headers {
        parsed.push(
            parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
        );
    }
    Ok(parsed)
}
