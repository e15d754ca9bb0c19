use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_bool_env, parse_delay_arg, parse_duration_arg, parse_header, parse_request_count,
};
use super::types::{HttpMethod, RequestCount};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "conreq",
    version,
    about = "Send a handful of concurrent HTTP requests to one endpoint and compare how the API responds."
)]
pub struct RequestArgs {
    /// Target URL
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// HTTP method (GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS)
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Number of concurrent requests (1-5)
    #[arg(
        long = "concurrent",
        short = 'c',
        default_value = "1",
        value_parser = parse_request_count
    )]
    pub concurrent: RequestCount,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body; prefix with @ to read it from a file
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Fixed request id sent with every request
    #[arg(long = "request-id")]
    pub request_id: Option<String>,

    /// Share one generated request id across all requests
    #[arg(long = "same-request-id")]
    pub same_request_id: bool,

    /// Header name carrying the request id
    #[arg(long = "request-id-header", default_value = super::DEFAULT_REQUEST_ID_HEADER)]
    pub request_id_header: String,

    /// Delay between request dispatches; request N waits N x delay (supports ns/us/ms/s/m/h)
    #[arg(long = "delay", default_value = "0s", value_parser = parse_delay_arg)]
    pub delay: Duration,

    /// Timeout for the whole run (supports ns/us/ms/s/m/h)
    #[arg(long = "timeout", default_value = "30s", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Hide response bodies in text output (ignored for JSON)
    #[arg(long = "no-body")]
    pub no_body: bool,

    /// Print the report as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Show live per-request progress on stderr
    #[arg(long = "stream")]
    pub stream: bool,

    /// Path to config file (TOML/JSON). Defaults to ./conreq.toml or ./conreq.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by CONREQ_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
