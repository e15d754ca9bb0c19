use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::args::{DEFAULT_REQUEST_ID_HEADER, HttpMethod, RequestArgs, RequestCount};
use crate::error::{AppError, AppResult, ValidationError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How correlation ids are assigned to the requests of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrelationMode {
    /// Every request generates its own id.
    PerRequest,
    /// One id is generated before dispatch and sent with every request.
    Shared,
    /// A caller-supplied id is sent with every request.
    Fixed(String),
}

/// Validated, read-only description of a run.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub url: Url,
    pub method: HttpMethod,
    pub count: RequestCount,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub correlation: CorrelationMode,
    pub correlation_header: HeaderName,
    /// Correlation header name as the user spelled it, for reports.
    pub correlation_label: String,
    pub delay: Duration,
    pub timeout: Duration,
    /// Consumed by the text report only.
    pub no_body: bool,
}

impl RequestConfig {
    /// Single GET with per-request correlation ids and default timeouts.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: HttpMethod::Get,
            count: RequestCount::default(),
            headers: HeaderMap::new(),
            body: None,
            correlation: CorrelationMode::PerRequest,
            correlation_header: HeaderName::from_static("x-request-id"),
            correlation_label: DEFAULT_REQUEST_ID_HEADER.to_owned(),
            delay: Duration::ZERO,
            timeout: DEFAULT_TIMEOUT,
            no_body: false,
        }
    }

    /// Builds a validated configuration from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL, headers, request id, or body source are
    /// invalid.
    pub fn from_args(args: &RequestArgs) -> AppResult<Self> {
        let raw_url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        let url = parse_target_url(raw_url)?;

        let mut headers = HeaderMap::with_capacity(args.headers.len());
        for (key, value) in &args.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
                AppError::validation(ValidationError::InvalidHeaderName {
                    header: key.clone(),
                    source: err,
                })
            })?;
            let value = HeaderValue::from_str(value).map_err(|err| {
                AppError::validation(ValidationError::InvalidHeaderValue {
                    header: key.clone(),
                    source: err,
                })
            })?;
            headers.insert(name, value);
        }

        let header_name = if args.request_id_header.trim().is_empty() {
            DEFAULT_REQUEST_ID_HEADER
        } else {
            args.request_id_header.trim()
        };
        let correlation_header = HeaderName::from_bytes(header_name.as_bytes()).map_err(|err| {
            AppError::validation(ValidationError::InvalidRequestIdHeader {
                header: header_name.to_owned(),
                source: err,
            })
        })?;

        let correlation = match args.request_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => {
                HeaderValue::from_str(id).map_err(|err| {
                    AppError::validation(ValidationError::InvalidRequestId {
                        value: id.to_owned(),
                        source: err,
                    })
                })?;
                CorrelationMode::Fixed(id.to_owned())
            }
            None if args.same_request_id => CorrelationMode::Shared,
            None => CorrelationMode::PerRequest,
        };

        let body = match args.data.as_deref() {
            Some(data) => read_body(data)?,
            None => None,
        };

        if args.timeout.is_zero() {
            return Err(AppError::validation(ValidationError::DurationZero));
        }

        Ok(Self {
            url,
            method: args.method,
            count: args.concurrent,
            headers,
            body,
            correlation,
            correlation_header,
            correlation_label: header_name.to_owned(),
            delay: args.delay,
            timeout: args.timeout,
            no_body: args.no_body,
        })
    }

    /// Number of requests in the run.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count.get()
    }
}

fn parse_target_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::validation(
                ValidationError::UnsupportedUrlScheme {
                    scheme: other.to_owned(),
                },
            ));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(ValidationError::UrlMissingHost));
    }
    Ok(url)
}

/// Resolves `-d` input; `@path` reads the body from a file, empty means none.
fn read_body(data: &str) -> AppResult<Option<String>> {
    if let Some(path) = data.strip_prefix('@') {
        if path.is_empty() {
            return Err(AppError::validation(ValidationError::BodyFilePathEmpty));
        }
        let content = std::fs::read_to_string(path).map_err(|err| {
            AppError::validation(ValidationError::ReadBodyFile {
                path: path.to_owned(),
                source: err,
            })
        })?;
        return Ok(if content.is_empty() {
            None
        } else {
            Some(content)
        });
    }
    if data.is_empty() {
        return Ok(None);
    }
    Ok(Some(data.to_owned()))
}
