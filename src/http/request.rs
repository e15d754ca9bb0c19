use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Request};

use crate::config::RequestConfig;
use crate::error::RequestError;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Headers sent with one request.
///
/// Configured headers come first. A body without an explicit content type
/// defaults to JSON, and the correlation header, when an id is supplied,
/// replaces any configured header of the same name.
///
/// # Errors
///
/// Returns [`RequestError::Build`] when the correlation id is not a valid
/// header value.
pub fn outgoing_headers(
    config: &RequestConfig,
    correlation_id: Option<&str>,
) -> Result<HeaderMap, RequestError> {
    let mut headers = config.headers.clone();
    if config.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    }
    if let Some(id) = correlation_id {
        let value = HeaderValue::from_str(id).map_err(|err| RequestError::Build {
            message: format!("invalid correlation id '{}': {}", id, err),
        })?;
        headers.insert(config.correlation_header.clone(), value);
    }
    Ok(headers)
}

/// Builds the outgoing request for one execution unit.
///
/// # Errors
///
/// Returns [`RequestError::Build`] when headers or the request itself cannot
/// be constructed.
pub fn build_request(
    client: &Client,
    config: &RequestConfig,
    correlation_id: Option<&str>,
) -> Result<Request, RequestError> {
    let headers = outgoing_headers(config, correlation_id)?;
    let mut builder = client
        .request(config.method.to_method(), config.url.clone())
        .headers(headers);
    if let Some(body) = config.body.as_ref() {
        builder = builder.body(body.clone());
    }
    builder.build().map_err(|err| RequestError::from_send(&err))
}
