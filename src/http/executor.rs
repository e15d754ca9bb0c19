use chrono::{DateTime, Utc};
use reqwest::{Client, Request, Response};
use tokio::time::Instant;
use tracing::debug;

use crate::config::RequestConfig;
use crate::error::RequestError;
use crate::runner::RunScope;

use super::request::build_request;
use super::response::SingleResponse;

/// Identity of one dispatched request.
#[derive(Debug, Clone, Copy)]
pub struct Dispatch<'a> {
    pub index: usize,
    pub correlation_id: Option<&'a str>,
    /// Wall-clock dispatch time, recorded as the response start.
    pub started_at: DateTime<Utc>,
}

/// Performs exactly one HTTP round trip.
///
/// Never fails: build, transport, deadline and cancellation failures are all
/// recorded in the returned response. The round trip, body read included,
/// is raced against `scope` and dropped as soon as the scope is interrupted.
pub async fn execute(
    client: &Client,
    config: &RequestConfig,
    dispatch: Dispatch<'_>,
    scope: &RunScope,
) -> SingleResponse {
    let Dispatch {
        index,
        correlation_id,
        started_at,
    } = dispatch;
    let started = Instant::now();
    let mut response = SingleResponse::new(
        index,
        correlation_id.unwrap_or_default().to_owned(),
        started_at,
    );

    let request = match build_request(client, config, correlation_id) {
        Ok(request) => request,
        Err(err) => {
            response.error = Some(err);
            response.duration = started.elapsed();
            return response;
        }
    };

    let outcome = tokio::select! {
        biased;
        err = scope.interrupted() => Err(err),
        result = round_trip(client, request, config, &mut response) => result,
    };

    response.duration = started.elapsed();
    if let Err(err) = outcome {
        debug!(
            "Request {} failed after {:?}: {}",
            index, response.duration, err
        );
        response.error = Some(err);
    }
    response
}

async fn round_trip(
    client: &Client,
    request: Request,
    config: &RequestConfig,
    response: &mut SingleResponse,
) -> Result<(), RequestError> {
    let received = client
        .execute(request)
        .await
        .map_err(|err| RequestError::from_send(&err))?;
    record_head(&received, config, response);

    let body = received
        .bytes()
        .await
        .map_err(|err| RequestError::from_body(&err))?;
    response.body = String::from_utf8_lossy(&body).into_owned();
    Ok(())
}

fn record_head(received: &Response, config: &RequestConfig, response: &mut SingleResponse) {
    let status = received.status();
    response.status = Some(status.as_u16());
    response.status_text = status.canonical_reason().unwrap_or("Unknown").to_owned();

    for (name, value) in received.headers() {
        response
            .headers
            .entry(name.as_str().to_owned())
            .or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    if let Some(echo) = received.headers().get(&config.correlation_header) {
        let echoed = String::from_utf8_lossy(echo.as_bytes()).into_owned();
        if !echoed.is_empty() {
            response.correlation_id = echoed;
        }
    }
}
