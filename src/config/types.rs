use serde::Deserialize;

use crate::args::HttpMethod;

/// On-disk configuration; every field is optional and only fills options the
/// command line left unset.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    #[serde(alias = "count")]
    pub concurrent: Option<u64>,
    pub headers: Option<Vec<String>>,
    pub data: Option<String>,
    pub request_id: Option<String>,
    pub same_request_id: Option<bool>,
    pub request_id_header: Option<String>,
    pub delay: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub no_body: Option<bool>,
    pub json: Option<bool>,
    pub output: Option<String>,
    pub stream: Option<bool>,
    pub no_color: Option<bool>,
}

/// Durations may be written as plain seconds or with a unit suffix.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}
