use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[serde(alias = "GET")]
    Get,
    #[serde(alias = "POST")]
    Post,
    #[serde(alias = "PUT")]
    Put,
    #[serde(alias = "DELETE")]
    Delete,
    #[serde(alias = "PATCH")]
    Patch,
    #[serde(alias = "HEAD")]
    Head,
    #[serde(alias = "OPTIONS")]
    Options,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    #[must_use]
    pub const fn to_method(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// Number of concurrent requests in one run, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestCount(u8);

impl RequestCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for RequestCount {
    fn default() -> Self {
        RequestCount(Self::MIN)
    }
}

impl TryFrom<u64> for RequestCount {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let out_of_range = || ValidationError::ConcurrencyOutOfRange {
            value,
            min: Self::MIN,
            max: Self::MAX,
        };
        let narrow = u8::try_from(value).map_err(|_err| out_of_range())?;
        if (Self::MIN..=Self::MAX).contains(&narrow) {
            Ok(RequestCount(narrow))
        } else {
            Err(out_of_range())
        }
    }
}

impl std::str::FromStr for RequestCount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        RequestCount::try_from(value)
    }
}

impl From<RequestCount> for usize {
    fn from(value: RequestCount) -> Self {
        value.get()
    }
}
