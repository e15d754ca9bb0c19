pub const DEFAULT_USER_AGENT: &str = concat!("conreq/", env!("CARGO_PKG_VERSION"));

/// Header carrying the correlation id unless overridden.
pub const DEFAULT_REQUEST_ID_HEADER: &str = "X-Request-ID";
