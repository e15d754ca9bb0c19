//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::RequestArgs;
pub use types::{HttpMethod, RequestCount};

pub use defaults::{DEFAULT_REQUEST_ID_HEADER, DEFAULT_USER_AGENT};
pub use parsers::{parse_delay_arg, parse_duration_arg, parse_header};
