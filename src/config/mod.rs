//! Configuration loading, CLI merging, and request validation.
mod apply;
mod loader;
mod parse;
mod request;
pub mod types;


pub use apply::apply_config;
pub use loader::load_config;
pub use request::{CorrelationMode, RequestConfig};

pub(crate) use loader::has_default_config;
#[cfg(test)]
pub(crate) use loader::load_config_file;
