//! Core library for the `conreq` CLI.
//!
//! `conreq` fires a small, bounded number of concurrent HTTP requests at one
//! endpoint and reports how each of them was answered, which makes races,
//! idempotency problems and request-correlation handling visible. The
//! [`runner::Runner`] is the entry point for library use; the binary adds
//! argument parsing, config files and report rendering on top.
pub mod args;
pub mod config;
pub mod correlation;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod output;
pub mod runner;
mod shutdown;
