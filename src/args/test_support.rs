use clap::Parser;

use crate::error::{AppError, AppResult};

use super::RequestArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<RequestArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    RequestArgs::try_parse_from(args).map_err(AppError::from)
}
