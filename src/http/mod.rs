//! Single-request execution: client construction, request building and the
//! executor that turns one round trip into a [`SingleResponse`].
mod client;
mod executor;
mod request;
mod response;


pub use client::build_client;
pub use executor::{Dispatch, execute};
pub use request::{build_request, outgoing_headers};
pub use response::SingleResponse;
