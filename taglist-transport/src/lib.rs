//! Transport layer module for controller tag listing
//!
//! This crate defines the request/response contract the enumerator drives
//! ([`ListingTransport`]), the status codes it reports, an RAII guard that
//! releases every request handle, and a replay transport answering listing
//! requests from captured responses.

pub mod error;
pub mod status;
pub mod transport;
pub mod request;
pub mod replay;

pub use error::{TagListError, TagListResult};
pub use status::Status;
pub use transport::{ListingTransport, RequestHandle};
pub use request::ListingRequest;
pub use replay::{Capture, ReplayTransport};
