//! Listing transport trait

use crate::status::Status;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::time::Duration;
use taglist_core::Descriptor;

/// Handle identifying one request context inside a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestHandle(pub u32);

impl fmt::Display for RequestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Request/response channel answering listing requests
///
/// Every handle returned by [`create`](ListingTransport::create) must be
/// released with exactly one call to [`destroy`](ListingTransport::destroy).
/// [`ListingRequest`](crate::ListingRequest) enforces that on all exit paths.
#[async_trait]
pub trait ListingTransport: Send {
    /// Create a request context for a descriptor
    ///
    /// # Arguments
    ///
    /// * `descriptor` - Listing request descriptor
    /// * `timeout` - Time allowed for the context to become usable
    ///
    /// # Returns
    ///
    /// The new handle, or the failing status
    async fn create(
        &mut self,
        descriptor: &Descriptor,
        timeout: Duration,
    ) -> Result<RequestHandle, Status>;

    /// Perform the listing round trip
    ///
    /// On [`Status::OK`] the response buffer becomes available through
    /// [`buffer`](ListingTransport::buffer).
    async fn read(&mut self, handle: RequestHandle, timeout: Duration) -> Status;

    /// Raw response bytes of a completed read
    fn buffer(&self, handle: RequestHandle) -> Result<Bytes, Status>;

    /// Release a request context
    fn destroy(&mut self, handle: RequestHandle) -> Status;

    /// Human-readable text for a status, used for diagnostics only
    fn decode_error(&self, status: Status) -> String {
        status.to_string()
    }
}
