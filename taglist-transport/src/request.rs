//! Scoped listing request
//!
//! [`ListingRequest`] owns one transport handle for its lifetime. The
//! handle is destroyed exactly once, either by [`ListingRequest::close`] or
//! when the guard is dropped on an early return.

use crate::error::{TagListError, TagListResult, TransportOperation};
use crate::status::Status;
use crate::transport::{ListingTransport, RequestHandle};
use bytes::Bytes;
use std::time::Duration;
use taglist_core::Descriptor;

/// One open listing request
pub struct ListingRequest<'t, T: ListingTransport + ?Sized> {
    transport: &'t mut T,
    handle: RequestHandle,
    scope: String,
    released: bool,
}

impl<'t, T: ListingTransport + ?Sized> ListingRequest<'t, T> {
    /// Create the request context for `descriptor`
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport that owns the handle
    /// * `descriptor` - Listing request descriptor
    /// * `scope` - Scope label used in diagnostics (`controller`, `Program:Main`)
    /// * `timeout` - Creation timeout
    ///
    /// # Errors
    ///
    /// Returns `TransportFailure` with operation `create` if the transport
    /// refuses the descriptor. No handle exists in that case.
    pub async fn open(
        transport: &'t mut T,
        descriptor: &Descriptor,
        scope: &str,
        timeout: Duration,
    ) -> TagListResult<Self> {
        match transport.create(descriptor, timeout).await {
            Ok(handle) => {
                log::debug!("Created listing request {} for {}", handle, descriptor);
                Ok(Self {
                    transport,
                    handle,
                    scope: scope.to_string(),
                    released: false,
                })
            }
            Err(status) => Err(TagListError::TransportFailure {
                operation: TransportOperation::Create,
                scope: scope.to_string(),
                status: status.code(),
                message: transport.decode_error(status),
            }),
        }
    }

    /// Handle owned by this request
    pub fn handle(&self) -> RequestHandle {
        self.handle
    }

    /// Perform the round trip and return the response buffer
    ///
    /// # Errors
    ///
    /// Returns `TransportFailure` with operation `read` when the read status
    /// is not success or the read outlives `timeout`, and with operation
    /// `buffer` when the bytes cannot be fetched.
    pub async fn fetch(&mut self, timeout: Duration) -> TagListResult<Bytes> {
        // the transport's own timeout is not trusted to fire
        let status = tokio::time::timeout(timeout, self.transport.read(self.handle, timeout))
            .await
            .unwrap_or(Status::ERR_TIMEOUT);
        if !status.is_ok() {
            return Err(self.failure(TransportOperation::Read, status));
        }

        let buffer = self
            .transport
            .buffer(self.handle)
            .map_err(|status| self.failure(TransportOperation::Buffer, status))?;
        log::debug!(
            "Listing request {} for {} returned {} bytes",
            self.handle,
            self.scope,
            buffer.len()
        );
        Ok(buffer)
    }

    /// Release the handle now and report the destroy status
    pub fn close(mut self) -> Status {
        self.release()
    }

    fn failure(&self, operation: TransportOperation, status: Status) -> TagListError {
        TagListError::TransportFailure {
            operation,
            scope: self.scope.clone(),
            status: status.code(),
            message: self.transport.decode_error(status),
        }
    }

    fn release(&mut self) -> Status {
        if self.released {
            return Status::OK;
        }
        self.released = true;

        let status = self.transport.destroy(self.handle);
        if !status.is_ok() {
            log::warn!(
                "Destroying listing request {} for {} reported {}",
                self.handle,
                self.scope,
                self.transport.decode_error(status)
            );
        }
        status
    }
}

impl<T: ListingTransport + ?Sized> Drop for ListingRequest<'_, T> {
    fn drop(&mut self) {
        self.release();
    }
}
