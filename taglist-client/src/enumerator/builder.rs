//! Enumerator builder
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use taglist_client::EnumeratorBuilder;
//! use taglist_core::PlcFamily;
//! use taglist_transport::ReplayTransport;
//!
//! let transport = ReplayTransport::from_file("capture.json")?;
//! let mut enumerator = EnumeratorBuilder::new()
//!     .gateway("10.0.0.5")
//!     .path("1,0")
//!     .family(PlcFamily::ControlLogix)
//!     .continue_on_error(true)
//!     .build(transport)?;
//! # Ok::<(), taglist_core::TagListError>(())
//! ```

use super::config::{EnumeratorConfig, ProgramFailurePolicy};
use super::enumerator::TagEnumerator;
use std::time::Duration;
use taglist_core::{PlcFamily, TagListError, TagListResult};
use taglist_transport::ListingTransport;

/// Builder for [`TagEnumerator`]
///
/// Defaults: family [`PlcFamily::DEFAULT`], no path, 5000 ms timeout,
/// abort on the first failing program.
#[derive(Debug, Clone, Default)]
pub struct EnumeratorBuilder {
    config: EnumeratorConfig,
}

impl EnumeratorBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the gateway address
    pub fn gateway(mut self, gateway: &str) -> Self {
        self.config.gateway = gateway.to_string();
        self
    }

    /// Configure the routing path; an empty path means no path
    pub fn path(mut self, path: &str) -> Self {
        self.config.path = (!path.is_empty()).then(|| path.to_string());
        self
    }

    /// Configure the controller family
    pub fn family(mut self, family: PlcFamily) -> Self {
        self.config.family = family;
        self
    }

    /// Configure the per-operation transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Configure program failure handling
    pub fn failure_policy(mut self, policy: ProgramFailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Shorthand for [`ProgramFailurePolicy::Continue`] / [`ProgramFailurePolicy::Abort`]
    pub fn continue_on_error(self, enabled: bool) -> Self {
        let policy = if enabled {
            ProgramFailurePolicy::Continue
        } else {
            ProgramFailurePolicy::Abort
        };
        self.failure_policy(policy)
    }

    /// Build the enumerator over `transport`
    ///
    /// # Errors
    /// Returns `InvalidDescriptor` if the gateway is empty or the controller
    /// descriptor cannot be built from this configuration.
    pub fn build<T: ListingTransport>(self, transport: T) -> TagListResult<TagEnumerator<T>> {
        if self.config.gateway.is_empty() {
            return Err(TagListError::InvalidDescriptor(
                "Gateway must be configured".to_string(),
            ));
        }
        self.config.descriptor(None)?;
        Ok(TagEnumerator::new(transport, self.config))
    }
}
