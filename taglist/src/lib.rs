//! taglist - controller tag enumeration
//!
//! Lists the tags a controller exposes, including the tags scoped to each of
//! its programs, by decoding the controller's symbol-table listing.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `taglist-core`: error type, controller families, descriptor builder,
//!   symbol records and the symbol-table decoder
//! - `taglist-transport`: listing transport trait, status codes, request
//!   guard and the replay transport
//! - `taglist-client`: controller and program enumeration
//!
//! # Usage
//!
//! ```no_run
//! use taglist::client::{CollectingObserver, EnumeratorBuilder};
//! use taglist::transport::ReplayTransport;
//! use taglist::PlcFamily;
//!
//! # async fn run() -> taglist::TagListResult<()> {
//! let mut enumerator = EnumeratorBuilder::new()
//!     .gateway("10.0.0.5")
//!     .path("1,0")
//!     .family(PlcFamily::ControlLogix)
//!     .build(ReplayTransport::from_file("capture.json")?)?;
//! let report = enumerator.enumerate(&mut CollectingObserver::new()).await?;
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use taglist_core::{
    build_descriptor, decode, Descriptor, DescriptorBuilder, PlcFamily, ProgramEntry,
    SymbolDecoder, SymbolRecord, TagListError, TagListResult, PROGRAM_PREFIX,
};

// Re-export transport API
pub mod transport {
    pub use taglist_transport::*;
}

// Re-export client API
pub mod client {
    pub use taglist_client::*;
}
