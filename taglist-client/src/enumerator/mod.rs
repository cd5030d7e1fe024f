//! Tag enumeration module

pub mod builder;
pub mod config;
pub mod enumerator;
pub mod observer;
pub mod report;
pub mod state;

pub use builder::EnumeratorBuilder;
pub use config::{EnumeratorConfig, ProgramFailurePolicy, DEFAULT_TIMEOUT};
pub use enumerator::{enumerate, TagEnumerator};
pub use observer::{CollectingObserver, ListingObserver, TagListing};
pub use report::{EnumerationReport, ListingScope, ProgramOutcome, ProgramReport};
pub use state::EnumerationState;
