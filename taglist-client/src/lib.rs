//! Controller tag enumeration client
//!
//! This crate lists the symbol table of a controller and then the symbol
//! table of every program scope discovered in it, reporting each decoded
//! record to a [`ListingObserver`].

pub mod enumerator;

pub use enumerator::{
    enumerate, CollectingObserver, EnumerationReport, EnumerationState, EnumeratorBuilder,
    EnumeratorConfig, ListingObserver, ListingScope, ProgramFailurePolicy, ProgramOutcome,
    ProgramReport, TagEnumerator, TagListing, DEFAULT_TIMEOUT,
};
