//! Listing observers
//!
//! The enumerator does not retain decoded records. It hands each one to a
//! [`ListingObserver`] as it is decoded; observers that need the full tag
//! lists keep them, like [`CollectingObserver`].

use super::report::ListingScope;
use taglist_core::{SymbolRecord, TagListError};

/// Receiver for the records and events of an enumeration run
pub trait ListingObserver {
    /// A listing request for `scope` is about to be issued
    fn listing_started(&mut self, _scope: &ListingScope) {}

    /// One record was decoded from the listing of `scope`
    fn record(&mut self, scope: &ListingScope, record: &SymbolRecord);

    /// The listing of `scope` was fully decoded
    fn listing_finished(&mut self, _scope: &ListingScope, _tag_count: usize) {}

    /// The listing of `scope` failed
    fn listing_failed(&mut self, _scope: &ListingScope, _error: &TagListError) {}
}

impl<F> ListingObserver for F
where
    F: FnMut(&ListingScope, &SymbolRecord),
{
    fn record(&mut self, scope: &ListingScope, record: &SymbolRecord) {
        self(scope, record)
    }
}

/// Records of one completed listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagListing {
    pub scope: ListingScope,
    pub records: Vec<SymbolRecord>,
}

/// Observer keeping every listing it is shown
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    listings: Vec<TagListing>,
    failures: Vec<(ListingScope, String)>,
}

impl CollectingObserver {
    /// Create an observer with no listings
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed listings in the order they were issued
    pub fn listings(&self) -> &[TagListing] {
        &self.listings
    }

    /// Listing of one scope, if it completed
    pub fn listing(&self, scope: &ListingScope) -> Option<&TagListing> {
        self.listings.iter().find(|l| &l.scope == scope)
    }

    /// Failed scopes with their error text
    pub fn failures(&self) -> &[(ListingScope, String)] {
        &self.failures
    }

    /// Take the completed listings
    pub fn into_listings(self) -> Vec<TagListing> {
        self.listings
    }
}

impl ListingObserver for CollectingObserver {
    fn listing_started(&mut self, scope: &ListingScope) {
        self.listings.push(TagListing {
            scope: scope.clone(),
            records: Vec::new(),
        });
    }

    fn record(&mut self, scope: &ListingScope, record: &SymbolRecord) {
        match self.listings.last_mut() {
            Some(listing) if &listing.scope == scope => listing.records.push(record.clone()),
            _ => self.listings.push(TagListing {
                scope: scope.clone(),
                records: vec![record.clone()],
            }),
        }
    }

    fn listing_failed(&mut self, scope: &ListingScope, error: &TagListError) {
        if matches!(self.listings.last(), Some(l) if &l.scope == scope && l.records.is_empty()) {
            self.listings.pop();
        }
        self.failures.push((scope.clone(), error.to_string()));
    }
}
