//! Error types shared with the core crate

pub use taglist_core::error::{TagListError, TagListResult, TransportOperation};
