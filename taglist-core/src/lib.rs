//! Core types and utilities for controller tag listing
//!
//! This crate provides the error type, the controller family model, the
//! listing request descriptor builder and the symbol-table record decoder
//! used throughout the tag-listing implementation.

pub mod error;
pub mod family;
pub mod descriptor;
pub mod symbol;
pub mod decoder;

pub use error::{TagListError, TagListResult, TransportOperation};
pub use family::PlcFamily;
pub use descriptor::{
    build_descriptor, Descriptor, DescriptorBuilder, MAX_DESCRIPTOR_LENGTH, TAG_LIST_NAME,
};
pub use symbol::{ProgramEntry, SymbolRecord, PROGRAM_PREFIX};
pub use decoder::{decode, SymbolDecoder, SYMBOL_HEADER_LENGTH};
