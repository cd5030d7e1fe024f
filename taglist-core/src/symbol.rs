//! Symbol table entries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name prefix marking a program-scoped symbol entry
pub const PROGRAM_PREFIX: &str = "Program:";

const SYSTEM_BIT: u16 = 0x1000;
const STRUCT_BIT: u16 = 0x8000;
const DIMENSION_MASK: u16 = 0x6000;
const DIMENSION_SHIFT: u16 = 13;

/// One decoded tag descriptor from a symbol table listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Instance id, increasing across a listing but not contiguous
    pub instance_id: u32,
    /// Opaque type/attribute bitfield
    pub symbol_type: u16,
    /// Size in bytes of one array element
    pub element_length: u16,
    /// Array dimensions, unused dimensions are zero
    pub array_dims: [u32; 3],
    /// Symbol name
    pub name: String,
}

impl SymbolRecord {
    /// Whether the name denotes a program scope rather than a data tag
    ///
    /// Only names starting with [`PROGRAM_PREFIX`] match.
    pub fn is_program(&self) -> bool {
        self.name.starts_with(PROGRAM_PREFIX)
    }

    /// Program entry for this record, if it denotes a program scope
    pub fn program_entry(&self) -> Option<ProgramEntry> {
        self.is_program().then(|| ProgramEntry {
            name: self.name.clone(),
        })
    }

    /// Controller-internal symbol flag (display only)
    pub fn is_system(&self) -> bool {
        self.symbol_type & SYSTEM_BIT != 0
    }

    /// Structured (UDT) type flag (display only)
    pub fn is_struct(&self) -> bool {
        self.symbol_type & STRUCT_BIT != 0
    }

    /// Number of array dimensions encoded in the type word (display only)
    pub fn dimension_count(&self) -> u8 {
        ((self.symbol_type & DIMENSION_MASK) >> DIMENSION_SHIFT) as u8
    }
}

impl fmt::Display for SymbolRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tag_name={}; tag_instance_id={:x}; tag_type={:x}; element_length={}; array_dimensions=({}, {}, {})",
            self.name,
            self.instance_id,
            self.symbol_type,
            self.element_length,
            self.array_dims[0],
            self.array_dims[1],
            self.array_dims[2]
        )
    }
}

/// A program scope discovered in the controller-level listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramEntry {
    name: String,
}

impl ProgramEntry {
    /// Full symbol name, e.g. `Program:Main`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Program name without the scope marker, e.g. `Main`
    pub fn program_name(&self) -> &str {
        self.name.strip_prefix(PROGRAM_PREFIX).unwrap_or(&self.name)
    }
}

impl fmt::Display for ProgramEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
