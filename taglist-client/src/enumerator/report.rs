//! Enumeration results

use serde::Serialize;
use std::fmt;
use taglist_core::{PlcFamily, ProgramEntry};

/// Scope a listing belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "scope", content = "program", rename_all = "kebab-case")]
pub enum ListingScope {
    /// Controller-level symbol table
    Controller,
    /// Symbol table of one program
    Program(ProgramEntry),
}

impl ListingScope {
    /// Program of a program-scoped listing
    pub fn program(&self) -> Option<&ProgramEntry> {
        match self {
            ListingScope::Controller => None,
            ListingScope::Program(entry) => Some(entry),
        }
    }

    /// Check if this is the controller-level listing
    pub fn is_controller(&self) -> bool {
        matches!(self, ListingScope::Controller)
    }
}

impl fmt::Display for ListingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingScope::Controller => f.write_str("controller"),
            ListingScope::Program(entry) => f.write_str(entry.name()),
        }
    }
}

/// Result of one program-scoped listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ProgramOutcome {
    /// Listing completed with this many records
    Listed { tag_count: usize },
    /// Listing failed; the run went on under the continue policy
    Failed { error: String },
}

/// Outcome for one discovered program
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramReport {
    pub program: ProgramEntry,
    #[serde(flatten)]
    pub outcome: ProgramOutcome,
}

/// Summary of a completed enumeration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumerationReport {
    pub gateway: String,
    pub family: PlcFamily,
    /// Number of records in the controller-level listing
    pub controller_tags: usize,
    /// Programs in the order they were listed
    pub programs: Vec<ProgramReport>,
}

impl EnumerationReport {
    /// Check if every program listing succeeded
    pub fn is_complete(&self) -> bool {
        self.failed_programs().next().is_none()
    }

    /// Programs whose listing failed
    pub fn failed_programs(&self) -> impl Iterator<Item = &ProgramReport> {
        self.programs
            .iter()
            .filter(|p| matches!(p.outcome, ProgramOutcome::Failed { .. }))
    }

    /// Total records over the controller and all listed programs
    pub fn total_tags(&self) -> usize {
        self.controller_tags
            + self
                .programs
                .iter()
                .map(|p| match p.outcome {
                    ProgramOutcome::Listed { tag_count } => tag_count,
                    ProgramOutcome::Failed { .. } => 0,
                })
                .sum::<usize>()
    }
}
