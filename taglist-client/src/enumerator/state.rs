//! Enumeration run state

/// Progress of an enumeration run
///
/// Transitions:
/// - `NotStarted` -> `RootListing`
/// - `RootListing` -> `ProgramListing(0)` or `Done` when no program was found
/// - `ProgramListing(i)` -> `ProgramListing(i + 1)` or `Done`
/// - `RootListing` / `ProgramListing(_)` -> `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationState {
    /// No run has been started
    NotStarted,
    /// Listing the controller-scoped symbol table
    RootListing,
    /// Listing the program at this index of the discovered programs
    ProgramListing(usize),
    /// Run completed
    Done,
    /// Run aborted
    Failed,
}

impl EnumerationState {
    /// Check if a run is in progress
    pub fn is_listing(&self) -> bool {
        matches!(
            self,
            EnumerationState::RootListing | EnumerationState::ProgramListing(_)
        )
    }

    /// Check if the run has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, EnumerationState::Done | EnumerationState::Failed)
    }
}

impl Default for EnumerationState {
    fn default() -> Self {
        EnumerationState::NotStarted
    }
}
