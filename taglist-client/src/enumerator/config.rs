//! Enumeration configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use taglist_core::{build_descriptor, Descriptor, PlcFamily, ProgramEntry, TagListResult};

/// Per-request transport timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// What to do when a program-scoped listing fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgramFailurePolicy {
    /// Stop the whole run at the first failing program
    #[default]
    Abort,
    /// Record the failure for that program and list the remaining ones
    Continue,
}

/// Enumeration run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratorConfig {
    /// Gateway address of the controller (host name or IP)
    pub gateway: String,
    /// Routing path to the CPU, absent for path-less families
    pub path: Option<String>,
    /// Controller family
    pub family: PlcFamily,
    /// Timeout for each transport operation
    pub timeout: Duration,
    /// Program failure handling
    pub failure_policy: ProgramFailurePolicy,
}

impl EnumeratorConfig {
    /// Create a configuration with the default timeout and abort policy
    pub fn new(gateway: &str, path: Option<&str>, family: PlcFamily) -> Self {
        Self {
            gateway: gateway.to_string(),
            path: path.map(str::to_string),
            family,
            timeout: DEFAULT_TIMEOUT,
            failure_policy: ProgramFailurePolicy::default(),
        }
    }

    /// Descriptor for the controller listing (`None`) or one program's listing
    pub fn descriptor(&self, program: Option<&ProgramEntry>) -> TagListResult<Descriptor> {
        build_descriptor(
            &self.gateway,
            self.path.as_deref(),
            self.family,
            program.map(ProgramEntry::name),
        )
    }
}

impl Default for EnumeratorConfig {
    fn default() -> Self {
        Self {
            gateway: String::new(),
            path: None,
            family: PlcFamily::DEFAULT,
            timeout: DEFAULT_TIMEOUT,
            failure_policy: ProgramFailurePolicy::default(),
        }
    }
}
