//! Controller families
//!
//! Maps the family names accepted on the command line to the `plc=` keyword
//! of a listing descriptor.

use crate::error::{TagListError, TagListResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Controller product line
///
/// The family decides how a listing descriptor is phrased and whether a
/// routing path to the CPU is required. Only families that expose a symbol
/// table through the `@tags` listing are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlcFamily {
    /// ControlLogix and CompactLogix controllers (backplane routed)
    #[serde(rename = "controllogix")]
    ControlLogix,
    /// Micro800 controllers (no backplane)
    #[serde(rename = "micro800")]
    Micro800,
    /// MicroLogix controllers (no backplane)
    #[serde(rename = "micrologix")]
    MicroLogix,
    /// Omron NJ/NX controllers speaking CIP
    #[serde(rename = "omron-njnx")]
    OmronNjnx,
}

impl PlcFamily {
    /// Family assumed by the two-argument command form
    pub const DEFAULT: PlcFamily = PlcFamily::ControlLogix;

    /// Parse a family from the identifiers accepted by the controller library
    ///
    /// Matching is case-insensitive and accepts the common aliases
    /// (`lgx`, `logix`, `compactlogix`, `mlgx800`, `mlgx`, `omron-nj` ...).
    pub fn from_string(s: &str) -> TagListResult<Self> {
        let family = match s.trim().to_ascii_lowercase().as_str() {
            "controllogix" | "contrologix" | "compactlogix" | "clgx" | "lgx" | "logix" => {
                PlcFamily::ControlLogix
            }
            "micro800" | "micrologix800" | "mlgx800" => PlcFamily::Micro800,
            "micrologix" | "mlgx" => PlcFamily::MicroLogix,
            "omron-njnx" | "omron-nj" | "omron-nx" | "njnx" | "nx1p2" => PlcFamily::OmronNjnx,
            _ => {
                return Err(TagListError::InvalidDescriptor(format!(
                    "Unsupported controller family: {}",
                    s
                )))
            }
        };
        Ok(family)
    }

    /// Keyword used for the `plc` attribute of a descriptor
    pub fn keyword(&self) -> &'static str {
        match self {
            PlcFamily::ControlLogix => "controllogix",
            PlcFamily::Micro800 => "micro800",
            PlcFamily::MicroLogix => "micrologix",
            PlcFamily::OmronNjnx => "omron-njnx",
        }
    }

    /// Whether a routing path must be present in the descriptor
    ///
    /// Compact controllers without a backplane are addressed directly and
    /// take the path-less form.
    pub fn requires_path(&self) -> bool {
        matches!(self, PlcFamily::ControlLogix | PlcFamily::OmronNjnx)
    }
}

impl Default for PlcFamily {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for PlcFamily {
    type Err = TagListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for PlcFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_aliases() {
        assert_eq!(PlcFamily::from_string("lgx").unwrap(), PlcFamily::ControlLogix);
        assert_eq!(PlcFamily::from_string("CompactLogix").unwrap(), PlcFamily::ControlLogix);
        assert_eq!(PlcFamily::from_string("micro800").unwrap(), PlcFamily::Micro800);
        assert_eq!(PlcFamily::from_string("mlgx").unwrap(), PlcFamily::MicroLogix);
        assert_eq!(PlcFamily::from_string(" omron-nj ").unwrap(), PlcFamily::OmronNjnx);
    }

    #[test]
    fn test_family_unknown() {
        let err = PlcFamily::from_string("plc5").unwrap_err();
        assert!(matches!(err, TagListError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_family_path_requirement() {
        assert!(PlcFamily::ControlLogix.requires_path());
        assert!(PlcFamily::OmronNjnx.requires_path());
        assert!(!PlcFamily::Micro800.requires_path());
        assert!(!PlcFamily::MicroLogix.requires_path());
    }

    #[test]
    fn test_family_display_round_trips_through_parse() {
        for family in [
            PlcFamily::ControlLogix,
            PlcFamily::Micro800,
            PlcFamily::MicroLogix,
            PlcFamily::OmronNjnx,
        ] {
            assert_eq!(family.to_string().parse::<PlcFamily>().unwrap(), family);
        }
    }
}
