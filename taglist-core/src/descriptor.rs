//! Listing request descriptors
//!
//! A descriptor is the opaque attribute string handed to the listing
//! transport. It is a sequence of `key=value` pairs joined by `&`:
//!
//! ```text
//! protocol=ab-eip&gateway=10.0.0.5&path=1,0&plc=controllogix&name=@tags
//! protocol=ab-eip&gateway=10.0.0.5&path=1,0&plc=controllogix&name=Program:Main.@tags
//! protocol=ab-eip&gateway=10.0.0.9&plc=micro800&name=@tags
//! ```
//!
//! Building is a pure function of its inputs. An assembled string longer
//! than [`MAX_DESCRIPTOR_LENGTH`] is rejected instead of being cut short.

use crate::error::{TagListError, TagListResult};
use crate::family::PlcFamily;
use std::fmt;

/// Longest descriptor accepted by the transport, in bytes
pub const MAX_DESCRIPTOR_LENGTH: usize = 199;

/// Symbolic name of the controller symbol table
pub const TAG_LIST_NAME: &str = "@tags";

const PROTOCOL: &str = "ab-eip";

/// Assembled listing request descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor(String);

impl Descriptor {
    /// Get the descriptor as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Look up the value of one attribute
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.0
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Symbolic name requested by this descriptor (`@tags` or `<program>.@tags`)
    pub fn symbolic_name(&self) -> Option<&str> {
        self.attribute("name")
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Descriptor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builder for listing request descriptors
///
/// # Usage Example
///
/// ```rust
/// use taglist_core::{DescriptorBuilder, PlcFamily};
///
/// let descriptor = DescriptorBuilder::new("10.0.0.5", PlcFamily::ControlLogix)
///     .path("1,0")
///     .program("Program:Main")
///     .build()
///     .unwrap();
/// assert_eq!(descriptor.symbolic_name(), Some("Program:Main.@tags"));
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    gateway: String,
    path: Option<String>,
    family: PlcFamily,
    program: Option<String>,
}

impl DescriptorBuilder {
    /// Create a builder for the controller-level listing
    pub fn new(gateway: &str, family: PlcFamily) -> Self {
        Self {
            gateway: gateway.to_string(),
            path: None,
            family,
            program: None,
        }
    }

    /// Configure the routing path to the CPU (e.g. `1,0`)
    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Scope the listing to one program (full symbol name, e.g. `Program:Main`)
    pub fn program(mut self, program: &str) -> Self {
        self.program = Some(program.to_string());
        self
    }

    /// Assemble the descriptor
    ///
    /// # Errors
    /// Returns `InvalidDescriptor` if:
    /// - the gateway is empty
    /// - the family requires a path and none was given
    /// - a value contains `&` or `=`
    /// - the assembled string exceeds [`MAX_DESCRIPTOR_LENGTH`]
    pub fn build(self) -> TagListResult<Descriptor> {
        build_descriptor(
            &self.gateway,
            self.path.as_deref(),
            self.family,
            self.program.as_deref(),
        )
    }
}

/// Compose a scoped listing descriptor
///
/// An absent or empty `program` requests the controller-level listing,
/// otherwise the listing scoped under that program.
pub fn build_descriptor(
    gateway: &str,
    path: Option<&str>,
    family: PlcFamily,
    program: Option<&str>,
) -> TagListResult<Descriptor> {
    if gateway.is_empty() {
        return Err(TagListError::InvalidDescriptor(
            "Gateway must not be empty".to_string(),
        ));
    }
    check_value("gateway", gateway)?;

    let path = path.filter(|p| !p.is_empty());
    if path.is_none() && family.requires_path() {
        return Err(TagListError::InvalidDescriptor(format!(
            "Controller family {} requires a routing path",
            family
        )));
    }

    let name = match program.filter(|p| !p.is_empty()) {
        Some(program) => {
            check_value("program", program)?;
            format!("{}.{}", program, TAG_LIST_NAME)
        }
        None => TAG_LIST_NAME.to_string(),
    };

    let mut descriptor = format!("protocol={}&gateway={}", PROTOCOL, gateway);
    if let Some(path) = path {
        check_value("path", path)?;
        descriptor.push_str("&path=");
        descriptor.push_str(path);
    }
    descriptor.push_str("&plc=");
    descriptor.push_str(family.keyword());
    descriptor.push_str("&name=");
    descriptor.push_str(&name);

    if descriptor.len() > MAX_DESCRIPTOR_LENGTH {
        return Err(TagListError::InvalidDescriptor(format!(
            "Descriptor is {} bytes, maximum is {}",
            descriptor.len(),
            MAX_DESCRIPTOR_LENGTH
        )));
    }

    Ok(Descriptor(descriptor))
}

fn check_value(field: &str, value: &str) -> TagListResult<()> {
    if value.contains(['&', '=']) {
        return Err(TagListError::InvalidDescriptor(format!(
            "{} must not contain '&' or '=': {}",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_descriptor() {
        let d = build_descriptor("10.0.0.5", Some("1,0"), PlcFamily::ControlLogix, None).unwrap();
        assert_eq!(
            d.as_str(),
            "protocol=ab-eip&gateway=10.0.0.5&path=1,0&plc=controllogix&name=@tags"
        );
        assert_eq!(d.symbolic_name(), Some("@tags"));
    }

    #[test]
    fn test_program_descriptor() {
        let d = build_descriptor(
            "10.0.0.5",
            Some("1,0"),
            PlcFamily::ControlLogix,
            Some("Program:Main"),
        )
        .unwrap();
        assert_eq!(d.symbolic_name(), Some("Program:Main.@tags"));
        assert_eq!(d.attribute("gateway"), Some("10.0.0.5"));
        assert_eq!(d.attribute("path"), Some("1,0"));
    }

    #[test]
    fn test_empty_program_is_root() {
        let d = build_descriptor("10.0.0.5", Some("1,0"), PlcFamily::ControlLogix, Some("")).unwrap();
        assert_eq!(d.symbolic_name(), Some("@tags"));
    }

    #[test]
    fn test_deterministic() {
        let a = build_descriptor("plc", Some("1,0"), PlcFamily::OmronNjnx, Some("Program:A")).unwrap();
        let b = build_descriptor("plc", Some("1,0"), PlcFamily::OmronNjnx, Some("Program:A")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pathless_family() {
        let d = build_descriptor("10.0.0.9", None, PlcFamily::Micro800, None).unwrap();
        assert_eq!(d.as_str(), "protocol=ab-eip&gateway=10.0.0.9&plc=micro800&name=@tags");
        assert_eq!(d.attribute("path"), None);

        let d = build_descriptor("10.0.0.9", Some(""), PlcFamily::MicroLogix, None).unwrap();
        assert_eq!(d.attribute("path"), None);
    }

    #[test]
    fn test_missing_required_path() {
        let err = build_descriptor("10.0.0.5", None, PlcFamily::ControlLogix, None).unwrap_err();
        assert!(matches!(err, TagListError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_empty_gateway() {
        let err = build_descriptor("", Some("1,0"), PlcFamily::ControlLogix, None).unwrap_err();
        assert!(matches!(err, TagListError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_separator_in_value_rejected() {
        let err = build_descriptor("10.0.0.5&path=x", Some("1,0"), PlcFamily::ControlLogix, None)
            .unwrap_err();
        assert!(matches!(err, TagListError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_too_long_is_error_not_truncation() {
        let program = format!("Program:{}", "X".repeat(MAX_DESCRIPTOR_LENGTH));
        let err = build_descriptor("10.0.0.5", Some("1,0"), PlcFamily::ControlLogix, Some(&program))
            .unwrap_err();
        assert!(matches!(err, TagListError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_length_boundary() {
        let prefix = "protocol=ab-eip&gateway=&path=1,0&plc=controllogix&name=@tags";
        let gateway = "g".repeat(MAX_DESCRIPTOR_LENGTH - prefix.len());
        let d = build_descriptor(&gateway, Some("1,0"), PlcFamily::ControlLogix, None).unwrap();
        assert_eq!(d.as_str().len(), MAX_DESCRIPTOR_LENGTH);

        let gateway = format!("{}g", gateway);
        assert!(build_descriptor(&gateway, Some("1,0"), PlcFamily::ControlLogix, None).is_err());
    }

    #[test]
    fn test_builder_matches_function() {
        let built = DescriptorBuilder::new("10.0.0.5", PlcFamily::ControlLogix)
            .path("1,0")
            .program("Program:Main")
            .build()
            .unwrap();
        let direct = build_descriptor(
            "10.0.0.5",
            Some("1,0"),
            PlcFamily::ControlLogix,
            Some("Program:Main"),
        )
        .unwrap();
        assert_eq!(built, direct);
    }
}
