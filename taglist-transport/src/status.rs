//! Transport status codes

use std::fmt;

/// Status reported by a listing transport
///
/// Values follow the controller library's convention: zero is success,
/// positive values are in-progress states, negative values are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(pub i32);

impl Status {
    pub const OK: Status = Status(0);
    pub const PENDING: Status = Status(1);
    pub const ERR_ABORT: Status = Status(-1);
    pub const ERR_BAD_CONFIG: Status = Status(-2);
    pub const ERR_BAD_CONNECTION: Status = Status(-3);
    pub const ERR_BAD_DATA: Status = Status(-4);
    pub const ERR_BAD_DEVICE: Status = Status(-5);
    pub const ERR_BAD_GATEWAY: Status = Status(-6);
    pub const ERR_BAD_PARAM: Status = Status(-7);
    pub const ERR_BAD_REPLY: Status = Status(-8);
    pub const ERR_BAD_STATUS: Status = Status(-9);
    pub const ERR_CLOSE: Status = Status(-10);
    pub const ERR_CREATE: Status = Status(-11);
    pub const ERR_NOT_ALLOWED: Status = Status(-18);
    pub const ERR_NOT_FOUND: Status = Status(-19);
    pub const ERR_NO_DATA: Status = Status(-21);
    pub const ERR_OUT_OF_BOUNDS: Status = Status(-27);
    pub const ERR_READ: Status = Status(-28);
    pub const ERR_REMOTE_ERR: Status = Status(-29);
    pub const ERR_TIMEOUT: Status = Status(-32);
    pub const ERR_TOO_LARGE: Status = Status(-33);
    pub const ERR_UNSUPPORTED: Status = Status(-35);

    /// Check if the status reports success
    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }

    /// Check if the status reports an operation still in progress
    pub fn is_pending(&self) -> bool {
        self.0 > 0
    }

    /// Check if the status reports an error
    pub fn is_err(&self) -> bool {
        self.0 < 0
    }

    /// Raw status code
    pub fn code(&self) -> i32 {
        self.0
    }

    /// Symbolic name of a well-known status code
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Status::OK => "PLCTAG_STATUS_OK",
            Status::PENDING => "PLCTAG_STATUS_PENDING",
            Status::ERR_ABORT => "PLCTAG_ERR_ABORT",
            Status::ERR_BAD_CONFIG => "PLCTAG_ERR_BAD_CONFIG",
            Status::ERR_BAD_CONNECTION => "PLCTAG_ERR_BAD_CONNECTION",
            Status::ERR_BAD_DATA => "PLCTAG_ERR_BAD_DATA",
            Status::ERR_BAD_DEVICE => "PLCTAG_ERR_BAD_DEVICE",
            Status::ERR_BAD_GATEWAY => "PLCTAG_ERR_BAD_GATEWAY",
            Status::ERR_BAD_PARAM => "PLCTAG_ERR_BAD_PARAM",
            Status::ERR_BAD_REPLY => "PLCTAG_ERR_BAD_REPLY",
            Status::ERR_BAD_STATUS => "PLCTAG_ERR_BAD_STATUS",
            Status::ERR_CLOSE => "PLCTAG_ERR_CLOSE",
            Status::ERR_CREATE => "PLCTAG_ERR_CREATE",
            Status::ERR_NOT_ALLOWED => "PLCTAG_ERR_NOT_ALLOWED",
            Status::ERR_NOT_FOUND => "PLCTAG_ERR_NOT_FOUND",
            Status::ERR_NO_DATA => "PLCTAG_ERR_NO_DATA",
            Status::ERR_OUT_OF_BOUNDS => "PLCTAG_ERR_OUT_OF_BOUNDS",
            Status::ERR_READ => "PLCTAG_ERR_READ",
            Status::ERR_REMOTE_ERR => "PLCTAG_ERR_REMOTE_ERR",
            Status::ERR_TIMEOUT => "PLCTAG_ERR_TIMEOUT",
            Status::ERR_TOO_LARGE => "PLCTAG_ERR_TOO_LARGE",
            Status::ERR_UNSUPPORTED => "PLCTAG_ERR_UNSUPPORTED",
            _ => return None,
        };
        Some(name)
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Status(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown error ({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert!(Status::OK.is_ok());
        assert!(Status::PENDING.is_pending());
        assert!(Status::ERR_TIMEOUT.is_err());
        assert!(!Status::ERR_TIMEOUT.is_ok());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::ERR_NOT_FOUND.to_string(), "PLCTAG_ERR_NOT_FOUND");
        assert_eq!(Status(-1000).to_string(), "Unknown error (-1000)");
    }
}
