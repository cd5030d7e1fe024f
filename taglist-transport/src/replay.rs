//! Replay transport
//!
//! Answers listing requests from captured controller responses instead of a
//! live connection. A capture maps the symbolic name of a listing
//! (`@tags`, `Program:Main.@tags`) to the raw response bytes; names may also
//! be mapped to a failure status returned when the request is created.
//!
//! Capture files are JSON:
//!
//! ```json
//! {
//!   "responses": { "@tags": [1, 0, 0, 0, 196, 0] },
//!   "failures": { "Program:Broken.@tags": -19 }
//! }
//! ```

use crate::error::{TagListError, TagListResult};
use crate::status::Status;
use crate::transport::{ListingTransport, RequestHandle};
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;
use taglist_core::Descriptor;

/// Captured listing responses keyed by symbolic name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    #[serde(default)]
    responses: BTreeMap<String, ResponseBytes>,
    #[serde(default)]
    failures: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct ResponseBytes(#[serde(with = "serde_bytes")] Vec<u8>);

impl Capture {
    /// Create an empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a capture from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> TagListResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(|e| match e {
            TagListError::InvalidData(msg) => {
                TagListError::InvalidData(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse a capture from JSON text
    pub fn from_json(text: &str) -> TagListResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| TagListError::InvalidData(format!("Invalid capture: {}", e)))
    }

    /// Serialize the capture to JSON text
    pub fn to_json(&self) -> TagListResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TagListError::InvalidData(format!("Cannot encode capture: {}", e)))
    }

    /// Record the response bytes for a symbolic name
    pub fn insert_response(&mut self, symbolic_name: &str, bytes: Vec<u8>) {
        self.responses
            .insert(symbolic_name.to_string(), ResponseBytes(bytes));
    }

    /// Make request creation for a symbolic name fail with `status`
    pub fn insert_failure(&mut self, symbolic_name: &str, status: Status) {
        self.failures
            .insert(symbolic_name.to_string(), status.code());
    }

    fn response(&self, symbolic_name: &str) -> Option<Bytes> {
        self.responses
            .get(symbolic_name)
            .map(|r| Bytes::copy_from_slice(&r.0))
    }

    fn failure(&self, symbolic_name: &str) -> Option<Status> {
        self.failures.get(symbolic_name).copied().map(Status)
    }
}

#[derive(Debug)]
struct OpenRequest {
    symbolic_name: String,
    buffer: Option<Bytes>,
}

/// Listing transport backed by a [`Capture`]
#[derive(Debug)]
pub struct ReplayTransport {
    capture: Capture,
    next_handle: u32,
    open: HashMap<RequestHandle, OpenRequest>,
    history: Vec<Descriptor>,
    destroyed: usize,
}

impl ReplayTransport {
    /// Create a replay transport over a capture
    pub fn new(capture: Capture) -> Self {
        Self {
            capture,
            next_handle: 1,
            open: HashMap::new(),
            history: Vec::new(),
            destroyed: 0,
        }
    }

    /// Create a replay transport from a JSON capture file
    pub fn from_file(path: impl AsRef<Path>) -> TagListResult<Self> {
        Ok(Self::new(Capture::from_file(path)?))
    }

    /// Descriptors of every create call, in order
    pub fn history(&self) -> &[Descriptor] {
        &self.history
    }

    /// Number of handles created and not yet destroyed
    pub fn open_handles(&self) -> usize {
        self.open.len()
    }

    /// Number of handles destroyed so far
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }
}

#[async_trait]
impl ListingTransport for ReplayTransport {
    async fn create(
        &mut self,
        descriptor: &Descriptor,
        _timeout: Duration,
    ) -> Result<RequestHandle, Status> {
        self.history.push(descriptor.clone());

        let symbolic_name = descriptor.symbolic_name().ok_or(Status::ERR_BAD_PARAM)?;
        if let Some(status) = self.capture.failure(symbolic_name) {
            log::debug!("Replaying create failure {} for {}", status, symbolic_name);
            return Err(status);
        }

        let handle = RequestHandle(self.next_handle);
        self.next_handle += 1;
        self.open.insert(
            handle,
            OpenRequest {
                symbolic_name: symbolic_name.to_string(),
                buffer: None,
            },
        );
        Ok(handle)
    }

    async fn read(&mut self, handle: RequestHandle, _timeout: Duration) -> Status {
        let Some(request) = self.open.get_mut(&handle) else {
            return Status::ERR_NOT_FOUND;
        };
        match self.capture.response(&request.symbolic_name) {
            Some(bytes) => {
                request.buffer = Some(bytes);
                Status::OK
            }
            None => {
                log::debug!("No captured response for {}", request.symbolic_name);
                Status::ERR_NOT_FOUND
            }
        }
    }

    fn buffer(&self, handle: RequestHandle) -> Result<Bytes, Status> {
        self.open
            .get(&handle)
            .ok_or(Status::ERR_NOT_FOUND)?
            .buffer
            .clone()
            .ok_or(Status::ERR_NO_DATA)
    }

    fn destroy(&mut self, handle: RequestHandle) -> Status {
        match self.open.remove(&handle) {
            Some(_) => {
                self.destroyed += 1;
                Status::OK
            }
            None => Status::ERR_NOT_FOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use taglist_core::{build_descriptor, PlcFamily};

    fn root() -> Descriptor {
        build_descriptor("10.0.0.5", Some("1,0"), PlcFamily::ControlLogix, None).unwrap()
    }

    #[tokio::test]
    async fn test_replay_round_trip() {
        let mut capture = Capture::new();
        capture.insert_response("@tags", vec![0xaa, 0xbb]);
        let mut transport = ReplayTransport::new(capture);

        let timeout = Duration::from_millis(10);
        let handle = transport.create(&root(), timeout).await.unwrap();
        assert_eq!(transport.buffer(handle), Err(Status::ERR_NO_DATA));
        assert!(transport.read(handle, timeout).await.is_ok());
        assert_eq!(&transport.buffer(handle).unwrap()[..], &[0xaa, 0xbb]);
        assert!(transport.destroy(handle).is_ok());
        assert_eq!(transport.destroy(handle), Status::ERR_NOT_FOUND);
        assert_eq!(transport.history(), &[root()]);
    }

    #[test]
    fn test_capture_json() {
        let capture = Capture::from_json(
            r#"{"responses": {"@tags": [1, 2]}, "failures": {"Program:X.@tags": -19}}"#,
        )
        .unwrap();
        assert_eq!(&capture.response("@tags").unwrap()[..], &[1, 2]);
        assert_eq!(capture.failure("Program:X.@tags"), Some(Status::ERR_NOT_FOUND));

        let reparsed = Capture::from_json(&capture.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, capture);
    }

    #[test]
    fn test_capture_invalid_json() {
        let err = Capture::from_json("{\"responses\": 5}").unwrap_err();
        assert!(matches!(err, TagListError::InvalidData(_)));
    }

    #[test]
    fn test_capture_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"responses": {{"@tags": [7]}}}}"#).unwrap();
        let transport = ReplayTransport::from_file(file.path()).unwrap();
        assert_eq!(&transport.capture.response("@tags").unwrap()[..], &[7]);
        assert_eq!(transport.open_handles(), 0);
    }
}
