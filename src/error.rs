// Boundary error records and the host diagnostics area

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::host::registry;

pub type BoxResult<T> = Result<T, BoxError>;
pub type MsgpackResult<T> = Result<T, MsgpackError>;

/// `ER_UNKNOWN`: unclassified failure.
pub const ER_UNKNOWN: u32 = 0;
/// `ER_ILLEGAL_PARAMS`: malformed arguments.
pub const ER_ILLEGAL_PARAMS: u32 = 1;
/// `ER_UNSUPPORTED`: the operation cannot be served by this boundary.
pub const ER_UNSUPPORTED: u32 = 5;

/// Error type tag used for operations an unattached or partial host
/// cannot serve.
pub const NOT_IMPLEMENTED: &str = "NotImplemented";

/// Structured error reported by the host for a failed storage operation.
///
/// `file` and `line` carry the host-side provenance when the host supplies
/// it; `payload` carries additional key/value context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error_type}: {message}")]
pub struct BoxError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: u32,
    pub payload: Option<Vec<(String, String)>>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl BoxError {
    pub fn new(message: impl Into<String>, error_type: impl Into<String>, code: u32) -> Self {
        Self {
            message: message.into(),
            error_type: error_type.into(),
            code,
            payload: None,
            file: None,
            line: None,
        }
    }

    /// The deterministic signal of a stubbed boundary operation: no host is
    /// attached, or the attached host does not provide `op`.
    pub fn not_implemented(op: &str) -> Self {
        Self::new(format!("{op} is not implemented"), NOT_IMPLEMENTED, ER_UNSUPPORTED)
    }

    pub fn is_not_implemented(&self) -> bool {
        self.error_type == NOT_IMPLEMENTED
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn with_payload(mut self, payload: Vec<(String, String)>) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Error reported by the MessagePack codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("msgpack: {message}")]
pub struct MsgpackError {
    pub message: String,
}

impl MsgpackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Install `err` as the host's last diagnostic.
pub fn set(err: &BoxError) -> BoxResult<()> {
    registry::current("error.set")?.error_set(err)
}

/// Read the host's last diagnostic, if any.
pub fn last() -> BoxResult<Option<BoxError>> {
    registry::current("error.last")?.error_last()
}

/// Clear the host's diagnostics area.
pub fn clear() -> BoxResult<()> {
    registry::current("error.clear")?.error_clear()
}
