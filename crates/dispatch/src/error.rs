//! Dispatch error types

use thiserror::Error;

use sandesh_protocol::CodecError;

/// Errors that can occur while dispatching a record stream
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Record name framing is malformed (non-positive name length)
    #[error("bad record frame: name length {0}")]
    BadFrame(i32),

    /// No registry entry matches the decoded record name
    #[error("unknown record type: {0}")]
    UnknownRecord(String),

    /// The codec failed underneath the dispatch loop
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl DispatchError {
    /// Check if this error means the stream named a type the receiver
    /// does not know
    pub fn is_unknown_record(&self) -> bool {
        matches!(self, Self::UnknownRecord(_))
    }
}
