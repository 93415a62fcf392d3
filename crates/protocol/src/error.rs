//! Codec error types
//!
//! Errors that can occur while encoding or decoding wire data. Each kind
//! is distinct so callers (and tests) can tell a truncated stream from a
//! hostile length field from a version mismatch.

use thiserror::Error;

/// Errors that can occur during codec operations
#[derive(Debug, Error)]
pub enum CodecError {
    /// Transport could not supply the requested bytes
    #[error("transport underflow: needed {needed} bytes, got {got}")]
    TransportUnderflow { needed: usize, got: usize },

    /// Bounded transport cannot accept more bytes
    #[error("buffer capacity exceeded: need {need} bytes, capacity {capacity}")]
    CapacityExceeded { need: usize, capacity: usize },

    /// Decoded string/container length is negative
    #[error("negative size on wire: {0}")]
    NegativeSize(i32),

    /// Legacy message header version magic does not match
    #[error("bad version word: 0x{found:08x}, expected magic 0x{expected:08x}")]
    BadVersion { found: u32, expected: u32 },

    /// Legacy message header carries no version metadata (old unversioned
    /// messages are not supported)
    #[error("message header missing version metadata: 0x{0:08x}")]
    UnversionedMessage(u32),

    /// Version word low byte is not a known message kind
    #[error("invalid message kind: {0}")]
    InvalidMessageKind(u8),

    /// A flat-buffer read would run past the supplied length
    #[error("buffer underflow: needed {needed} bytes, {remaining} remaining")]
    BufferUnderflow { needed: usize, remaining: usize },

    /// Tag byte does not name a known wire type
    #[error("invalid wire type tag: {0}")]
    InvalidWireType(u8),

    /// String value is not valid UTF-8
    #[error("invalid UTF-8 in string value")]
    InvalidUtf8,

    /// Length-prefixed read could not reserve its payload buffer
    #[error("allocation of {0} bytes failed")]
    AllocationFailed(usize),
}

impl CodecError {
    /// Create a transport underflow error
    #[inline]
    pub fn transport_underflow(needed: usize, got: usize) -> Self {
        Self::TransportUnderflow { needed, got }
    }

    /// Create a buffer underflow error
    #[inline]
    pub fn buffer_underflow(needed: usize, remaining: usize) -> Self {
        Self::BufferUnderflow { needed, remaining }
    }

    /// Create a capacity exceeded error
    #[inline]
    pub fn capacity_exceeded(need: usize, capacity: usize) -> Self {
        Self::CapacityExceeded { need, capacity }
    }

    /// Check if this error means the input ended early (either variant)
    pub fn is_underflow(&self) -> bool {
        matches!(
            self,
            Self::TransportUnderflow { .. } | Self::BufferUnderflow { .. }
        )
    }

    /// Check if this error is a hostile/corrupt length field
    pub fn is_negative_size(&self) -> bool {
        matches!(self, Self::NegativeSize(_))
    }
}
