//! Sandesh wire protocol - typed binary codec for self-describing records
//!
//! This crate implements the byte-level encoding shared by every Sandesh
//! runtime: typed read/write primitives over a [`Transport`], the
//! struct/sandesh/container framing convention, and the generic skip
//! algorithm that walks a value it has no schema for.
//!
//! # Design Principles
//!
//! - **Wire constants are law**: every tag byte and integer width in this
//!   crate is a cross-runtime contract. Multi-byte integers are big-endian
//!   regardless of host.
//! - **No panics on wire data**: malformed input returns a [`CodecError`],
//!   never an out-of-bounds access or a panic.
//! - **Byte counts everywhere**: every primitive reports how many wire
//!   bytes it produced or consumed, which is what makes the skip algorithm
//!   and encoded-length measurement composable.
//!
//! # Skip and forward compatibility
//!
//! A receiver built from an older schema tolerates fields it does not know
//! by handing the field's wire type to [`skip`] (transport-based) or
//! [`skip_in_buffer`] (bounds-checked, flat buffer). Both consume exactly
//! the bytes of one encoded value, recursing through nested structs and
//! containers using only the self-describing tags on the wire.

mod binary;
mod buffer;
mod codec;
mod error;
mod skip;
mod transport;
mod wire_type;

pub use binary::BinaryCodec;
pub use buffer::{read_i16_at, read_i32_at, read_u8_at, skip_in_buffer};
pub use codec::{FieldHeader, ListHeader, MapHeader, MessageHeader, SandeshCodec};
pub use error::CodecError;
pub use skip::skip;
pub use transport::{FixedBuffer, LengthCounter, MemoryBuffer, SliceReader, Transport};
pub use wire_type::{MessageKind, WireType};

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Mask isolating the version halfword of a legacy message header
pub const VERSION_MASK: u32 = 0xffff_0000;

/// Version magic for legacy message headers (protocol version 1)
pub const VERSION_1: u32 = 0x8001_0000;

/// Default capacity for the growable memory transport (4KB)
pub const DEFAULT_BUFFER_CAPACITY: usize = 4 * 1024;

// Test modules - only compiled during testing
#[cfg(test)]
mod binary_test;
