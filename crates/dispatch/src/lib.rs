//! Sandesh record dispatch
//!
//! The thin layer between raw wire bytes and typed record handlers: a
//! [`Registry`] maps record names to their generated decode/encode
//! functions and a process callback, and [`decode`]/[`encode`] drive a
//! self-framing record stream through it.
//!
//! A record stream is just records concatenated back-to-back - no outer
//! length, no delimiter. Each record opens with its name (string framing)
//! and the registry entry's own reader knows where it ends, which is how
//! the loop finds the next one.
//!
//! # Design
//!
//! - The registry is built once at startup from generated code and is
//!   read-only afterwards; it is passed by reference into the loop rather
//!   than living in process-wide static state, so concurrent lookups are
//!   safe and tests stay hermetic.
//! - Decoding is conservative: the first bad record aborts the whole
//!   buffer. There is no skip-and-continue past a record that failed to
//!   decode.

mod envelope;
mod error;
mod registry;

pub use envelope::{decode, encode};
pub use error::DispatchError;
pub use registry::{DecodeFn, EncodeFn, ProcessFn, RecordEntry, Registry, SandeshRecord};

/// Result type for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;
