//! Record registry
//!
//! Maps record names to the generated functions that materialize them.
//! Generated code registers one [`RecordEntry`] per schema type during
//! startup; the envelope loop looks entries up by exact name afterwards.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use sandesh_protocol::Result as CodecResult;

/// A decoded record instance, type-erased for dispatch
///
/// Generated record types implement this; `as_any` is the downcast seam
/// the typed encode functions and process callbacks use to get their
/// concrete type back.
pub trait SandeshRecord: fmt::Debug {
    /// The registered record name this instance decodes from / encodes to
    fn record_name(&self) -> &'static str;

    /// Downcast support
    fn as_any(&self) -> &dyn Any;
}

/// Generated buffer-direct reader: decodes one full self-framed record
/// (name included) from the front of the buffer, returning the instance
/// and the bytes consumed
pub type DecodeFn = fn(&[u8]) -> CodecResult<(Box<dyn SandeshRecord>, usize)>;

/// Generated buffer-direct writer: encodes one full self-framed record
/// (name included) into the front of the buffer, returning bytes written
pub type EncodeFn = fn(&dyn SandeshRecord, &mut [u8]) -> CodecResult<usize>;

/// Application hook invoked for every successfully decoded record
pub type ProcessFn = Box<dyn Fn(&dyn SandeshRecord) + Send + Sync>;

/// Everything the dispatch loop needs to handle one record type
pub struct RecordEntry {
    name: &'static str,
    decode: DecodeFn,
    encode: EncodeFn,
    process: ProcessFn,
}

impl RecordEntry {
    /// Create a registry entry for one record type
    pub fn new(name: &'static str, decode: DecodeFn, encode: EncodeFn, process: ProcessFn) -> Self {
        Self {
            name,
            decode,
            encode,
            process,
        }
    }

    /// The record name this entry is registered under
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decode one record from the front of `buf`
    #[inline]
    pub fn decode(&self, buf: &[u8]) -> CodecResult<(Box<dyn SandeshRecord>, usize)> {
        (self.decode)(buf)
    }

    /// Encode `record` into the front of `buf`
    #[inline]
    pub fn encode(&self, record: &dyn SandeshRecord, buf: &mut [u8]) -> CodecResult<usize> {
        (self.encode)(record, buf)
    }

    /// Invoke the process callback on a decoded instance
    #[inline]
    pub fn process(&self, record: &dyn SandeshRecord) {
        (self.process)(record)
    }
}

impl fmt::Debug for RecordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordEntry").field("name", &self.name).finish()
    }
}

/// Name-to-entry lookup table
///
/// Built once during initialization and read-only thereafter; shared
/// references are safe to use from concurrent decode loops.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<&'static str, RecordEntry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry under its record name
    ///
    /// Re-registering a name replaces the previous entry; generated code
    /// registers each type exactly once.
    pub fn register(&mut self, entry: RecordEntry) {
        self.entries.insert(entry.name, entry);
    }

    /// Look up an entry by exact record name
    #[inline]
    pub fn find(&self, name: &str) -> Option<&RecordEntry> {
        self.entries.get(name)
    }

    /// Number of registered record types
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no types are registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
