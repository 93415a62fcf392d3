//! Codec abstraction shared by wire encodings
//!
//! [`SandeshCodec`] is the seam the generated per-record readers/writers
//! and the generic skip algorithm are written against. The set of
//! encodings behind it is closed and chosen at construction time - the
//! binary codec lives in this crate, the human-readable XML rendition is a
//! separate collaborator sharing the same contract.
//!
//! Write operations return the number of wire bytes produced; read
//! operations return the decoded value paired with the number of wire
//! bytes consumed. Framing calls that emit nothing in an encoding return
//! zero.

use std::net::Ipv4Addr;

use uuid::Uuid;

use crate::{MessageKind, Result, WireType};

/// Decoded legacy message envelope header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub name: String,
    pub kind: MessageKind,
    pub seqid: i32,
}

/// Decoded field header: wire type plus schema field id
///
/// A STOP header carries `WireType::Stop` and a defaulted id of 0 - there
/// is no id on the wire after the STOP tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    pub field_type: WireType,
    pub field_id: i16,
}

/// Decoded map container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    pub key_type: WireType,
    pub value_type: WireType,
    pub size: u32,
}

/// Decoded list/set container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    pub elem_type: WireType,
    pub size: u32,
}

/// Typed read/write contract over one wire encoding
pub trait SandeshCodec {
    // =========================================================================
    // Structural writes
    // =========================================================================

    /// Write the legacy RPC message header (version word, name, seqid)
    fn write_message_begin(&mut self, name: &str, kind: MessageKind, seqid: i32) -> Result<usize>;
    fn write_message_end(&mut self) -> Result<usize>;

    /// Write the sandesh record opening (record name framing)
    fn write_sandesh_begin(&mut self, name: &str) -> Result<usize>;
    fn write_sandesh_end(&mut self) -> Result<usize>;

    fn write_struct_begin(&mut self, name: &str) -> Result<usize>;
    fn write_struct_end(&mut self) -> Result<usize>;

    fn write_field_begin(&mut self, name: &str, field_type: WireType, field_id: i16)
        -> Result<usize>;
    fn write_field_end(&mut self) -> Result<usize>;

    /// Write the STOP sentinel terminating a field sequence
    fn write_field_stop(&mut self) -> Result<usize>;

    fn write_map_begin(
        &mut self,
        key_type: WireType,
        value_type: WireType,
        size: u32,
    ) -> Result<usize>;
    fn write_map_end(&mut self) -> Result<usize>;

    fn write_list_begin(&mut self, elem_type: WireType, size: u32) -> Result<usize>;
    fn write_list_end(&mut self) -> Result<usize>;

    fn write_set_begin(&mut self, elem_type: WireType, size: u32) -> Result<usize>;
    fn write_set_end(&mut self) -> Result<usize>;

    // =========================================================================
    // Scalar writes
    // =========================================================================

    fn write_bool(&mut self, value: bool) -> Result<usize>;
    fn write_byte(&mut self, value: i8) -> Result<usize>;
    fn write_i16(&mut self, value: i16) -> Result<usize>;
    fn write_u16(&mut self, value: u16) -> Result<usize>;
    fn write_i32(&mut self, value: i32) -> Result<usize>;
    fn write_u32(&mut self, value: u32) -> Result<usize>;
    fn write_i64(&mut self, value: i64) -> Result<usize>;
    fn write_u64(&mut self, value: u64) -> Result<usize>;
    fn write_double(&mut self, value: f64) -> Result<usize>;
    fn write_ipv4(&mut self, value: Ipv4Addr) -> Result<usize>;
    fn write_uuid(&mut self, value: Uuid) -> Result<usize>;
    fn write_string(&mut self, value: &str) -> Result<usize>;
    fn write_binary(&mut self, value: &[u8]) -> Result<usize>;
    fn write_xml(&mut self, value: &str) -> Result<usize>;

    // =========================================================================
    // Structural reads
    // =========================================================================

    fn read_message_begin(&mut self) -> Result<(MessageHeader, usize)>;
    fn read_message_end(&mut self) -> Result<usize>;

    /// Read the sandesh record opening, yielding the record name
    fn read_sandesh_begin(&mut self) -> Result<(String, usize)>;
    fn read_sandesh_end(&mut self) -> Result<usize>;

    fn read_struct_begin(&mut self) -> Result<usize>;
    fn read_struct_end(&mut self) -> Result<usize>;

    fn read_field_begin(&mut self) -> Result<(FieldHeader, usize)>;
    fn read_field_end(&mut self) -> Result<usize>;

    fn read_map_begin(&mut self) -> Result<(MapHeader, usize)>;
    fn read_map_end(&mut self) -> Result<usize>;

    fn read_list_begin(&mut self) -> Result<(ListHeader, usize)>;
    fn read_list_end(&mut self) -> Result<usize>;

    fn read_set_begin(&mut self) -> Result<(ListHeader, usize)>;
    fn read_set_end(&mut self) -> Result<usize>;

    // =========================================================================
    // Scalar reads
    // =========================================================================

    fn read_bool(&mut self) -> Result<(bool, usize)>;
    fn read_byte(&mut self) -> Result<(i8, usize)>;
    fn read_i16(&mut self) -> Result<(i16, usize)>;
    fn read_u16(&mut self) -> Result<(u16, usize)>;
    fn read_i32(&mut self) -> Result<(i32, usize)>;
    fn read_u32(&mut self) -> Result<(u32, usize)>;
    fn read_i64(&mut self) -> Result<(i64, usize)>;
    fn read_u64(&mut self) -> Result<(u64, usize)>;
    fn read_double(&mut self) -> Result<(f64, usize)>;
    fn read_ipv4(&mut self) -> Result<(Ipv4Addr, usize)>;
    fn read_uuid(&mut self) -> Result<(Uuid, usize)>;
    fn read_string(&mut self) -> Result<(String, usize)>;
    fn read_binary(&mut self) -> Result<(Vec<u8>, usize)>;
    fn read_xml(&mut self) -> Result<(String, usize)>;
}
