//! Binary protocol codec
//!
//! The byte-exact wire encoding every Sandesh runtime must agree on:
//!
//! - All multi-byte integers are big-endian regardless of host.
//! - `double` is the big-endian IEEE-754 bit pattern, 8 bytes, no
//!   canonicalization.
//! - `string`/`binary`/`xml` are an `i32` byte length followed by the raw
//!   payload, no terminator.
//! - `uuid` is 16 verbatim bytes with no byte-order transform.
//! - Field header: tag byte, then `i16` id (no id after STOP). Map header:
//!   key tag, value tag, `i32` size. List/set header: element tag, `i32`
//!   size. Struct begin/end produce no bytes; sandesh begin writes the
//!   record name with string framing.
//! - Legacy message header: `i32` version word (`0x8001` halfword | kind),
//!   name string, `i32` seqid.

use std::net::Ipv4Addr;

use uuid::Uuid;

use crate::codec::{FieldHeader, ListHeader, MapHeader, MessageHeader};
use crate::{
    CodecError, MessageKind, Result, SandeshCodec, Transport, WireType, VERSION_1, VERSION_MASK,
};

/// Binary wire codec over a [`Transport`]
///
/// Holds no state beyond the transport itself; concurrency is the
/// caller's responsibility per transport instance.
#[derive(Debug)]
pub struct BinaryCodec<T> {
    trans: T,
}

impl<T: Transport> BinaryCodec<T> {
    /// Create a codec over the given transport
    pub fn new(trans: T) -> Self {
        Self { trans }
    }

    /// Borrow the underlying transport
    #[inline]
    pub fn transport(&self) -> &T {
        &self.trans
    }

    /// Mutably borrow the underlying transport
    #[inline]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.trans
    }

    /// Unwrap the codec, returning the transport
    pub fn into_transport(self) -> T {
        self.trans
    }

    #[inline]
    fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.trans.read_all(&mut buf)?;
        Ok(buf)
    }

    /// Write an `i32` length prefix followed by the payload bytes
    fn write_len_prefixed(&mut self, payload: &[u8]) -> Result<usize> {
        let len = i32::try_from(payload.len())
            .map_err(|_| CodecError::capacity_exceeded(payload.len(), i32::MAX as usize))?;
        self.trans.write(&len.to_be_bytes())?;
        if !payload.is_empty() {
            self.trans.write(payload)?;
        }
        Ok(4 + payload.len())
    }

    /// Read an `i32` length prefix and that many payload bytes
    ///
    /// A negative length is rejected before any allocation; a zero length
    /// produces an empty value without touching the transport.
    fn read_len_prefixed(&mut self) -> Result<(Vec<u8>, usize)> {
        let len = i32::from_be_bytes(self.read_fixed::<4>()?);
        if len < 0 {
            return Err(CodecError::NegativeSize(len));
        }
        let len = len as usize;
        if len == 0 {
            return Ok((Vec::new(), 4));
        }
        let mut payload = Vec::new();
        payload
            .try_reserve_exact(len)
            .map_err(|_| CodecError::AllocationFailed(len))?;
        payload.resize(len, 0);
        self.trans.read_all(&mut payload)?;
        Ok((payload, 4 + len))
    }

    fn read_container_size(&mut self) -> Result<u32> {
        let size = i32::from_be_bytes(self.read_fixed::<4>()?);
        if size < 0 {
            return Err(CodecError::NegativeSize(size));
        }
        Ok(size as u32)
    }

    fn read_wire_type(&mut self) -> Result<WireType> {
        let tag = self.read_fixed::<1>()?[0];
        WireType::from_u8(tag).ok_or(CodecError::InvalidWireType(tag))
    }

    fn write_container_size(&mut self, size: u32) -> Result<()> {
        let size = i32::try_from(size)
            .map_err(|_| CodecError::capacity_exceeded(size as usize, i32::MAX as usize))?;
        self.trans.write(&size.to_be_bytes())?;
        Ok(())
    }
}

impl<T: Transport> SandeshCodec for BinaryCodec<T> {
    // =========================================================================
    // Structural writes
    // =========================================================================

    fn write_message_begin(&mut self, name: &str, kind: MessageKind, seqid: i32) -> Result<usize> {
        let version = (VERSION_1 | kind.as_u8() as u32) as i32;
        self.trans.write(&version.to_be_bytes())?;
        let name_len = self.write_len_prefixed(name.as_bytes())?;
        self.trans.write(&seqid.to_be_bytes())?;
        Ok(4 + name_len + 4)
    }

    fn write_message_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn write_sandesh_begin(&mut self, name: &str) -> Result<usize> {
        self.write_len_prefixed(name.as_bytes())
    }

    fn write_sandesh_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn write_struct_begin(&mut self, _name: &str) -> Result<usize> {
        Ok(0)
    }

    fn write_struct_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn write_field_begin(
        &mut self,
        _name: &str,
        field_type: WireType,
        field_id: i16,
    ) -> Result<usize> {
        self.trans.write(&[field_type.as_u8()])?;
        self.trans.write(&field_id.to_be_bytes())?;
        Ok(3)
    }

    fn write_field_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn write_field_stop(&mut self) -> Result<usize> {
        self.trans.write(&[WireType::Stop.as_u8()])?;
        Ok(1)
    }

    fn write_map_begin(
        &mut self,
        key_type: WireType,
        value_type: WireType,
        size: u32,
    ) -> Result<usize> {
        self.trans.write(&[key_type.as_u8()])?;
        self.trans.write(&[value_type.as_u8()])?;
        self.write_container_size(size)?;
        Ok(6)
    }

    fn write_map_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn write_list_begin(&mut self, elem_type: WireType, size: u32) -> Result<usize> {
        self.trans.write(&[elem_type.as_u8()])?;
        self.write_container_size(size)?;
        Ok(5)
    }

    fn write_list_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn write_set_begin(&mut self, elem_type: WireType, size: u32) -> Result<usize> {
        self.write_list_begin(elem_type, size)
    }

    fn write_set_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    // =========================================================================
    // Scalar writes
    // =========================================================================

    fn write_bool(&mut self, value: bool) -> Result<usize> {
        self.trans.write(&[value as u8])?;
        Ok(1)
    }

    fn write_byte(&mut self, value: i8) -> Result<usize> {
        self.trans.write(&[value as u8])?;
        Ok(1)
    }

    fn write_i16(&mut self, value: i16) -> Result<usize> {
        self.trans.write(&value.to_be_bytes())?;
        Ok(2)
    }

    fn write_u16(&mut self, value: u16) -> Result<usize> {
        self.trans.write(&value.to_be_bytes())?;
        Ok(2)
    }

    fn write_i32(&mut self, value: i32) -> Result<usize> {
        self.trans.write(&value.to_be_bytes())?;
        Ok(4)
    }

    fn write_u32(&mut self, value: u32) -> Result<usize> {
        self.trans.write(&value.to_be_bytes())?;
        Ok(4)
    }

    fn write_i64(&mut self, value: i64) -> Result<usize> {
        self.trans.write(&value.to_be_bytes())?;
        Ok(8)
    }

    fn write_u64(&mut self, value: u64) -> Result<usize> {
        self.trans.write(&value.to_be_bytes())?;
        Ok(8)
    }

    fn write_double(&mut self, value: f64) -> Result<usize> {
        self.trans.write(&value.to_bits().to_be_bytes())?;
        Ok(8)
    }

    fn write_ipv4(&mut self, value: Ipv4Addr) -> Result<usize> {
        self.trans.write(&value.octets())?;
        Ok(4)
    }

    fn write_uuid(&mut self, value: Uuid) -> Result<usize> {
        self.trans.write(value.as_bytes())?;
        Ok(16)
    }

    fn write_string(&mut self, value: &str) -> Result<usize> {
        self.write_len_prefixed(value.as_bytes())
    }

    fn write_binary(&mut self, value: &[u8]) -> Result<usize> {
        self.write_len_prefixed(value)
    }

    fn write_xml(&mut self, value: &str) -> Result<usize> {
        self.write_len_prefixed(value.as_bytes())
    }

    // =========================================================================
    // Structural reads
    // =========================================================================

    fn read_message_begin(&mut self) -> Result<(MessageHeader, usize)> {
        let word = i32::from_be_bytes(self.read_fixed::<4>()?);
        if word >= 0 {
            // Old non-versioned messages are not supported
            return Err(CodecError::UnversionedMessage(word as u32));
        }
        let word = word as u32;
        if word & VERSION_MASK != VERSION_1 {
            return Err(CodecError::BadVersion {
                found: word,
                expected: VERSION_1,
            });
        }
        let kind_byte = (word & 0xff) as u8;
        let kind = MessageKind::from_u8(kind_byte)
            .ok_or(CodecError::InvalidMessageKind(kind_byte))?;
        let (name, name_len) = self.read_string()?;
        let seqid = i32::from_be_bytes(self.read_fixed::<4>()?);
        Ok((MessageHeader { name, kind, seqid }, 4 + name_len + 4))
    }

    fn read_message_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn read_sandesh_begin(&mut self) -> Result<(String, usize)> {
        self.read_string()
    }

    fn read_sandesh_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn read_struct_begin(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn read_struct_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn read_field_begin(&mut self) -> Result<(FieldHeader, usize)> {
        let tag = self.read_fixed::<1>()?[0];
        if tag == WireType::Stop.as_u8() {
            // No field id follows the STOP sentinel
            let header = FieldHeader {
                field_type: WireType::Stop,
                field_id: 0,
            };
            return Ok((header, 1));
        }
        let field_type = WireType::from_u8(tag).ok_or(CodecError::InvalidWireType(tag))?;
        let field_id = i16::from_be_bytes(self.read_fixed::<2>()?);
        Ok((
            FieldHeader {
                field_type,
                field_id,
            },
            3,
        ))
    }

    fn read_field_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn read_map_begin(&mut self) -> Result<(MapHeader, usize)> {
        let key_type = self.read_wire_type()?;
        let value_type = self.read_wire_type()?;
        let size = self.read_container_size()?;
        Ok((
            MapHeader {
                key_type,
                value_type,
                size,
            },
            6,
        ))
    }

    fn read_map_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn read_list_begin(&mut self) -> Result<(ListHeader, usize)> {
        let elem_type = self.read_wire_type()?;
        let size = self.read_container_size()?;
        Ok((ListHeader { elem_type, size }, 5))
    }

    fn read_list_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    fn read_set_begin(&mut self) -> Result<(ListHeader, usize)> {
        self.read_list_begin()
    }

    fn read_set_end(&mut self) -> Result<usize> {
        Ok(0)
    }

    // =========================================================================
    // Scalar reads
    // =========================================================================

    fn read_bool(&mut self) -> Result<(bool, usize)> {
        let byte = self.read_fixed::<1>()?[0];
        Ok((byte != 0, 1))
    }

    fn read_byte(&mut self) -> Result<(i8, usize)> {
        let byte = self.read_fixed::<1>()?[0];
        Ok((byte as i8, 1))
    }

    fn read_i16(&mut self) -> Result<(i16, usize)> {
        Ok((i16::from_be_bytes(self.read_fixed::<2>()?), 2))
    }

    fn read_u16(&mut self) -> Result<(u16, usize)> {
        Ok((u16::from_be_bytes(self.read_fixed::<2>()?), 2))
    }

    fn read_i32(&mut self) -> Result<(i32, usize)> {
        Ok((i32::from_be_bytes(self.read_fixed::<4>()?), 4))
    }

    fn read_u32(&mut self) -> Result<(u32, usize)> {
        Ok((u32::from_be_bytes(self.read_fixed::<4>()?), 4))
    }

    fn read_i64(&mut self) -> Result<(i64, usize)> {
        Ok((i64::from_be_bytes(self.read_fixed::<8>()?), 8))
    }

    fn read_u64(&mut self) -> Result<(u64, usize)> {
        Ok((u64::from_be_bytes(self.read_fixed::<8>()?), 8))
    }

    fn read_double(&mut self) -> Result<(f64, usize)> {
        let bits = u64::from_be_bytes(self.read_fixed::<8>()?);
        Ok((f64::from_bits(bits), 8))
    }

    fn read_ipv4(&mut self) -> Result<(Ipv4Addr, usize)> {
        Ok((Ipv4Addr::from(self.read_fixed::<4>()?), 4))
    }

    fn read_uuid(&mut self) -> Result<(Uuid, usize)> {
        Ok((Uuid::from_bytes(self.read_fixed::<16>()?), 16))
    }

    fn read_string(&mut self) -> Result<(String, usize)> {
        let (payload, consumed) = self.read_len_prefixed()?;
        let value = String::from_utf8(payload).map_err(|_| CodecError::InvalidUtf8)?;
        Ok((value, consumed))
    }

    fn read_binary(&mut self) -> Result<(Vec<u8>, usize)> {
        self.read_len_prefixed()
    }

    fn read_xml(&mut self) -> Result<(String, usize)> {
        self.read_string()
    }
}
