//! Bounds-checked skip over a flat buffer
//!
//! A second rendition of the skip algorithm that walks a caller-supplied
//! `&[u8]` directly, with no transport indirection. This is the
//! message-dispatch fast path: every step verifies the bytes it needs are
//! inside the buffer before touching them, so a truncated or hostile
//! stream produces a [`CodecError::BufferUnderflow`] rather than an
//! out-of-bounds access.
//!
//! Recursion passes the shrinking `&buf[offset..]` window into each
//! nested value; a skip's return value is always `<=` the window it was
//! given, which keeps every offset in bounds by construction.

use crate::{CodecError, Result, WireType};

#[inline]
fn check(buf: &[u8], offset: usize, needed: usize) -> Result<()> {
    let remaining = buf.len().saturating_sub(offset);
    if needed > remaining {
        return Err(CodecError::buffer_underflow(needed, remaining));
    }
    Ok(())
}

/// Read one byte at `offset`
#[inline]
pub fn read_u8_at(buf: &[u8], offset: usize) -> Result<u8> {
    check(buf, offset, 1)?;
    Ok(buf[offset])
}

/// Read a big-endian `i16` at `offset`
#[inline]
pub fn read_i16_at(buf: &[u8], offset: usize) -> Result<i16> {
    check(buf, offset, 2)?;
    Ok(i16::from_be_bytes([buf[offset], buf[offset + 1]]))
}

/// Read a big-endian `i32` at `offset`
#[inline]
pub fn read_i32_at(buf: &[u8], offset: usize) -> Result<i32> {
    check(buf, offset, 4)?;
    Ok(i32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

#[inline]
fn wire_type_at(buf: &[u8], offset: usize) -> Result<WireType> {
    let tag = read_u8_at(buf, offset)?;
    WireType::from_u8(tag).ok_or(CodecError::InvalidWireType(tag))
}

#[inline]
fn skip_fixed(buf: &[u8], width: usize) -> Result<usize> {
    check(buf, 0, width)?;
    Ok(width)
}

/// Skip one encoded value at the start of `buf`, returning bytes consumed
///
/// Behaves exactly like [`skip`](crate::skip) over a transport, but never
/// reads past `buf.len()` under any recursion depth. As with the
/// transport variant, nesting recursion carries no explicit depth bound.
pub fn skip_in_buffer(buf: &[u8], wire_type: WireType) -> Result<usize> {
    match wire_type {
        WireType::Bool | WireType::Byte => skip_fixed(buf, 1),
        WireType::I16 | WireType::U16 => skip_fixed(buf, 2),
        WireType::I32 | WireType::U32 | WireType::Ipv4 => skip_fixed(buf, 4),
        WireType::I64 | WireType::U64 | WireType::Double => skip_fixed(buf, 8),
        WireType::Uuid => skip_fixed(buf, 16),
        WireType::String | WireType::Xml => skip_string(buf),
        WireType::Struct => skip_field_sequence(buf),
        WireType::Sandesh => {
            // Record name with string framing, then the field sequence
            let mut offset = skip_string(buf)?;
            offset += skip_field_sequence(&buf[offset..])?;
            Ok(offset)
        }
        WireType::Map => {
            let key_type = wire_type_at(buf, 0)?;
            let value_type = wire_type_at(buf, 1)?;
            let size = read_i32_at(buf, 2)?;
            if size < 0 {
                return Err(CodecError::NegativeSize(size));
            }
            let mut offset = 6;
            for _ in 0..size {
                offset += skip_in_buffer(&buf[offset..], key_type)?;
                offset += skip_in_buffer(&buf[offset..], value_type)?;
            }
            Ok(offset)
        }
        WireType::List | WireType::Set => {
            let elem_type = wire_type_at(buf, 0)?;
            let size = read_i32_at(buf, 1)?;
            if size < 0 {
                return Err(CodecError::NegativeSize(size));
            }
            let mut offset = 5;
            for _ in 0..size {
                offset += skip_in_buffer(&buf[offset..], elem_type)?;
            }
            Ok(offset)
        }
        // Not independently skippable value types in this protocol
        WireType::Stop
        | WireType::Void
        | WireType::Utf8
        | WireType::Utf16
        | WireType::IpAddr => Ok(0),
    }
}

/// Skip a length-prefixed string, validating the claimed payload length
fn skip_string(buf: &[u8]) -> Result<usize> {
    let len = read_i32_at(buf, 0)?;
    if len < 0 {
        return Err(CodecError::NegativeSize(len));
    }
    let len = len as usize;
    // The length field may claim more payload than is present
    check(buf, 4, len)?;
    Ok(4 + len)
}

/// Skip a field sequence up to and including its STOP sentinel
fn skip_field_sequence(buf: &[u8]) -> Result<usize> {
    let mut offset = 0;
    loop {
        let tag = read_u8_at(buf, offset)?;
        if tag == WireType::Stop.as_u8() {
            return Ok(offset + 1);
        }
        let field_type = WireType::from_u8(tag).ok_or(CodecError::InvalidWireType(tag))?;
        // Field id follows the tag byte
        check(buf, offset + 1, 2)?;
        offset += 3;
        offset += skip_in_buffer(&buf[offset..], field_type)?;
    }
}
