//! Generic skip over a codec
//!
//! Consumes and discards one encoded value of a known [`WireType`] using
//! only the self-describing tags on the wire. This is what lets a receiver
//! built from an older schema pass over fields, struct members, or whole
//! records it does not understand, and it must consume exactly the bytes a
//! schema-aware reader would.

use crate::{Result, SandeshCodec, WireType};

/// Skip one encoded value, returning the number of wire bytes consumed
///
/// Composite types recurse once per nesting level with no explicit depth
/// bound; a struct whose field sequence never reaches STOP does not
/// terminate. Both properties match the wire contract: well-formed input
/// always terminates field sequences, and nesting depth is fixed by the
/// generated schema that produced the value.
pub fn skip<C>(codec: &mut C, wire_type: WireType) -> Result<usize>
where
    C: SandeshCodec + ?Sized,
{
    match wire_type {
        WireType::Bool => codec.read_bool().map(|(_, n)| n),
        WireType::Byte => codec.read_byte().map(|(_, n)| n),
        WireType::I16 => codec.read_i16().map(|(_, n)| n),
        WireType::U16 => codec.read_u16().map(|(_, n)| n),
        WireType::I32 => codec.read_i32().map(|(_, n)| n),
        WireType::U32 => codec.read_u32().map(|(_, n)| n),
        WireType::I64 => codec.read_i64().map(|(_, n)| n),
        WireType::U64 => codec.read_u64().map(|(_, n)| n),
        WireType::Double => codec.read_double().map(|(_, n)| n),
        WireType::Ipv4 => codec.read_ipv4().map(|(_, n)| n),
        WireType::Uuid => codec.read_uuid().map(|(_, n)| n),
        // Discarded string payloads are read as raw bytes so that content
        // a newer schema produced is never rejected for its encoding
        WireType::String | WireType::Xml => codec.read_binary().map(|(_, n)| n),
        WireType::Struct => {
            let mut total = codec.read_struct_begin()?;
            total += skip_fields(codec)?;
            total += codec.read_struct_end()?;
            Ok(total)
        }
        WireType::Sandesh => {
            let (_name, mut total) = codec.read_sandesh_begin()?;
            total += skip_fields(codec)?;
            total += codec.read_sandesh_end()?;
            Ok(total)
        }
        WireType::Map => {
            let (header, mut total) = codec.read_map_begin()?;
            for _ in 0..header.size {
                total += skip(codec, header.key_type)?;
                total += skip(codec, header.value_type)?;
            }
            total += codec.read_map_end()?;
            Ok(total)
        }
        WireType::List => {
            let (header, mut total) = codec.read_list_begin()?;
            for _ in 0..header.size {
                total += skip(codec, header.elem_type)?;
            }
            total += codec.read_list_end()?;
            Ok(total)
        }
        WireType::Set => {
            let (header, mut total) = codec.read_set_begin()?;
            for _ in 0..header.size {
                total += skip(codec, header.elem_type)?;
            }
            total += codec.read_set_end()?;
            Ok(total)
        }
        // Not independently skippable value types in this protocol
        WireType::Stop
        | WireType::Void
        | WireType::Utf8
        | WireType::Utf16
        | WireType::IpAddr => Ok(0),
    }
}

/// Skip a field sequence up to and including its STOP sentinel
fn skip_fields<C>(codec: &mut C) -> Result<usize>
where
    C: SandeshCodec + ?Sized,
{
    let mut total = 0;
    loop {
        let (field, n) = codec.read_field_begin()?;
        total += n;
        if field.field_type == WireType::Stop {
            return Ok(total);
        }
        total += skip(codec, field.field_type)?;
        total += codec.read_field_end()?;
    }
}
