//! Record-stream envelope decode/encode
//!
//! The receive path walks a buffer of concatenated self-framed records:
//! peek each record's name, look up its registry entry, hand the entry's
//! reader the rest of the buffer, fire the process callback, advance by
//! what the reader consumed. The send path is the single-record mirror.

use tracing::{debug, warn};

use sandesh_protocol::{read_i32_at, CodecError};

use crate::{DispatchError, Registry, Result, SandeshRecord};

/// Decode every record in `buf`, dispatching each through `registry`
///
/// Returns the total bytes consumed, which equals `buf.len()` on success.
/// The first failure aborts the whole decode; records already dispatched
/// stay dispatched (their process callbacks have run).
pub fn decode(buf: &[u8], registry: &Registry) -> Result<usize> {
    let mut offset = 0;
    while offset < buf.len() {
        let window = &buf[offset..];
        let name = peek_record_name(window)?;
        let Some(entry) = registry.find(name) else {
            warn!(record = name, offset, "no registry entry for record, aborting decode");
            return Err(DispatchError::UnknownRecord(name.to_string()));
        };

        // The entry's reader consumes the record's own name framing again;
        // the peek above never advanced the offset
        let (record, consumed) = entry.decode(window)?;
        entry.process(&*record);
        debug!(record = name, bytes = consumed, "dispatched record");

        offset += consumed;
    }
    Ok(offset)
}

/// Encode one record into `out` through its registry entry
///
/// The entry's writer produces the record's full self-framing (name
/// included); nothing is added at this layer. Returns bytes written.
pub fn encode(record: &dyn SandeshRecord, registry: &Registry, out: &mut [u8]) -> Result<usize> {
    let name = record.record_name();
    let Some(entry) = registry.find(name) else {
        return Err(DispatchError::UnknownRecord(name.to_string()));
    };
    Ok(entry.encode(record, out)?)
}

/// Read the length-prefixed record name at the front of `buf` without
/// consuming it
fn peek_record_name(buf: &[u8]) -> Result<&str> {
    let len = read_i32_at(buf, 0)?;
    if len <= 0 {
        return Err(DispatchError::BadFrame(len));
    }
    let len = len as usize;
    let remaining = buf.len() - 4;
    if len > remaining {
        return Err(CodecError::buffer_underflow(len, remaining).into());
    }
    std::str::from_utf8(&buf[4..4 + len]).map_err(|_| CodecError::InvalidUtf8.into())
}
