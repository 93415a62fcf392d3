//! Byte-level transport abstraction
//!
//! The codec is layered over a blocking byte source/sink. Four in-memory
//! forms cover the runtime's needs:
//!
//! - [`MemoryBuffer`] - owned growable buffer, read and write
//! - [`FixedBuffer`] - caller-supplied bounded buffer, rejects overflow
//! - [`SliceReader`] - zero-copy reads over a borrowed slice
//! - [`LengthCounter`] - discards writes and counts bytes, for measuring
//!   an encoded length without producing output
//!
//! Socket transports live elsewhere; nothing in this crate manages
//! buffering policy or connection lifecycle beyond these no-op hooks.

use bytes::BytesMut;

use crate::{CodecError, Result, DEFAULT_BUFFER_CAPACITY};

/// Blocking byte source/sink the codec reads from and writes to
///
/// A transport instance keeps mutable cursor state and is not synchronized;
/// callers that share one across threads must provide their own locking.
pub trait Transport {
    /// Read up to `buf.len()` bytes, returning how many were supplied
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write `buf`, returning how many bytes were accepted
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Check whether the transport is usable (always true for memory forms)
    fn is_open(&self) -> bool {
        true
    }

    /// Lifecycle no-op for memory transports
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    /// Lifecycle no-op for memory transports
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Lifecycle no-op for memory transports
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Read exactly `buf.len()` bytes or fail with a transport underflow
    ///
    /// Never zero-fills: a short supply is an error, not a partial result.
    fn read_all(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut got = 0;
        while got < buf.len() {
            let n = self.read(&mut buf[got..])?;
            if n == 0 {
                return Err(CodecError::transport_underflow(buf.len(), got));
            }
            got += n;
        }
        Ok(())
    }
}

// =============================================================================
// MemoryBuffer
// =============================================================================

/// Owned growable read/write buffer
///
/// Writes append; reads consume from a cursor over what was written.
/// Growth is internal to the underlying `BytesMut` - no raw pointer into
/// the buffer ever crosses a growth boundary.
#[derive(Debug, Default)]
pub struct MemoryBuffer {
    buf: BytesMut,
    rpos: usize,
}

impl MemoryBuffer {
    /// Create an empty buffer with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// Create an empty buffer with the given initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            rpos: 0,
        }
    }

    /// Create a buffer pre-filled with `data`, read cursor at the start
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(data),
            rpos: 0,
        }
    }

    /// Get everything written so far
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.buf
    }

    /// Get the bytes not yet consumed by reads
    #[inline]
    pub fn readable(&self) -> &[u8] {
        &self.buf[self.rpos..]
    }

    /// Number of bytes written so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard all contents and reset the read cursor
    pub fn clear(&mut self) {
        self.buf.clear();
        self.rpos = 0;
    }
}

impl Transport for MemoryBuffer {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let available = self.buf.len() - self.rpos;
        let n = buf.len().min(available);
        buf[..n].copy_from_slice(&self.buf[self.rpos..self.rpos + n]);
        self.rpos += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }
}

// =============================================================================
// FixedBuffer
// =============================================================================

/// Bounded transport over a caller-supplied buffer
///
/// Writes land in the external slice and fail with
/// [`CodecError::CapacityExceeded`] once it is full; the buffer never
/// grows. Reads consume from what was written.
#[derive(Debug)]
pub struct FixedBuffer<'a> {
    buf: &'a mut [u8],
    rpos: usize,
    wpos: usize,
}

impl<'a> FixedBuffer<'a> {
    /// Wrap an external buffer, write cursor at the start
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            rpos: 0,
            wpos: 0,
        }
    }

    /// Get the bytes written so far
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.wpos]
    }

    /// Number of bytes written so far
    #[inline]
    pub fn bytes_written(&self) -> usize {
        self.wpos
    }

    /// Remaining write capacity
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.wpos
    }
}

impl Transport for FixedBuffer<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let available = self.wpos - self.rpos;
        let n = buf.len().min(available);
        buf[..n].copy_from_slice(&self.buf[self.rpos..self.rpos + n]);
        self.rpos += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if buf.len() > self.remaining() {
            return Err(CodecError::capacity_exceeded(
                self.wpos + buf.len(),
                self.buf.len(),
            ));
        }
        self.buf[self.wpos..self.wpos + buf.len()].copy_from_slice(buf);
        self.wpos += buf.len();
        Ok(buf.len())
    }
}

// =============================================================================
// SliceReader
// =============================================================================

/// Zero-copy read-only transport over a borrowed slice
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Wrap a slice, read cursor at the start
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

impl Transport for SliceReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        Err(CodecError::capacity_exceeded(buf.len(), 0))
    }
}

// =============================================================================
// LengthCounter
// =============================================================================

/// Write-only sink that counts bytes instead of storing them
///
/// Running an encoder against this transport measures the encoded length
/// of a value without allocating or producing output.
#[derive(Debug, Default)]
pub struct LengthCounter {
    count: usize,
}

impl LengthCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes written so far
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Transport for LengthCounter {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Err(CodecError::transport_underflow(buf.len(), 0))
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.count += buf.len();
        Ok(buf.len())
    }
}
