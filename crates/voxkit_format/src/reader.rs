//! Little-endian cursor over an in-memory byte slice.
//!
//! Every chunk is decoded from its own `ByteReader`: the content bytes and the
//! children bytes are split off the parent cursor up front, so a decoder that
//! under-reads a chunk's content can never misalign the stream.

use bytemuck::Pod;

use crate::error::{DecodeError, DecodeResult};

/// Chunk reader - reads primitives from a borrowed buffer.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new reader at the start of `buffer`.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Returns true once every byte has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Current offset from the start of the buffer.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Splits off the next `len` bytes as a borrowed slice.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buffer[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Reads a fixed-size byte array (tags, magic).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEof`] on a short buffer.
    pub fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEof`] on a short buffer.
    #[inline]
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads an i32 in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEof`] on a short buffer.
    #[inline]
    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads an i32 that declares a length or count; negative values are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NegativeLength`] for values below zero.
    pub fn read_len(&mut self, what: &'static str) -> DecodeResult<usize> {
        let value = self.read_i32()?;
        usize::try_from(value).map_err(|_| DecodeError::NegativeLength { what, value })
    }

    /// Reads a Pod type directly.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEof`] on a short buffer.
    pub fn read_pod<T: Pod>(&mut self) -> DecodeResult<T> {
        let bytes = self.read_bytes(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Reads a length-prefixed UTF-8 string. Invalid sequences are replaced.
    ///
    /// # Errors
    ///
    /// Fails on a negative length or a short buffer.
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let len = self.read_len("string length")?;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
