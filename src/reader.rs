//! A forward-only cursor over an in-memory byte buffer.

use crate::prelude::*;

/// Sequential, position-tracked reader over a byte buffer.
///
/// Positions are always absolute offsets into the original buffer, even for readers that were
/// narrowed down to a single track chunk, so errors can point at the exact failing byte.
///
/// Reading past the end of the reader fails without consuming anything. The error kind depends
/// on what the end represents: the end of the file (`UnexpectedEndOfFile`) or the declared end
/// of a track chunk (`UnexpectedEndOfTrack`).
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    raw: &'a [u8],
    pos: usize,
    end: usize,
    eof: ErrorKind,
}
impl<'a> Reader<'a> {
    /// Create a reader spanning the whole buffer.
    #[inline]
    pub fn new(raw: &'a [u8]) -> Reader<'a> {
        Reader {
            raw,
            pos: 0,
            end: raw.len(),
            eof: ErrorKind::UnexpectedEndOfFile,
        }
    }

    /// Absolute offset of the next byte to be read.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Absolute offset one past the last readable byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Amount of bytes left before the end.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Whether the reader has reached its end.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.end
    }

    /// Get the unread bytes.
    #[inline]
    pub fn unread(&self) -> &'a [u8] {
        &self.raw[self.pos..self.end]
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        ensure!(self.pos < self.end, self.error(self.eof));
        let byte = self.raw[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Read exactly `len` bytes.
    #[inline]
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        ensure!(len <= self.remaining(), self.error(self.eof));
        let slice = &self.raw[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read exactly `N` bytes into an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0; N];
        array.copy_from_slice(self.read_slice(N)?);
        Ok(array)
    }

    /// Split off the next `len` bytes as a reader bounded by the end of a track chunk.
    ///
    /// This reader skips over the split bytes, so it is left positioned at the next chunk.
    pub(crate) fn split_track(&mut self, len: u32) -> Result<Reader<'a>> {
        let len = usize::try_from(len).map_err(|_| self.error(self.eof))?;
        ensure!(len <= self.remaining(), self.error(self.eof));
        let track = Reader {
            raw: self.raw,
            pos: self.pos,
            end: self.pos + len,
            eof: ErrorKind::UnexpectedEndOfTrack,
        };
        self.pos += len;
        Ok(track)
    }

    /// Build an error located at the current position.
    #[inline]
    pub(crate) fn error(&self, kind: ErrorKind) -> Error {
        Error::new(self.pos, kind)
    }
}
