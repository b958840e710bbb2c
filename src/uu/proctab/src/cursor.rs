// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Bounds-checked reads over raw kernel buffers.
//!
//! Kernel records are never reinterpreted in place: every field goes through
//! a slice lookup, so a short or misaligned buffer yields `None` instead of
//! reading past its end.

/// Sequential reader over a byte buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn read_i32_le(&mut self) -> Option<i32> {
        let bytes = self.buf.get(self.pos..self.pos + 4)?;
        self.pos += 4;
        Some(i32::from_le_bytes(bytes.try_into().ok()?))
    }

    /// Read up to the next NUL and consume it. Returns `None` (without
    /// advancing) when no terminator is left in the buffer.
    pub fn read_cstr(&mut self) -> Option<&'a [u8]> {
        let rest = self.remaining();
        let nul = rest.iter().position(|&b| b == 0)?;
        self.pos += nul + 1;
        Some(&rest[..nul])
    }

    /// Skip any run of NUL bytes, returning how many were skipped.
    pub fn skip_nuls(&mut self) -> usize {
        let skipped = self.remaining().iter().take_while(|&&b| b == 0).count();
        self.pos += skipped;
        skipped
    }
}

/// Native-endian signed integer of `width` bytes (4 or 8) at `offset`.
pub fn int_at(buf: &[u8], offset: usize, width: usize) -> Option<i64> {
    let bytes = buf.get(offset..offset.checked_add(width)?)?;
    match width {
        4 => Some(i32::from_ne_bytes(bytes.try_into().ok()?).into()),
        8 => Some(i64::from_ne_bytes(bytes.try_into().ok()?)),
        _ => None,
    }
}

/// Native-endian `u32` at `offset`.
pub fn u32_at(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_ne_bytes(bytes.try_into().ok()?))
}

/// Fixed-width character array at `offset`, cut at the first NUL (or the
/// full width if the kernel filled it completely).
pub fn cstr_at(buf: &[u8], offset: usize, width: usize) -> Option<String> {
    let bytes = buf.get(offset..offset.checked_add(width)?)?;
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    Some(String::from_utf8_lossy(&bytes[..len]).into_owned())
}
