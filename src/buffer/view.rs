//! # Buffer View Capability
//!
//! `BufferView` is the one interface every buffer in this crate speaks:
//! typed get/put of fixed-width scalars and byte ranges at a 64-bit logical
//! index, capacity/limit queries, a per-instance cursor, and slicing.
//!
//! Implementors supply a handful of primitives (`get_bytes_into`,
//! `put_bytes`, the cursor pair, `force`, sizing); every typed accessor is a
//! provided method layered on those primitives, so decorators only forward
//! the primitives and inherit the rest.
//!
//! ## Indexing
//!
//! All indices are absolute logical offsets. An access of `len` bytes at
//! `idx` succeeds only when `idx + len <= limit()`; anything else fails with
//! `BufferError::OutOfBounds` and nothing is transferred.
//!
//! ## Cursor
//!
//! Each instance owns a position used by `read_next` / `write_next` (and by
//! `ViewCursor`'s `std::io` impls). Absolute accessors never move it. Clones
//! start at the prototype's position and then move independently.

use std::sync::Arc;

use eyre::Result;

use super::error::check_range;
use super::{BufferError, ByteOrder, OffsetBufferView};

pub trait BufferView: Send + Sync {
    /// Total addressable bytes.
    fn capacity(&self) -> u64;

    /// Upper bound for accesses; never larger than `capacity()`.
    fn limit(&self) -> u64 {
        self.capacity()
    }

    fn byte_order(&self) -> ByteOrder;

    fn is_read_only(&self) -> bool;

    /// Fills `dst` from `[idx, idx + dst.len())`.
    fn get_bytes_into(&self, idx: u64, dst: &mut [u8]) -> Result<()>;

    /// Copies `src` into `[idx, idx + src.len())`.
    fn put_bytes(&self, idx: u64, src: &[u8]) -> Result<()>;

    /// Requests that modified content be written back to durable storage.
    /// Completion is not guaranteed on return.
    fn force(&self) -> Result<()>;

    fn position(&self) -> u64;

    fn set_position(&self, pos: u64) -> Result<()>;

    scalar_accessors! {
        u8, i8, u16, i16, u32, i32, u64, i64, f32, f64,
    }

    /// Reads one UTF-16 code unit as a `char`.
    fn get_char(&self, idx: u64) -> Result<char> {
        let unit = self.get_u16(idx)?;
        char::from_u32(u32::from(unit)).ok_or_else(|| BufferError::InvalidCodeUnit(unit).into())
    }

    /// Writes `c` as one UTF-16 code unit.
    fn put_char(&self, idx: u64, c: char) -> Result<()> {
        let code = u32::from(c);
        let unit = u16::try_from(code).map_err(|_| BufferError::UnencodableChar(code))?;
        self.put_u16(idx, unit)
    }

    fn get_bytes(&self, idx: u64, len: usize) -> Result<Vec<u8>> {
        // Bounds first: `len` is caller-controlled and must not size an
        // allocation the view could never fill.
        check_range(idx, len as u64, self.limit())?;
        let mut out = vec![0u8; len];
        self.get_bytes_into(idx, &mut out)?;
        Ok(out)
    }

    /// Writes `bytes[off..off + len]` at `idx`.
    fn put_bytes_range(&self, idx: u64, bytes: &[u8], off: usize, len: usize) -> Result<()> {
        check_range(off as u64, len as u64, bytes.len() as u64)?;
        self.put_bytes(idx, &bytes[off..off + len])
    }

    fn remaining(&self) -> u64 {
        self.limit().saturating_sub(self.position())
    }

    /// Reads up to `dst.len()` bytes at the cursor and advances it.
    /// Returns 0 once the cursor has reached `limit()`.
    fn read_next(&self, dst: &mut [u8]) -> Result<usize> {
        let pos = self.position();
        let n = (dst.len() as u64).min(self.remaining()) as usize;
        self.get_bytes_into(pos, &mut dst[..n])?;
        self.set_position(pos + n as u64)?;
        Ok(n)
    }

    /// Writes all of `src` at the cursor and advances it.
    fn write_next(&self, src: &[u8]) -> Result<()> {
        let pos = self.position();
        self.put_bytes(pos, src)?;
        self.set_position(pos + src.len() as u64)
    }

    /// Returns a view whose index 0 is this view's `idx`.
    ///
    /// The slice covers everything from `idx` to `limit()`, which is at least
    /// the remaining width of the segment holding `idx`. It shares storage
    /// with `self`.
    fn slice(&self, idx: u64) -> Result<OffsetBufferView<Self>>
    where
        Self: Clone + Sized,
    {
        check_range(idx, 0, self.limit())?;
        Ok(OffsetBufferView::new(self.clone(), idx))
    }
}

impl<V: BufferView + ?Sized> BufferView for Arc<V> {
    fn capacity(&self) -> u64 {
        (**self).capacity()
    }

    fn limit(&self) -> u64 {
        (**self).limit()
    }

    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }

    fn is_read_only(&self) -> bool {
        (**self).is_read_only()
    }

    fn get_bytes_into(&self, idx: u64, dst: &mut [u8]) -> Result<()> {
        (**self).get_bytes_into(idx, dst)
    }

    fn put_bytes(&self, idx: u64, src: &[u8]) -> Result<()> {
        (**self).put_bytes(idx, src)
    }

    fn force(&self) -> Result<()> {
        (**self).force()
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn set_position(&self, pos: u64) -> Result<()> {
        (**self).set_position(pos)
    }
}
