//! # Offset Buffer View
//!
//! Rebases every index of a wrapped view by a fixed `base`, so a region of
//! one physical buffer can be addressed as if it started at zero. Sizes
//! shrink by `base`; the cursor is rebased the same way.
//!
//! A wrapped cursor below `base` (for example a fresh thread-local clone,
//! whose cursor starts at zero) reads as position 0 of the region, and the
//! first cursor read or write moves it into the region.
//! `cursor_in_region` tells the two cases apart.

use eyre::Result;

use super::{BufferError, BufferView, ByteOrder, ThreadLocalBufferView};

/// An offset view over a thread-local view: each thread gets its own cursor
/// into the same rebased region.
pub type ThreadLocalOffsetView<B> = OffsetBufferView<ThreadLocalBufferView<B>>;

#[derive(Debug, Clone)]
pub struct OffsetBufferView<V> {
    inner: V,
    base: u64,
}

impl<V: BufferView> OffsetBufferView<V> {
    pub fn new(inner: V, base: u64) -> Self {
        Self { inner, base }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn into_inner(self) -> V {
        self.inner
    }

    /// Whether the wrapped cursor is at or past `base`. When it is not,
    /// `position()` reports the region start.
    pub fn cursor_in_region(&self) -> bool {
        self.inner.position() >= self.base
    }

    #[inline]
    fn rebase(&self, idx: u64, len: usize) -> Result<u64> {
        idx.checked_add(self.base).ok_or_else(|| {
            BufferError::OutOfBounds {
                index: idx,
                len: len as u64,
                limit: self.limit(),
            }
            .into()
        })
    }
}

impl<V: BufferView> BufferView for OffsetBufferView<V> {
    fn capacity(&self) -> u64 {
        self.inner.capacity().saturating_sub(self.base)
    }

    fn limit(&self) -> u64 {
        self.inner.limit().saturating_sub(self.base)
    }

    fn byte_order(&self) -> ByteOrder {
        self.inner.byte_order()
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    fn get_bytes_into(&self, idx: u64, dst: &mut [u8]) -> Result<()> {
        let real = self.rebase(idx, dst.len())?;
        self.inner.get_bytes_into(real, dst)
    }

    fn put_bytes(&self, idx: u64, src: &[u8]) -> Result<()> {
        let real = self.rebase(idx, src.len())?;
        self.inner.put_bytes(real, src)
    }

    fn force(&self) -> Result<()> {
        self.inner.force()
    }

    fn position(&self) -> u64 {
        // Below `base` clamps to the region start; see `cursor_in_region`.
        self.inner.position().saturating_sub(self.base)
    }

    fn set_position(&self, pos: u64) -> Result<()> {
        let real = self.rebase(pos, 0)?;
        self.inner.set_position(real)
    }
}
