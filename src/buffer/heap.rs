//! # Heap Buffer
//!
//! An in-memory `BufferView` for data that never touches a file. Clones
//! share the byte storage and copy the cursor and limit, mirroring
//! `SegmentedFileBuffer` so either can sit under the thread-local and offset
//! decorators.
//!
//! The limit is per instance. A clone taken after `set_limit` inherits the
//! new limit; clones taken before keep theirs. Under `ThreadLocalBufferView`
//! this means threads can observe different limits over the same bytes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eyre::Result;
use parking_lot::RwLock;

use super::error::check_range;
use super::{BufferView, ByteOrder};

#[derive(Debug)]
pub struct HeapBuffer {
    data: Arc<RwLock<Vec<u8>>>,
    byte_order: ByteOrder,
    limit: AtomicU64,
    position: AtomicU64,
}

impl HeapBuffer {
    /// Allocates `capacity` zeroed bytes.
    pub fn new(capacity: usize) -> Self {
        Self::from_vec(vec![0u8; capacity])
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        let limit = data.len() as u64;
        Self {
            data: Arc::new(RwLock::new(data)),
            byte_order: ByteOrder::default(),
            limit: AtomicU64::new(limit),
            position: AtomicU64::new(0),
        }
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Restricts accesses through this instance to `[0, limit)`. The cursor
    /// is pulled back if it lies past the new limit.
    pub fn set_limit(&self, limit: u64) -> Result<()> {
        check_range(0, limit, self.capacity())?;
        self.limit.store(limit, Ordering::Relaxed);
        self.position.fetch_min(limit, Ordering::Relaxed);
        Ok(())
    }

    /// Copies the whole storage out.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.read().clone()
    }
}

impl Clone for HeapBuffer {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            byte_order: self.byte_order,
            limit: AtomicU64::new(self.limit.load(Ordering::Relaxed)),
            position: AtomicU64::new(self.position.load(Ordering::Relaxed)),
        }
    }
}

impl BufferView for HeapBuffer {
    fn capacity(&self) -> u64 {
        self.data.read().len() as u64
    }

    fn limit(&self) -> u64 {
        self.limit.load(Ordering::Relaxed)
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn get_bytes_into(&self, idx: u64, dst: &mut [u8]) -> Result<()> {
        check_range(idx, dst.len() as u64, self.limit())?;
        let start = idx as usize;
        dst.copy_from_slice(&self.data.read()[start..start + dst.len()]);
        Ok(())
    }

    fn put_bytes(&self, idx: u64, src: &[u8]) -> Result<()> {
        check_range(idx, src.len() as u64, self.limit())?;
        let start = idx as usize;
        self.data.write()[start..start + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn force(&self) -> Result<()> {
        Ok(())
    }

    fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    fn set_position(&self, pos: u64) -> Result<()> {
        check_range(pos, 0, self.limit())?;
        self.position.store(pos, Ordering::Relaxed);
        Ok(())
    }
}
