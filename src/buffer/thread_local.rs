//! # Thread-Local Buffer View
//!
//! Gives each calling thread a private clone of a prototype view. Clones
//! share storage with the prototype, so every thread sees the same bytes
//! while cursor state (position, and limit for `HeapBuffer`) stays private.
//!
//! ## Cache
//!
//! Clones are created lazily on a thread's first access and cached in a map
//! keyed by `ThreadId`, owned by this view. Nothing is global: dropping the
//! last handle to the view drops every cached clone. A thread that is done
//! with the view calls `release()` to drop its own clone; otherwise the
//! clone outlives its thread until the view itself is dropped.
//!
//! ```text
//! thread A ──get()──┐
//!                   ├─> clones: { A: Arc<B>, B: Arc<B> } ──> shared storage
//! thread B ──get()──┘                 ▲
//!                          prototype.clone() on miss
//! ```
//!
//! ## Concurrency
//!
//! Private cursors remove races between "move cursor, then access" pairs
//! issued from different threads. They do nothing for two threads writing
//! the same logical range; that still needs external synchronization.
//!
//! `ThreadLocalBufferView` itself implements `BufferView` by dispatching
//! every call to the calling thread's clone, and is cheap to clone (handles
//! share one cache).

use std::sync::Arc;
use std::thread::{self, ThreadId};

use eyre::Result;
use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::trace;

use super::{BufferView, ByteOrder};

#[derive(Debug)]
struct ThreadLocalInner<B> {
    prototype: B,
    clones: RwLock<HashMap<ThreadId, Arc<B>>>,
}

/// A view that hands each calling thread its own clone of a prototype.
///
/// The cache holds one clone per thread that has ever touched the view and
/// has not called [`release`](Self::release), so memory grows with the
/// number of distinct threads over the view's lifetime. Views shared with
/// short-lived threads should have those threads release before exiting.
#[derive(Debug)]
pub struct ThreadLocalBufferView<B> {
    inner: Arc<ThreadLocalInner<B>>,
}

impl<B> Clone for ThreadLocalBufferView<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: BufferView + Clone> ThreadLocalBufferView<B> {
    pub fn new(prototype: B) -> Self {
        Self {
            inner: Arc::new(ThreadLocalInner {
                prototype,
                clones: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Returns the calling thread's buffer, cloning the prototype on the
    /// thread's first call.
    pub fn get(&self) -> Arc<B> {
        let id = thread::current().id();

        if let Some(buffer) = self.inner.clones.read().get(&id) {
            return Arc::clone(buffer);
        }

        let mut clones = self.inner.clones.write();
        let buffer = clones.entry(id).or_insert_with(|| {
            trace!(thread = ?id, "creating thread-local buffer clone");
            Arc::new(self.inner.prototype.clone())
        });
        Arc::clone(buffer)
    }

    /// Drops the calling thread's cached clone, returning it if present.
    ///
    /// A later access from this thread starts over from a fresh clone of the
    /// prototype.
    pub fn release(&self) -> Option<Arc<B>> {
        let id = thread::current().id();
        let released = self.inner.clones.write().remove(&id);
        if released.is_some() {
            trace!(thread = ?id, "released thread-local buffer clone");
        }
        released
    }

    pub fn prototype(&self) -> &B {
        &self.inner.prototype
    }

    /// Number of threads that currently hold a cached clone.
    pub fn thread_count(&self) -> usize {
        self.inner.clones.read().len()
    }
}

impl<B: BufferView + Clone> BufferView for ThreadLocalBufferView<B> {
    fn capacity(&self) -> u64 {
        self.get().capacity()
    }

    fn limit(&self) -> u64 {
        self.get().limit()
    }

    fn byte_order(&self) -> ByteOrder {
        self.inner.prototype.byte_order()
    }

    fn is_read_only(&self) -> bool {
        self.inner.prototype.is_read_only()
    }

    fn get_bytes_into(&self, idx: u64, dst: &mut [u8]) -> Result<()> {
        self.get().get_bytes_into(idx, dst)
    }

    fn put_bytes(&self, idx: u64, src: &[u8]) -> Result<()> {
        self.get().put_bytes(idx, src)
    }

    fn force(&self) -> Result<()> {
        self.inner.prototype.force()
    }

    fn position(&self) -> u64 {
        self.get().position()
    }

    fn set_position(&self, pos: u64) -> Result<()> {
        self.get().set_position(pos)
    }
}
