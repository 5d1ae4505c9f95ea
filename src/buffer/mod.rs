//! # Buffer Module
//!
//! This module provides a single flat 64-bit address space over files too
//! large for one native memory-mapped region, plus decorators that give each
//! thread its own cursor or rebase indices onto a sub-region.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ OffsetBufferView<V>   (index + base)         │
//! ├──────────────────────────────────────────────┤
//! │ ThreadLocalBufferView<B> (clone per thread)  │
//! ├──────────────────────────────────────────────┤
//! │ SegmentedFileBuffer  │  HeapBuffer           │
//! │ (overlapping mmaps)  │  (shared Vec<u8>)     │
//! └──────────────────────────────────────────────┘
//!            all speak BufferView
//! ```
//!
//! Decorators hold the wrapped view by value; every view in this crate is a
//! cheap handle over shared storage, so wrapping never copies bytes.
//!
//! ## Segment Layout
//!
//! `SegmentedFileBuffer` maps segment `i` from file offset `i * S` for
//! `min(2 * S, file_size - i * S)` bytes, where `S` is the nominal segment
//! size:
//!
//! ```text
//! file:      |----S----|----S----|----S----|--rem--|
//! segment 0: [=======2S========]
//! segment 1:           [=======2S========]
//! segment 2:                     [====S + rem====]
//! segment 3:                               [=rem=]
//! ```
//!
//! Logical index `idx` is served by segment `idx / S` at offset `idx % S`, so
//! any access of at most `S` bytes lands in one mapping. Longer byte ranges
//! are copied segment by segment.
//!
//! ## Thread Safety
//!
//! Every view is `Send + Sync`. Absolute accesses on a writable segment take
//! that segment's lock, so a single typed read or write is never torn by a
//! concurrent cursor move. Nothing orders writes to overlapping ranges made
//! through different segments or different threads; callers that share a
//! region across threads must synchronize those writes themselves.
//!
//! ## Module Organization
//!
//! - `view`: The `BufferView` trait and its provided typed accessors
//! - `segmented`: `SegmentedFileBuffer` and its builder
//! - `heap`: `HeapBuffer`, an in-memory view with shared storage
//! - `thread_local`: `ThreadLocalBufferView`, lazily cloned per thread
//! - `offset`: `OffsetBufferView`, index rebasing
//! - `cursor`: `ViewCursor`, `std::io` adapter over a view's cursor

mod cursor;
mod error;
mod heap;
mod offset;
mod segmented;
mod thread_local;
mod view;

pub use cursor::ViewCursor;
pub use error::BufferError;
pub use heap::HeapBuffer;
pub use offset::{OffsetBufferView, ThreadLocalOffsetView};
pub use segmented::{SegmentedFileBuffer, SegmentedFileBufferBuilder};
pub use thread_local::ThreadLocalBufferView;
pub use view::BufferView;

/// Byte order used by the typed scalar accessors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}
