//! # segmap - Segmented Memory-Mapped Buffers and Base64 Streams
//!
//! segmap addresses files larger than a single native mapping as one flat
//! 64-bit byte space, and provides a streaming Base64 codec with
//! configurable alphabets and line wrapping.
//!
//! ## Quick Start
//!
//! ```ignore
//! use segmap::buffer::{BufferView, SegmentedFileBuffer, ThreadLocalBufferView};
//!
//! let buffer = SegmentedFileBuffer::builder("./data.bin")
//!     .segment_size(1 << 20)
//!     .open()?;
//!
//! buffer.put_u64(5 << 30, 42)?;
//! assert_eq!(buffer.get_u64(5 << 30)?, 42);
//!
//! // One cursor per thread over the same mapping.
//! let shared = ThreadLocalBufferView::new(buffer);
//! ```
//!
//! ```
//! use segmap::base64::Base64Codec;
//!
//! assert_eq!(Base64Codec::STANDARD.encode_str("Hello"), "SGVsbG8=");
//! assert_eq!(Base64Codec::FILENAME_SAFE.encode_to_string(&[0, 1, 2, 3, 4]), "AAECAwQ");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────┐
//! │ OffsetBufferView             │   │ Base64Codec              │
//! │ ThreadLocalBufferView        │   │  encode: Read -> Write   │
//! ├──────────────────────────────┤   │  decode: Read -> Write   │
//! │ SegmentedFileBuffer │ Heap   │   └──────────────────────────┘
//! ├──────────────────────────────┤
//! │ memmap2 overlapping windows  │
//! └──────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`buffer`]: `BufferView` and its file-backed, in-memory, thread-local
//!   and offset implementations
//! - [`base64`]: streaming Base64 encoder/decoder
//! - [`config`]: segment-size limits and codec line constants

#[macro_use]
mod macros;

pub mod base64;
pub mod buffer;
pub mod config;

pub use base64::{Base64Codec, Base64Error};
pub use buffer::{
    BufferError, BufferView, ByteOrder, HeapBuffer, OffsetBufferView, SegmentedFileBuffer,
    ThreadLocalBufferView,
};
