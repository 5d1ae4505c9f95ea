//! # segmap Configuration Constants
//!
//! This module centralizes the numeric limits shared by the buffer and codec
//! modules. Constants that depend on each other are co-located and their
//! relationships are enforced through compile-time assertions.
//!
//! ## Dependency Graph
//!
//! ```text
//! MAX_SEGMENT_SIZE (2^27 bytes)
//!       │
//!       ├─> DEFAULT_SEGMENT_SIZE (equal to the maximum)
//!       │
//!       └─> SEGMENT_WINDOW_FACTOR (2)
//!             Every segment is mapped at twice the nominal width so any
//!             access of at most one nominal width starting inside the
//!             segment is served by that segment alone. The doubled width
//!             must still fit a signed 32-bit length.
//!
//! PEM_LINE_LENGTH (64) / MIME_LINE_LENGTH (76)
//!       │
//!       └─> Multiples of 4 so line breaks fall between encoded groups
//! ```

// ============================================================================
// SEGMENTED BUFFER
// ============================================================================

/// Largest nominal segment width accepted by `SegmentedFileBuffer`.
pub const MAX_SEGMENT_SIZE: u64 = 1 << 27;

/// Segment width used when the builder is not given one.
pub const DEFAULT_SEGMENT_SIZE: u64 = MAX_SEGMENT_SIZE;

/// Each segment maps this many nominal widths of the file.
pub const SEGMENT_WINDOW_FACTOR: u64 = 2;

const _: () = assert!(
    MAX_SEGMENT_SIZE * SEGMENT_WINDOW_FACTOR <= i32::MAX as u64 + 1,
    "doubled segment window must fit a signed 32-bit mapping length"
);

const _: () = assert!(
    DEFAULT_SEGMENT_SIZE <= MAX_SEGMENT_SIZE,
    "DEFAULT_SEGMENT_SIZE must not exceed MAX_SEGMENT_SIZE"
);

// ============================================================================
// BASE64 CODEC
// ============================================================================

/// Symbols per line for RFC 1421 (PEM) output.
pub const PEM_LINE_LENGTH: usize = 64;

/// Symbols per line for RFC 2045 (MIME) output.
pub const MIME_LINE_LENGTH: usize = 76;

/// Line separator used by the wrapping presets.
pub const CRLF: &[u8] = b"\r\n";

/// Padding symbol for the standard alphabets.
pub const STANDARD_PAD: u8 = b'=';

const _: () = assert!(PEM_LINE_LENGTH % 4 == 0);
const _: () = assert!(MIME_LINE_LENGTH % 4 == 0);
