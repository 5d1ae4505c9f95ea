//! # Base64 Streaming Codec
//!
//! A push-style transform between a byte source and a Base64 sink (encode)
//! or back (decode), configurable by alphabet, pad symbol, and line
//! wrapping. The codec is independent of the buffer module, though any
//! `BufferView` can feed it through `ViewCursor`.
//!
//! ## Encoding
//!
//! Input is consumed three bytes at a time. Each group becomes four symbols:
//!
//! ```text
//! e1 = b1 >> 2
//! e2 = (b1 & 0x3) << 4 | b2 >> 4
//! e3 = (b2 & 0xF) << 2 | b3 >> 6
//! e4 = b3 & 0x3F
//! ```
//!
//! Missing trailing bytes turn `e3`/`e4` into the pad symbol, or drop them
//! when the codec has no padding. With wrapping enabled, the separator is
//! written before a group once the current line already holds
//! `line_length` symbol slots. Every group counts as four slots, padded or
//! not, so unpadded output keeps the same line layout as padded output.
//!
//! ## Decoding
//!
//! Whitespace and separator bytes are skipped anywhere, singly or as a full
//! separator. Symbols are read in
//! groups of four:
//!
//! - end of input before a group's first symbol ends decoding
//! - a pad symbol stands for "no value" in positions 3 and 4; once position
//!   3 is a pad, position 4 must be a pad too
//! - end of input inside a group is `UnexpectedEndOfInput` when padding is
//!   configured; without padding, positions 3 and 4 may be absent
//! - any other byte outside the alphabet is `InvalidSourceByte`
//!
//! ## Presets
//!
//! | Preset          | Alphabet | Pad | Line length | Separator |
//! |-----------------|----------|-----|-------------|-----------|
//! | `STANDARD`      | `+/`     | `=` | none        | -         |
//! | `PEM`           | `+/`     | `=` | 64          | CRLF      |
//! | `MIME`          | `+/`     | `=` | 76          | CRLF      |
//! | `FILENAME_SAFE` | `-_`     | -   | none        | -         |
//!
//! ## Error Handling
//!
//! All fallible calls return `Result<T, Base64Error>`. Malformed input and
//! I/O faults are distinct variants; I/O faults keep the underlying
//! `std::io::Error` as their source.
//!
//! ## Thread Safety
//!
//! `Base64Codec` is immutable and `Sync`. Each `encode`/`decode` call owns its
//! own state, so concurrent calls on one codec are independent.

mod alphabet;
mod codec;
mod decoder;
mod encoder;
mod error;
mod source;

pub use alphabet::Alphabet;
pub use codec::{Base64Codec, Base64CodecBuilder};
pub use error::{Base64Error, Result};
