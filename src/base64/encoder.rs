//! Group encoder: three input bytes to four symbols, with line breaking.

use std::io::{BufReader, BufWriter, Read, Write};

use super::source::ByteSource;
use super::{Base64Codec, Result};

/// Encoding state for one transform. `break_count` is the number of symbol
/// slots emitted since the last separator.
pub(crate) struct Encoder<'c> {
    codec: &'c Base64Codec,
    break_count: usize,
}

impl<'c> Encoder<'c> {
    pub(crate) fn new(codec: &'c Base64Codec) -> Self {
        Self {
            codec,
            break_count: 0,
        }
    }

    /// Appends one encoded group (preceded by a separator when the current
    /// line is full) to `out`. `b2`/`b3` are `None` past end of input.
    pub(crate) fn encode_group(&mut self, b1: u8, b2: Option<u8>, b3: Option<u8>, out: &mut Vec<u8>) {
        let codec = self.codec;

        if let Some(line_length) = codec.line_length() {
            if self.break_count >= line_length {
                out.extend_from_slice(codec.separator());
                self.break_count = 0;
            }
        }

        let e1 = b1 >> 2;
        let e2 = ((b1 & 0x3) << 4) | b2.map_or(0, |b| b >> 4);
        let e3 = ((b2.unwrap_or(0) & 0xF) << 2) | b3.map_or(0, |b| b >> 6);
        let e4 = b3.unwrap_or(0) & 0x3F;

        let alphabet = codec.alphabet();
        out.push(alphabet.symbol(e1));
        out.push(alphabet.symbol(e2));

        match (b2, codec.padding()) {
            (Some(_), _) => out.push(alphabet.symbol(e3)),
            (None, Some(pad)) => out.push(pad),
            (None, None) => {}
        }
        match (b3, codec.padding()) {
            (Some(_), _) => out.push(alphabet.symbol(e4)),
            (None, Some(pad)) => out.push(pad),
            (None, None) => {}
        }

        // Advances by a full group even when unpadded symbols were dropped.
        self.break_count += 4;
    }

    /// Encodes `input` to `output` until end of input. Returns the number of
    /// bytes written.
    pub(crate) fn run<R: Read, W: Write>(mut self, input: R, output: W) -> Result<u64> {
        let mut source = ByteSource::new(BufReader::new(input));
        let mut output = BufWriter::new(output);
        let mut group = Vec::with_capacity(4 + self.codec.separator().len());
        let mut written = 0u64;

        while let Some(b1) = source.next()? {
            let b2 = source.next()?;
            let b3 = match b2 {
                Some(_) => source.next()?,
                None => None,
            };

            group.clear();
            self.encode_group(b1, b2, b3, &mut group);
            output.write_all(&group)?;
            written += group.len() as u64;

            if b3.is_none() {
                break;
            }
        }

        output.flush()?;
        Ok(written)
    }
}
