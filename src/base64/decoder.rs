//! Group decoder: up to four symbols to up to three bytes.
//!
//! Whitespace and any byte of the configured separator are skipped before
//! every symbol. The pad symbol marks a missing value; anything else outside
//! the alphabet is rejected with the offending byte, as is a symbol that
//! follows a pad within one group.

use std::io::{BufReader, BufWriter, Read, Write};

use super::source::ByteSource;
use super::{Base64Codec, Base64Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Value(u8),
    Pad,
    End,
}

pub(crate) struct Decoder<'c, R> {
    codec: &'c Base64Codec,
    source: ByteSource<R>,
}

impl<'c, R: Read> Decoder<'c, BufReader<R>> {
    pub(crate) fn new(codec: &'c Base64Codec, input: R) -> Self {
        Self {
            codec,
            source: ByteSource::new(BufReader::new(input)),
        }
    }
}

impl<R: Read> Decoder<'_, R> {
    fn read_symbol(&mut self) -> Result<Symbol> {
        let codec = self.codec;
        let separator = codec.separator();
        loop {
            let Some(byte) = self.source.next()? else {
                return Ok(Symbol::End);
            };
            if Some(byte) == codec.padding() {
                return Ok(Symbol::Pad);
            }
            if let Some(value) = codec.alphabet().value(byte) {
                return Ok(Symbol::Value(value));
            }
            if byte.is_ascii_whitespace() || separator.contains(&byte) {
                continue;
            }
            return Err(Base64Error::InvalidSourceByte(byte));
        }
    }

    /// Value of a symbol in group position 1 or 2, where neither padding nor
    /// end of input can complete a byte.
    fn leading_value(&self, symbol: Symbol) -> Result<u8> {
        match symbol {
            Symbol::Value(value) => Ok(value),
            Symbol::Pad => Err(Base64Error::InvalidSourceByte(
                self.codec.padding().unwrap_or_default(),
            )),
            Symbol::End => Err(Base64Error::UnexpectedEndOfInput),
        }
    }

    /// Decodes until end of input. Returns the number of bytes written.
    pub(crate) fn run<W: Write>(mut self, output: W) -> Result<u64> {
        let mut output = BufWriter::new(output);
        let padding_required = self.codec.padding().is_some();
        let mut written = 0u64;

        loop {
            let first = self.read_symbol()?;
            if first == Symbol::End {
                break;
            }
            let e1 = self.leading_value(first)?;
            let second = self.read_symbol()?;
            let e2 = self.leading_value(second)?;
            let third = self.read_symbol()?;
            let fourth = match third {
                Symbol::End => Symbol::End,
                _ => self.read_symbol()?,
            };

            // A value cannot follow a pad in the same group.
            if let (Symbol::Pad, Symbol::Value(e4)) = (third, fourth) {
                return Err(Base64Error::InvalidSourceByte(
                    self.codec.alphabet().symbols()[usize::from(e4)],
                ));
            }

            if padding_required && (third == Symbol::End || fourth == Symbol::End) {
                return Err(Base64Error::UnexpectedEndOfInput);
            }

            let mut bytes = [0u8; 3];
            let mut len = 0;
            bytes[len] = (e1 << 2) | (e2 >> 4);
            len += 1;
            if let Symbol::Value(e3) = third {
                bytes[len] = ((e2 & 0xF) << 4) | (e3 >> 2);
                len += 1;
                if let Symbol::Value(e4) = fourth {
                    bytes[len] = ((e3 & 0x3) << 6) | e4;
                    len += 1;
                }
            }

            output.write_all(&bytes[..len])?;
            written += len as u64;

            if fourth == Symbol::End {
                break;
            }
        }

        output.flush()?;
        Ok(written)
    }
}
