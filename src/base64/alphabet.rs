//! 64-symbol tables and their inverse lookup.

use std::fmt;

use super::{Base64Error, Result};

const NO_VALUE: u8 = 0xFF;

/// A Base64 alphabet: 64 distinct printable ASCII symbols indexed by 6-bit
/// value, plus the inverse table used while decoding.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: [u8; 64],
    values: [u8; 256],
}

impl Alphabet {
    /// RFC 4648 section 4.
    pub const STANDARD: Alphabet =
        Alphabet::from_symbols(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/");

    /// RFC 4648 section 5, safe in file names and URLs.
    pub const FILENAME_SAFE: Alphabet =
        Alphabet::from_symbols(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_");

    /// Builds a custom alphabet. Symbols must be distinct, printable ASCII.
    pub fn new(symbols: &[u8; 64]) -> Result<Self> {
        let mut seen = [false; 256];
        for &symbol in symbols {
            if !symbol.is_ascii_graphic() {
                return Err(Base64Error::InvalidConfiguration(format!(
                    "alphabet symbol {:#04x} is not printable ASCII",
                    symbol
                )));
            }
            if std::mem::replace(&mut seen[symbol as usize], true) {
                return Err(Base64Error::InvalidConfiguration(format!(
                    "alphabet symbol '{}' appears twice",
                    symbol as char
                )));
            }
        }
        Ok(Self::from_symbols(symbols))
    }

    const fn from_symbols(symbols: &[u8; 64]) -> Self {
        let mut values = [NO_VALUE; 256];
        let mut i = 0;
        while i < 64 {
            values[symbols[i] as usize] = i as u8;
            i += 1;
        }
        Self {
            symbols: *symbols,
            values,
        }
    }

    /// Symbol for the low six bits of `value`.
    #[inline]
    pub fn symbol(&self, value: u8) -> u8 {
        self.symbols[(value & 0x3F) as usize]
    }

    /// 6-bit value of `symbol`, if it belongs to this alphabet.
    #[inline]
    pub fn value(&self, symbol: u8) -> Option<u8> {
        match self.values[symbol as usize] {
            NO_VALUE => None,
            value => Some(value),
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.value(byte).is_some()
    }

    pub fn symbols(&self) -> &[u8; 64] {
        &self.symbols
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet")
            .field(&String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}
