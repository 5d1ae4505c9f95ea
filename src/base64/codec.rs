//! Codec configuration, presets and the public transform entry points.

use std::borrow::Cow;
use std::io::{Read, Write};

use super::decoder::Decoder;
use super::encoder::Encoder;
use super::{Alphabet, Base64Error, Result};
use crate::config::{CRLF, MIME_LINE_LENGTH, PEM_LINE_LENGTH, STANDARD_PAD};

/// An immutable Base64 configuration: alphabet, optional pad symbol, and
/// optional line wrapping.
///
/// When a pad symbol is configured, decoding requires complete four-symbol
/// groups. Without one, trailing symbols may simply be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Codec {
    alphabet: Alphabet,
    padding: Option<u8>,
    line_length: Option<usize>,
    separator: Cow<'static, [u8]>,
}

impl Base64Codec {
    /// `+/` alphabet, `=` padding, one unbroken line.
    pub const STANDARD: Base64Codec = Base64Codec {
        alphabet: Alphabet::STANDARD,
        padding: Some(STANDARD_PAD),
        line_length: None,
        separator: Cow::Borrowed(CRLF),
    };

    /// RFC 1421: `+/` alphabet, `=` padding, 64-symbol lines joined by CRLF.
    pub const PEM: Base64Codec = Base64Codec {
        alphabet: Alphabet::STANDARD,
        padding: Some(STANDARD_PAD),
        line_length: Some(PEM_LINE_LENGTH),
        separator: Cow::Borrowed(CRLF),
    };

    /// RFC 2045: `+/` alphabet, `=` padding, 76-symbol lines joined by CRLF.
    pub const MIME: Base64Codec = Base64Codec {
        alphabet: Alphabet::STANDARD,
        padding: Some(STANDARD_PAD),
        line_length: Some(MIME_LINE_LENGTH),
        separator: Cow::Borrowed(CRLF),
    };

    /// `-_` alphabet, no padding, one unbroken line.
    pub const FILENAME_SAFE: Base64Codec = Base64Codec {
        alphabet: Alphabet::FILENAME_SAFE,
        padding: None,
        line_length: None,
        separator: Cow::Borrowed(CRLF),
    };

    pub fn builder() -> Base64CodecBuilder {
        Base64CodecBuilder::default()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn padding(&self) -> Option<u8> {
        self.padding
    }

    pub fn line_length(&self) -> Option<usize> {
        self.line_length
    }

    pub fn separator(&self) -> &[u8] {
        &self.separator
    }

    /// Encodes everything `input` yields into `output`. Returns the number
    /// of bytes written.
    pub fn encode<R: Read, W: Write>(&self, input: R, output: W) -> Result<u64> {
        Encoder::new(self).run(input, output)
    }

    /// Decodes everything `input` yields into `output`. Returns the number
    /// of bytes written.
    ///
    /// Bytes already written when an error is raised are not rolled back.
    pub fn decode<R: Read, W: Write>(&self, input: R, output: W) -> Result<u64> {
        Decoder::new(self, input).run(output)
    }

    pub fn encode_to_vec(&self, bytes: &[u8]) -> Vec<u8> {
        let mut encoder = Encoder::new(self);
        let mut out = Vec::with_capacity(self.encoded_len_hint(bytes.len()));
        for group in bytes.chunks(3) {
            encoder.encode_group(group[0], group.get(1).copied(), group.get(2).copied(), &mut out);
        }
        out
    }

    pub fn encode_to_string(&self, bytes: &[u8]) -> String {
        // Alphabet, pad and separator are validated ASCII, so this never
        // replaces anything.
        String::from_utf8_lossy(&self.encode_to_vec(bytes)).into_owned()
    }

    /// Encodes the UTF-8 bytes of `text`.
    pub fn encode_str(&self, text: &str) -> String {
        self.encode_to_string(text.as_bytes())
    }

    pub fn decode_to_vec(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(encoded.len() / 4 * 3 + 3);
        self.decode(encoded, &mut out)?;
        Ok(out)
    }

    pub fn decode_str(&self, encoded: &str) -> Result<Vec<u8>> {
        self.decode_to_vec(encoded.as_bytes())
    }

    /// Decodes and interprets the result as UTF-8 text.
    pub fn decode_to_string(&self, encoded: &str) -> Result<String> {
        Ok(String::from_utf8(self.decode_str(encoded)?)?)
    }

    fn encoded_len_hint(&self, len: usize) -> usize {
        let symbols = len.div_ceil(3) * 4;
        match self.line_length {
            Some(line) => symbols + symbols / line * self.separator.len(),
            None => symbols,
        }
    }
}

impl Default for Base64Codec {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Builds a validated `Base64Codec`. Starts from `Base64Codec::STANDARD`.
#[derive(Debug, Clone)]
pub struct Base64CodecBuilder {
    codec: Base64Codec,
}

impl Default for Base64CodecBuilder {
    fn default() -> Self {
        Self {
            codec: Base64Codec::STANDARD,
        }
    }
}

impl Base64CodecBuilder {
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.codec.alphabet = alphabet;
        self
    }

    /// Pad symbol, or `None` to omit padding on encode and accept missing
    /// trailing symbols on decode.
    pub fn padding(mut self, padding: Option<u8>) -> Self {
        self.codec.padding = padding;
        self
    }

    /// Maximum symbols per line, or `None` for a single line.
    pub fn line_length(mut self, line_length: Option<usize>) -> Self {
        self.codec.line_length = line_length;
        self
    }

    pub fn separator(mut self, separator: impl Into<Cow<'static, [u8]>>) -> Self {
        self.codec.separator = separator.into();
        self
    }

    pub fn build(self) -> Result<Base64Codec> {
        let codec = self.codec;

        if codec.line_length == Some(0) {
            return Err(invalid("line length must be positive"));
        }

        if let Some(pad) = codec.padding {
            if !pad.is_ascii_graphic() {
                return Err(invalid(format!("pad symbol {:#04x} is not printable ASCII", pad)));
            }
            if codec.alphabet.contains(pad) {
                return Err(invalid(format!("pad symbol '{}' is in the alphabet", pad as char)));
            }
        }

        if codec.line_length.is_some() && codec.separator.is_empty() {
            return Err(invalid("line wrapping needs a non-empty separator"));
        }

        for &byte in codec.separator.iter() {
            if !byte.is_ascii() {
                return Err(invalid(format!("separator byte {:#04x} is not ASCII", byte)));
            }
            if codec.alphabet.contains(byte) || Some(byte) == codec.padding {
                return Err(invalid(format!(
                    "separator byte '{}' collides with a symbol",
                    byte as char
                )));
            }
        }

        Ok(codec)
    }
}

fn invalid(message: impl Into<String>) -> Base64Error {
    Base64Error::InvalidConfiguration(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_hello_standard() {
        assert_eq!(Base64Codec::STANDARD.encode_str("Hello"), "SGVsbG8=");
    }

    #[test]
    fn decode_hello_standard() {
        assert_eq!(
            Base64Codec::STANDARD.decode_to_string("SGVsbG8=").unwrap(),
            "Hello"
        );
    }

    #[test]
    fn filename_safe_omits_padding() {
        let codec = Base64Codec::FILENAME_SAFE;

        assert_eq!(codec.encode_to_string(&[0, 1, 2, 3, 4]), "AAECAwQ");
        assert_eq!(codec.decode_str("AAECAwQ").unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn filename_safe_uses_dash_and_underscore() {
        let codec = Base64Codec::FILENAME_SAFE;

        assert_eq!(codec.encode_to_string(&[0xFB, 0xFF]), "-_8");
        assert_eq!(Base64Codec::STANDARD.encode_to_string(&[0xFB, 0xFF]), "+/8=");
    }

    #[test]
    fn padding_lengths() {
        let codec = Base64Codec::STANDARD;

        assert_eq!(codec.encode_to_string(b""), "");
        assert_eq!(codec.encode_to_string(b"f"), "Zg==");
        assert_eq!(codec.encode_to_string(b"fo"), "Zm8=");
        assert_eq!(codec.encode_to_string(b"foo"), "Zm9v");
        assert_eq!(codec.encode_to_string(b"foob"), "Zm9vYg==");
        assert_eq!(codec.encode_to_string(b"fooba"), "Zm9vYmE=");
        assert_eq!(codec.encode_to_string(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn invalid_byte_is_reported() {
        let err = Base64Codec::STANDARD.decode_str("SGVsbG8h!").unwrap_err();

        assert!(matches!(err, Base64Error::InvalidSourceByte(0x21)));
    }

    #[test]
    fn truncated_padded_input_is_unexpected_end() {
        let err = Base64Codec::STANDARD.decode_str("SGVsbG8").unwrap_err();

        assert!(matches!(err, Base64Error::UnexpectedEndOfInput));
    }

    #[test]
    fn lone_trailing_symbol_is_unexpected_end() {
        assert!(matches!(
            Base64Codec::FILENAME_SAFE.decode_str("AAECA"),
            Err(Base64Error::UnexpectedEndOfInput)
        ));
        assert!(matches!(
            Base64Codec::STANDARD.decode_str("Zg==Z"),
            Err(Base64Error::UnexpectedEndOfInput)
        ));
    }

    #[test]
    fn pad_in_leading_position_is_invalid() {
        assert!(matches!(
            Base64Codec::STANDARD.decode_str("Z==="),
            Err(Base64Error::InvalidSourceByte(b'='))
        ));
    }

    #[test]
    fn pad_is_invalid_without_padding() {
        assert!(matches!(
            Base64Codec::FILENAME_SAFE.decode_str("Zg=="),
            Err(Base64Error::InvalidSourceByte(b'='))
        ));
    }

    #[test]
    fn whitespace_is_skipped_anywhere() {
        let decoded = Base64Codec::STANDARD.decode_str(" SG\tVs\nbG 8=\r\n").unwrap();

        assert_eq!(decoded, b"Hello");
    }

    #[test]
    fn pem_wraps_at_64_symbols() {
        let data = vec![0xA5u8; 100];

        let encoded = Base64Codec::PEM.encode_to_string(&data);
        let lines: Vec<&str> = encoded.split("\r\n").collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 64);
        assert_eq!(lines[1].len(), 64);
        assert_eq!(lines[2].len(), 8);
        assert!(!encoded.ends_with("\r\n"));
        assert_eq!(Base64Codec::PEM.decode_str(&encoded).unwrap(), data);
    }

    #[test]
    fn exact_line_fill_has_no_trailing_separator() {
        let encoded = Base64Codec::PEM.encode_to_string(&[7u8; 48]);

        assert_eq!(encoded.len(), 64);
    }

    #[test]
    fn custom_separator_is_skipped_on_decode() {
        let codec = Base64Codec::builder()
            .line_length(Some(4))
            .separator(&b"|"[..])
            .build()
            .unwrap();

        let encoded = codec.encode_to_string(b"foobar!");
        assert_eq!(encoded, "Zm9v|YmFy|IQ==");
        assert_eq!(codec.decode_str(&encoded).unwrap(), b"foobar!");
        assert_eq!(codec.decode_str("Zm|9vYm|Fy").unwrap(), b"foobar");
    }

    #[test]
    fn lone_separator_bytes_are_skipped() {
        let codec = Base64Codec::builder()
            .line_length(Some(4))
            .separator(&b"::"[..])
            .build()
            .unwrap();

        assert_eq!(codec.decode_str("Zm9v:YmFy").unwrap(), b"foobar");
        assert_eq!(codec.decode_str(":::Zm:9vYmFy:").unwrap(), b"foobar");
        assert!(matches!(
            codec.decode_str("Zm9v;YmFy"),
            Err(Base64Error::InvalidSourceByte(b';'))
        ));
    }

    #[test]
    fn symbol_after_third_position_pad_is_invalid() {
        assert!(matches!(
            Base64Codec::STANDARD.decode_str("Zg=gZm9v"),
            Err(Base64Error::InvalidSourceByte(b'g'))
        ));
        assert!(matches!(
            Base64Codec::STANDARD.decode_str("Zg= \r\n/Zm9v"),
            Err(Base64Error::InvalidSourceByte(b'/'))
        ));
        assert_eq!(Base64Codec::STANDARD.decode_str("Zg==Zm9v").unwrap(), b"ffoo");
    }

    #[test]
    fn unpadded_final_group_still_counts_four_toward_line() {
        let codec = Base64Codec::builder()
            .alphabet(Alphabet::FILENAME_SAFE)
            .padding(None)
            .line_length(Some(8))
            .separator(&b"\n"[..])
            .build()
            .unwrap();

        // Two full groups fill the line; the short third group starts a new one.
        assert_eq!(codec.encode_to_string(b"abcdefgh"), "YWJjZGVm\nZ2g");
    }

    #[test]
    fn builder_rejects_conflicting_configuration() {
        assert!(Base64Codec::builder().line_length(Some(0)).build().is_err());
        assert!(Base64Codec::builder().padding(Some(b'A')).build().is_err());
        assert!(Base64Codec::builder()
            .line_length(Some(4))
            .separator(&b""[..])
            .build()
            .is_err());
        assert!(Base64Codec::builder()
            .line_length(Some(4))
            .separator(&b"x"[..])
            .build()
            .is_err());
    }

    #[test]
    fn stream_encode_matches_slice_encode() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let mut out = Vec::new();

        let written = Base64Codec::MIME.encode(&data[..], &mut out).unwrap();

        assert_eq!(written, out.len() as u64);
        assert_eq!(out, Base64Codec::MIME.encode_to_vec(&data));
    }

    #[test]
    fn invalid_utf8_text_is_reported() {
        let encoded = Base64Codec::STANDARD.encode_to_string(&[0xFF, 0xFE]);

        assert!(matches!(
            Base64Codec::STANDARD.decode_to_string(&encoded),
            Err(Base64Error::InvalidUtf8(_))
        ));
    }
}
