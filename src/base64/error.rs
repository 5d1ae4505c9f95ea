use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Base64Error>;

#[derive(Debug, Error)]
pub enum Base64Error {
    /// A byte that is not a symbol, the pad symbol, whitespace or part of
    /// the separator.
    #[error("invalid source byte {0:#04x}")]
    InvalidSourceByte(u8),

    /// Input ended inside a group that needed more symbols.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("invalid codec configuration: {0}")]
    InvalidConfiguration(String),

    #[error("base64 stream I/O failed: {0}")]
    Io(#[from] io::Error),
}
