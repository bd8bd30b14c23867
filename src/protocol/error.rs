//! CayenneLPP error types

use thiserror::Error;

/// CayenneLPP codec errors
#[derive(Error, Debug)]
pub enum Error {
    /// Uplink header names a type code with no registry entry
    #[error("unknown type: {type_byte:#04x} on channel {channel}")]
    UnknownType {
        /// Unrecognized type byte
        type_byte: u8,
        /// Channel of the offending record
        channel: u8,
    },

    /// Stream ended inside a header or payload
    #[error("unexpected end of input: need {needed} bytes, got {got}")]
    UnexpectedEof {
        /// Bytes the current read required
        needed: usize,
        /// Bytes actually available
        got: usize,
    },

    /// String is not a `{type_name}_{channel}` key
    #[error("invalid sensor key: {0:?}")]
    InvalidKey(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error means the input was cut short
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
