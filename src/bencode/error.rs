use thiserror::Error;

/// Errors produced while decoding bencode.
///
/// Every variant carries the byte offset at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    #[error("invalid byte string length prefix at offset {offset}")]
    InvalidLengthPrefix { offset: usize },

    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// `offset` is where the input ran out; `start` is the opening `l`/`d`.
    #[error("unterminated list or dictionary at offset {offset} (opened at offset {start})")]
    UnterminatedContainer { offset: usize, start: usize },

    #[error("dictionary key at offset {offset} is not a byte string")]
    InvalidDictionaryKey { offset: usize },

    #[error("unknown value type {byte:#04x} at offset {offset}")]
    UnknownValueType { offset: usize, byte: u8 },

    #[error("trailing data after value at offset {offset}")]
    TrailingData { offset: usize },

    #[error("nesting deeper than {limit} levels at offset {offset}")]
    RecursionLimitExceeded { offset: usize, limit: usize },

    #[error("invalid integer at offset {offset}: {reason}")]
    InvalidInteger { offset: usize, reason: &'static str },
}

/// The kind of a [`BencodeError`], without its position data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidLengthPrefix,
    TruncatedInput,
    UnterminatedContainer,
    InvalidDictionaryKey,
    UnknownValueType,
    TrailingData,
    RecursionLimitExceeded,
    InvalidInteger,
}

impl BencodeError {
    /// Byte offset into the input where decoding failed.
    pub fn offset(&self) -> usize {
        match *self {
            BencodeError::InvalidLengthPrefix { offset }
            | BencodeError::TruncatedInput { offset, .. }
            | BencodeError::UnterminatedContainer { offset, .. }
            | BencodeError::InvalidDictionaryKey { offset }
            | BencodeError::UnknownValueType { offset, .. }
            | BencodeError::TrailingData { offset }
            | BencodeError::RecursionLimitExceeded { offset, .. }
            | BencodeError::InvalidInteger { offset, .. } => offset,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BencodeError::InvalidLengthPrefix { .. } => ErrorKind::InvalidLengthPrefix,
            BencodeError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            BencodeError::UnterminatedContainer { .. } => ErrorKind::UnterminatedContainer,
            BencodeError::InvalidDictionaryKey { .. } => ErrorKind::InvalidDictionaryKey,
            BencodeError::UnknownValueType { .. } => ErrorKind::UnknownValueType,
            BencodeError::TrailingData { .. } => ErrorKind::TrailingData,
            BencodeError::RecursionLimitExceeded { .. } => ErrorKind::RecursionLimitExceeded,
            BencodeError::InvalidInteger { .. } => ErrorKind::InvalidInteger,
        }
    }
}
