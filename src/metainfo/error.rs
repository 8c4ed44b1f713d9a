use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that can occur when reading torrent metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetainfoError {
    /// The torrent file contains invalid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// The top-level value is not a dictionary.
    #[error("torrent root is not a dictionary")]
    NotADictionary,

    /// An info hash string is not 40 or 64 hex digits.
    #[error("invalid info hash: {0:?}")]
    InvalidInfoHash(String),
}
