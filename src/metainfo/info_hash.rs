use super::error::MetainfoError;
use serde::{Serialize, Serializer};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// A torrent identifier: SHA-1 (v1) or SHA-256 (v2) of the info dictionary.
///
/// qBittorrent names its backup files after this hash in lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoHash {
    V1([u8; 20]),
    V2([u8; 32]),
}

impl InfoHash {
    /// Hashes a bencoded info dictionary with SHA-1.
    pub fn v1_from_info_bytes(info: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(info);
        InfoHash::V1(hasher.finalize().into())
    }

    /// Parses a 40- or 64-digit hex string, in either case.
    ///
    /// ```
    /// use torrent_inspect::metainfo::InfoHash;
    ///
    /// let hash = InfoHash::from_hex("C12FE1C06BBA254A9DC9F519B335AA7C1367A88A").unwrap();
    /// assert!(hash.is_v1());
    /// assert_eq!(hash.to_hex(), "c12fe1c06bba254a9dc9f519b335aa7c1367a88a");
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, MetainfoError> {
        let invalid = || MetainfoError::InvalidInfoHash(s.to_string());
        let bytes = hex::decode(s).map_err(|_| invalid())?;

        match bytes.len() {
            20 => {
                let mut arr = [0u8; 20];
                arr.copy_from_slice(&bytes);
                Ok(InfoHash::V1(arr))
            }
            32 => {
                let mut arr = [0u8; 32];
                arr.copy_from_slice(&bytes);
                Ok(InfoHash::V2(arr))
            }
            _ => Err(invalid()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            InfoHash::V1(arr) => arr,
            InfoHash::V2(arr) => arr,
        }
    }

    pub fn is_v1(&self) -> bool {
        matches!(self, InfoHash::V1(_))
    }

    pub fn is_v2(&self) -> bool {
        matches!(self, InfoHash::V2(_))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl FromStr for InfoHash {
    type Err = MetainfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for InfoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
