use super::error::MetainfoError;
use super::info_hash::InfoHash;
use crate::bencode::{decode_all_with, dict_value_span, encode, DecodeOptions, Value};
use serde::Serialize;

/// Diagnostic fields pulled out of a `.torrent` file.
///
/// Every field is optional: backup files written by different clients carry
/// different subsets, and a missing field is reported rather than treated as
/// an error. Text fields are decoded as UTF-8 with invalid sequences
/// replaced by `U+FFFD`, since torrent names are frequently not UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TorrentMetadata {
    /// `info.name`: suggested file or directory name.
    pub name: Option<String>,
    /// `info.private`: `None` if the key is absent.
    pub is_private: Option<bool>,
    /// Primary tracker URL.
    pub announce: Option<String>,
    /// Multi-tier tracker list ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    pub announce_tiers: Vec<Vec<String>>,
    pub comment: Option<String>,
    pub created_by: Option<String>,
    /// Unix timestamp when the torrent was created.
    pub creation_date: Option<i64>,
    /// SHA-1 of the info dictionary.
    ///
    /// [`TorrentMetadata::from_bytes`] hashes the bytes stored in the file;
    /// [`extract_metadata`] only has the decoded tree and hashes its
    /// canonical encoding.
    pub info_hash: Option<InfoHash>,
}

/// Extracts [`TorrentMetadata`] from a decoded torrent.
///
/// # Errors
///
/// Returns [`MetainfoError::NotADictionary`] if `root` is not a dictionary.
/// Missing or mistyped fields never cause an error.
///
/// # Examples
///
/// ```
/// use torrent_inspect::bencode::decode_all;
/// use torrent_inspect::metainfo::extract_metadata;
///
/// let root = decode_all(b"d8:announce14:http://t/a/ann4:infod4:name3:isoee").unwrap();
/// let meta = extract_metadata(&root).unwrap();
/// assert_eq!(meta.name.as_deref(), Some("iso"));
/// assert_eq!(meta.is_private, None);
/// assert!(meta.announce_tiers.is_empty());
/// ```
pub fn extract_metadata(root: &Value) -> Result<TorrentMetadata, MetainfoError> {
    let dict = root.as_dict().ok_or(MetainfoError::NotADictionary)?;

    let info = dict.get(b"info".as_slice());
    let info_dict = info.and_then(Value::as_dict);

    let name = info_dict
        .and_then(|d| d.get(b"name".as_slice()))
        .and_then(lossy);

    let is_private = info_dict
        .and_then(|d| d.get(b"private".as_slice()))
        .map(|v| v.as_integer().is_some_and(|i| i != 0));

    // Canonical re-encoding: differs from the stored bytes for unsorted
    // keys or non-minimal integers.
    let info_hash = info
        .filter(|v| v.as_dict().is_some())
        .map(|v| InfoHash::v1_from_info_bytes(&encode(v)));

    let announce = dict.get(b"announce".as_slice()).and_then(lossy);

    let announce_tiers = dict
        .get(b"announce-list".as_slice())
        .and_then(Value::as_list)
        .map(|tiers| parse_tiers(tiers))
        .unwrap_or_default();

    let comment = dict.get(b"comment".as_slice()).and_then(lossy);
    let created_by = dict.get(b"created by".as_slice()).and_then(lossy);
    let creation_date = dict
        .get(b"creation date".as_slice())
        .and_then(Value::as_integer);

    Ok(TorrentMetadata {
        name,
        is_private,
        announce,
        announce_tiers,
        comment,
        created_by,
        creation_date,
        info_hash,
    })
}

fn lossy(value: &Value) -> Option<String> {
    value.to_string_lossy().map(|s| s.into_owned())
}

fn parse_tiers(tiers: &[Value]) -> Vec<Vec<String>> {
    tiers
        .iter()
        .enumerate()
        .filter_map(|(index, tier)| {
            let Some(urls) = tier.as_list() else {
                tracing::debug!(tier = index, "skipping announce-list tier that is not a list");
                return None;
            };

            let urls = urls
                .iter()
                .filter_map(|url| {
                    let text = lossy(url);
                    if text.is_none() {
                        tracing::debug!(tier = index, "skipping non-string tracker url");
                    }
                    text
                })
                .collect();
            Some(urls)
        })
        .collect()
}

impl TorrentMetadata {
    /// Decodes a whole `.torrent` file and extracts its metadata.
    ///
    /// The info hash is taken over the raw `info` bytes of `data`, so it
    /// matches the client's hash even when the file is not canonical.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        Self::from_bytes_with(data, DecodeOptions::default())
    }

    pub fn from_bytes_with(data: &[u8], options: DecodeOptions) -> Result<Self, MetainfoError> {
        let root = decode_all_with(data, options)?;
        let mut metadata = extract_metadata(&root)?;

        if metadata.info_hash.is_some() {
            if let Some(span) = dict_value_span(data, b"info", options)? {
                metadata.info_hash = Some(InfoHash::v1_from_info_bytes(&data[span]));
            }
        }

        Ok(metadata)
    }

    /// Returns all tracker URLs from both `announce` and `announce-list`.
    ///
    /// The primary tracker comes first, followed by the tiers in order.
    /// Duplicates are removed.
    pub fn trackers(&self) -> Vec<String> {
        let mut trackers = Vec::new();

        if let Some(ref announce) = self.announce {
            trackers.push(announce.clone());
        }

        for tier in &self.announce_tiers {
            for tracker in tier {
                if !trackers.contains(tracker) {
                    trackers.push(tracker.clone());
                }
            }
        }

        trackers
    }
}
