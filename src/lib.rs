//! torrent-inspect - Inspect qBittorrent `BT_backup` torrent files
//!
//! Decodes a `.torrent` backup with a strict bencode decoder and reports the
//! fields that explain tracker or privacy problems.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode decoding/encoding with offset-carrying errors
//! - [`metainfo`] - Torrent metadata extraction and info hashes
//! - [`config`] - Backup directory configuration
//! - [`inspect`] - Resolving a hash to a backup file and building a report

pub mod bencode;
pub mod config;
pub mod inspect;
pub mod metainfo;

pub use bencode::{decode, decode_all, encode, BencodeError, DecodeOptions, ErrorKind, Value};
pub use config::{Config, ConfigError};
pub use inspect::{inspect, InspectError, Report};
pub use metainfo::{extract_metadata, InfoHash, MetainfoError, TorrentMetadata};
