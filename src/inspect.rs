//! Looking up and reporting on a single `BT_backup` entry.

use crate::bencode::DecodeOptions;
use crate::config::Config;
use crate::metainfo::{InfoHash, MetainfoError, TorrentMetadata};
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("no backup directory configured (use --backup-dir, BT_BACKUP_PATH or bt_backup_path)")]
    MissingBackupDir,

    #[error(transparent)]
    InvalidHash(MetainfoError),

    #[error("backup file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error decoding {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: MetainfoError,
    },
}

/// The result of inspecting one backup file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub path: PathBuf,
    pub requested: InfoHash,
    pub metadata: TorrentMetadata,
}

impl Report {
    /// Returns `false` if the info hash computed from the file differs from
    /// the one that was asked for.
    ///
    /// Only v1 hashes are computed, so a v2 request always matches.
    pub fn hash_matches(&self) -> bool {
        match (self.requested, self.metadata.info_hash) {
            (requested @ InfoHash::V1(_), Some(computed)) => requested == computed,
            _ => true,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.metadata;

        writeln!(f, "Reading: {}", self.path.display())?;
        writeln!(f, "Name: {}", meta.name.as_deref().unwrap_or(""))?;
        if let Some(hash) = meta.info_hash {
            writeln!(f, "Info Hash: {}", hash)?;
        }
        match meta.is_private {
            Some(private) => writeln!(f, "Private: {}", private)?,
            None => writeln!(f, "Private: None")?,
        }
        writeln!(f, "Announce: {}", meta.announce.as_deref().unwrap_or("None"))?;

        if meta.announce_tiers.is_empty() {
            return writeln!(f, "Announce List: None");
        }

        writeln!(f, "Announce List:")?;
        for url in meta.announce_tiers.iter().flatten() {
            writeln!(f, "  - {}", url)?;
        }
        Ok(())
    }
}

/// Path of the backup file for `hash` inside `dir`.
pub fn backup_path(dir: &Path, hash: &InfoHash) -> PathBuf {
    dir.join(format!("{}.torrent", hash))
}

/// Reads and decodes the backup file for `hash`.
///
/// `hash` must be a 40- or 64-digit hex info hash; it is normalized to
/// lowercase before building the file name.
pub fn inspect(config: &Config, hash: &str, options: DecodeOptions) -> Result<Report, InspectError> {
    let requested = InfoHash::from_hex(hash.trim()).map_err(InspectError::InvalidHash)?;
    let dir = config
        .bt_backup_path
        .as_deref()
        .ok_or(InspectError::MissingBackupDir)?;

    let path = backup_path(dir, &requested);
    tracing::info!(path = %path.display(), "reading backup file");

    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(InspectError::NotFound(path)),
        Err(source) => return Err(InspectError::Read { path, source }),
    };

    let metadata = match TorrentMetadata::from_bytes_with(&data, options) {
        Ok(metadata) => metadata,
        Err(source) => return Err(InspectError::Decode { path, source }),
    };

    let report = Report {
        path,
        requested,
        metadata,
    };

    if !report.hash_matches() {
        tracing::warn!(
            requested = %report.requested,
            computed = ?report.metadata.info_hash,
            "info hash of backup file does not match its name"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HASH: &str = "87a18f5af51721fe0f61decdb2809a57487053c7";

    const TORRENT: &[u8] = b"d8:announce23:http://tracker/announce13:announce-listll11:http://t1/ael11:http://t2/a11:http://t3/aee4:infod4:name10:Ubuntu.iso7:privatei1eee";

    fn setup(contents: &[u8]) -> (TempDir, Config) {
        setup_named(HASH, contents)
    }

    fn setup_named(hash: &str, contents: &[u8]) -> (TempDir, Config) {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(format!("{}.torrent", hash)), contents).unwrap();
        let config = Config {
            bt_backup_path: Some(temp.path().to_path_buf()),
        };
        (temp, config)
    }

    #[test]
    fn test_inspect_report() {
        let (temp, config) = setup(TORRENT);
        let report = inspect(&config, HASH, DecodeOptions::default()).unwrap();

        assert!(report.hash_matches());
        assert_eq!(report.metadata.name.as_deref(), Some("Ubuntu.iso"));

        let expected = format!(
            "Reading: {}\n\
             Name: Ubuntu.iso\n\
             Info Hash: {HASH}\n\
             Private: true\n\
             Announce: http://tracker/announce\n\
             Announce List:\n  \
             - http://t1/a\n  \
             - http://t2/a\n  \
             - http://t3/a\n",
            temp.path().join(format!("{HASH}.torrent")).display()
        );
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_inspect_accepts_uppercase_hash() {
        let (_temp, config) = setup(TORRENT);
        let report = inspect(&config, &HASH.to_uppercase(), DecodeOptions::default()).unwrap();
        assert_eq!(report.requested.to_hex(), HASH);
    }

    #[test]
    fn test_inspect_minimal_torrent() {
        let (_temp, config) = setup(b"d4:infod4:name1:xee");
        let report = inspect(&config, HASH, DecodeOptions::default()).unwrap();
        let text = report.to_string();

        assert!(text.contains("Private: None\n"));
        assert!(text.contains("Announce: None\n"));
        assert!(text.ends_with("Announce List: None\n"));
        assert!(!report.hash_matches());
    }

    #[test]
    fn test_inspect_empty_tiers_print_header() {
        let (_temp, config) = setup(b"d13:announce-listllee4:infod4:name1:xee");
        let report = inspect(&config, HASH, DecodeOptions::default()).unwrap();

        assert_eq!(report.metadata.announce_tiers, vec![Vec::<String>::new()]);
        assert!(report.to_string().ends_with("Announce: None\nAnnounce List:\n"));
    }

    #[test]
    fn test_inspect_unsorted_info_matches_file_name() {
        let hash = "db9a4a77acfd131020ede04024654c326e9da3e4";
        let (_temp, config) = setup_named(hash, b"d4:infod7:privatei1e4:name3:isoee");
        let report = inspect(&config, hash, DecodeOptions::default()).unwrap();

        assert!(report.hash_matches());
        assert!(report.to_string().contains(&format!("Info Hash: {hash}\n")));
    }

    #[test]
    fn test_inspect_missing_file() {
        let (_temp, config) = setup(TORRENT);
        let other = "0123456789abcdef0123456789abcdef01234567";
        let err = inspect(&config, other, DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, InspectError::NotFound(ref p) if p.ends_with(format!("{other}.torrent"))));
    }

    #[test]
    fn test_inspect_rejects_invalid_hash() {
        let (_temp, config) = setup(TORRENT);
        let err = inspect(&config, "../secret", DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, InspectError::InvalidHash(_)));
    }

    #[test]
    fn test_inspect_without_backup_dir() {
        let err = inspect(&Config::default(), HASH, DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, InspectError::MissingBackupDir));
    }

    #[test]
    fn test_inspect_decode_error_names_path_and_offset() {
        let (_temp, config) = setup(b"d4:infod4:name");
        let err = inspect(&config, HASH, DecodeOptions::default()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains(&format!("{HASH}.torrent")));
        assert!(message.contains("offset 14"));
    }

    #[test]
    fn test_inspect_lenient_option() {
        let (_temp, config) = setup(b"d4:infod4:name1:x7:privatei01eee");
        assert!(inspect(&config, HASH, DecodeOptions::default()).is_err());

        let report = inspect(&config, HASH, DecodeOptions::lenient()).unwrap();
        assert_eq!(report.metadata.is_private, Some(true));
    }

    #[test]
    fn test_report_json() {
        let (_temp, config) = setup(TORRENT);
        let report = inspect(&config, HASH, DecodeOptions::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["requested"], HASH);
        assert_eq!(json["metadata"]["announce"], "http://tracker/announce");
    }
}
