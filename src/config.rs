//! Backup-directory configuration.
//!
//! Precedence: `--backup-dir` > `BT_BACKUP_PATH` (process env, then `.env`) >
//! `bt_backup_path` in the JSON config file.

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "troubleshooting.config.json";

pub const BACKUP_PATH_ENV: &str = "BT_BACKUP_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of the config file. Other keys used by the rest of the
/// tooling are ignored.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bt_backup_path: Option<String>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// qBittorrent's `BT_backup` directory.
    pub bt_backup_path: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration from the environment and `config_file`.
    ///
    /// A `.env` file in the working directory is loaded first; it never
    /// overrides variables already set in the process environment. A missing
    /// config file is not an error.
    pub fn load(config_file: &Path, backup_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let env_value = std::env::var(BACKUP_PATH_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty());
        let file = FileConfig::read(config_file)?;
        let home = std::env::var_os("HOME").map(PathBuf::from);

        Ok(Self::resolve(backup_dir, env_value, file, home.as_deref()))
    }

    fn resolve(
        backup_dir: Option<PathBuf>,
        env_value: Option<String>,
        file: FileConfig,
        home: Option<&Path>,
    ) -> Self {
        let bt_backup_path = match (backup_dir, env_value, file.bt_backup_path) {
            (Some(dir), _, _) => Some(dir),
            (None, Some(env), _) => Some(expand_home(&env, home)),
            (None, None, Some(path)) => Some(expand_home(&path, home)),
            (None, None, None) => None,
        };

        Self { bt_backup_path }
    }
}

/// Expands a leading `~` to `home`. Paths without one, or with no home
/// available, are returned unchanged.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(path: Option<&str>) -> FileConfig {
        FileConfig {
            bt_backup_path: path.map(String::from),
        }
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/media");
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/media"));
        assert_eq!(
            expand_home("~/qbit/BT_backup", Some(home)),
            PathBuf::from("/home/media/qbit/BT_backup")
        );
        assert_eq!(expand_home("/srv/BT_backup", Some(home)), PathBuf::from("/srv/BT_backup"));
        assert_eq!(expand_home("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_home("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn test_resolve_precedence() {
        let home = Some(Path::new("/home/media"));

        let config = Config::resolve(
            Some(PathBuf::from("/cli")),
            Some("/env".into()),
            file(Some("/file")),
            home,
        );
        assert_eq!(config.bt_backup_path, Some(PathBuf::from("/cli")));

        let config = Config::resolve(None, Some("~/env".into()), file(Some("/file")), home);
        assert_eq!(config.bt_backup_path, Some(PathBuf::from("/home/media/env")));

        let config = Config::resolve(None, None, file(Some("~/file")), home);
        assert_eq!(config.bt_backup_path, Some(PathBuf::from("/home/media/file")));

        let config = Config::resolve(None, None, file(None), home);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_read_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{"qbittorrent_url": "http://localhost:8080", "bt_backup_path": "/data/BT_backup"}"#,
        )
        .unwrap();

        let file = FileConfig::read(&path).unwrap();
        assert_eq!(file.bt_backup_path.as_deref(), Some("/data/BT_backup"));
    }

    #[test]
    fn test_missing_config_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let file = FileConfig::read(&temp.path().join("absent.json")).unwrap();
        assert!(file.bt_backup_path.is_none());
    }

    #[test]
    fn test_malformed_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileConfig::read(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}
