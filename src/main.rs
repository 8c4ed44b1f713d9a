use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use torrent_inspect::config::{Config, DEFAULT_CONFIG_FILE};
use torrent_inspect::{inspect, DecodeOptions};

/// Inspect a .torrent file in qBittorrent's BT_backup directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Info hash of the torrent (40 or 64 hex digits)
    hash: String,

    /// JSON config file holding `bt_backup_path`
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Backup directory, overriding BT_BACKUP_PATH and the config file
    #[arg(short, long)]
    backup_dir: Option<PathBuf>,

    /// Accept integers with leading zeros
    #[arg(long)]
    lenient: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::load(&args.config, args.backup_dir).context("load configuration")?;
    let options = if args.lenient {
        DecodeOptions::lenient()
    } else {
        DecodeOptions::default()
    };

    let report = inspect(&config, &args.hash, options)
        .with_context(|| format!("inspect backup for {}", args.hash))?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", report);
    }

    Ok(())
}
