//! Torrent metainfo inspection ([BEP-3], [BEP-12]).
//!
//! A `.torrent` file is a bencoded dictionary. This module reads the fields
//! that matter when diagnosing a torrent that misbehaves in a client:
//!
//! - **info.name** - Suggested file/directory name
//! - **info.private** - Private flag (no DHT/PEX when set)
//! - **announce** - Primary tracker URL
//! - **announce-list** - Tracker tiers (BEP-12)
//! - **comment**, **created by**, **creation date** - Informational fields
//!
//! Unlike a full metainfo parser, nothing here is required: a backup file
//! with no `info` dictionary still yields a [`TorrentMetadata`], just with
//! empty fields.
//!
//! # Examples
//!
//! ```no_run
//! use torrent_inspect::metainfo::TorrentMetadata;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("c12fe1c06bba254a9dc9f519b335aa7c1367a88a.torrent")?;
//! let meta = TorrentMetadata::from_bytes(&data)?;
//!
//! println!("Name: {:?}", meta.name);
//! println!("Private: {:?}", meta.is_private);
//! for tracker in meta.trackers() {
//!     println!("Tracker: {}", tracker);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html
//! [BEP-12]: http://bittorrent.org/beps/bep_0012.html

mod error;
mod info_hash;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use torrent::{extract_metadata, TorrentMetadata};
