//! Bencode decoding and encoding ([BEP-3]).
//!
//! Bencode is the serialization format of `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Examples
//!
//! ```
//! use torrent_inspect::bencode::{decode, decode_all, Value};
//!
//! // Exactly one value, nothing after it
//! let value = decode_all(b"l4:spam4:eggse").unwrap();
//! assert_eq!(value.as_list().map(Vec::len), Some(2));
//!
//! // A prefix of a longer buffer
//! let (value, consumed) = decode(b"i42etrailing").unwrap();
//! assert_eq!(value, Value::Integer(42));
//! assert_eq!(consumed, 4);
//! ```
//!
//! # Strictness
//!
//! The decoder follows the grammar exactly and never skips bytes. Integers
//! with leading zeros are rejected unless [`DecodeOptions::lenient_integers`]
//! is set. Nesting is bounded by [`DecodeOptions::max_depth`]
//! ([`DEFAULT_MAX_DEPTH`] by default) so hostile input cannot exhaust the
//! stack. Dictionary keys may appear in any order.
//!
//! # Error Handling
//!
//! Every [`BencodeError`] variant records the byte offset of the failure;
//! [`BencodeError::kind`] gives a position-free [`ErrorKind`] for matching.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{
    decode, decode_all, decode_all_with, decode_with, dict_value_span, DecodeOptions,
    DEFAULT_MAX_DEPTH,
};
pub use encode::{encode, encode_into};
pub use error::{BencodeError, ErrorKind};
pub use value::Value;
