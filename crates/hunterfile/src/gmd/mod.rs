//! GMD keyed string tables.
//!
//! ## File layout
//!
//! ```text
//! header (40) | name + NUL | key info (32 each) | buckets (256 x u64, only if keys) |
//! key block (NUL-terminated keys) | string block (NUL-terminated strings)
//! ```
//!
//! Each key info record names the string it belongs to by index. Keys and strings
//! are always written in table order, so after a rebuild key `i` owns string `i`.

mod encoding;
mod entry;
mod header;
pub mod index;
mod language;
mod table;

pub use encoding::{TextEncoding, encode_text};
pub use entry::GmdEntry;
pub use header::GmdHeader;
pub use index::{KeyIndex, KeyRecord};
pub use language::Language;
pub use table::{Gmd, SkippedEntry};
