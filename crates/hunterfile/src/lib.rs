//! # hunterfile
//!
//! Codecs for two file formats of a hunting action game.
//!
//! This crate provides:
//! - GMD keyed string tables: read, edit (add, insert, remove, set) and rebuild
//! - SAVEDATA player saves: decrypt, edit character slots, fix the checksum and re-encrypt
//! - Fixed-layout record access shared by both formats
//! - Serializable summaries for reports
//!
//! Reading and rebuilding an unmodified file reproduces it byte for byte.

pub mod binary;
pub mod config;
pub mod crypto;
pub mod dump;
pub mod error;
pub mod gmd;
pub mod kind;
pub mod prelude;
pub mod save;

pub use config::{GmdOptions, InvalidEntryPolicy, SaveOptions};
pub use dump::{GmdDump, SaveDump, SlotDump};
pub use error::{Error, Result};
pub use gmd::{Gmd, GmdEntry, GmdHeader, Language, SkippedEntry, TextEncoding};
pub use kind::FileKind;
pub use save::{SaveData, SaveHeader, SaveSlot};
