//! SAVEDATA player-save container.
//!
//! ## File layout
//!
//! ```text
//! header (64) | 4 x i64 section offsets | opaque sections | 3 x slot | zero padding
//! ```
//!
//! The whole file is encrypted (see [`crate::crypto`]) unless it starts with
//! `01 00 00 00`. Only the layout written by the current game release is supported;
//! the pre-expansion layout is rejected with `UnsupportedVersion`.

mod container;
mod header;
mod slot;

pub use container::SaveData;
pub use header::SaveHeader;
pub use slot::SaveSlot;
