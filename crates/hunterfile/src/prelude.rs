//! Common imports for working with game files.
//!
//! ```
//! use hunterfile::prelude::*;
//!
//! let mut gmd = Gmd::new("item_eng", Language::English);
//! gmd.add_string("IT_0001", "Potion")?;
//! # Ok::<(), hunterfile::Error>(())
//! ```

pub use crate::config::{GmdOptions, InvalidEntryPolicy, SaveOptions};
pub use crate::error::{Error, Result};
pub use crate::gmd::{Gmd, GmdEntry, Language, TextEncoding};
pub use crate::kind::FileKind;
pub use crate::save::{SaveData, SaveSlot};
