//! Options controlling how files are read and written.
//!
//! Both option types have a builder so callers only spell out what they change:
//!
//! ```
//! use hunterfile::config::{GmdOptions, InvalidEntryPolicy, SaveOptions};
//!
//! let gmd = GmdOptions::builder()
//!     .invalid_entries(InvalidEntryPolicy::Skip)
//!     .build();
//! assert_eq!(gmd.invalid_entries, InvalidEntryPolicy::Skip);
//!
//! let save = SaveOptions::builder().encrypt(false).build();
//! assert!(!save.encrypt);
//! assert!(save.fix_checksum);
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::gmd::TextEncoding;

/// What to do with a GMD entry that can't be read
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InvalidEntryPolicy {
    /// Fail the whole load with `MalformedEntry`
    #[default]
    Strict,
    /// Drop the entry and keep going. Dropped entries are gone for good: the next
    /// save won't contain them.
    Skip,
}

/// Options for reading GMD files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GmdOptions {
    pub invalid_entries: InvalidEntryPolicy,
    /// Overrides the encoding picked from the table's language
    pub encoding: Option<TextEncoding>,
}

impl GmdOptions {
    pub fn builder() -> GmdOptionsBuilder {
        GmdOptionsBuilder::default()
    }

    /// Strict reading with the language's default encoding
    pub fn strict() -> Self {
        Self::default()
    }

    /// Skip unreadable entries
    pub fn skip_invalid() -> Self {
        Self {
            invalid_entries: InvalidEntryPolicy::Skip,
            ..Self::default()
        }
    }
}

/// Builder for GmdOptions
#[derive(Debug, Clone, Default)]
pub struct GmdOptionsBuilder {
    invalid_entries: Option<InvalidEntryPolicy>,
    encoding: Option<TextEncoding>,
}

impl GmdOptionsBuilder {
    /// Set the policy for unreadable entries
    pub fn invalid_entries(mut self, policy: InvalidEntryPolicy) -> Self {
        self.invalid_entries = Some(policy);
        self
    }

    /// Force a text encoding instead of deriving it from the table language
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn build(self) -> GmdOptions {
        let default = GmdOptions::default();
        GmdOptions {
            invalid_entries: self.invalid_entries.unwrap_or(default.invalid_entries),
            encoding: self.encoding.or(default.encoding),
        }
    }
}

/// Options for writing SAVEDATA files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// Encrypt the output (the game only loads encrypted files)
    pub encrypt: bool,
    /// Recompute the integrity digest before encrypting
    pub fix_checksum: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            encrypt: true,
            fix_checksum: true,
        }
    }
}

impl SaveOptions {
    pub fn builder() -> SaveOptionsBuilder {
        SaveOptionsBuilder::default()
    }
}

/// Builder for SaveOptions
#[derive(Debug, Clone, Default)]
pub struct SaveOptionsBuilder {
    encrypt: Option<bool>,
    fix_checksum: Option<bool>,
}

impl SaveOptionsBuilder {
    pub fn encrypt(mut self, enabled: bool) -> Self {
        self.encrypt = Some(enabled);
        self
    }

    pub fn fix_checksum(mut self, enabled: bool) -> Self {
        self.fix_checksum = Some(enabled);
        self
    }

    pub fn build(self) -> SaveOptions {
        let default = SaveOptions::default();
        SaveOptions {
            encrypt: self.encrypt.unwrap_or(default.encrypt),
            fix_checksum: self.fix_checksum.unwrap_or(default.fix_checksum),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_options_default_writes_game_ready_files() {
        let options = SaveOptions::default();
        assert!(options.encrypt);
        assert!(options.fix_checksum);
    }

    #[test]
    fn test_save_options_builder_overrides_only_given_fields() {
        let options = SaveOptions::builder().fix_checksum(false).build();
        assert!(options.encrypt);
        assert!(!options.fix_checksum);
    }

    #[test]
    fn test_save_options_deserialize_partial() {
        let options: SaveOptions = serde_json::from_str(r#"{"encrypt": false}"#).unwrap();
        assert!(!options.encrypt);
        assert!(options.fix_checksum);
    }

    #[test]
    fn test_gmd_options_builder() {
        let options = GmdOptions::builder()
            .invalid_entries(InvalidEntryPolicy::Skip)
            .encoding(TextEncoding::Utf8)
            .build();
        assert_eq!(options.invalid_entries, InvalidEntryPolicy::Skip);
        assert_eq!(options.encoding, Some(TextEncoding::Utf8));
        assert_eq!(GmdOptions::builder().build(), GmdOptions::strict());
    }

    #[test]
    fn test_invalid_entry_policy_parse() {
        assert_eq!(
            "skip".parse::<InvalidEntryPolicy>().unwrap(),
            InvalidEntryPolicy::Skip
        );
        assert_eq!(InvalidEntryPolicy::Strict.to_string(), "strict");
        let policy: InvalidEntryPolicy = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(policy, InvalidEntryPolicy::Skip);
    }
}
