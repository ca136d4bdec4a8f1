//! Optional `hunterfile.toml` with default options.
//!
//! ```toml
//! [gmd]
//! invalid_entries = "skip"
//! encoding = "utf-8+windows-1256"
//!
//! [save]
//! encrypt = true
//! fix_checksum = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use hunterfile::{GmdOptions, InvalidEntryPolicy, SaveOptions, TextEncoding};
use serde::Deserialize;

use crate::cli::GmdReadArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gmd: GmdConfig,
    pub save: SaveOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GmdConfig {
    pub invalid_entries: InvalidEntryPolicy,
    pub encoding: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if let Some(label) = &config.gmd.encoding {
            parse_encoding(label)?;
        }
        Ok(config)
    }

    /// GMD options from the config, overridden by command-line flags
    pub fn gmd_options(&self, args: &GmdReadArgs) -> Result<GmdOptions> {
        let mut builder = GmdOptions::builder().invalid_entries(if args.skip_invalid {
            InvalidEntryPolicy::Skip
        } else {
            self.gmd.invalid_entries
        });

        if let Some(label) = args.encoding.as_ref().or(self.gmd.encoding.as_ref()) {
            builder = builder.encoding(parse_encoding(label)?);
        }
        Ok(builder.build())
    }
}

fn parse_encoding(label: &str) -> Result<TextEncoding> {
    TextEncoding::from_label(label).ok_or_else(|| anyhow!("Unknown text encoding: {}", label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [gmd]
            invalid_entries = "skip"
            encoding = "utf-8+windows-1256"

            [save]
            encrypt = false
            "#,
        )
        .unwrap();

        assert_eq!(config.gmd.invalid_entries, InvalidEntryPolicy::Skip);
        assert!(!config.save.encrypt);
        assert!(config.save.fix_checksum);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.gmd.invalid_entries, InvalidEntryPolicy::Strict);
        assert_eq!(config.save, SaveOptions::default());
    }

    #[test]
    fn test_parse_rejects_unknown_encoding() {
        assert!(Config::parse("[gmd]\nencoding = \"ebcdic\"").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::parse("[gmd]\nencoding = \"utf-8+windows-1256\"").unwrap();
        let args = GmdReadArgs {
            skip_invalid: true,
            encoding: Some("utf-8".to_string()),
        };
        let options = config.gmd_options(&args).unwrap();
        assert_eq!(options.invalid_entries, InvalidEntryPolicy::Skip);
        assert_eq!(options.encoding, Some(TextEncoding::Utf8));

        let options = config.gmd_options(&GmdReadArgs::default()).unwrap();
        assert_eq!(options.invalid_entries, InvalidEntryPolicy::Strict);
        assert!(matches!(
            options.encoding,
            Some(TextEncoding::Utf8WithFallback(_))
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(&dir.path().join("hunterfile.toml")).is_err());
    }
}
