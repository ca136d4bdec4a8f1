use encoding_rs::{Encoding, UTF_8};
use serde::{Serialize, Serializer};

use super::encoding::encode_text;
use crate::error::{Error, Result};

/// One key/value pair of a GMD table.
///
/// The value is kept both as text and as the exact bytes written to the string
/// block, so block sizes are known without re-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GmdEntry {
    key: String,
    value: String,
    #[serde(serialize_with = "serialize_encoding")]
    encoding: &'static Encoding,
    #[serde(skip)]
    encoded: Vec<u8>,
}

impl GmdEntry {
    /// New UTF-8 entry
    pub fn new(key: &str, value: &str) -> Result<Self> {
        validate_key(key)?;
        Self::with_encoding(key.to_string(), value, UTF_8)
    }

    pub(crate) fn with_encoding(
        key: String,
        value: &str,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        validate_value(&key, value)?;
        let encoded = encode_text(value, encoding).ok_or_else(|| {
            Error::InvalidText(format!(
                "value of {} can't be represented in {}",
                key,
                encoding.name()
            ))
        })?;
        Ok(Self {
            key,
            value: value.to_string(),
            encoding,
            encoded,
        })
    }

    /// Entry decoded from a file, whose raw bytes are already known
    pub(crate) fn from_raw(
        key: String,
        value: String,
        encoding: &'static Encoding,
        raw: &[u8],
    ) -> Self {
        Self {
            key,
            value,
            encoding,
            encoded: raw.to_vec(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Encoding the value is written with
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Bytes the value occupies in the string block, terminator excluded
    pub fn encoded_value(&self) -> &[u8] {
        &self.encoded
    }

    /// Bytes the key occupies in the key block, terminator included
    pub fn key_size(&self) -> usize {
        self.key.len() + 1
    }

    /// Bytes the value occupies in the string block, terminator included
    pub fn value_size(&self) -> usize {
        self.encoded.len() + 1
    }

    /// Replace the value, keeping the entry's encoding when it can represent the new
    /// text and switching to UTF-8 otherwise
    pub(crate) fn set_value(&mut self, value: &str) -> Result<()> {
        validate_value(&self.key, value)?;
        let (encoded, encoding) = match encode_text(value, self.encoding) {
            Some(encoded) => (encoded, self.encoding),
            None => (value.as_bytes().to_vec(), UTF_8),
        };
        self.value = value.to_string();
        self.encoded = encoded;
        self.encoding = encoding;
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidText("keys can't be empty".to_string()));
    }
    if key.contains('\0') {
        return Err(Error::InvalidText(format!(
            "key {:?} can't contain NUL characters",
            key
        )));
    }
    Ok(())
}

fn validate_value(key: &str, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(Error::InvalidText(format!(
            "value of {} can't contain NUL characters",
            key
        )));
    }
    Ok(())
}

fn serialize_encoding<S: Serializer>(
    encoding: &&'static Encoding,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(encoding.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1256;

    #[test]
    fn test_new_entry_sizes() {
        let entry = GmdEntry::new("KEY_1", "Größe").unwrap();
        assert_eq!(entry.key_size(), 6);
        // ö and ß are two bytes each
        assert_eq!(entry.value_size(), 8);
        assert_eq!(entry.encoding(), UTF_8);
    }

    #[test]
    fn test_rejects_bad_text() {
        assert!(matches!(GmdEntry::new("", "x"), Err(Error::InvalidText(_))));
        assert!(matches!(
            GmdEntry::new("A\0B", "x"),
            Err(Error::InvalidText(_))
        ));
        assert!(matches!(
            GmdEntry::new("KEY", "x\0y"),
            Err(Error::InvalidText(_))
        ));
    }

    #[test]
    fn test_set_value_keeps_or_switches_encoding() {
        let mut entry =
            GmdEntry::with_encoding("AR".to_string(), "\u{0627}", WINDOWS_1256).unwrap();
        assert_eq!(entry.encoded_value(), [0xC7]);

        entry.set_value("\u{0644}").unwrap();
        assert_eq!(entry.encoding(), WINDOWS_1256);
        assert_eq!(entry.encoded_value(), [0xE1]);

        entry.set_value("日本").unwrap();
        assert_eq!(entry.encoding(), UTF_8);
        assert_eq!(entry.encoded_value(), "日本".as_bytes());
    }

    #[test]
    fn test_serialize_entry() {
        let entry = GmdEntry::new("KEY", "Value").unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "KEY", "value": "Value", "encoding": "UTF-8"})
        );
    }
}
