use std::fmt;

use encoding_rs::{Encoding, UTF_8};

use super::Language;

/// How the strings of a GMD table are decoded.
///
/// Tables are UTF-8. A few localized tables also contain strings in a legacy code
/// page, which is a quirk of those files rather than a rule of the format; they are
/// read with [`TextEncoding::Utf8WithFallback`]. Each entry remembers which encoding
/// decoded it and is written back with the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Strict UTF-8; anything else is a malformed entry
    #[default]
    Utf8,
    /// UTF-8 first, then the given single-byte code page
    Utf8WithFallback(&'static Encoding),
}

impl TextEncoding {
    /// Default strategy for a header language id
    pub fn for_language(language: Option<Language>) -> Self {
        language.map(|l| l.text_encoding()).unwrap_or_default()
    }

    /// Parse `utf-8`, or `utf-8+<label>` for a fallback code page (`utf-8+windows-1256`)
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        match label.split_once('+') {
            None => Encoding::for_label(label.as_bytes())
                .filter(|e| *e == UTF_8)
                .map(|_| Self::Utf8),
            Some((primary, fallback)) => {
                Encoding::for_label(primary.as_bytes()).filter(|e| *e == UTF_8)?;
                let fallback = Encoding::for_label(fallback.as_bytes())?;
                fallback
                    .is_single_byte()
                    .then_some(Self::Utf8WithFallback(fallback))
            }
        }
    }

    /// Decode one raw string, returning the text and the encoding that produced it
    pub fn decode(&self, raw: &[u8]) -> Option<(String, &'static Encoding)> {
        if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(raw) {
            return Some((text.into_owned(), UTF_8));
        }
        match self {
            Self::Utf8 => None,
            Self::Utf8WithFallback(fallback) => fallback
                .decode_without_bom_handling_and_without_replacement(raw)
                .map(|text| (text.into_owned(), *fallback)),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf-8"),
            Self::Utf8WithFallback(fallback) => {
                write!(f, "utf-8+{}", fallback.name().to_ascii_lowercase())
            }
        }
    }
}

/// Encode text, or `None` when the encoding can't represent every character
pub fn encode_text(text: &str, encoding: &'static Encoding) -> Option<Vec<u8>> {
    let (bytes, _, had_errors) = encoding.encode(text);
    (!had_errors).then(|| bytes.into_owned())
}
