use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::binary::layout::{gmd_header, save_data};
use crate::crypto::is_plaintext;

/// File type guessed from content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileKind {
    Gmd,
    /// Decrypted save, or a file with exactly the save length
    SaveData,
    Unknown,
}

impl FileKind {
    /// Sniff the file type. Encrypted saves have no magic, so they are recognized by
    /// length alone; detection is a hint and the codecs still validate everything.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&gmd_header::MAGIC_BYTES) {
            Self::Gmd
        } else if bytes.len() == save_data::TOTAL_SIZE || is_plaintext(bytes) {
            Self::SaveData
        } else {
            Self::Unknown
        }
    }
}
