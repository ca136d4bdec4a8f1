use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

use super::TextEncoding;

/// Language id stored in a GMD header. The strum name is the file name suffix the game
/// uses for that language (`item_eng.gmd`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[repr(u32)]
pub enum Language {
    #[strum(serialize = "jpn")]
    Japanese = 0,
    #[strum(serialize = "eng")]
    English = 1,
    #[strum(serialize = "fre")]
    French = 2,
    #[strum(serialize = "spa")]
    Spanish = 3,
    #[strum(serialize = "ger")]
    German = 4,
    #[strum(serialize = "ita")]
    Italian = 5,
    #[strum(serialize = "kor")]
    Korean = 6,
    #[strum(serialize = "chT")]
    TraditionalChinese = 7,
    #[strum(serialize = "chS")]
    SimplifiedChinese = 8,
    #[strum(serialize = "rus")]
    Russian = 10,
    #[strum(serialize = "pol")]
    Polish = 11,
    #[strum(serialize = "ptB")]
    BrazilianPortuguese = 21,
    #[strum(serialize = "ara")]
    Arabic = 22,
}

impl Language {
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn suffix(&self) -> &'static str {
        self.into()
    }

    /// Guess the language from a file name like `cm_facility_kor.gmd`
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(".gmd").unwrap_or(name);
        let (_, suffix) = stem.rsplit_once('_')?;
        suffix.parse().ok()
    }

    /// Encoding strategy the game's files in this language need
    pub fn text_encoding(&self) -> TextEncoding {
        match self {
            // Some Arabic tables carry strings in the legacy Arabic code page
            Self::Arabic => TextEncoding::Utf8WithFallback(encoding_rs::WINDOWS_1256),
            _ => TextEncoding::Utf8,
        }
    }
}
