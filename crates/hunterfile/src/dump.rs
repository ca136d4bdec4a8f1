use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::gmd::{Gmd, GmdEntry, GmdHeader, SkippedEntry};
use crate::save::{SaveData, SaveSlot};

/// GMD summary for reports
#[derive(Debug, Clone, Serialize)]
pub struct GmdDump<'a> {
    pub name: &'a str,
    pub version: String,
    pub language: Option<&'static str>,
    pub header: GmdHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<&'a [GmdEntry]>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub skipped: &'a [SkippedEntry],
}

impl<'a> GmdDump<'a> {
    /// Summary without entries
    pub fn summary(gmd: &'a Gmd) -> Self {
        let header = gmd.header();
        Self {
            name: gmd.name(),
            version: format!("0x{:08X}", header.version),
            language: gmd.language().map(|l| l.suffix()),
            header,
            entries: None,
            skipped: gmd.skipped(),
        }
    }

    /// Summary with every key and value
    pub fn full(gmd: &'a Gmd) -> Self {
        Self {
            entries: Some(gmd.entries()),
            ..Self::summary(gmd)
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save dump to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// SAVEDATA summary for reports
#[derive(Debug, Clone, Serialize)]
pub struct SaveDump {
    pub account_id: i64,
    pub data_size: i64,
    pub checksum: String,
    pub checksum_valid: bool,
    pub section_offsets: Vec<String>,
    pub slots: Vec<SlotDump>,
}

/// One save slot in a [`SaveDump`]
#[derive(Debug, Clone, Serialize)]
pub struct SlotDump {
    pub index: usize,
    pub empty: bool,
    pub hunter_name: String,
    pub palico_name: String,
    pub hunter_rank: i32,
    pub master_rank: i32,
    pub zenny: i32,
    pub research_points: i32,
    pub hunter_xp: i32,
    pub master_xp: i32,
    /// Clamped to zero when the stored value is negative
    pub play_time_secs: u64,
}

impl SaveDump {
    pub fn from_save(save: &SaveData) -> Result<Self> {
        let header = save.header();
        Ok(Self {
            account_id: header.account_id,
            data_size: header.data_size,
            checksum: to_hex(&header.checksum),
            checksum_valid: save.checksum_valid()?,
            section_offsets: save
                .section_offsets()
                .iter()
                .map(|offset| format!("0x{:X}", offset))
                .collect(),
            slots: save
                .slots()
                .iter()
                .enumerate()
                .map(|(index, slot)| SlotDump::from_slot(index, slot))
                .collect(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl SlotDump {
    pub fn from_slot(index: usize, slot: &SaveSlot) -> Self {
        Self {
            index,
            empty: slot.is_empty(),
            hunter_name: slot.hunter_name(),
            palico_name: slot.palico_name(),
            hunter_rank: slot.hunter_rank(),
            master_rank: slot.master_rank(),
            zenny: slot.zenny(),
            research_points: slot.research_points(),
            hunter_xp: slot.hunter_xp(),
            master_xp: slot.master_xp(),
            play_time_secs: slot.play_duration().as_secs(),
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gmd::Language;

    #[test]
    fn test_gmd_dump_json() {
        let mut gmd = Gmd::new("item_eng", Language::English);
        gmd.add_string("IT_0001", "Potion").unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&GmdDump::full(&gmd).to_json().unwrap()).unwrap();
        assert_eq!(json["name"], "item_eng");
        assert_eq!(json["version"], "0x00010302");
        assert_eq!(json["language"], "eng");
        assert_eq!(json["header"]["key_count"], 1);
        assert_eq!(json["entries"][0]["key"], "IT_0001");
        assert_eq!(json["entries"][0]["value"], "Potion");
        assert!(json.get("skipped").is_none());

        let summary: serde_json::Value =
            serde_json::from_str(&GmdDump::summary(&gmd).to_json().unwrap()).unwrap();
        assert!(summary.get("entries").is_none());
    }

    #[test]
    fn test_save_dump_lists_slots() {
        let mut save = SaveData::default();
        save.set_account_id(76561198000000000);
        let slot = save.slot_mut(1).unwrap();
        slot.set_hunter_name("Aiden").unwrap();
        slot.set_hunter_rank(100).unwrap();
        slot.set_play_time(7_265);
        save.slot_mut(2).unwrap().set_play_time(-5);

        let dump = SaveDump::from_save(&save).unwrap();
        assert_eq!(dump.account_id, 76561198000000000);
        assert_eq!(dump.slots.len(), 3);
        assert!(dump.slots[0].empty);
        assert_eq!(dump.slots[1].hunter_name, "Aiden");
        assert_eq!(dump.slots[1].hunter_rank, 100);
        assert_eq!(dump.slots[1].play_time_secs, 7_265);
        assert_eq!(dump.slots[2].play_time_secs, 0);
        assert_eq!(dump.checksum.len(), 40);
        assert!(dump.to_json().unwrap().contains("\"hunter_rank\": 100"));
    }

    #[test]
    fn test_gmd_dump_save_writes_json() {
        let gmd = Gmd::new("item_eng", Language::English);
        let file = tempfile::NamedTempFile::new().unwrap();
        GmdDump::summary(&gmd).save(file.path()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(json["name"], "item_eng");
        assert_eq!(json["header"]["key_count"], 0);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x00, 0xAB, 0x10]), "00AB10");
    }
}
