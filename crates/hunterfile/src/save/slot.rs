use std::fmt;
use std::time::Duration;

use crate::binary::Field;
use crate::binary::layout::save_slot;
use crate::error::{Error, Result};

/// One character slot of a SAVEDATA file.
///
/// Holds the slot's raw bytes; typed accessors read and write the known fields in
/// place and everything else is carried through untouched. Cloning copies the bytes,
/// so a cloned slot can be edited and written into another position independently.
#[derive(Clone, PartialEq, Eq)]
pub struct SaveSlot {
    raw: Box<[u8]>,
}

impl Default for SaveSlot {
    fn default() -> Self {
        Self {
            raw: vec![0u8; save_slot::SIZE].into_boxed_slice(),
        }
    }
}

impl SaveSlot {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != save_slot::SIZE {
            return Err(Error::SizeConstraintViolation(format!(
                "save slot must be {} bytes (got {})",
                save_slot::SIZE,
                bytes.len()
            )));
        }
        Ok(Self {
            raw: bytes.to_vec().into_boxed_slice(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn hunter_name(&self) -> String {
        save_slot::HUNTER_NAME.read_str(&self.raw)
    }

    pub fn set_hunter_name(&mut self, name: &str) -> Result<()> {
        save_slot::HUNTER_NAME.write_str(&mut self.raw, name)
    }

    pub fn palico_name(&self) -> String {
        save_slot::PALICO_NAME.read_str(&self.raw)
    }

    pub fn set_palico_name(&mut self, name: &str) -> Result<()> {
        save_slot::PALICO_NAME.write_str(&mut self.raw, name)
    }

    pub fn hunter_rank(&self) -> i32 {
        save_slot::HUNTER_RANK.read_i32(&self.raw)
    }

    pub fn set_hunter_rank(&mut self, rank: i32) -> Result<()> {
        self.write_rank(save_slot::HUNTER_RANK, rank)
    }

    pub fn master_rank(&self) -> i32 {
        save_slot::MASTER_RANK.read_i32(&self.raw)
    }

    pub fn set_master_rank(&mut self, rank: i32) -> Result<()> {
        self.write_rank(save_slot::MASTER_RANK, rank)
    }

    pub fn zenny(&self) -> i32 {
        save_slot::ZENNY.read_i32(&self.raw)
    }

    pub fn set_zenny(&mut self, zenny: i32) {
        save_slot::ZENNY.write_i32(&mut self.raw, zenny);
    }

    pub fn research_points(&self) -> i32 {
        save_slot::RESEARCH_POINTS.read_i32(&self.raw)
    }

    pub fn set_research_points(&mut self, points: i32) {
        save_slot::RESEARCH_POINTS.write_i32(&mut self.raw, points);
    }

    pub fn hunter_xp(&self) -> i32 {
        save_slot::HUNTER_XP.read_i32(&self.raw)
    }

    pub fn set_hunter_xp(&mut self, xp: i32) {
        save_slot::HUNTER_XP.write_i32(&mut self.raw, xp);
    }

    pub fn master_xp(&self) -> i32 {
        save_slot::MASTER_XP.read_i32(&self.raw)
    }

    pub fn set_master_xp(&mut self, xp: i32) {
        save_slot::MASTER_XP.write_i32(&mut self.raw, xp);
    }

    /// Play time in seconds
    pub fn play_time(&self) -> i32 {
        save_slot::PLAY_TIME.read_i32(&self.raw)
    }

    pub fn set_play_time(&mut self, seconds: i32) {
        save_slot::PLAY_TIME.write_i32(&mut self.raw, seconds);
    }

    /// Play time as a duration; negative stored values count as zero
    pub fn play_duration(&self) -> Duration {
        Duration::from_secs(self.play_time().max(0) as u64)
    }

    /// A slot the game never wrote to is all zeros up to the name
    pub fn is_empty(&self) -> bool {
        save_slot::HUNTER_NAME.bytes(&self.raw).iter().all(|&b| b == 0)
            && self.hunter_rank() == 0
    }

    fn write_rank(&mut self, field: Field, rank: i32) -> Result<()> {
        if !(0..=save_slot::MAX_RANK).contains(&rank) {
            return Err(Error::ValueOutOfRange {
                field: field.name,
                value: rank as i64,
                max: save_slot::MAX_RANK as i64,
            });
        }
        field.write_i32(&mut self.raw, rank);
        Ok(())
    }
}

impl fmt::Debug for SaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveSlot")
            .field("hunter_name", &self.hunter_name())
            .field("hunter_rank", &self.hunter_rank())
            .field("master_rank", &self.master_rank())
            .field("zenny", &self.zenny())
            .field("play_time", &self.play_time())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slot_is_empty() {
        let slot = SaveSlot::default();
        assert!(slot.is_empty());
        assert_eq!(slot.as_bytes().len(), save_slot::SIZE);
        assert_eq!(slot.hunter_name(), "");
    }

    #[test]
    fn test_field_accessors() {
        let mut slot = SaveSlot::default();
        slot.set_hunter_name("Aiden").unwrap();
        slot.set_palico_name("Grimalkyne").unwrap();
        slot.set_hunter_rank(100).unwrap();
        slot.set_master_rank(24).unwrap();
        slot.set_zenny(1_234_567);
        slot.set_research_points(8_000);
        slot.set_hunter_xp(42);
        slot.set_master_xp(43);
        slot.set_play_time(3_600);

        assert_eq!(slot.hunter_name(), "Aiden");
        assert_eq!(slot.palico_name(), "Grimalkyne");
        assert_eq!(slot.hunter_rank(), 100);
        assert_eq!(slot.master_rank(), 24);
        assert_eq!(slot.zenny(), 1_234_567);
        assert_eq!(slot.research_points(), 8_000);
        assert_eq!(slot.hunter_xp(), 42);
        assert_eq!(slot.master_xp(), 43);
        assert_eq!(slot.play_duration(), Duration::from_secs(3_600));
        assert!(!slot.is_empty());

        // Little-endian at the documented offset
        assert_eq!(slot.as_bytes()[0x48..0x4C], 1_234_567i32.to_le_bytes());
    }

    #[test]
    fn test_rank_limit() {
        let mut slot = SaveSlot::default();
        slot.set_hunter_rank(999).unwrap();
        let err = slot.set_hunter_rank(1000).unwrap_err();
        assert!(matches!(
            err,
            Error::ValueOutOfRange {
                field: "HunterRank",
                value: 1000,
                max: 999
            }
        ));
        assert!(slot.set_master_rank(-1).is_err());
        assert_eq!(slot.hunter_rank(), 999);
    }

    #[test]
    fn test_name_byte_budget() {
        let mut slot = SaveSlot::default();
        slot.set_hunter_name("Keep").unwrap();

        // 22 three-byte characters = 66 bytes
        let too_long = "ハ".repeat(22);
        assert!(matches!(
            slot.set_hunter_name(&too_long),
            Err(Error::SizeConstraintViolation(_))
        ));
        assert_eq!(slot.hunter_name(), "Keep");

        let exact = "a".repeat(64);
        slot.set_hunter_name(&exact).unwrap();
        assert_eq!(slot.hunter_name(), exact);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = SaveSlot::default();
        original.set_hunter_name("First").unwrap();

        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.set_hunter_name("Second").unwrap();

        assert_eq!(original.hunter_name(), "First");
        assert_ne!(copy, original);
    }

    #[test]
    fn test_from_bytes_requires_exact_size() {
        assert!(SaveSlot::from_bytes(&[0u8; 16]).is_err());
        let bytes = vec![7u8; save_slot::SIZE];
        let slot = SaveSlot::from_bytes(&bytes).unwrap();
        assert_eq!(slot.as_bytes(), &bytes[..]);
    }
}
