//! Byte layouts of the fixed-size records in GMD and SAVEDATA files
//!
//! This module centralizes every offset used to read or write a record.
//! Constants are organized by record type. All integers are little-endian.

use super::Field;

/// SAVEDATA header (64 bytes)
pub mod save_header {
    use super::Field;

    pub const SIZE: usize = 64;

    pub const MAGIC: Field = Field::new("Magic", 0, 4);
    pub const RESERVED_0: Field = Field::new("Reserved0", 4, 4);
    pub const RESERVED_1: Field = Field::new("Reserved1", 8, 4);
    pub const CHECKSUM: Field = Field::new("Checksum", 12, 20);
    pub const DATA_SIZE: Field = Field::new("DataSize", 32, 8);
    pub const ACCOUNT_ID: Field = Field::new("AccountId", 40, 8);
    pub const RESERVED_2: Field = Field::new("Reserved2", 48, 16);

    /// Magic of a decrypted file
    pub const PLAIN_MAGIC: [u8; 4] = [0x01, 0x00, 0x00, 0x00];
}

/// SAVEDATA body, as laid out after the header
pub mod save_data {
    use super::save_header;

    /// Number of section offsets following the header
    pub const SECTION_OFFSET_COUNT: usize = 4;
    pub const SECTION_OFFSETS_SIZE: usize = SECTION_OFFSET_COUNT * 8;

    /// Opaque section blob between the offsets and the first slot
    pub const SECTIONS_SIZE: usize = 3_149_948;

    pub const SLOT_COUNT: usize = 3;
    pub const SLOT_SIZE: usize = 0x209AC0;

    /// Zero padding after the last slot
    pub const PADDING_SIZE: usize = 1_724_356;

    pub const SECTIONS_OFFSET: usize = save_header::SIZE + SECTION_OFFSETS_SIZE;
    pub const SLOTS_OFFSET: usize = SECTIONS_OFFSET + SECTIONS_SIZE;

    /// Exact length of a supported file, encrypted or not
    pub const TOTAL_SIZE: usize = SLOTS_OFFSET + SLOT_COUNT * SLOT_SIZE + PADDING_SIZE;

    /// Declared data size of the supported layout (everything after the header)
    pub const DATA_SIZE: i64 = 11_284_640;

    /// Declared data size of the pre-expansion layout
    pub const LEGACY_DATA_SIZE: i64 = 9_438_368;

    /// The checksum covers everything after the header
    pub const CHECKSUM_START: usize = save_header::SIZE;
}

/// One save slot (character)
pub mod save_slot {
    use super::Field;
    use super::save_data::SLOT_SIZE;

    pub const SIZE: usize = SLOT_SIZE;

    pub const HUNTER_NAME: Field = Field::new("HunterName", 0x00, 64);
    pub const HUNTER_RANK: Field = Field::new("HunterRank", 0x40, 4);
    pub const MASTER_RANK: Field = Field::new("MasterRank", 0x44, 4);
    pub const ZENNY: Field = Field::new("Zenny", 0x48, 4);
    pub const RESEARCH_POINTS: Field = Field::new("ResearchPoints", 0x4C, 4);
    pub const HUNTER_XP: Field = Field::new("HunterXp", 0x50, 4);
    pub const MASTER_XP: Field = Field::new("MasterXp", 0x54, 4);
    pub const PLAY_TIME: Field = Field::new("PlayTime", 0x58, 4);
    pub const PALICO_NAME: Field = Field::new("PalicoName", 0x10A0F0, 64);

    /// Highest rank the game displays
    pub const MAX_RANK: i32 = 999;
}

/// GMD header (40 bytes, followed by the table name)
pub mod gmd_header {
    use super::Field;

    pub const SIZE: usize = 40;

    pub const MAGIC: Field = Field::new("Magic", 0, 4);
    pub const VERSION: Field = Field::new("Version", 4, 4);
    pub const LANGUAGE: Field = Field::new("Language", 8, 4);
    pub const RESERVED: Field = Field::new("Reserved", 12, 8);
    pub const KEY_COUNT: Field = Field::new("KeyCount", 20, 4);
    pub const STRING_COUNT: Field = Field::new("StringCount", 24, 4);
    pub const KEY_BLOCK_SIZE: Field = Field::new("KeyBlockSize", 28, 4);
    pub const STRING_BLOCK_SIZE: Field = Field::new("StringBlockSize", 32, 4);
    pub const NAME_LENGTH: Field = Field::new("NameLength", 36, 4);

    pub const MAGIC_BYTES: [u8; 4] = *b"GMD\0";

    /// Version written by the supported game release
    pub const VERSION_CURRENT: u32 = 0x0001_0302;

    /// Version used by the previous engine generation
    pub const VERSION_LEGACY: u32 = 0x0001_0201;
}

/// GMD key info record, one per key (32 bytes)
pub mod gmd_key_info {
    use super::Field;

    pub const SIZE: usize = 32;

    pub const STRING_INDEX: Field = Field::new("StringIndex", 0, 4);
    pub const HASH_A: Field = Field::new("HashA", 4, 4);
    pub const HASH_B: Field = Field::new("HashB", 8, 4);
    pub const FILLER: Field = Field::new("Filler", 12, 4);
    pub const KEY_OFFSET: Field = Field::new("KeyOffset", 16, 8);
    pub const BUCKET_LINK: Field = Field::new("BucketLink", 24, 8);

    pub const FILLER_VALUE: u32 = 0xCDCD_CDCD;
}

/// GMD bucket table, present only when the table has keys
pub mod gmd_buckets {
    pub const COUNT: usize = 256;
    pub const SIZE: usize = COUNT * 8;
}
