use serde::Serialize;

use super::Language;
use crate::binary::layout::gmd_header;

/// GMD file header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GmdHeader {
    pub version: u32,
    /// Raw language id; see [`GmdHeader::language`]
    pub language_id: u32,
    pub reserved: u64,
    pub key_count: u32,
    pub string_count: u32,
    pub key_block_size: u32,
    pub string_block_size: u32,
    /// Table name length, excluding its terminator
    pub name_length: u32,
}

impl GmdHeader {
    pub fn from_bytes(record: &[u8; gmd_header::SIZE]) -> Self {
        Self {
            version: gmd_header::VERSION.read_u32(record),
            language_id: gmd_header::LANGUAGE.read_u32(record),
            reserved: gmd_header::RESERVED.read_u64(record),
            key_count: gmd_header::KEY_COUNT.read_u32(record),
            string_count: gmd_header::STRING_COUNT.read_u32(record),
            key_block_size: gmd_header::KEY_BLOCK_SIZE.read_u32(record),
            string_block_size: gmd_header::STRING_BLOCK_SIZE.read_u32(record),
            name_length: gmd_header::NAME_LENGTH.read_u32(record),
        }
    }

    pub fn to_bytes(&self) -> [u8; gmd_header::SIZE] {
        let mut record = [0u8; gmd_header::SIZE];
        gmd_header::MAGIC
            .bytes_mut(&mut record)
            .copy_from_slice(&gmd_header::MAGIC_BYTES);
        gmd_header::VERSION.write_u32(&mut record, self.version);
        gmd_header::LANGUAGE.write_u32(&mut record, self.language_id);
        gmd_header::RESERVED.write_u64(&mut record, self.reserved);
        gmd_header::KEY_COUNT.write_u32(&mut record, self.key_count);
        gmd_header::STRING_COUNT.write_u32(&mut record, self.string_count);
        gmd_header::KEY_BLOCK_SIZE.write_u32(&mut record, self.key_block_size);
        gmd_header::STRING_BLOCK_SIZE.write_u32(&mut record, self.string_block_size);
        gmd_header::NAME_LENGTH.write_u32(&mut record, self.name_length);
        record
    }

    pub fn language(&self) -> Option<Language> {
        Language::from_u32(self.language_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_record_layout() {
        let header = GmdHeader {
            version: gmd_header::VERSION_CURRENT,
            language_id: 1,
            reserved: 0,
            key_count: 2,
            string_count: 2,
            key_block_size: 10,
            string_block_size: 20,
            name_length: 5,
        };
        let record = header.to_bytes();

        assert_eq!(&record[..4], b"GMD\0");
        assert_eq!(record[4..8], [0x02, 0x03, 0x01, 0x00]);
        assert_eq!(record[20..24], [2, 0, 0, 0]);
        assert_eq!(record[36..40], [5, 0, 0, 0]);
        assert_eq!(GmdHeader::from_bytes(&record), header);
        assert_eq!(header.language(), Some(Language::English));
    }
}
