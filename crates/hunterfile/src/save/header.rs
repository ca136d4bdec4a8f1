use crate::binary::layout::{save_data, save_header};

/// SAVEDATA file header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveHeader {
    pub magic: [u8; 4],
    pub reserved0: u32,
    pub reserved1: u32,
    /// Lane-swapped SHA-1 of everything after the header
    pub checksum: [u8; 20],
    /// Length of everything after the header
    pub data_size: i64,
    /// Steam account id of the owner
    pub account_id: i64,
    pub reserved2: [u8; 16],
}

impl Default for SaveHeader {
    fn default() -> Self {
        Self {
            magic: save_header::PLAIN_MAGIC,
            reserved0: 0,
            reserved1: 0,
            checksum: [0; 20],
            data_size: save_data::DATA_SIZE,
            account_id: 0,
            reserved2: [0; 16],
        }
    }
}

impl SaveHeader {
    pub fn from_bytes(record: &[u8; save_header::SIZE]) -> Self {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(save_header::MAGIC.bytes(record));
        let mut checksum = [0u8; 20];
        checksum.copy_from_slice(save_header::CHECKSUM.bytes(record));
        let mut reserved2 = [0u8; 16];
        reserved2.copy_from_slice(save_header::RESERVED_2.bytes(record));

        Self {
            magic,
            reserved0: save_header::RESERVED_0.read_u32(record),
            reserved1: save_header::RESERVED_1.read_u32(record),
            checksum,
            data_size: save_header::DATA_SIZE.read_i64(record),
            account_id: save_header::ACCOUNT_ID.read_i64(record),
            reserved2,
        }
    }

    pub fn to_bytes(&self) -> [u8; save_header::SIZE] {
        let mut record = [0u8; save_header::SIZE];
        save_header::MAGIC
            .bytes_mut(&mut record)
            .copy_from_slice(&self.magic);
        save_header::RESERVED_0.write_u32(&mut record, self.reserved0);
        save_header::RESERVED_1.write_u32(&mut record, self.reserved1);
        save_header::CHECKSUM
            .bytes_mut(&mut record)
            .copy_from_slice(&self.checksum);
        save_header::DATA_SIZE.write_i64(&mut record, self.data_size);
        save_header::ACCOUNT_ID.write_i64(&mut record, self.account_id);
        save_header::RESERVED_2
            .bytes_mut(&mut record)
            .copy_from_slice(&self.reserved2);
        record
    }

    pub fn has_plain_magic(&self) -> bool {
        self.magic == save_header::PLAIN_MAGIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_record_roundtrip_preserves_reserved_fields() {
        let mut record = [0u8; save_header::SIZE];
        for (i, byte) in record.iter_mut().enumerate() {
            *byte = i as u8;
        }
        let header = SaveHeader::from_bytes(&record);
        assert_eq!(header.magic, [0, 1, 2, 3]);
        assert_eq!(header.reserved0, u32::from_le_bytes([4, 5, 6, 7]));
        assert_eq!(header.checksum[0], 12);
        assert_eq!(header.reserved2[15], 63);
        assert_eq!(header.to_bytes(), record);
    }

    #[test]
    fn test_default_header() {
        let header = SaveHeader::default();
        assert!(header.has_plain_magic());
        assert_eq!(header.data_size, save_data::DATA_SIZE);
        let record = header.to_bytes();
        assert_eq!(record[..4], [1, 0, 0, 0]);
        assert_eq!(
            save_header::DATA_SIZE.read_i64(&record),
            save_data::DATA_SIZE
        );
    }
}
