use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::{SaveHeader, SaveSlot};
use crate::binary::layout::{save_data, save_header};
use crate::binary::{ByteReader, ByteWriter};
use crate::config::SaveOptions;
use crate::crypto::{self, SaveCipher, checksum};
use crate::error::{Error, Result};

/// A loaded SAVEDATA file.
///
/// Load path: detect encryption, decrypt, parse the header, the section offsets, the
/// opaque section blob and the three slots. Save path: serialize in the same order,
/// zero-pad to the fixed file length, optionally fix the checksum and encrypt.
#[derive(Clone, PartialEq, Eq)]
pub struct SaveData {
    header: SaveHeader,
    section_offsets: [i64; save_data::SECTION_OFFSET_COUNT],
    sections: Vec<u8>,
    slots: [SaveSlot; save_data::SLOT_COUNT],
}

impl Default for SaveData {
    /// A blank container with three empty slots
    fn default() -> Self {
        Self {
            header: SaveHeader::default(),
            section_offsets: [0; save_data::SECTION_OFFSET_COUNT],
            sections: vec![0u8; save_data::SECTIONS_SIZE],
            slots: std::array::from_fn(|_| SaveSlot::default()),
        }
    }
}

impl SaveData {
    /// Load a SAVEDATA file, decrypting it if needed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading '{}'", path.display());

        let bytes = fs::read(path)?;
        let save = Self::from_bytes(&bytes)?;

        info!("Successfully loaded '{}'", path.display());
        Ok(save)
    }

    /// Parse an encrypted or already decrypted SAVEDATA buffer
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let plain: Cow<[u8]> = if crypto::is_plaintext(bytes) {
            debug!("Input is already decrypted");
            Cow::Borrowed(bytes)
        } else {
            if bytes.is_empty() || bytes.len() % crypto::BLOCK_SIZE != 0 {
                return Err(Error::FormatMismatch(format!(
                    "{} bytes can't be an encrypted SAVEDATA file",
                    bytes.len()
                )));
            }
            debug!("Decrypting {} bytes", bytes.len());
            Cow::Owned(SaveCipher::new()?.plain_from(bytes)?)
        };

        Self::parse_plain(&plain)
    }

    fn parse_plain(plain: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(plain);
        let record = reader.read_array::<{ save_header::SIZE }>().map_err(|_| {
            Error::FormatMismatch(format!(
                "{} bytes is too short for a SAVEDATA header",
                plain.len()
            ))
        })?;
        let header = SaveHeader::from_bytes(&record);

        if !header.has_plain_magic() {
            return Err(Error::FormatMismatch(
                "Decryption failed or this isn't a valid SAVEDATA file".to_string(),
            ));
        }

        match header.data_size {
            save_data::DATA_SIZE => {}
            save_data::LEGACY_DATA_SIZE => {
                return Err(Error::UnsupportedVersion(format!(
                    "data size {} belongs to the pre-expansion SAVEDATA layout, which is not \
                     supported anymore; try an older version of this tool",
                    header.data_size
                )));
            }
            other => {
                return Err(Error::FormatMismatch(format!(
                    "unexpected data size {}, this version can't work with this SAVEDATA",
                    other
                )));
            }
        }

        if plain.len() != save_data::TOTAL_SIZE {
            return Err(Error::FormatMismatch(format!(
                "SAVEDATA must be {} bytes once decrypted (got {})",
                save_data::TOTAL_SIZE,
                plain.len()
            )));
        }

        let mut section_offsets = [0i64; save_data::SECTION_OFFSET_COUNT];
        for offset in section_offsets.iter_mut() {
            *offset = reader.read_i64()?;
        }

        let sections = reader.read_bytes(save_data::SECTIONS_SIZE)?.to_vec();

        let mut slots = Vec::with_capacity(save_data::SLOT_COUNT);
        for index in 0..save_data::SLOT_COUNT {
            let slot = SaveSlot::from_bytes(reader.read_bytes(save_data::SLOT_SIZE)?)?;
            debug!("Slot {}: {:?}", index, slot);
            slots.push(slot);
        }
        let slots: [SaveSlot; save_data::SLOT_COUNT] = slots.try_into().map_err(|_| {
            Error::FormatMismatch(format!(
                "There should be exactly {} save slots",
                save_data::SLOT_COUNT
            ))
        })?;

        Ok(Self {
            header,
            section_offsets,
            sections,
            slots,
        })
    }

    /// Write the file, applying `options`
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        info!("Saving to '{}'", path.display());

        fs::write(path, self.to_bytes(options)?)?;

        info!("Successfully saved to '{}'", path.display());
        Ok(())
    }

    /// Serialize to the exact on-disk length
    pub fn to_bytes(&self, options: &SaveOptions) -> Result<Vec<u8>> {
        let mut bytes = self.to_plain_bytes();

        if options.fix_checksum {
            let window = checksum::fix(&mut bytes)?;
            debug!("Updated checksum window: {:02X?}", window);
        }

        if options.encrypt {
            debug!("Encrypting {} bytes", bytes.len());
            bytes = SaveCipher::new()?.encrypted_from(&bytes)?;
        }

        Ok(bytes)
    }

    fn to_plain_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(save_data::TOTAL_SIZE);

        writer.write_bytes(&self.header.to_bytes());
        for offset in self.section_offsets {
            writer.write_i64(offset);
        }
        writer.write_bytes(&self.sections);
        for slot in &self.slots {
            writer.write_bytes(slot.as_bytes());
        }
        writer.pad_to(save_data::TOTAL_SIZE);

        writer.into_inner()
    }

    /// Whether the stored checksum matches the current contents
    pub fn checksum_valid(&self) -> Result<bool> {
        checksum::verify(&self.to_plain_bytes())
    }

    pub fn header(&self) -> &SaveHeader {
        &self.header
    }

    pub fn account_id(&self) -> i64 {
        self.header.account_id
    }

    pub fn set_account_id(&mut self, account_id: i64) {
        self.header.account_id = account_id;
    }

    pub fn section_offsets(&self) -> &[i64; save_data::SECTION_OFFSET_COUNT] {
        &self.section_offsets
    }

    pub fn slots(&self) -> &[SaveSlot; save_data::SLOT_COUNT] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&SaveSlot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut SaveSlot> {
        self.slots.get_mut(index)
    }

    /// Put `slot` at `index`, returning the slot it replaces
    pub fn replace_slot(&mut self, index: usize, slot: SaveSlot) -> Result<SaveSlot> {
        let target = self
            .slots
            .get_mut(index)
            .ok_or(Error::ValueOutOfRange {
                field: "SlotIndex",
                value: index as i64,
                max: save_data::SLOT_COUNT as i64 - 1,
            })?;
        Ok(std::mem::replace(target, slot))
    }
}

impl fmt::Debug for SaveData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveData")
            .field("header", &self.header)
            .field("section_offsets", &self.section_offsets)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}
