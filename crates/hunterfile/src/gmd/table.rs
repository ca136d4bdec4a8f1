use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::encoding::TextEncoding;
use super::entry::GmdEntry;
use super::header::GmdHeader;
use super::index::{KeyIndex, KeyRecord};
use super::language::Language;
use crate::binary::layout::{gmd_buckets, gmd_header, gmd_key_info};
use crate::binary::{ByteReader, ByteWriter, split_cstrs};
use crate::config::{GmdOptions, InvalidEntryPolicy};
use crate::error::{Error, Result};

/// An entry dropped while reading under [`InvalidEntryPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Key index, or string index for strings no key refers to
    pub index: usize,
    pub key: Option<String>,
    pub reason: String,
}

/// A GMD text table.
///
/// Entries keep the order they had in the file; that order matters to the game.
/// Counts, block sizes, key offsets and string indices are recomputed on every
/// write. Hashes and bucket chains read from the file are written back as they were
/// until a key is added or removed, after which they are rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gmd {
    version: u32,
    language_id: u32,
    reserved: u64,
    name: String,
    entries: Vec<GmdEntry>,
    /// Lookup data from the file, valid while the key list is unchanged
    stored_index: Option<KeyIndex>,
    skipped: Vec<SkippedEntry>,
}

/// Raw key info record as read from the file
struct KeyInfo {
    string_index: u32,
    record: KeyRecord,
    key_offset: u64,
}

impl Gmd {
    /// Empty table
    pub fn new(name: &str, language: Language) -> Self {
        Self {
            version: gmd_header::VERSION_CURRENT,
            language_id: language as u32,
            reserved: 0,
            name: name.to_string(),
            entries: Vec::new(),
            stored_index: None,
            skipped: Vec::new(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P, options: &GmdOptions) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading '{}'", path.display());

        let bytes = fs::read(path)?;
        let gmd = Self::from_bytes(&bytes, options)?;

        info!(
            "Successfully loaded '{}' ({} entries)",
            path.display(),
            gmd.len()
        );
        Ok(gmd)
    }

    pub fn from_bytes(bytes: &[u8], options: &GmdOptions) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);

        let record = reader.read_array::<{ gmd_header::SIZE }>().map_err(|_| {
            Error::FormatMismatch(format!(
                "{} bytes is too short for a GMD header",
                bytes.len()
            ))
        })?;
        if gmd_header::MAGIC.bytes(&record) != gmd_header::MAGIC_BYTES {
            return Err(Error::FormatMismatch(
                "This isn't a valid GMD file (bad magic)".to_string(),
            ));
        }

        let header = GmdHeader::from_bytes(&record);
        match header.version {
            gmd_header::VERSION_CURRENT => {}
            gmd_header::VERSION_LEGACY => {
                return Err(Error::UnsupportedVersion(format!(
                    "GMD version {:#010x} belongs to the previous engine generation and is \
                     not supported",
                    header.version
                )));
            }
            other => {
                return Err(Error::FormatMismatch(format!(
                    "unknown GMD version {:#010x}",
                    other
                )));
            }
        }

        let name_raw = reader.read_bytes(header.name_length as usize)?;
        if reader.read_bytes(1)? != [0] {
            return Err(Error::FormatMismatch(
                "table name is not NUL-terminated".to_string(),
            ));
        }
        let name = String::from_utf8(name_raw.to_vec())
            .map_err(|_| Error::FormatMismatch("table name is not valid UTF-8".to_string()))?;

        let info_table_size = (header.key_count as usize).checked_mul(gmd_key_info::SIZE);
        if info_table_size.is_none_or(|size| size > reader.remaining()) {
            return Err(Error::FormatMismatch(format!(
                "{} keys don't fit in the {} bytes left after the name",
                header.key_count,
                reader.remaining()
            )));
        }
        if header.string_count > header.string_block_size {
            return Err(Error::FormatMismatch(format!(
                "{} strings can't fit in a {} byte string block",
                header.string_count, header.string_block_size
            )));
        }

        let mut infos = Vec::with_capacity(header.key_count as usize);
        for _ in 0..header.key_count {
            let record = reader.read_array::<{ gmd_key_info::SIZE }>()?;
            infos.push(KeyInfo {
                string_index: gmd_key_info::STRING_INDEX.read_u32(&record),
                record: KeyRecord {
                    hash_a: gmd_key_info::HASH_A.read_u32(&record),
                    hash_b: gmd_key_info::HASH_B.read_u32(&record),
                    filler: gmd_key_info::FILLER.read_u32(&record),
                    link: gmd_key_info::BUCKET_LINK.read_u64(&record),
                },
                key_offset: gmd_key_info::KEY_OFFSET.read_u64(&record),
            });
        }

        let mut buckets = Vec::new();
        if header.key_count > 0 {
            buckets.reserve(gmd_buckets::COUNT);
            for _ in 0..gmd_buckets::COUNT {
                buckets.push(reader.read_u64()?);
            }
        }

        let key_block = reader.read_bytes(header.key_block_size as usize)?;
        let string_block = reader.read_bytes(header.string_block_size as usize)?;
        if !reader.is_empty() {
            return Err(Error::FormatMismatch(format!(
                "{} unexpected bytes after the string block",
                reader.remaining()
            )));
        }

        let strings = split_cstrs(string_block, header.string_count as usize).ok_or_else(|| {
            Error::FormatMismatch(format!(
                "string block doesn't hold exactly {} strings",
                header.string_count
            ))
        })?;

        let encoding = options
            .encoding
            .unwrap_or_else(|| TextEncoding::for_language(header.language()));
        debug!(
            "GMD '{}': {} keys, {} strings, language {}, encoding {}",
            name, header.key_count, header.string_count, header.language_id, encoding
        );

        let mut skipped = Vec::new();
        let mut reject = |index: usize, key: Option<&str>, reason: String| -> Result<()> {
            match options.invalid_entries {
                InvalidEntryPolicy::Strict => Err(Error::MalformedEntry {
                    index,
                    message: match key {
                        Some(key) => format!("{} ({})", reason, key),
                        None => reason,
                    },
                }),
                InvalidEntryPolicy::Skip => {
                    warn!("Skipping entry {} ({:?}): {}", index, key, reason);
                    skipped.push(SkippedEntry {
                        index,
                        key: key.map(str::to_string),
                        reason,
                    });
                    Ok(())
                }
            }
        };

        let keys = read_keys(key_block, &infos)?;
        let mut seen = HashSet::with_capacity(keys.len());
        let mut used = vec![false; strings.len()];
        let mut entries = Vec::with_capacity(infos.len());
        for (index, (info, key)) in infos.iter().zip(&keys).enumerate() {
            let string_index = info.string_index as usize;
            let Some(raw) = strings.get(string_index) else {
                reject(
                    index,
                    Some(key.as_str()),
                    format!("string index {} is out of range", string_index),
                )?;
                continue;
            };
            if std::mem::replace(&mut used[string_index], true) {
                reject(
                    index,
                    Some(key.as_str()),
                    format!("string {} is already used by another key", string_index),
                )?;
                continue;
            }
            if !seen.insert(key.as_str()) {
                reject(
                    index,
                    Some(key.as_str()),
                    "key appears more than once".to_string(),
                )?;
                continue;
            }

            match encoding.decode(raw) {
                Some((value, used_encoding)) => {
                    entries.push(GmdEntry::from_raw(key.clone(), value, used_encoding, raw));
                }
                None => reject(
                    index,
                    Some(key.as_str()),
                    format!("string {} is not valid {}", string_index, encoding),
                )?,
            }
        }

        for (string_index, _) in used.iter().enumerate().filter(|(_, used)| !**used) {
            reject(string_index, None, "string has no key".to_string())?;
        }

        // Dropped entries shift indices, so stored chains would point at the wrong keys
        let stored_index = skipped.is_empty().then(|| KeyIndex {
            records: infos.iter().map(|info| info.record).collect(),
            buckets,
        });

        Ok(Self {
            version: header.version,
            language_id: header.language_id,
            reserved: header.reserved,
            name,
            entries,
            stored_index,
            skipped,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        info!("Saving to '{}'", path.display());

        fs::write(path, self.to_bytes())?;

        info!("Successfully saved to '{}'", path.display());
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let header = self.header();
        let index = match &self.stored_index {
            Some(index) => index.clone(),
            None => KeyIndex::build(self.entries.iter().map(GmdEntry::key)),
        };

        let mut writer = ByteWriter::with_capacity(
            gmd_header::SIZE
                + self.name.len()
                + 1
                + self.entries.len() * gmd_key_info::SIZE
                + gmd_buckets::SIZE
                + header.key_block_size as usize
                + header.string_block_size as usize,
        );

        writer.write_bytes(&header.to_bytes());
        writer.write_cstr(self.name.as_bytes());

        let mut key_offset = 0u64;
        for (string_index, (entry, record)) in
            self.entries.iter().zip(&index.records).enumerate()
        {
            let mut info = [0u8; gmd_key_info::SIZE];
            gmd_key_info::STRING_INDEX.write_u32(&mut info, string_index as u32);
            gmd_key_info::HASH_A.write_u32(&mut info, record.hash_a);
            gmd_key_info::HASH_B.write_u32(&mut info, record.hash_b);
            gmd_key_info::FILLER.write_u32(&mut info, record.filler);
            gmd_key_info::KEY_OFFSET.write_u64(&mut info, key_offset);
            gmd_key_info::BUCKET_LINK.write_u64(&mut info, record.link);
            writer.write_bytes(&info);
            key_offset += entry.key_size() as u64;
        }

        for bucket in &index.buckets {
            writer.write_u64(*bucket);
        }

        for entry in &self.entries {
            writer.write_cstr(entry.key().as_bytes());
        }
        for entry in &self.entries {
            writer.write_cstr(entry.encoded_value());
        }

        writer.into_inner()
    }

    /// Header as it would be written now
    pub fn header(&self) -> GmdHeader {
        let count = self.entries.len() as u32;
        GmdHeader {
            version: self.version,
            language_id: self.language_id,
            reserved: self.reserved,
            key_count: count,
            string_count: count,
            key_block_size: self.entries.iter().map(GmdEntry::key_size).sum::<usize>() as u32,
            string_block_size: self
                .entries
                .iter()
                .map(GmdEntry::value_size)
                .sum::<usize>() as u32,
            name_length: self.name.len() as u32,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Option<Language> {
        Language::from_u32(self.language_id)
    }

    pub fn entries(&self) -> &[GmdEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dropped while reading; they won't be written back
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).map(GmdEntry::value)
    }

    pub fn entry(&self, key: &str) -> Option<&GmdEntry> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Append a new entry.
    ///
    /// The game can depend on entry order, so an appended entry isn't always shown
    /// where a hand-made file would put it; see [`Gmd::insert_string`].
    pub fn add_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert_string(self.entries.len(), key, value)
    }

    /// Insert a new entry before `position` (clamped to the end of the table)
    pub fn insert_string(&mut self, position: usize, key: &str, value: &str) -> Result<()> {
        if self.contains_key(key) {
            return Err(Error::DuplicateKey(key.to_string()));
        }
        let entry = GmdEntry::new(key, value)?;
        let position = position.min(self.entries.len());
        self.entries.insert(position, entry);
        self.stored_index = None;
        debug!("Inserted '{}' at {}", key, position);
        Ok(())
    }

    /// Remove an entry, keeping the order of the others. Removing a key that isn't
    /// there is an error rather than a no-op.
    pub fn remove_string(&mut self, key: &str) -> Result<GmdEntry> {
        let position = self
            .position(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        self.stored_index = None;
        debug!("Removed '{}' from {}", key, position);
        Ok(self.entries.remove(position))
    }

    /// Replace the value of an existing entry
    pub fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        let position = self
            .position(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        self.entries[position].set_value(value)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == key)
    }
}

/// Read the keys in table order. Each key must start where the previous one ended
/// and together they must fill the key block, so a rebuild reproduces it exactly.
fn read_keys(key_block: &[u8], infos: &[KeyInfo]) -> Result<Vec<String>> {
    let mut keys = Vec::with_capacity(infos.len());
    let mut offset = 0usize;
    for (index, info) in infos.iter().enumerate() {
        if info.key_offset != offset as u64 {
            return Err(Error::FormatMismatch(format!(
                "key {} starts at offset {} instead of {}",
                index, info.key_offset, offset
            )));
        }
        let rest = &key_block[offset..];
        let len = memchr::memchr(0, rest).ok_or_else(|| {
            Error::FormatMismatch(format!("key {} runs past the end of the key block", index))
        })?;
        let key = String::from_utf8(rest[..len].to_vec()).map_err(|_| Error::MalformedEntry {
            index,
            message: format!("key at offset {} is not valid UTF-8", offset),
        })?;
        offset += len + 1;
        keys.push(key);
    }

    if offset != key_block.len() {
        return Err(Error::FormatMismatch(format!(
            "{} unused bytes at the end of the key block",
            key_block.len() - offset
        )));
    }
    Ok(keys)
}
