//! Hexdump command implementation.
//!
//! Displays file bytes in traditional hexdump format, useful for locating fields
//! in decrypted saves and GMD tables.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use hunterfile::{SaveData, SaveOptions};

use super::hex_utils::format_line;

/// Run the hexdump command
pub fn run(file: &Path, offset: usize, size: usize, ascii: bool, decrypt: bool) -> Result<()> {
    let bytes = if decrypt {
        let save = SaveData::load(file)
            .with_context(|| format!("Failed to read SAVEDATA {}", file.display()))?;
        save.to_bytes(&SaveOptions::builder().encrypt(false).fix_checksum(false).build())?
    } else {
        fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?
    };

    if offset >= bytes.len() {
        bail!(
            "Offset 0x{:X} is past the end of the data ({} bytes)",
            offset,
            bytes.len()
        );
    }
    let end = offset.saturating_add(size).min(bytes.len());

    println!("Hexdump at 0x{:X} ({} bytes):", offset, end - offset);
    println!();

    for (i, chunk) in bytes[offset..end].chunks(16).enumerate() {
        println!("{}", format_line(offset + i * 16, chunk, ascii));
    }

    Ok(())
}
