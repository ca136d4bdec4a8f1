//! SAVEDATA commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use hunterfile::{SaveData, SaveOptions};

use crate::cli::SaveEditArgs;

fn load(file: &Path) -> Result<SaveData> {
    SaveData::load(file).with_context(|| format!("Failed to read SAVEDATA {}", file.display()))
}

fn save(data: &SaveData, file: &Path, options: &SaveOptions) -> Result<()> {
    data.save(file, options)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    eprintln!(
        "Wrote {} ({})",
        file.display(),
        if options.encrypt { "encrypted" } else { "decrypted" }
    );
    Ok(())
}

/// Write the plaintext of a save, leaving the stored checksum untouched
pub fn decrypt(input: &Path, output: &Path) -> Result<()> {
    let data = load(input)?;
    let options = SaveOptions::builder()
        .encrypt(false)
        .fix_checksum(false)
        .build();
    save(&data, output, &options)
}

pub fn encrypt(input: &Path, output: &Path, options: &SaveOptions) -> Result<()> {
    if !is_decrypted(input)? {
        eprintln!("{} is already encrypted", input.display());
    }
    let data = load(input)?;
    save(&data, output, options)
}

/// Apply every field given on the command line to one slot
pub fn edit(args: &SaveEditArgs, options: &SaveOptions) -> Result<()> {
    let mut data = load(&args.file)?;

    if let Some(account_id) = args.account_id {
        data.set_account_id(account_id);
    }

    let slot = data
        .slot_mut(args.slot)
        .ok_or_else(|| anyhow!("Slot {} doesn't exist (0-2)", args.slot))?;

    if let Some(name) = &args.hunter_name {
        slot.set_hunter_name(name)?;
    }
    if let Some(name) = &args.palico_name {
        slot.set_palico_name(name)?;
    }
    if let Some(rank) = args.hunter_rank {
        slot.set_hunter_rank(rank)?;
    }
    if let Some(rank) = args.master_rank {
        slot.set_master_rank(rank)?;
    }
    if let Some(zenny) = args.zenny {
        slot.set_zenny(zenny);
    }
    if let Some(points) = args.research_points {
        slot.set_research_points(points);
    }
    if let Some(xp) = args.hunter_xp {
        slot.set_hunter_xp(xp);
    }
    if let Some(xp) = args.master_xp {
        slot.set_master_xp(xp);
    }
    if let Some(seconds) = args.play_time {
        slot.set_play_time(seconds);
    }

    save(&data, args.output.as_deref().unwrap_or(&args.file), options)
}

/// True when `file` holds a decrypted save
pub fn is_decrypted(file: &Path) -> Result<bool> {
    let bytes = fs::read(file)?;
    Ok(hunterfile::crypto::is_plaintext(&bytes))
}
