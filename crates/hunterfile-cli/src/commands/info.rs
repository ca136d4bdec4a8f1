//! Info command: detect a file's type and summarize it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use hunterfile::{FileKind, Gmd, GmdDump, GmdOptions, SaveData, SaveDump};
use owo_colors::OwoColorize;

/// Run the info command
pub fn run(file: &Path, json: bool, entries: bool, options: &GmdOptions) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    match FileKind::detect(&bytes) {
        FileKind::Gmd => {
            let gmd = Gmd::from_bytes(&bytes, options)
                .with_context(|| format!("Failed to parse GMD {}", file.display()))?;
            let dump = if entries {
                GmdDump::full(&gmd)
            } else {
                GmdDump::summary(&gmd)
            };
            if json {
                println!("{}", dump.to_json()?);
            } else {
                print_gmd(&dump);
            }
        }
        FileKind::SaveData => {
            let save = SaveData::from_bytes(&bytes)
                .with_context(|| format!("Failed to parse SAVEDATA {}", file.display()))?;
            let dump = SaveDump::from_save(&save)?;
            if json {
                println!("{}", dump.to_json()?);
            } else {
                print_save(&dump);
            }
        }
        FileKind::Unknown => bail!("{} is neither a GMD nor a SAVEDATA file", file.display()),
    }

    Ok(())
}

fn print_gmd(dump: &GmdDump<'_>) {
    println!("{} {}", "GMD".bold().cyan(), dump.name.bold());
    println!("  Version:      {}", dump.version);
    println!(
        "  Language:     {} ({})",
        dump.language.unwrap_or("unknown"),
        dump.header.language_id
    );
    println!("  Keys:         {}", dump.header.key_count);
    println!("  Strings:      {}", dump.header.string_count);
    println!("  Key block:    {} bytes", dump.header.key_block_size);
    println!("  String block: {} bytes", dump.header.string_block_size);

    if !dump.skipped.is_empty() {
        println!(
            "  {}",
            format!("Skipped {} unreadable entries:", dump.skipped.len()).yellow()
        );
        for skipped in dump.skipped {
            println!(
                "    #{} {}: {}",
                skipped.index,
                skipped.key.as_deref().unwrap_or("(no key)"),
                skipped.reason
            );
        }
    }

    if let Some(entries) = dump.entries {
        println!();
        for entry in entries {
            println!("{} = {}", entry.key().green(), entry.value());
        }
    }
}

fn print_save(dump: &SaveDump) {
    println!("{}", "SAVEDATA".bold().cyan());
    println!("  Account id: {}", dump.account_id);
    let status = if dump.checksum_valid {
        "valid".green().to_string()
    } else {
        "invalid".red().to_string()
    };
    println!("  Checksum:   {} ({})", dump.checksum, status);

    for slot in &dump.slots {
        if slot.empty {
            println!("  Slot {}: {}", slot.index, "(empty)".dimmed());
            continue;
        }
        println!("  Slot {}: {}", slot.index, slot.hunter_name.bold());
        println!("    Palico:          {}", slot.palico_name);
        println!("    Hunter rank:     {}", slot.hunter_rank);
        println!("    Master rank:     {}", slot.master_rank);
        println!("    Zenny:           {}", slot.zenny);
        println!("    Research points: {}", slot.research_points);
        println!(
            "    Play time:       {}h {:02}m",
            slot.play_time_secs / 3600,
            slot.play_time_secs % 3600 / 60
        );
    }
}
