//! GMD table commands.

use std::path::Path;

use anyhow::{Context, Result};
use hunterfile::{Gmd, GmdDump, GmdOptions, Language};
use tracing::warn;

/// Language named by the file's suffix, when it disagrees with the header
fn suffix_mismatch(file: &Path, gmd: &Gmd) -> Option<Language> {
    let named = Language::from_file_name(file.file_name()?.to_str()?)?;
    (Some(named) != gmd.language()).then_some(named)
}

fn load(file: &Path, options: &GmdOptions) -> Result<Gmd> {
    let gmd = Gmd::load(file, options)
        .with_context(|| format!("Failed to read GMD {}", file.display()))?;
    if let Some(named) = suffix_mismatch(file, &gmd) {
        warn!(
            "{} is named for language {} but its header has language id {}",
            file.display(),
            named,
            gmd.header().language_id
        );
    }
    if !gmd.skipped().is_empty() {
        eprintln!(
            "Skipped {} unreadable entries; they won't be written back",
            gmd.skipped().len()
        );
    }
    Ok(gmd)
}

fn save(gmd: &Gmd, file: &Path) -> Result<()> {
    gmd.save(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    eprintln!("Wrote {} ({} entries)", file.display(), gmd.len());
    Ok(())
}

/// Read a table and write it back unchanged
pub fn rebuild(input: &Path, output: &Path, options: &GmdOptions) -> Result<()> {
    let gmd = load(input, options)?;
    save(&gmd, output)
}

/// Append or insert an entry
pub fn add(
    file: &Path,
    output: Option<&Path>,
    key: &str,
    value: &str,
    at: Option<usize>,
    options: &GmdOptions,
) -> Result<()> {
    let mut gmd = load(file, options)?;
    match at {
        Some(position) => gmd.insert_string(position, key, value)?,
        None => gmd.add_string(key, value)?,
    }
    save(&gmd, output.unwrap_or(file))
}

pub fn remove(file: &Path, output: Option<&Path>, key: &str, options: &GmdOptions) -> Result<()> {
    let mut gmd = load(file, options)?;
    let removed = gmd.remove_string(key)?;
    eprintln!("Removed {} = {:?}", removed.key(), removed.value());
    save(&gmd, output.unwrap_or(file))
}

pub fn set(
    file: &Path,
    output: Option<&Path>,
    key: &str,
    value: &str,
    options: &GmdOptions,
) -> Result<()> {
    let mut gmd = load(file, options)?;
    gmd.set_string(key, value)?;
    save(&gmd, output.unwrap_or(file))
}

/// Export every entry as JSON
pub fn export(file: &Path, output: Option<&Path>, options: &GmdOptions) -> Result<()> {
    let gmd = load(file, options)?;
    let dump = GmdDump::full(&gmd);

    if let Some(output_path) = output {
        dump.save(output_path)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        eprintln!("Exported to: {}", output_path.display());
    } else {
        println!("{}", dump.to_json()?);
    }

    Ok(())
}
