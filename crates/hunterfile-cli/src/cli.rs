use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hunterfile")]
#[command(about = "Inspect and edit GMD string tables and SAVEDATA files")]
#[command(version)]
pub struct Cli {
    /// Config file with default options
    #[arg(short, long, default_value = "hunterfile.toml", env = "HUNTERFILE_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Detect a file's type and print a summary
    Info {
        file: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Include every GMD entry
        #[arg(long)]
        entries: bool,
        #[command(flatten)]
        read: GmdReadArgs,
    },
    /// Edit GMD string tables
    #[command(subcommand)]
    Gmd(GmdCommand),
    /// Decrypt, encrypt and edit SAVEDATA files
    #[command(subcommand)]
    Save(SaveCommand),
    /// Display file bytes in hexdump format
    Hexdump {
        file: PathBuf,
        /// Start offset (hex, with or without 0x)
        #[arg(short, long, default_value = "0")]
        offset: String,
        /// Number of bytes to show
        #[arg(short, long, default_value = "256")]
        size: usize,
        /// Show ASCII column
        #[arg(short, long)]
        ascii: bool,
        /// Decrypt a SAVEDATA file before dumping
        #[arg(short, long)]
        decrypt: bool,
    },
}

/// Options for reading GMD files
#[derive(Args, Debug, Clone, Default)]
pub struct GmdReadArgs {
    /// Drop unreadable entries instead of failing
    #[arg(long)]
    pub skip_invalid: bool,
    /// Text encoding, e.g. "utf-8" or "utf-8+windows-1256"
    #[arg(long)]
    pub encoding: Option<String>,
}

#[derive(Subcommand)]
pub enum GmdCommand {
    /// Read a table and write it back
    Rebuild {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        read: GmdReadArgs,
    },
    /// Add a new entry
    Add {
        file: PathBuf,
        key: String,
        value: String,
        /// Insert before this entry index instead of appending
        #[arg(long)]
        at: Option<usize>,
        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        read: GmdReadArgs,
    },
    /// Remove an entry
    Remove {
        file: PathBuf,
        key: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        read: GmdReadArgs,
    },
    /// Replace the value of an entry
    Set {
        file: PathBuf,
        key: String,
        value: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        read: GmdReadArgs,
    },
    /// Export entries as JSON
    Export {
        file: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        read: GmdReadArgs,
    },
}

#[derive(Subcommand)]
pub enum SaveCommand {
    /// Write the decrypted file
    Decrypt { input: PathBuf, output: PathBuf },
    /// Encrypt a decrypted file, fixing its checksum
    Encrypt {
        input: PathBuf,
        output: PathBuf,
        /// Keep the stored checksum as it is
        #[arg(long)]
        no_checksum: bool,
    },
    /// Change values in one character slot
    Edit(SaveEditArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SaveEditArgs {
    pub file: PathBuf,
    /// Slot index (0-2)
    #[arg(long, default_value_t = 0)]
    pub slot: usize,
    /// Write here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Write the result decrypted
    #[arg(long)]
    pub no_encrypt: bool,
    #[arg(long)]
    pub hunter_name: Option<String>,
    #[arg(long)]
    pub palico_name: Option<String>,
    #[arg(long)]
    pub hunter_rank: Option<i32>,
    #[arg(long)]
    pub master_rank: Option<i32>,
    #[arg(long)]
    pub zenny: Option<i32>,
    #[arg(long)]
    pub research_points: Option<i32>,
    #[arg(long)]
    pub hunter_xp: Option<i32>,
    #[arg(long)]
    pub master_xp: Option<i32>,
    /// Play time in seconds
    #[arg(long)]
    pub play_time: Option<i32>,
    #[arg(long)]
    pub account_id: Option<i64>,
}
