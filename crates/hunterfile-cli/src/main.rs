mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GmdCommand, SaveCommand};
use crate::config::Config;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for JSON and exports
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("hunterfile=info".parse()?))
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        match Config::load(&cli.config) {
            Ok(c) => {
                info!("Loaded config from {:?}", cli.config);
                c
            }
            Err(e) => {
                warn!("Failed to load config: {:#}, using defaults", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    match cli.command {
        Command::Info {
            file,
            json,
            entries,
            read,
        } => commands::info::run(&file, json, entries, &config.gmd_options(&read)?),
        Command::Gmd(command) => run_gmd(command, &config),
        Command::Save(command) => run_save(command, &config),
        Command::Hexdump {
            file,
            offset,
            size,
            ascii,
            decrypt,
        } => {
            let offset = commands::hex_utils::parse_hex_offset(&offset)?;
            commands::hexdump::run(&file, offset, size, ascii, decrypt)
        }
    }
}

fn run_gmd(command: GmdCommand, config: &Config) -> Result<()> {
    match command {
        GmdCommand::Rebuild {
            input,
            output,
            read,
        } => commands::gmd::rebuild(&input, &output, &config.gmd_options(&read)?),
        GmdCommand::Add {
            file,
            key,
            value,
            at,
            output,
            read,
        } => commands::gmd::add(
            &file,
            output.as_deref(),
            &key,
            &value,
            at,
            &config.gmd_options(&read)?,
        ),
        GmdCommand::Remove {
            file,
            key,
            output,
            read,
        } => commands::gmd::remove(&file, output.as_deref(), &key, &config.gmd_options(&read)?),
        GmdCommand::Set {
            file,
            key,
            value,
            output,
            read,
        } => commands::gmd::set(
            &file,
            output.as_deref(),
            &key,
            &value,
            &config.gmd_options(&read)?,
        ),
        GmdCommand::Export { file, output, read } => {
            commands::gmd::export(&file, output.as_deref(), &config.gmd_options(&read)?)
        }
    }
}

fn run_save(command: SaveCommand, config: &Config) -> Result<()> {
    match command {
        SaveCommand::Decrypt { input, output } => commands::save::decrypt(&input, &output),
        SaveCommand::Encrypt {
            input,
            output,
            no_checksum,
        } => {
            let options = hunterfile::SaveOptions::builder()
                .encrypt(true)
                .fix_checksum(config.save.fix_checksum && !no_checksum)
                .build();
            commands::save::encrypt(&input, &output, &options)
        }
        SaveCommand::Edit(args) => {
            let options = hunterfile::SaveOptions::builder()
                .encrypt(config.save.encrypt && !args.no_encrypt)
                .fix_checksum(config.save.fix_checksum)
                .build();
            commands::save::edit(&args, &options)
        }
    }
}
