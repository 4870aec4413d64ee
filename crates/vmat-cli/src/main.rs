//! The `vmat` binary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `vmat export scene.ron --output-folder out` to write VMAT files, or
//! `vmat extract-alpha --input textures` to write alpha sidecars.

use std::process::ExitCode;

use clap::Parser;
use vmat_cli::platform::PlatformDirs;
use vmat_config::{CliArgs, Config};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(config_dir) => PlatformDirs::with_config_dir(config_dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve config directory: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create config directories: {e}");
        return ExitCode::FAILURE;
    }

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    vmat_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match vmat_cli::run(&args.command, &config) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("vmat: {e}");
            ExitCode::FAILURE
        }
    }
}
