//! Command-line argument parsing for the `vmat` tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::Config;

/// VMAT tools command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "vmat", about = "Export material graphs to VMAT and extract alpha sidecars")]
pub struct CliArgs {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the `vmat` tool.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write one `.vmat` file per material of a scene description.
    Export(ExportArgs),
    /// Write a `_alpha.jpg` sidecar for every image carrying an alpha channel.
    ExtractAlpha(ExtractAlphaArgs),
}

/// Arguments of `vmat export`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ExportArgs {
    /// Scene description (RON) listing materials, node trees and objects.
    pub scene: PathBuf,

    /// Only convert materials of selected mesh objects.
    #[arg(long)]
    pub only_selected: bool,

    /// Folder to save VMAT files.
    #[arg(long)]
    pub output_folder: Option<PathBuf>,

    /// Derive the translucency texture from the base color's alpha sidecar.
    #[arg(long)]
    pub translucency_from_color_alpha: bool,
}

/// Arguments of `vmat extract-alpha`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ExtractAlphaArgs {
    /// Directory scanned for images.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory receiving alpha images.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Boolean flags only ever switch a setting on; leaving a flag out keeps
    /// whatever `config.ron` says.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        match &args.command {
            Command::Export(export) => {
                if export.only_selected {
                    self.export.only_selected = true;
                }
                if export.translucency_from_color_alpha {
                    self.export.translucency_from_color_alpha = true;
                }
                if let Some(ref folder) = export.output_folder {
                    self.export.output_folder = folder.clone();
                }
            }
            Command::ExtractAlpha(extract) => {
                if let Some(ref input) = extract.input {
                    self.alpha.input_dir = input.clone();
                }
                if let Some(ref output) = extract.output {
                    self.alpha.output_dir = output.clone();
                }
            }
        }
    }
}
