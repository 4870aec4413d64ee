//! Command dispatch for the `vmat` binary.
//!
//! Keeps `main` down to argument parsing, config loading and logging setup so
//! the commands themselves can be driven from tests.

pub mod platform;

use std::fmt;

use thiserror::Error;
use tracing::info;
use vmat_alpha::{AlphaError, AlphaExtractor, AlphaReport};
use vmat_config::{Command, Config};
use vmat_materials::{ExportError, ExportReport, ExportSettings, Scene, SceneError, export_scene};

/// Any failure that aborts a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The scene description could not be loaded.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Writing VMAT files failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Alpha extraction failed.
    #[error(transparent)]
    Alpha(#[from] AlphaError),
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    /// Result of `vmat export`.
    Export(ExportReport),
    /// Result of `vmat extract-alpha`.
    ExtractAlpha(AlphaReport),
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Export(report) => write!(
                f,
                "Converted {} material(s) to VMAT, skipped {}",
                report.written.len(),
                report.skipped.len()
            ),
            Self::ExtractAlpha(report) => write!(
                f,
                "Extracted {} alpha channel(s), skipped {} image(s) without alpha",
                report.written.len(),
                report.skipped.len()
            ),
        }
    }
}

/// Run `command` with `config` (CLI overrides already applied).
pub fn run(command: &Command, config: &Config) -> Result<RunSummary, CliError> {
    match command {
        Command::Export(args) => {
            info!("Loading scene: {}", args.scene.display());
            let scene = Scene::from_ron(&args.scene)?;
            let report = export_scene(&scene, &ExportSettings::from(config))?;
            Ok(RunSummary::Export(report))
        }
        Command::ExtractAlpha(_) => {
            let report = AlphaExtractor::new(config.alpha.clone()).run()?;
            Ok(RunSummary::ExtractAlpha(report))
        }
    }
}
