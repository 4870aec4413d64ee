//! Configuration for the VMAT tools.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Every section is explicit data threaded into the exporter
//! and the alpha extractor; nothing here is global.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, Command, ExportArgs, ExtractAlphaArgs};
pub use config::{AlphaConfig, AlphaNaming, Config, DebugConfig, ExportConfig, desktop_dir};
pub use error::ConfigError;
