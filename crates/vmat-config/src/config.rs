//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Folder name used for exported materials when nothing else is configured.
const DEFAULT_EXPORT_FOLDER: &str = "cool_mats";

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Material exporter settings.
    pub export: ExportConfig,
    /// Alpha extractor settings.
    pub alpha: AlphaConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Material exporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Only convert materials used by selected mesh objects.
    pub only_selected: bool,
    /// Folder receiving one `<material>.vmat` per converted material.
    pub output_folder: PathBuf,
    /// Point an unconnected translucency slot at the alpha sidecar of the
    /// base color texture, named with [`AlphaConfig::naming`].
    pub translucency_from_color_alpha: bool,
}

/// Alpha extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlphaConfig {
    /// Directory scanned (non-recursively) for images.
    pub input_dir: PathBuf,
    /// Directory receiving the extracted alpha images.
    pub output_dir: PathBuf,
    /// File extensions considered images, compared case-insensitively.
    pub extensions: Vec<String>,
    /// How sidecar files are named.
    pub naming: AlphaNaming,
}

/// Naming convention shared by the alpha extractor and the exporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AlphaNaming {
    /// Appended to the source file stem.
    pub suffix: String,
    /// Extension of the written file, without the dot.
    pub extension: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

/// The user's desktop, or `~/Desktop` when the OS does not report one.
pub fn desktop_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl AlphaNaming {
    /// File name of the sidecar for an image with the given stem.
    pub fn derive(&self, stem: &str) -> String {
        format!("{stem}{}.{}", self.suffix, self.extension)
    }
}

impl AlphaConfig {
    /// Returns `true` if `path` carries one of the configured image extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

// --- Default implementations ---

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            only_selected: false,
            output_folder: desktop_dir().join(DEFAULT_EXPORT_FOLDER),
            translucency_from_color_alpha: false,
        }
    }
}

impl Default for AlphaConfig {
    fn default() -> Self {
        let input_dir = desktop_dir().join(DEFAULT_EXPORT_FOLDER);
        Self {
            output_dir: input_dir.join("alphas"),
            input_dir,
            extensions: ["png", "tga", "bmp", "tif", "tiff", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
            naming: AlphaNaming::default(),
        }
    }
}

impl Default for AlphaNaming {
    fn default() -> Self {
        Self {
            suffix: "_alpha".to_string(),
            extension: "jpg".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config = ron::from_str(&contents)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("only_selected: false"));
        assert!(ron_str.contains("suffix: \"_alpha\""));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_default_folders_follow_desktop() {
        let config = Config::default();
        assert!(config.export.output_folder.ends_with("cool_mats"));
        assert_eq!(config.alpha.input_dir, config.export.output_folder);
        assert_eq!(config.alpha.output_dir, config.alpha.input_dir.join("alphas"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(export: (only_selected: true))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert!(config.export.only_selected);
        assert_eq!(config.alpha, AlphaConfig::default());
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.export.output_folder = dir.path().join("out");
        config.export.only_selected = true;
        config.alpha.naming.suffix = "_a".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_alpha_naming_derive() {
        let naming = AlphaNaming::default();
        assert_eq!(naming.derive("wood"), "wood_alpha.jpg");

        let custom = AlphaNaming {
            suffix: "_mask".to_string(),
            extension: "png".to_string(),
        };
        assert_eq!(custom.derive("wood"), "wood_mask.png");
    }

    #[test]
    fn test_extension_filter_is_case_insensitive() {
        let alpha = AlphaConfig::default();
        assert!(alpha.accepts(Path::new("dir/wood.png")));
        assert!(alpha.accepts(Path::new("WOOD.PNG")));
        assert!(alpha.accepts(Path::new("decal.tga")));
        assert!(!alpha.accepts(Path::new("stone.jpg")));
        assert!(!alpha.accepts(Path::new("README")));
    }
}
