//! Directory scan, alpha channel split, and sidecar encoding.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use thiserror::Error;
use tracing::{debug, info};
use vmat_config::AlphaConfig;

/// JPEG quality used for sidecars (the usual codec default).
pub const JPEG_QUALITY: u8 = 75;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that abort an extraction run.
#[derive(Debug, Error)]
pub enum AlphaError {
    /// The input directory could not be listed.
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory being created.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// An image with a recognised extension could not be decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// Offending image.
        path: PathBuf,
        /// Codec failure.
        #[source]
        source: image::ImageError,
    },

    /// A sidecar could not be created or encoded.
    #[error("failed to write {}: {source}", path.display())]
    Encode {
        /// Sidecar being written.
        path: PathBuf,
        /// Codec or I/O failure.
        #[source]
        source: image::ImageError,
    },

    /// Two inputs would write the same sidecar.
    #[error(
        "{} and {} both map to sidecar {sidecar}",
        first.display(),
        second.display()
    )]
    NameCollision {
        /// Input seen first in scan order.
        first: PathBuf,
        /// Input that would overwrite it.
        second: PathBuf,
        /// Shared sidecar file name.
        sidecar: String,
    },

    /// The configured sidecar extension names no known image format.
    #[error("unsupported sidecar extension: {0}")]
    UnsupportedOutput(String),
}

// ---------------------------------------------------------------------------
// Channel helpers
// ---------------------------------------------------------------------------

/// Returns `true` if the decoded image carries an alpha channel.
pub fn has_alpha(img: &DynamicImage) -> bool {
    img.color().has_alpha()
}

/// The alpha channel of `img` as an 8-bit grayscale image.
///
/// Images without alpha yield a fully opaque (255) result.
pub fn alpha_channel(img: &DynamicImage) -> GrayImage {
    let rgba = img.to_rgba8();
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        Luma([rgba.get_pixel(x, y)[3]])
    })
}

// ---------------------------------------------------------------------------
// AlphaExtractor
// ---------------------------------------------------------------------------

/// Outcome of [`AlphaExtractor::extract_dir`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlphaReport {
    /// Sidecars written, in scan order.
    pub written: Vec<PathBuf>,
    /// Recognised images without an alpha channel.
    pub skipped: Vec<PathBuf>,
}

/// Writes `<stem><suffix>.<ext>` sidecars for images that carry alpha.
#[derive(Clone, Debug)]
pub struct AlphaExtractor {
    config: AlphaConfig,
}

impl AlphaExtractor {
    /// Creates an extractor with the given extension filter and naming.
    pub fn new(config: AlphaConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &AlphaConfig {
        &self.config
    }

    /// Scan the configured input directory into the configured output directory.
    pub fn run(&self) -> Result<AlphaReport, AlphaError> {
        self.extract_dir(&self.config.input_dir, &self.config.output_dir)
    }

    /// Scan `input_dir` (non-recursively) and write sidecars into `output_dir`.
    ///
    /// `output_dir` is created when missing. Existing sidecars are
    /// overwritten. Inputs sharing a sidecar name (`wood.png`, `wood.tga`)
    /// are rejected before anything is written. The first unreadable image
    /// aborts the run; sidecars already written stay on disk.
    pub fn extract_dir(
        &self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<AlphaReport, AlphaError> {
        std::fs::create_dir_all(output_dir).map_err(|source| AlphaError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let read_dir_err = |source| AlphaError::ReadDir {
            path: input_dir.to_path_buf(),
            source,
        };
        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(input_dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let path = entry.path();
            if path.is_file() && self.config.accepts(&path) {
                candidates.push(path);
            }
        }
        candidates.sort();

        let mut claimed: HashMap<String, &Path> = HashMap::new();
        for path in &candidates {
            let sidecar = self.sidecar_name(path);
            if let Some(first) = claimed.insert(sidecar.to_lowercase(), path.as_path()) {
                return Err(AlphaError::NameCollision {
                    first: first.to_path_buf(),
                    second: path.clone(),
                    sidecar,
                });
            }
        }

        let mut report = AlphaReport::default();
        for path in &candidates {
            match self.extract_file(path, output_dir)? {
                Some(sidecar) => report.written.push(sidecar),
                None => report.skipped.push(path.clone()),
            }
        }

        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "Processing complete: {}",
            input_dir.display()
        );
        Ok(report)
    }

    /// Decode `path` and write its alpha sidecar into `output_dir`.
    ///
    /// Returns `None` when the image has no alpha channel.
    pub fn extract_file(
        &self,
        path: &Path,
        output_dir: &Path,
    ) -> Result<Option<PathBuf>, AlphaError> {
        let img = image::open(path).map_err(|source| AlphaError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if !has_alpha(&img) {
            debug!("No alpha channel in {}, skipping", path.display());
            return Ok(None);
        }

        let sidecar = output_dir.join(self.sidecar_name(path));
        self.write_sidecar(&alpha_channel(&img), &sidecar)?;

        info!("Processed {} -> {}", path.display(), sidecar.display());
        Ok(Some(sidecar))
    }

    fn sidecar_name(&self, path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        self.config.naming.derive(&stem)
    }

    fn write_sidecar(&self, alpha: &GrayImage, sidecar: &Path) -> Result<(), AlphaError> {
        let extension = &self.config.naming.extension;
        let format = ImageFormat::from_extension(extension)
            .ok_or_else(|| AlphaError::UnsupportedOutput(extension.clone()))?;
        let encode_err = |source: image::ImageError| AlphaError::Encode {
            path: sidecar.to_path_buf(),
            source,
        };

        if format != ImageFormat::Jpeg {
            return alpha.save_with_format(sidecar, format).map_err(encode_err);
        }

        let file = File::create(sidecar).map_err(|e| encode_err(e.into()))?;
        let mut writer = BufWriter::new(file);
        alpha
            .write_with_encoder(JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY))
            .map_err(encode_err)?;
        writer.flush().map_err(|e| encode_err(e.into()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn extractor() -> AlphaExtractor {
        AlphaExtractor::new(AlphaConfig::default())
    }

    /// `wood.png` (RGBA, alpha 200) and `stone.jpg` (RGB).
    fn fixture_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(8, 4, Rgba([120, 80, 40, 200]))
            .save(dir.path().join("wood.png"))
            .unwrap();
        RgbImage::from_pixel(8, 8, Rgb([90, 90, 90]))
            .save(dir.path().join("stone.jpg"))
            .unwrap();
        dir
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_alpha_channel_of_rgba() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 10]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 250]));
        let alpha = alpha_channel(&DynamicImage::ImageRgba8(img));
        assert_eq!(alpha.dimensions(), (2, 1));
        assert_eq!(alpha.get_pixel(0, 0)[0], 10);
        assert_eq!(alpha.get_pixel(1, 0)[0], 250);
    }

    #[test]
    fn test_alpha_channel_of_gray_alpha() {
        let img = GrayAlphaImage::from_pixel(3, 3, LumaA([17, 99]));
        let dynamic = DynamicImage::ImageLumaA8(img);
        assert!(has_alpha(&dynamic));
        assert!(alpha_channel(&dynamic).pixels().all(|p| p[0] == 99));
    }

    #[test]
    fn test_has_alpha() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::new(1, 1));
        let rgba = DynamicImage::ImageRgba8(RgbaImage::new(1, 1));
        assert!(!has_alpha(&rgb));
        assert!(has_alpha(&rgba));
    }

    #[test]
    fn test_only_alpha_images_produce_sidecars() {
        let input = fixture_dir();
        let output = tempfile::tempdir().unwrap();

        let report = extractor().extract_dir(input.path(), output.path()).unwrap();
        assert_eq!(report.written, vec![output.path().join("wood_alpha.jpg")]);
        assert!(report.skipped.is_empty());
        assert_eq!(file_names(output.path()), ["wood_alpha.jpg"]);
    }

    #[test]
    fn test_sidecar_holds_alpha_data() {
        let input = fixture_dir();
        let output = tempfile::tempdir().unwrap();
        extractor().extract_dir(input.path(), output.path()).unwrap();

        let sidecar = image::open(output.path().join("wood_alpha.jpg")).unwrap();
        assert_eq!(sidecar.color(), image::ColorType::L8);
        let gray = sidecar.to_luma8();
        assert_eq!(gray.dimensions(), (8, 4));
        // Lossy, but a flat field survives nearly unchanged.
        assert!(gray.pixels().all(|p| p[0].abs_diff(200) <= 3));
    }

    #[test]
    fn test_opaque_png_is_skipped() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let opaque = input.path().join("opaque.png");
        RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])).save(&opaque).unwrap();

        let report = extractor().extract_dir(input.path(), output.path()).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.skipped, vec![opaque]);
        assert!(file_names(output.path()).is_empty());
    }

    #[test]
    fn test_output_dir_created_and_directories_ignored() {
        let input = fixture_dir();
        std::fs::create_dir(input.path().join("nested.png")).unwrap();
        let output = input.path().join("alphas");

        let report = extractor().extract_dir(input.path(), &output).unwrap();
        assert!(output.is_dir());
        assert_eq!(report.written.len(), 1);
    }

    #[test]
    fn test_existing_sidecar_overwritten() {
        let input = fixture_dir();
        let output = tempfile::tempdir().unwrap();
        let sidecar = output.path().join("wood_alpha.jpg");
        std::fs::write(&sidecar, b"stale").unwrap();

        extractor().extract_dir(input.path(), output.path()).unwrap();
        assert!(image::open(&sidecar).is_ok());
    }

    #[test]
    fn test_corrupt_image_aborts() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("broken.png"), b"not an image").unwrap();

        let result = extractor().extract_dir(input.path(), output.path());
        assert!(matches!(result, Err(AlphaError::Decode { .. })));
    }

    #[test]
    fn test_shared_stem_is_rejected_before_writing() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 10]))
            .save(input.path().join("wood.png"))
            .unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 240]))
            .save(input.path().join("wood.tga"))
            .unwrap();

        let result = extractor().extract_dir(input.path(), output.path());
        match result {
            Err(AlphaError::NameCollision {
                first,
                second,
                sidecar,
            }) => {
                assert_eq!(first, input.path().join("wood.png"));
                assert_eq!(second, input.path().join("wood.tga"));
                assert_eq!(sidecar, "wood_alpha.jpg");
            }
            other => panic!("expected a name collision, got {other:?}"),
        }
        assert!(file_names(output.path()).is_empty());
    }

    #[test]
    fn test_missing_input_dir() {
        let root = tempfile::tempdir().unwrap();
        let result = extractor().extract_dir(&root.path().join("missing"), root.path());
        assert!(matches!(result, Err(AlphaError::ReadDir { .. })));
    }

    #[test]
    fn test_custom_naming() {
        let input = fixture_dir();
        let output = tempfile::tempdir().unwrap();
        let mut config = AlphaConfig::default();
        config.naming.suffix = "_mask".to_string();
        config.naming.extension = "png".to_string();

        let report = AlphaExtractor::new(config)
            .extract_dir(input.path(), output.path())
            .unwrap();
        let sidecar = output.path().join("wood_mask.png");
        assert_eq!(report.written, vec![sidecar.clone()]);
        // PNG is lossless, so the alpha survives exactly.
        let gray = image::open(&sidecar).unwrap().to_luma8();
        assert!(gray.pixels().all(|p| p[0] == 200));
    }

    #[test]
    fn test_unknown_sidecar_extension() {
        let input = fixture_dir();
        let output = tempfile::tempdir().unwrap();
        let mut config = AlphaConfig::default();
        config.naming.extension = "xyz".to_string();

        let result = AlphaExtractor::new(config).extract_dir(input.path(), output.path());
        assert!(matches!(result, Err(AlphaError::UnsupportedOutput(_))));
    }

    #[test]
    fn test_run_uses_configured_dirs() {
        let input = fixture_dir();
        let mut config = AlphaConfig::default();
        config.input_dir = input.path().to_path_buf();
        config.output_dir = input.path().join("alphas");

        let report = AlphaExtractor::new(config).run().unwrap();
        assert_eq!(
            report.written,
            vec![input.path().join("alphas").join("wood_alpha.jpg")]
        );
    }
}
