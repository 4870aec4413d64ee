//! Alpha channel extraction: writes the alpha channel of every image in a
//! directory as a standalone grayscale JPEG sidecar.

mod extractor;

pub use extractor::{
    AlphaError, AlphaExtractor, AlphaReport, JPEG_QUALITY, alpha_channel, has_alpha,
};
