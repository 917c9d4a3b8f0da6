//! End-to-end generation pipeline
//!
//! The orchestrator runs the stages in order: encode, rasterize, scale,
//! decide, persist. Each intermediate buffer is owned exclusively by this
//! module and handed forward; nothing holds a reference to a stage after the
//! next one starts.

use crate::color::Color;
use crate::config::QrsmithConfig;
use crate::error::Result;
use crate::output;
use crate::preview::{self, Verdict};
use crate::qr::{self, EccLevel, MaskChoice, VersionRange};
use crate::render::{self, RenderAttributes};
use image::RgbaImage;
use std::path::{Path, PathBuf};

#[cfg(not(feature = "preview"))]
use crate::error::Error;

/// Everything needed for one generation run
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Text to encode
    pub text: String,
    /// Error correction strength
    pub level: EccLevel,
    /// Version bounds handed to the encoder
    pub versions: VersionRange,
    /// Mask pattern selection
    pub mask: MaskChoice,
    /// Allow the encoder to raise the ECC level when it fits for free
    pub boost_ecc: bool,
    /// Color of dark modules
    pub foreground: Color,
    /// Color of light modules
    pub background: Color,
    /// Output scale factor, already clamped to >= 1.0
    pub scale: f32,
    /// Destination path of the PNG
    pub output: PathBuf,
    /// Ask the user for confirmation in a preview window before saving
    pub verify: bool,
}

/// Final report of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The image was persisted at the requested path
    Saved,
    /// The user cancelled; nothing was written
    Cancelled,
}

/// The rendered image, ready for preview and persistence
#[derive(Debug, Clone)]
pub struct PreparedImage {
    native_size: usize,
    image: RgbaImage,
}

impl PreparedImage {
    /// Side length of the module grid, in modules
    pub fn native_size(&self) -> usize {
        self.native_size
    }

    /// Side length of the output image, in pixels
    pub fn output_size(&self) -> u32 {
        self.image.width()
    }
}

/// Encode, rasterize and scale; everything up to the save decision.
pub fn prepare(request: &GenerateRequest) -> Result<PreparedImage> {
    let grid = qr::encode(&qr::EncodeRequest {
        text: &request.text,
        level: request.level,
        versions: request.versions,
        mask: request.mask,
        boost_ecc: request.boost_ecc,
    })?;
    tracing::info!(
        size = grid.size(),
        version = grid.version(),
        "encoded module grid"
    );

    let attributes = RenderAttributes {
        foreground: request.foreground,
        background: request.background,
        target_size: render::scaled_size(grid.size(), request.scale),
    };

    let native = render::rasterize(&grid, attributes.foreground, attributes.background);
    let image = render::scale(&native, attributes.target_size)?;

    Ok(PreparedImage {
        native_size: grid.size(),
        image,
    })
}

/// Collect the save/cancel decision and act on it.
pub fn finish(
    config: &QrsmithConfig,
    request: &GenerateRequest,
    prepared: PreparedImage,
) -> Result<RunOutcome> {
    let verdict = if request.verify {
        interactive_verdict(config, &prepared.image)?
    } else {
        preview::headless_decision()
    };

    commit(verdict, &prepared.image, &request.output)
}

/// Run the whole pipeline and report the outcome.
pub fn run(config: &QrsmithConfig, request: &GenerateRequest) -> Result<RunOutcome> {
    let prepared = prepare(request)?;
    finish(config, request, prepared)
}

#[cfg(feature = "preview")]
fn interactive_verdict(config: &QrsmithConfig, image: &RgbaImage) -> Result<Verdict> {
    preview::run_preview(&config.preview, image)
}

#[cfg(not(feature = "preview"))]
fn interactive_verdict(_config: &QrsmithConfig, _image: &RgbaImage) -> Result<Verdict> {
    Err(Error::Render(
        "qrsmith was built without the preview feature; rerun without --verify".to_string(),
    ))
}

fn commit(verdict: Verdict, image: &RgbaImage, path: &Path) -> Result<RunOutcome> {
    match verdict {
        Verdict::Save => {
            output::save_png(image, path)?;
            tracing::info!(path = %path.display(), "saved QR code");
            Ok(RunOutcome::Saved)
        }
        Verdict::Cancel => {
            tracing::info!("save cancelled, nothing written");
            Ok(RunOutcome::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(output: PathBuf) -> GenerateRequest {
        GenerateRequest {
            text: "HELLO".to_string(),
            level: EccLevel::High,
            versions: VersionRange::FULL,
            mask: MaskChoice::Auto,
            boost_ecc: false,
            foreground: Color::BLACK,
            background: Color::WHITE,
            scale: 1.0,
            output,
            verify: false,
        }
    }

    #[test]
    fn test_non_interactive_run_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.png");

        let outcome = run(&QrsmithConfig::default(), &request(path.clone())).unwrap();
        assert_eq!(outcome, RunOutcome::Saved);
        assert!(path.exists());
    }

    #[test]
    fn test_prepare_reports_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path().join("out.png"));
        req.scale = 3.0;

        let prepared = prepare(&req).unwrap();
        assert_eq!(prepared.native_size(), 21);
        assert_eq!(prepared.output_size(), 63);
    }

    #[test]
    fn test_cancel_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cancelled.png");
        let req = request(path.clone());

        let prepared = prepare(&req).unwrap();
        let outcome = commit(Verdict::Cancel, &prepared.image, &path).unwrap();

        assert_eq!(outcome, RunOutcome::Cancelled);
        assert!(!path.exists());
    }

    #[test]
    fn test_inverted_version_range_never_reaches_the_encoder() {
        // The range type rejects min > max at construction
        assert!(VersionRange::new(12, 3).is_err());
    }
}
