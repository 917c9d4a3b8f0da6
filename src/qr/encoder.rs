//! Boundary to the external QR encoder

use crate::error::{Error, Result};
use crate::qr::{EccLevel, MaskChoice, ModuleGrid, VersionRange};
use qrcodegen::{Mask, QrCode, QrCodeEcc, QrSegment, Version};

/// Parameters for a single encode call
#[derive(Debug, Clone)]
pub struct EncodeRequest<'a> {
    /// Text to encode
    pub text: &'a str,
    /// Error correction strength
    pub level: EccLevel,
    /// Version bounds the encoder may choose from
    pub versions: VersionRange,
    /// Mask pattern selection
    pub mask: MaskChoice,
    /// Allow the encoder to raise the ECC level when it fits for free
    pub boost_ecc: bool,
}

impl From<EccLevel> for QrCodeEcc {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::Low => QrCodeEcc::Low,
            EccLevel::Medium => QrCodeEcc::Medium,
            EccLevel::Quartile => QrCodeEcc::Quartile,
            EccLevel::High => QrCodeEcc::High,
        }
    }
}

/// Encode text into a module grid.
///
/// The encoder picks the smallest version within the requested bounds that
/// fits the text at the requested ECC level; failures (text too long for the
/// bounds, for instance) surface as [`Error::Encoding`].
pub fn encode(request: &EncodeRequest<'_>) -> Result<ModuleGrid> {
    let segments = QrSegment::make_segments(request.text);

    let mask = match request.mask {
        MaskChoice::Auto => None,
        // Fixed values are validated at construction, 0-7 only
        MaskChoice::Fixed(index) => Some(Mask::new(index)),
    };

    let code = QrCode::encode_segments_advanced(
        &segments,
        request.level.into(),
        Version::new(request.versions.min()),
        Version::new(request.versions.max()),
        mask,
        request.boost_ecc,
    )
    .map_err(|e| Error::Encoding(e.to_string()))?;

    let size = code.size() as usize;
    let mut modules = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            modules.push(code.get_module(x as i32, y as i32));
        }
    }

    tracing::debug!(size, version = %code.version().value(), "encoded QR code");
    Ok(ModuleGrid::from_modules(size, modules))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> EncodeRequest<'_> {
        EncodeRequest {
            text,
            level: EccLevel::High,
            versions: VersionRange::FULL,
            mask: MaskChoice::Auto,
            boost_ecc: false,
        }
    }

    #[test]
    fn test_hello_fits_version_one() {
        let grid = encode(&request("HELLO")).unwrap();
        assert_eq!(grid.size(), 21);
        assert_eq!(grid.version(), 1);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let first = encode(&request("determinism")).unwrap();
        let second = encode(&request("determinism")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_min_version_bound_is_honored() {
        let mut req = request("HELLO");
        req.versions = VersionRange::new(5, 40).unwrap();
        let grid = encode(&req).unwrap();
        assert!(grid.version() >= 5);
    }

    #[test]
    fn test_overlong_text_for_max_version_fails() {
        let text = "A".repeat(200);
        let mut req = request(&text);
        req.versions = VersionRange::new(1, 1).unwrap();
        assert!(matches!(encode(&req), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_fixed_mask_changes_pattern() {
        let mut zero = request("mask test");
        zero.mask = MaskChoice::Fixed(0);
        let mut one = request("mask test");
        one.mask = MaskChoice::Fixed(1);

        let zero = encode(&zero).unwrap();
        let one = encode(&one).unwrap();
        assert_eq!(zero.size(), one.size());
        assert_ne!(zero, one);
    }
}
