//! QR code encoding
//!
//! The actual error-correction encoding is delegated to an external encoder;
//! this module owns the request vocabulary (ECC level, version bounds, mask
//! choice) and the [`ModuleGrid`] handed downstream to the rasterizer.

mod encoder;

pub use encoder::{EncodeRequest, encode};

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Error correction strength requested from the encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EccLevel {
    /// Tolerates ~7% codeword loss
    Low,
    /// Tolerates ~15% codeword loss
    Medium,
    /// Tolerates ~25% codeword loss
    Quartile,
    /// Tolerates ~30% codeword loss
    #[default]
    High,
}

impl FromStr for EccLevel {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Self::Low),
            "m" | "medium" => Ok(Self::Medium),
            "q" | "quartile" => Ok(Self::Quartile),
            "h" | "high" => Ok(Self::High),
            other => Err(Error::Argument(format!(
                "Unknown error correction level '{other}'. Use LOW, MEDIUM, QUARTILE, HIGH or L, M, Q, H"
            ))),
        }
    }
}

impl fmt::Display for EccLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::Quartile => "QUARTILE",
            Self::High => "HIGH",
        };
        f.write_str(name)
    }
}

/// Mask pattern selection handed to the encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaskChoice {
    /// Let the encoder pick the mask with the best penalty score
    #[default]
    Auto,
    /// Force one of the 8 mask patterns
    Fixed(u8),
}

impl MaskChoice {
    /// Validate an explicit mask index (0-7)
    pub fn fixed(index: u8) -> Result<Self> {
        if index > 7 {
            return Err(Error::Argument(format!(
                "Invalid mask {index}. Masks are numbered 0 through 7"
            )));
        }
        Ok(Self::Fixed(index))
    }
}

impl fmt::Display for MaskChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(index) => write!(f, "{index}"),
        }
    }
}

/// Inclusive QR version bounds (1-40) handed to the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    min: u8,
    max: u8,
}

impl VersionRange {
    /// The full version range, 1 through 40
    pub const FULL: VersionRange = VersionRange { min: 1, max: 40 };

    /// Build a validated range. Bounds outside 1-40 and min > max are
    /// rejected before the encoder ever runs.
    pub fn new(min: u8, max: u8) -> Result<Self> {
        if !(1..=40).contains(&min) {
            return Err(Error::Argument(format!(
                "Invalid min version {min}. Versions run 1 through 40"
            )));
        }
        if !(1..=40).contains(&max) {
            return Err(Error::Argument(format!(
                "Invalid max version {max}. Versions run 1 through 40"
            )));
        }
        if min > max {
            return Err(Error::Argument(format!(
                "Invalid version range: {min}(min) > {max}(max)"
            )));
        }
        Ok(Self { min, max })
    }

    /// Smallest version the encoder may pick
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Largest version the encoder may pick
    pub fn max(&self) -> u8 {
        self.max
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Immutable square grid of QR modules (true = dark, false = light).
///
/// Produced once by the encoder and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleGrid {
    pub(crate) fn from_modules(size: usize, modules: Vec<bool>) -> Self {
        debug_assert_eq!(modules.len(), size * size);
        Self { size, modules }
    }

    /// Side length in modules (21-177)
    pub fn size(&self) -> usize {
        self.size
    }

    /// QR version implied by the side length
    pub fn version(&self) -> u8 {
        ((self.size - 17) / 4) as u8
    }

    /// Whether the module at (x, y) is dark
    pub fn module(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x]
    }
}
