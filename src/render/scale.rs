//! Resampling of the native buffer to the output size

use crate::error::{Error, Result};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Resize `image` to `target_size x target_size`.
///
/// A target equal to the native size is an identity copy. Integer scale
/// factors use nearest-neighbor sampling so module edges stay crisp and no
/// color bleeds across module boundaries; non-integer factors fall back to a
/// bilinear filter that resamples all four channels identically, keeping
/// straight alpha intact. Targets below the native size are rejected.
/// Largest supported output side length; beyond this the buffer would not be
/// reliably allocatable
pub const MAX_TARGET_SIZE: u32 = 1 << 15;

pub fn scale(image: &RgbaImage, target_size: u32) -> Result<RgbaImage> {
    let native = image.width();

    if target_size < native {
        return Err(Error::Scale(format!(
            "target size {target_size} is smaller than the native size {native}"
        )));
    }

    if target_size > MAX_TARGET_SIZE {
        return Err(Error::Scale(format!(
            "target size {target_size} exceeds the supported maximum {MAX_TARGET_SIZE}"
        )));
    }

    if target_size == native {
        return Ok(image.clone());
    }

    let filter = if target_size % native == 0 {
        FilterType::Nearest
    } else {
        FilterType::Triangle
    };

    Ok(imageops::resize(image, target_size, target_size, filter))
}
