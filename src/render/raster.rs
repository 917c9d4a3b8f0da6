//! Module grid to native-resolution pixel buffer

use crate::color::Color;
use crate::qr::ModuleGrid;
use image::RgbaImage;

/// Map every module to exactly one flat-colored pixel.
///
/// Dark modules take the foreground color, light modules the background, each
/// with whatever straight alpha the chosen color carries. No blending, no
/// anti-aliasing; the output is always `size x size`.
pub fn rasterize(grid: &ModuleGrid, foreground: Color, background: Color) -> RgbaImage {
    let size = grid.size() as u32;
    RgbaImage::from_fn(size, size, |x, y| {
        if grid.module(x as usize, y as usize) {
            foreground.into()
        } else {
            background.into()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::{EccLevel, EncodeRequest, MaskChoice, VersionRange, encode};
    use image::Rgba;

    fn grid() -> ModuleGrid {
        encode(&EncodeRequest {
            text: "raster test",
            level: EccLevel::High,
            versions: VersionRange::FULL,
            mask: MaskChoice::Auto,
            boost_ecc: false,
        })
        .unwrap()
    }

    #[test]
    fn test_one_pixel_per_module() {
        let grid = grid();
        let image = rasterize(&grid, Color::BLACK, Color::WHITE);
        assert_eq!(image.width() as usize, grid.size());
        assert_eq!(image.height() as usize, grid.size());
        assert_eq!(image.pixels().count(), grid.size() * grid.size());
    }

    #[test]
    fn test_pixels_match_grid_pattern() {
        let grid = grid();
        let fg = Color::new(0xE2, 0x7D, 0x60, 0xFF);
        let bg = Color::new(0x10, 0x20, 0x30, 0x40);
        let image = rasterize(&grid, fg, bg);

        for y in 0..grid.size() {
            for x in 0..grid.size() {
                let expected: Rgba<u8> = if grid.module(x, y) { fg.into() } else { bg.into() };
                assert_eq!(*image.get_pixel(x as u32, y as u32), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_alpha_is_carried_through() {
        let grid = grid();
        let image = rasterize(&grid, Color::new(0, 0, 0, 128), Color::new(255, 255, 255, 0));
        assert!(image.pixels().all(|p| p.0[3] == 128 || p.0[3] == 0));
    }
}
