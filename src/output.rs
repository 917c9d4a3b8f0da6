//! Atomic PNG persistence

use crate::error::{Error, Result};
use image::{ImageFormat, RgbaImage};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `image` as a PNG at `path`.
///
/// The PNG is encoded into a temporary file in the destination directory and
/// renamed into place afterwards, so a failed write never leaves a partial
/// file at the destination claiming to be valid output.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::Builder::new()
        .prefix(".qrsmith-")
        .suffix(".png")
        .tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        image.write_to(&mut writer, ImageFormat::Png)?;
        writer.flush()?;
    }

    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    tracing::debug!(path = %path.display(), "persisted PNG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(4, 4, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 128])
            }
        })
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        save_png(&sample(), &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded, sample());
    }

    #[test]
    fn test_missing_directory_fails_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        assert!(save_png(&sample(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        std::fs::write(&path, b"not a png").unwrap();
        save_png(&sample(), &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.width(), 4);
    }
}
