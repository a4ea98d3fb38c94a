//! Image previews.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::error::Result;
use crate::report::Report;

pub fn append(path: &Path, report: &mut Report) {
    match preview(path) {
        Ok((bytes, width, height)) => report.add_picture(bytes, width, height),
        Err(err) => log::warn!("failed to decode image {}: {err}", path.display()),
    }
}

/// Decode through the codec to normalize arbitrary inputs, then re-encode
/// into an in-memory buffer preserving the original format.
fn preview(path: &Path) -> Result<(Vec<u8>, u32, u32)> {
    let bytes = fs::read(path)?;
    let format = image::guess_format(&bytes)?;
    let decoded = image::load_from_memory_with_format(&bytes, format)?;

    let mut buffer = Vec::new();
    decoded.write_to(&mut Cursor::new(&mut buffer), format)?;
    Ok((buffer, decoded.width(), decoded.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([12, 34, 56, 255]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_preview_reencodes_preserving_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        fs::write(&path, png_bytes(8, 5)).unwrap();

        let (bytes, width, height) = preview(&path).unwrap();
        assert_eq!((width, height), (8, 5));
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_preview_rejects_non_image_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        fs::write(&path, b"not an image at all").unwrap();

        assert!(preview(&path).is_err());
    }
}
