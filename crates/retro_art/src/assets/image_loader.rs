//! Image loading utilities
//!
//! Provides PNG and JPEG loading, normalised to RGBA8 for compositing.

use crate::assets::AssetError;
use std::path::Path;

/// Decoded RGBA8 bitmap
pub type Bitmap = image::RgbaImage;

/// Load an image from a file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Bitmap, AssetError> {
    let path_ref = path.as_ref();

    log::debug!("Loading image from: {:?}", path_ref);

    if !path_ref.is_file() {
        return Err(AssetError::NotFound(path_ref.display().to_string()));
    }

    let img = image::open(path_ref)
        .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;

    // Convert to RGBA8 so every blit can alpha blend
    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();

    log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

    Ok(rgba_img)
}

/// Load image from memory (useful for embedded resources)
pub fn from_bytes(bytes: &[u8]) -> Result<Bitmap, AssetError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;

    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();

    log::debug!("Loaded image {}x{} from memory", width, height);

    Ok(rgba_img)
}

/// Create a solid color image (useful for testing and placeholders)
pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Bitmap {
    image::RgbaImage::from_pixel(width, height, image::Rgba(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.as_raw().len(), 4 * 4 * 4);
        assert_eq!(&img.as_raw()[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_nonexistent_file() {
        let result = from_file("nonexistent_file.png");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_png_bytes_round_trip() {
        let img = solid_color(3, 2, [10, 20, 30, 255]);
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = from_bytes(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_garbage_bytes_fail() {
        assert!(matches!(from_bytes(b"not an image"), Err(AssetError::LoadFailed(_))));
    }
}
