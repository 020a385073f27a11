use std::path::Path;

use image::RgbImage;

use super::heightfield::HeightField;
use crate::error::{TerrainError, TerrainResult};

/// Loads a heightmap image. Heights come from the red channel and span
/// `[-scale / 2, scale / 2]`. Normals are computed before returning.
pub fn load_heightmap(path: &Path, scale: f32) -> TerrainResult<HeightField> {
    let img = image::open(path).map_err(|source| TerrainError::AssetLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let field = from_rgb_image(&img.into_rgb8(), scale)?;
    log::info!(
        "loaded terrain {}x{} from {}",
        field.width(),
        field.length(),
        path.display()
    );
    Ok(field)
}

/// Pixel `(x, y)` becomes cell `(x, z = y)`.
pub fn from_rgb_image(img: &RgbImage, scale: f32) -> TerrainResult<HeightField> {
    let (w, l) = (img.width() as usize, img.height() as usize);
    let heights = img
        .pixels()
        .map(|p| red_to_height(p.0[0], scale))
        .collect();
    let field = HeightField::from_heights(w, l, heights)?;
    field.ensure_normals();
    Ok(field)
}

#[inline]
pub fn red_to_height(red: u8, scale: f32) -> f32 {
    scale * (red as f32 / 255.0 - 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rgb(w: u32, h: u32, reds: &[u8]) -> RgbImage {
        let raw = reds.iter().flat_map(|&r| [r, 7, 200]).collect();
        RgbImage::from_raw(w, h, raw).unwrap()
    }

    #[test]
    fn red_channel_maps_to_centered_heights() {
        let field = from_rgb_image(&rgb(2, 2, &[0, 255, 128, 64]), 20.0).unwrap();
        assert_relative_eq!(field.height(0, 0), -10.0);
        assert_relative_eq!(field.height(1, 0), 10.0);
        assert_relative_eq!(field.height(0, 1), 0.196_078, epsilon = 1e-4);
        assert_relative_eq!(field.height(1, 1), -5.098_039, epsilon = 1e-4);
    }

    #[test]
    fn normals_are_eager() {
        let field = from_rgb_image(&rgb(3, 2, &[10, 20, 30, 40, 50, 60]), 20.0).unwrap();
        assert!(field.normals_computed());
    }

    #[test]
    fn dimensions_follow_image() {
        let field = from_rgb_image(&rgb(3, 1, &[0, 0, 0]), 1.0).unwrap();
        assert_eq!((field.width(), field.length()), (3, 1));
    }

    #[test]
    fn missing_file_is_asset_error() {
        let err = load_heightmap(Path::new("does/not/exist.bmp"), 20.0).unwrap_err();
        assert!(matches!(err, TerrainError::AssetLoad { .. }));
        assert!(err.to_string().contains("does/not/exist.bmp"));
    }
}
