use std::path::PathBuf;

use approx::assert_relative_eq;
use image::RgbImage;
use terrain_rider::terrain::load_heightmap;
use terrain_rider::{HeightField, TerrainError};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("terrain_rider_{}_{name}", std::process::id()))
}

#[test]
fn bmp_heightmap_loads_in_pixel_order() {
    let path = scratch_path("2x2.bmp");
    let pixels = vec![0, 0, 0, 255, 255, 255, 128, 128, 128, 64, 64, 64];
    RgbImage::from_raw(2, 2, pixels).unwrap().save(&path).unwrap();

    let field = load_heightmap(&path, 20.0).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!((field.width(), field.length()), (2, 2));
    let row_major: Vec<f32> = field.heights().as_slice().to_vec();
    let expected = [-10.0, 10.0, 0.196_078, -5.098_039];
    for (got, want) in row_major.iter().zip(expected) {
        assert_relative_eq!(*got, want, epsilon = 1e-4);
    }
    assert!(field.normals_computed());
}

#[test]
fn garbage_file_is_an_asset_error() {
    let path = scratch_path("garbage.bmp");
    std::fs::write(&path, b"definitely not a bitmap").unwrap();

    let result = load_heightmap(&path, 20.0);
    std::fs::remove_file(&path).ok();

    match result {
        Err(TerrainError::AssetLoad { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected AssetLoad, got {other:?}"),
    }
}

#[test]
fn normals_never_go_stale() {
    let mut field = HeightField::new(8, 8).unwrap();
    let flat = field.normal(6, 6);

    // Raise a ridge along z = 6 after normals were cached.
    for x in 0..8 {
        field.set_height(x, 7, 3.0);
    }
    let tilted = field.normal(6, 6);
    assert_ne!(flat, tilted);
    assert!(tilted.z < 0.0, "normal should face away from the ridge: {tilted}");

    // Flatten again: back to straight up.
    for x in 0..8 {
        field.set_height(x, 7, 0.0);
    }
    assert_eq!(field.normal(6, 6), flat);
}

#[test]
fn flat_field_normals_point_up_everywhere() {
    let field = HeightField::from_heights(7, 5, vec![-2.5; 35]).unwrap();
    for z in 0..5 {
        for x in 0..7 {
            let n = field.normal(x, z);
            assert_eq!((n.x, n.z), (0.0, 0.0));
            assert!(n.y > 0.0);
        }
    }
}
