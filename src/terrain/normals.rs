//! Two-pass normal estimation for a height field.
//!
//! Pass one sums the unit face normals of the (up to four) quadrants around
//! each cell. Pass two blends every raw normal with its in-bounds
//! 4-neighbours at [`FALLOUT_RATIO`], which hides the faceting of raw face
//! normals. The result is left unnormalized.

use glam::Vec3;

use super::grid::Grid;

/// Weight of each neighbouring raw normal during smoothing.
pub const FALLOUT_RATIO: f32 = 0.5;

pub fn estimate(heights: &Grid<f32>) -> Grid<Vec3> {
    let raw = raw_normals(heights);
    smooth(&raw)
}

/// Sum of the unit face normals around each cell.
pub fn raw_normals(heights: &Grid<f32>) -> Grid<Vec3> {
    let (w, l) = (heights.width(), heights.length());
    let mut out = Grid::filled(w, l, Vec3::ZERO);

    for z in 0..l {
        for x in 0..w {
            let h = *heights.get(x, z);
            let has_out = z > 0;
            let has_in = z + 1 < l;
            let has_left = x > 0;
            let has_right = x + 1 < w;

            // Edges to missing neighbours stay zero.
            let edge_out = if has_out {
                Vec3::new(0.0, heights.get(x, z - 1) - h, -1.0)
            } else {
                Vec3::ZERO
            };
            let edge_in = if has_in {
                Vec3::new(0.0, heights.get(x, z + 1) - h, 1.0)
            } else {
                Vec3::ZERO
            };
            let edge_left = if has_left {
                Vec3::new(-1.0, heights.get(x - 1, z) - h, 0.0)
            } else {
                Vec3::ZERO
            };
            let edge_right = if has_right {
                Vec3::new(1.0, heights.get(x + 1, z) - h, 0.0)
            } else {
                Vec3::ZERO
            };

            let mut sum = Vec3::ZERO;
            if has_left && has_out {
                sum += edge_out.cross(edge_left).normalize_or_zero();
            }
            if has_left && has_in {
                sum += edge_left.cross(edge_in).normalize_or_zero();
            }
            if has_right && has_in {
                sum += edge_in.cross(edge_right).normalize_or_zero();
            }
            if has_right && has_out {
                sum += edge_right.cross(edge_out).normalize_or_zero();
            }
            *out.get_mut(x, z) = sum;
        }
    }
    out
}

/// Blends each raw normal with its 4-neighbours. A zero result becomes +Y.
pub fn smooth(raw: &Grid<Vec3>) -> Grid<Vec3> {
    let (w, l) = (raw.width(), raw.length());
    let mut out = Grid::filled(w, l, Vec3::Y);

    for z in 0..l {
        for x in 0..w {
            let mut sum = *raw.get(x, z);
            if x > 0 {
                sum += *raw.get(x - 1, z) * FALLOUT_RATIO;
            }
            if x + 1 < w {
                sum += *raw.get(x + 1, z) * FALLOUT_RATIO;
            }
            if z > 0 {
                sum += *raw.get(x, z - 1) * FALLOUT_RATIO;
            }
            if z + 1 < l {
                sum += *raw.get(x, z + 1) * FALLOUT_RATIO;
            }

            if sum.length() == 0.0 {
                sum = Vec3::Y;
            }
            *out.get_mut(x, z) = sum;
        }
    }
    out
}
