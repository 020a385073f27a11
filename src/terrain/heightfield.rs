use std::cell::OnceCell;

use glam::Vec3;

use super::grid::Grid;
use super::normals;
use crate::error::{TerrainError, TerrainResult};

/// Elevation samples on a `width x length` grid, plus smoothed normals
/// derived from them on demand.
#[derive(Clone, Debug)]
pub struct HeightField {
    heights: Grid<f32>,
    // Filled means "normals computed"; any height write empties it.
    normals: OnceCell<Grid<Vec3>>,
}

impl HeightField {
    /// Flat field at height 0.
    pub fn new(width: usize, length: usize) -> TerrainResult<Self> {
        if width == 0 || length == 0 {
            return Err(TerrainError::InvalidDimension { width, length });
        }
        Ok(Self {
            heights: Grid::filled(width, length, 0.0),
            normals: OnceCell::new(),
        })
    }

    /// Builds a field from row-major heights (`z * width + x`).
    pub fn from_heights(width: usize, length: usize, heights: Vec<f32>) -> TerrainResult<Self> {
        if width == 0 || length == 0 {
            return Err(TerrainError::InvalidDimension { width, length });
        }
        Ok(Self {
            heights: Grid::from_vec(width, length, heights),
            normals: OnceCell::new(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.heights.width()
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.heights.length()
    }

    pub fn set_height(&mut self, x: usize, z: usize, value: f32) {
        *self.heights.get_mut(x, z) = value;
        self.normals.take();
    }

    #[inline]
    pub fn height(&self, x: usize, z: usize) -> f32 {
        *self.heights.get(x, z)
    }

    pub fn heights(&self) -> &Grid<f32> {
        &self.heights
    }

    /// Smoothed normal at `(x, z)`. Not unit length.
    pub fn normal(&self, x: usize, z: usize) -> Vec3 {
        *self.normal_grid().get(x, z)
    }

    pub fn normals_computed(&self) -> bool {
        self.normals.get().is_some()
    }

    /// Computes every normal now instead of on the first lookup.
    pub fn ensure_normals(&self) {
        self.normal_grid();
    }

    fn normal_grid(&self) -> &Grid<Vec3> {
        self.normals
            .get_or_init(|| normals::estimate(&self.heights))
    }

    /// Nearest cell to a continuous ground position, clamped into the grid.
    pub fn cell_at(&self, x: f32, z: f32) -> (usize, usize) {
        let clamp = |v: f32, len: usize| -> usize {
            let max = (len - 1) as f32;
            v.round().clamp(0.0, max) as usize
        };
        (clamp(x, self.width()), clamp(z, self.length()))
    }
}
