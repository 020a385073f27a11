/// Owned row-major 2D buffer addressed as `(x, z)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    length: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn filled(width: usize, length: usize, value: T) -> Self {
        Self {
            width,
            length,
            cells: vec![value; width * length],
        }
    }
}

impl<T> Grid<T> {
    /// Wraps an existing row-major buffer. Panics if the length doesn't match.
    pub fn from_vec(width: usize, length: usize, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            width * length,
            "grid buffer does not match {width}x{length}"
        );
        Self {
            width,
            length,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn contains(&self, x: usize, z: usize) -> bool {
        x < self.width && z < self.length
    }

    #[inline]
    fn index(&self, x: usize, z: usize) -> usize {
        assert!(
            self.contains(x, z),
            "grid index ({x}, {z}) out of range for {}x{}",
            self.width,
            self.length
        );
        z * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> &T {
        &self.cells[self.index(x, z)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, z: usize) -> &mut T {
        let i = self.index(x, z);
        &mut self.cells[i]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let grid = Grid::from_vec(3, 2, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(*grid.get(0, 0), 0);
        assert_eq!(*grid.get(2, 0), 2);
        assert_eq!(*grid.get(0, 1), 3);
        assert_eq!(*grid.get(2, 1), 5);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn x_past_width_panics() {
        let grid = Grid::filled(3, 2, 0.0f32);
        grid.get(3, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn z_past_length_panics() {
        let mut grid = Grid::filled(3, 2, 0.0f32);
        *grid.get_mut(0, 2) = 1.0;
    }
}
