pub mod grid;
pub mod heightfield;
pub mod loader;
pub mod normals;

pub use grid::Grid;
pub use heightfield::HeightField;
pub use loader::{from_rgb_image, load_heightmap};
