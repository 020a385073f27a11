use std::path::PathBuf;

/// Failures while building terrain from a heightmap.
#[derive(thiserror::Error, Debug)]
pub enum TerrainError {
    #[error("invalid height field dimensions {width}x{length}")]
    InvalidDimension { width: usize, length: usize },

    #[error("failed to load heightmap '{}': {source}", .path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type TerrainResult<T> = Result<T, TerrainError>;
