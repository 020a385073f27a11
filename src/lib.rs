pub mod camera;
pub mod collectibles;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod scaler;
pub mod session;
pub mod terrain;
pub mod vehicle;

pub use config::{GameConfig, RuntimeConfig};
pub use error::{TerrainError, TerrainResult};
pub use game::{Control, Frame, Game, Hud};
pub use terrain::HeightField;
