use glam::Vec3;
use rand::Rng;

use crate::config::GameConfig;
use crate::terrain::HeightField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectibleColor {
    Red,
    Green,
    Black,
}

impl CollectibleColor {
    pub const ALL: [CollectibleColor; 3] = [Self::Red, Self::Green, Self::Black];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Red => [255, 0, 0],
            Self::Green => [0, 255, 0],
            Self::Black => [0, 0, 0],
        }
    }
}

/// A pickup sphere resting on the terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct Collectible {
    pub position: Vec3,
    pub radius: f32,
    pub color: CollectibleColor,
    pub consumed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Collectibles {
    items: Vec<Collectible>,
}

impl Collectibles {
    pub fn new(items: Vec<Collectible>) -> Self {
        Self { items }
    }

    /// Drops a pickup on each cell with probability `1 / spawn_odds`.
    /// The last row is never used.
    pub fn scatter(terrain: &HeightField, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut items = Vec::new();
        let odds = config.spawn_odds.max(1);

        for z in 0..terrain.length().saturating_sub(1) {
            for x in 0..terrain.width() {
                if !rng.random_ratio(1, odds) {
                    continue;
                }
                let color = CollectibleColor::ALL[rng.random_range(0..CollectibleColor::ALL.len())];
                items.push(Collectible {
                    position: Vec3::new(x as f32, terrain.height(x, z), z as f32),
                    radius: config.collectible_radius,
                    color,
                    consumed: false,
                });
            }
        }

        log::info!("scattered {} collectibles", items.len());
        Self { items }
    }

    /// Removes every collectible within `threshold` of `position` on all
    /// three axes and returns how many were taken.
    pub fn collect_near(&mut self, position: Vec3, threshold: f32) -> usize {
        let mut taken = 0;
        for item in &mut self.items {
            let d = (item.position - position).abs();
            if !item.consumed && d.x < threshold && d.y < threshold && d.z < threshold {
                item.consumed = true;
                taken += 1;
            }
        }

        self.items.retain(|item| !item.consumed);
        taken
    }

    pub fn as_slice(&self) -> &[Collectible] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
