use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// One collectible per this many grid cells, on average.
pub const SPAWN_ODDS: u32 = 5000;
/// Per-axis distance below which the vehicle picks up a collectible.
pub const PICKUP_THRESHOLD: f32 = 2.0;
/// Ticks added to the clock for each pickup.
pub const PICKUP_TIME_BONUS: i32 = 25;
pub const COLLECTIBLE_RADIUS: f32 = 0.5;

/// Absolute roll, in degrees, past which the vehicle has crashed.
pub const CRASH_ROLL_LIMIT: f32 = 25.0;
/// Constant deceleration scaled by the sine of the terrain tilt.
pub const SLOPE_DRAG: f32 = 0.00005;
/// Distance travelled per unit of velocity per tick.
pub const STEP_SCALE: f32 = 0.1;
/// Height of the vehicle above the terrain sample it sits on.
pub const RIDE_HEIGHT: f32 = 1.0;
/// A drop larger than this between ticks leaves the vehicle airborne for a tick.
pub const AIRBORNE_MARGIN: f32 = 0.1;

pub const INITIAL_TIME: i32 = 100;
pub const LOW_TIME_WARNING: i32 = 20;
pub const THRUST: f32 = 0.2;
pub const STEER_STEP: f32 = 3.0;
pub const COARSE_STEER_STEP: f32 = 10.0;
pub const ROLL_STEP: f32 = 2.0;
pub const INITIAL_HEADING: f32 = 45.0;
/// Ride reference before the first tick; low enough that the vehicle starts grounded.
pub const INITIAL_RIDE_REFERENCE: f32 = -10.0;

pub const TICK_PERIOD: Duration = Duration::from_millis(25);
/// Heights span `[-TERRAIN_SCALE / 2, TERRAIN_SCALE / 2]`.
pub const TERRAIN_SCALE: f32 = 20.0;
pub const DEFAULT_HEIGHTMAP: &str = "assets/height_map.bmp";

/// Gameplay tuning. Every field defaults to the constant of the same name.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub spawn_odds: u32,
    pub pickup_threshold: f32,
    pub pickup_time_bonus: i32,
    pub collectible_radius: f32,
    pub crash_roll_limit: f32,
    pub slope_drag: f32,
    pub step_scale: f32,
    pub ride_height: f32,
    pub airborne_margin: f32,
    pub initial_time: i32,
    pub low_time_warning: i32,
    pub thrust: f32,
    pub steer_step: f32,
    pub coarse_steer_step: f32,
    pub roll_step: f32,
    pub initial_heading: f32,
    pub initial_ride_reference: f32,
    pub tick_period: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_odds: SPAWN_ODDS,
            pickup_threshold: PICKUP_THRESHOLD,
            pickup_time_bonus: PICKUP_TIME_BONUS,
            collectible_radius: COLLECTIBLE_RADIUS,
            crash_roll_limit: CRASH_ROLL_LIMIT,
            slope_drag: SLOPE_DRAG,
            step_scale: STEP_SCALE,
            ride_height: RIDE_HEIGHT,
            airborne_margin: AIRBORNE_MARGIN,
            initial_time: INITIAL_TIME,
            low_time_warning: LOW_TIME_WARNING,
            thrust: THRUST,
            steer_step: STEER_STEP,
            coarse_steer_step: COARSE_STEER_STEP,
            roll_step: ROLL_STEP,
            initial_heading: INITIAL_HEADING,
            initial_ride_reference: INITIAL_RIDE_REFERENCE,
            tick_period: TICK_PERIOD,
        }
    }
}

/// Host settings read once at startup.
///
/// Environment variables:
/// - `TERRAIN_RIDER_HEIGHTMAP` (default: `assets/height_map.bmp`)
/// - `TERRAIN_RIDER_SCALE`     (default: `20`)
/// - `TERRAIN_RIDER_SEED`      (optional; random when unset)
/// - `TERRAIN_RIDER_TIME`      (optional initial clock override, in ticks)
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub heightmap: PathBuf,
    pub terrain_scale: f32,
    pub seed: Option<u64>,
    pub initial_time: Option<i32>,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let heightmap = std::env::var("TERRAIN_RIDER_HEIGHTMAP")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HEIGHTMAP));

        Self {
            heightmap,
            terrain_scale: parse_var("TERRAIN_RIDER_SCALE").unwrap_or(TERRAIN_SCALE),
            seed: parse_var("TERRAIN_RIDER_SEED"),
            initial_time: parse_var("TERRAIN_RIDER_TIME"),
        }
    }

    /// Gameplay tuning with the host overrides applied.
    pub fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::default();
        if let Some(time) = self.initial_time {
            config.initial_time = time;
        }
        config
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok().filter(|s| !s.is_empty())?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {name}={raw:?}: not a valid value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_named_constants() {
        let config = GameConfig::default();
        assert_eq!(config.spawn_odds, 5000);
        assert_eq!(config.pickup_threshold, 2.0);
        assert_eq!(config.pickup_time_bonus, 25);
        assert_eq!(config.crash_roll_limit, 25.0);
        assert_eq!(config.slope_drag, 0.00005);
        assert_eq!(config.tick_period, Duration::from_millis(25));
    }

    #[test]
    fn time_override_is_applied() {
        let runtime = RuntimeConfig {
            heightmap: PathBuf::from(DEFAULT_HEIGHTMAP),
            terrain_scale: TERRAIN_SCALE,
            seed: None,
            initial_time: Some(400),
        };
        assert_eq!(runtime.game_config().initial_time, 400);
    }
}
