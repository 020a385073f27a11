//! Per-tick vehicle simulation.
//!
//! One call to [`step`] burns a tick off the clock, hands out pickups, tilts
//! the vehicle to the terrain under it, integrates velocity along the
//! heading, follows the ground (holding height for one tick over sharp
//! drops) and finally checks for a roll-over.

use glam::Vec3;

use crate::collectibles::Collectibles;
use crate::config::GameConfig;
use crate::session::{GameOverReason, GameSession};
use crate::terrain::HeightField;
use crate::vehicle::VehicleState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session wasn't running; nothing moved.
    Idle,
    Advanced { collected: usize },
    GameOver(GameOverReason),
}

pub fn step(
    session: &mut GameSession,
    vehicle: &mut VehicleState,
    collectibles: &mut Collectibles,
    terrain: &HeightField,
    config: &GameConfig,
) -> StepOutcome {
    if !session.is_running() {
        return StepOutcome::Idle;
    }

    if session.tick_clock() {
        session.end(GameOverReason::TimeExpired);
        return StepOutcome::GameOver(GameOverReason::TimeExpired);
    }

    let collected = collectibles.collect_near(vehicle.position, config.pickup_threshold);
    if collected > 0 {
        session.award(collected, config.pickup_time_bonus);
        log::debug!(
            "picked up {collected}, score {} time {}",
            session.score,
            session.time_remaining
        );
    }

    follow_slope(vehicle, terrain, config);
    integrate(vehicle, config);
    follow_ground(vehicle, terrain, config);

    if vehicle.roll.abs() > config.crash_roll_limit {
        session.end(GameOverReason::Crashed);
        return StepOutcome::GameOver(GameOverReason::Crashed);
    }

    StepOutcome::Advanced { collected }
}

/// Angle in degrees between `normal` and straight up.
pub fn tilt_degrees(normal: Vec3) -> f32 {
    let len = normal.length();
    if len == 0.0 {
        return 0.0;
    }
    (normal.y / len).clamp(-1.0, 1.0).acos().to_degrees()
}

fn follow_slope(vehicle: &mut VehicleState, terrain: &HeightField, config: &GameConfig) {
    let (x, z) = terrain.cell_at(vehicle.position.x, vehicle.position.z);
    let theta = tilt_degrees(terrain.normal(x, z));
    vehicle.pitch = theta;
    vehicle.acceleration -= config.slope_drag * theta.to_radians().sin();
    vehicle.velocity += vehicle.acceleration;
}

fn integrate(vehicle: &mut VehicleState, config: &GameConfig) {
    let (s, c) = vehicle.heading.to_radians().sin_cos();
    let travel = vehicle.velocity * config.step_scale;
    vehicle.position.z += travel * c;
    vehicle.position.x += travel * s;
}

fn follow_ground(vehicle: &mut VehicleState, terrain: &HeightField, config: &GameConfig) {
    let (x, z) = terrain.cell_at(vehicle.position.x, vehicle.position.z);
    let ground = terrain.height(x, z) + config.ride_height;

    if vehicle.ride_reference > ground + config.airborne_margin {
        // Off a ledge: hang at the old height for this tick.
        vehicle.position.y = vehicle.ride_reference;
        vehicle.pitch = 0.0;
    } else {
        vehicle.position.y = ground;
    }
    vehicle.ride_reference = ground;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Rig {
        session: GameSession,
        vehicle: VehicleState,
        collectibles: Collectibles,
        terrain: HeightField,
        config: GameConfig,
    }

    impl Rig {
        fn flat(size: usize) -> Self {
            let config = GameConfig::default();
            let mut session = GameSession::new(&config);
            session.start();
            Self {
                session,
                vehicle: VehicleState::new(&config),
                collectibles: Collectibles::default(),
                terrain: HeightField::new(size, size).unwrap(),
                config,
            }
        }

        fn step(&mut self) -> StepOutcome {
            step(
                &mut self.session,
                &mut self.vehicle,
                &mut self.collectibles,
                &self.terrain,
                &self.config,
            )
        }
    }

    #[test]
    fn tilt_of_up_is_zero() {
        assert_eq!(tilt_degrees(Vec3::new(0.0, 12.0, 0.0)), 0.0);
        assert_relative_eq!(tilt_degrees(Vec3::new(1.0, 1.0, 0.0)), 45.0, epsilon = 1e-4);
        assert_eq!(tilt_degrees(Vec3::ZERO), 0.0);
    }

    #[test]
    fn idle_unless_running() {
        let mut rig = Rig::flat(4);
        rig.session.toggle_pause();
        let before = rig.vehicle.clone();
        assert_eq!(rig.step(), StepOutcome::Idle);
        assert_eq!(rig.vehicle, before);
        assert_eq!(rig.session.time_remaining, 100);
    }

    #[test]
    fn flat_ground_keeps_speed() {
        let mut rig = Rig::flat(20);
        rig.vehicle.heading = 0.0;
        rig.vehicle.position = Vec3::new(5.0, 1.0, 5.0);
        rig.vehicle.velocity = 1.0;
        rig.step();
        assert_eq!(rig.vehicle.pitch, 0.0);
        assert_eq!(rig.vehicle.acceleration, 0.0);
        assert_relative_eq!(rig.vehicle.position.z, 5.1, epsilon = 1e-5);
        assert_relative_eq!(rig.vehicle.position.x, 5.0, epsilon = 1e-5);
        assert_eq!(rig.vehicle.position.y, 1.0);
    }

    #[test]
    fn slope_drags_and_tilts() {
        let mut rig = Rig::flat(9);
        for z in 0..9 {
            for x in 0..9 {
                rig.terrain.set_height(x, z, x as f32);
            }
        }
        rig.vehicle.position = Vec3::new(4.0, 5.0, 4.0);
        rig.step();
        assert_relative_eq!(rig.vehicle.pitch, 45.0, epsilon = 1e-3);
        let drag = 0.00005 * 45f32.to_radians().sin();
        assert_relative_eq!(rig.vehicle.acceleration, -drag, epsilon = 1e-9);
        assert_relative_eq!(rig.vehicle.velocity, -drag, epsilon = 1e-9);
    }

    #[test]
    fn sharp_drop_holds_height_for_one_tick() {
        let mut rig = Rig::flat(6);
        rig.vehicle.position = Vec3::new(2.0, 0.0, 2.0);
        rig.vehicle.ride_reference = 4.0;
        rig.step();
        assert_eq!(rig.vehicle.position.y, 4.0);
        assert_eq!(rig.vehicle.pitch, 0.0);
        assert_eq!(rig.vehicle.ride_reference, 1.0);

        rig.step();
        assert_eq!(rig.vehicle.position.y, 1.0);
    }

    #[test]
    fn small_drop_stays_grounded() {
        let mut rig = Rig::flat(6);
        rig.vehicle.position = Vec3::new(2.0, 0.0, 2.0);
        rig.vehicle.ride_reference = 1.05;
        rig.step();
        assert_eq!(rig.vehicle.position.y, 1.0);
    }

    #[test]
    fn off_grid_position_uses_edge_cell() {
        let mut rig = Rig::flat(4);
        rig.terrain.set_height(3, 3, 2.0);
        rig.vehicle.position = Vec3::new(40.0, 0.0, 40.0);
        assert!(matches!(rig.step(), StepOutcome::Advanced { .. }));
        assert_eq!(rig.vehicle.position.y, 3.0);
    }

    #[test]
    fn roll_past_limit_crashes() {
        let mut rig = Rig::flat(4);
        rig.vehicle.roll = -26.0;
        assert_eq!(rig.step(), StepOutcome::GameOver(GameOverReason::Crashed));
        assert!(rig.session.is_game_over());
    }

    #[test]
    fn roll_at_limit_is_fine() {
        let mut rig = Rig::flat(4);
        rig.vehicle.roll = 25.0;
        assert!(matches!(rig.step(), StepOutcome::Advanced { .. }));
    }

    #[test]
    fn expiry_stops_the_tick() {
        let mut rig = Rig::flat(4);
        rig.session.time_remaining = 1;
        rig.vehicle.velocity = 5.0;
        let before = rig.vehicle.position;
        assert_eq!(rig.step(), StepOutcome::GameOver(GameOverReason::TimeExpired));
        assert_eq!(rig.vehicle.position, before);
        assert_eq!(rig.session.time_remaining, 0);
    }
}
