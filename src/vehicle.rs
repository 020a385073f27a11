use glam::Vec3;

use crate::config::GameConfig;

/// The rider. Angles are in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleState {
    /// `y` follows the terrain (plus ride height).
    pub position: Vec3,
    /// Yaw in `[0, 360)`; 0 faces +z, 90 faces +x.
    pub heading: f32,
    pub roll: f32,
    /// Terrain tilt under the vehicle, zeroed while airborne.
    pub pitch: f32,
    pub velocity: f32,
    pub acceleration: f32,
    /// Ground height plus ride height from the previous tick.
    pub ride_reference: f32,
}

/// What a renderer needs to place the vehicle model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleTransform {
    pub position: Vec3,
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl VehicleState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            heading: wrap_degrees(config.initial_heading),
            roll: 0.0,
            pitch: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
            ride_reference: config.initial_ride_reference,
        }
    }

    /// Turns by `degrees` (positive is left) and leans the opposite way by `roll`.
    pub fn steer(&mut self, degrees: f32, roll: f32) {
        self.heading = wrap_degrees(self.heading + degrees);
        if degrees > 0.0 {
            self.roll -= roll;
        } else if degrees < 0.0 {
            self.roll += roll;
        }
    }

    /// Coarse heading change without leaning.
    pub fn nudge(&mut self, degrees: f32) {
        self.heading = wrap_degrees(self.heading + degrees);
    }

    pub fn throttle(&mut self, delta: f32) {
        self.velocity += delta;
    }

    /// Unit vector along the heading in the ground plane.
    pub fn forward(&self) -> Vec3 {
        let (s, c) = self.heading.to_radians().sin_cos();
        Vec3::new(s, 0.0, c)
    }

    pub fn transform(&self) -> VehicleTransform {
        VehicleTransform {
            position: self.position,
            heading: self.heading,
            pitch: self.pitch,
            roll: self.roll,
        }
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
