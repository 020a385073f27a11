use glam::Vec3;

use crate::vehicle::VehicleState;

/// The five chase-camera placements, in view-key order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    Helicopter,
    FrontWheel,
    Driver,
    #[default]
    Overhead,
    Chase,
}

impl CameraMode {
    pub const ALL: [CameraMode; 5] = [
        Self::Helicopter,
        Self::FrontWheel,
        Self::Driver,
        Self::Overhead,
        Self::Chase,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Helicopter => 0,
            Self::FrontWheel => 1,
            Self::Driver => 2,
            Self::Overhead => 3,
            Self::Chase => 4,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Eye and look-at point for `mode`, anchored on the vehicle.
pub fn compute_eye_and_target(mode: CameraMode, vehicle: &VehicleState) -> (Vec3, Vec3) {
    let p = vehicle.position;
    let (s, c) = vehicle.heading.to_radians().sin_cos();
    match mode {
        CameraMode::Helicopter => (
            Vec3::new(p.x - 10.0 * s, p.y + 10.0, p.z - 10.0 * c),
            Vec3::new(p.x + 4.0 * s, p.y, p.z + 4.0 * c),
        ),
        CameraMode::FrontWheel => (
            Vec3::new(p.x, p.y + 2.0, p.z),
            Vec3::new(p.x + 5.0 * s, p.y + 2.0, p.z + 5.0 * c),
        ),
        CameraMode::Driver => (
            Vec3::new(p.x - 2.8 * s, p.y + 1.0, p.z - 2.8 * c),
            Vec3::new(p.x + 2.0 * s, p.y + 2.0, p.z + 4.0 * c),
        ),
        CameraMode::Overhead => (
            Vec3::new(p.x - 10.0 * s, p.y + 10.0, p.z - 12.0 * c),
            Vec3::new(p.x + 10.0 * s, p.y, p.z + 10.0 * c),
        ),
        CameraMode::Chase => (
            Vec3::new(p.x - 5.0 * s, p.y + 1.0, p.z - 10.0 * c),
            Vec3::new(p.x + 5.0 * s, p.y + 2.0, p.z + 5.0 * c),
        ),
    }
}

/// Pinhole camera used by the software renderer.
pub struct Camera {
    pub eye: Vec3,
    pub yaw: f32,   // radians, 0 looks along +z
    pub pitch: f32, // radians, positive looks down
    pub fx: f32,    // horizontal focal factor
    pub fy: f32,    // vertical focal factor
}

impl Camera {
    pub fn look_at(eye: Vec3, target: Vec3) -> Self {
        let d = target - eye;
        let flat = (d.x * d.x + d.z * d.z).sqrt();
        Self {
            eye,
            yaw: d.x.atan2(d.z),
            pitch: (-d.y).atan2(flat.max(f32::EPSILON)),
            fx: 0.0,
            fy: 0.0,
        }
    }

    /// World point to camera space: `(right, up, forward)`.
    #[inline]
    pub fn world_to_camera(&self, p: Vec3) -> Vec3 {
        let d = p - self.eye;
        let (sy, cy) = self.yaw.sin_cos();
        let right = d.z * sy - d.x * cy;
        let fwd = d.x * sy + d.z * cy;
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(right, d.y * cp + fwd * sp, fwd * cp - d.y * sp)
    }

    /// Screen position of a camera-space point, or `None` behind the near plane.
    #[inline]
    pub fn project(&self, c: Vec3, width: f32, height: f32, near: f32) -> Option<[f32; 2]> {
        if c.z <= near {
            return None;
        }
        Some([
            0.5 * width + self.fx * (c.x / c.z),
            0.5 * height - self.fy * (c.y / c.z),
        ])
    }

    pub fn set_fov_from_horizontal(&mut self, width: f32, fov_x_deg: f32) {
        let fov_x = fov_x_deg.to_radians();
        self.fx = 0.5 * width / (0.5 * fov_x).tan();
        // square pixels
        self.fy = self.fx;
    }
}
