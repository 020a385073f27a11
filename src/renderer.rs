use glam::Vec3;

use crate::camera::Camera;
use crate::game::Frame;

const NEAR: f32 = 0.1;
const FAR: f32 = 160.0;
const AMBIENT: f32 = 0.3;
const HEADLIGHT_RANGE: f32 = 12.0;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

#[inline]
fn shade(base: [f32; 3], light: f32) -> u32 {
    let c = |v: f32| (v * light).clamp(0.0, 255.0) as u8;
    pack_rgb(c(base[0]), c(base[1]), c(base[2]))
}

/// Lambert term of a (possibly unnormalized) terrain normal.
fn lambert(normal: Vec3, sun: Vec3) -> f32 {
    AMBIENT + normal.normalize_or_zero().dot(sun).max(0.0)
}

/// Draws the terrain, pickups and vehicle as seen from `camera`.
pub fn render_frame(buf: &mut [u32], width: usize, height: usize, frame: &Frame, camera: &Camera) {
    let sky = pack_rgb(51, 51, 51);
    buf[..width * height].fill(sky);

    draw_terrain(buf, width, height, frame, camera);
    draw_sprites(buf, width, height, frame, camera);
}

/// Column-wise height-field march, front to back. `occlusion[x]` is the
/// highest row already covered in that column.
fn draw_terrain(buf: &mut [u32], width: usize, height: usize, frame: &Frame, camera: &Camera) {
    let terrain = frame.terrain;
    let sun = Vec3::new(-0.5, 0.8, 0.1).normalize();
    let grass = [210.0, 230.0, 160.0];
    let (w, h) = (width as f32, height as f32);
    let ground_eye = Vec3::new(camera.eye.x, 0.0, camera.eye.z);
    let vehicle = frame.vehicle.position;

    let mut occlusion: Vec<i32> = vec![height as i32; width];

    for (x, top) in occlusion.iter_mut().enumerate() {
        let angle = camera.yaw - ((x as f32 + 0.5 - 0.5 * w) / camera.fx).atan();
        let dir = Vec3::new(angle.sin(), 0.0, angle.cos());

        let mut dist = 1.0;
        while dist < FAR && *top > 0 {
            let p = ground_eye + dir * dist;
            dist += 0.02 * dist + 0.1;

            let (fx, fz) = (p.x.round(), p.z.round());
            if fx < 0.0 || fz < 0.0 {
                continue;
            }
            let (cx, cz) = (fx as usize, fz as usize);
            if cx >= terrain.width() || cz >= terrain.length() {
                continue;
            }

            let ground = Vec3::new(p.x, terrain.height(cx, cz), p.z);
            let c = camera.world_to_camera(ground);
            let Some([_, sy]) = camera.project(c, w, h, NEAR) else {
                continue;
            };
            let row = sy.floor().max(0.0) as i32;
            if row >= *top {
                continue;
            }

            let mut light = lambert(terrain.normal(cx, cz), sun);
            if frame.hud.headlight && ground.distance(vehicle) < HEADLIGHT_RANGE {
                light += 0.4 * (1.0 - ground.distance(vehicle) / HEADLIGHT_RANGE);
            }
            let color = shade(grass, light);

            let mut idx = row as usize * width + x;
            for _y in row..*top {
                buf[idx] = color;
                idx += width;
            }
            *top = row;
        }
    }
}

struct Sprite {
    pos: Vec3,
    radius: f32,
    color: u32,
}

/// Pickups and the vehicle as flat squares, farthest first.
fn draw_sprites(buf: &mut [u32], width: usize, height: usize, frame: &Frame, camera: &Camera) {
    let mut sprites: Vec<Sprite> = frame
        .collectibles
        .iter()
        .map(|c| {
            let [r, g, b] = c.color.rgb();
            Sprite {
                pos: c.position,
                radius: c.radius,
                color: pack_rgb(r, g, b),
            }
        })
        .collect();
    sprites.push(Sprite {
        pos: frame.vehicle.position,
        radius: 0.6,
        color: pack_rgb(0, 51, 0),
    });

    let depth = |s: &Sprite| camera.world_to_camera(s.pos).z;
    sprites.sort_by(|a, b| {
        depth(b)
            .partial_cmp(&depth(a))
            .unwrap_or(std::cmp::Ordering::Equal) // farthest first
    });

    let (w, h) = (width as f32, height as f32);
    for s in &sprites {
        let c = camera.world_to_camera(s.pos);
        let Some([sx, sy]) = camera.project(c, w, h, NEAR) else {
            continue;
        };
        let half = (s.radius * camera.fx / c.z).max(1.0);
        let x0 = (sx - half).floor().max(0.0) as usize;
        let x1 = ((sx + half).ceil().max(0.0) as usize).min(width);
        let y0 = (sy - half).floor().max(0.0) as usize;
        let y1 = ((sy + half).ceil().max(0.0) as usize).min(height);
        for y in y0..y1 {
            buf[y * width + x0.min(x1)..y * width + x1].fill(s.color);
        }
    }
}
