use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::camera::compute_eye_and_target;
use crate::collectibles::{Collectible, Collectibles};
use crate::config::GameConfig;
use crate::input::InputEvent;
use crate::physics::{self, StepOutcome};
use crate::session::{GameOverReason, GameSession};
use crate::terrain::HeightField;
use crate::vehicle::{VehicleState, VehicleTransform};

/// What the host should do after an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// UI-visible session values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub time_remaining: i32,
    pub paused: bool,
    pub started: bool,
    pub game_over: bool,
    pub reason: Option<GameOverReason>,
    pub view_index: usize,
    pub headlight: bool,
    pub time_low: bool,
    pub banner: Option<&'static str>,
}

/// Everything a renderer needs for one frame.
pub struct Frame<'a> {
    pub terrain: &'a HeightField,
    pub vehicle: VehicleTransform,
    pub collectibles: &'a [Collectible],
    pub eye: Vec3,
    pub target: Vec3,
    pub hud: Hud,
}

/// Owns one play session on a fixed terrain.
pub struct Game {
    config: GameConfig,
    terrain: HeightField,
    vehicle: VehicleState,
    session: GameSession,
    collectibles: Collectibles,
    rng: StdRng,
    eye: Vec3,
    target: Vec3,
}

impl Game {
    pub fn new(terrain: HeightField, config: GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let collectibles = Collectibles::scatter(&terrain, &config, &mut rng);
        let vehicle = VehicleState::new(&config);
        let session = GameSession::new(&config);
        let (eye, target) = compute_eye_and_target(session.view, &vehicle);
        Self {
            config,
            terrain,
            vehicle,
            session,
            collectibles,
            rng,
            eye,
            target,
        }
    }

    /// Starts over on the same terrain with a fresh scatter of pickups.
    pub fn reset(&mut self) {
        self.vehicle = VehicleState::new(&self.config);
        self.session = GameSession::new(&self.config);
        self.collectibles = Collectibles::scatter(&self.terrain, &self.config, &mut self.rng);
        self.update_camera();
        log::info!("new game");
    }

    /// One fixed-period update. Does nothing unless running.
    pub fn tick(&mut self) -> StepOutcome {
        let outcome = physics::step(
            &mut self.session,
            &mut self.vehicle,
            &mut self.collectibles,
            &self.terrain,
            &self.config,
        );
        if let StepOutcome::Advanced { .. } = outcome {
            self.update_camera();
        }
        outcome
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Control {
        let running = self.session.is_running();
        match event {
            InputEvent::Quit => {
                log::info!("quit requested");
                return Control::Quit;
            }
            InputEvent::Confirm => {
                self.session.start();
            }
            InputEvent::TogglePause => self.session.toggle_pause(),
            InputEvent::CycleView => {
                self.session.cycle_view();
                self.update_camera();
            }
            InputEvent::ToggleHeadlight => self.session.toggle_headlight(),
            InputEvent::SteerLeft if running => {
                self.vehicle.steer(self.config.steer_step, self.config.roll_step)
            }
            InputEvent::SteerRight if running => {
                self.vehicle.steer(-self.config.steer_step, self.config.roll_step)
            }
            InputEvent::NudgeLeft if running => self.vehicle.nudge(self.config.coarse_steer_step),
            InputEvent::NudgeRight if running => {
                self.vehicle.nudge(-self.config.coarse_steer_step)
            }
            InputEvent::ThrottleUp if running => self.vehicle.throttle(self.config.thrust),
            InputEvent::ThrottleDown if running => self.vehicle.throttle(-self.config.thrust),
            _ => {}
        }
        Control::Continue
    }

    fn update_camera(&mut self) {
        let (eye, target) = compute_eye_and_target(self.session.view, &self.vehicle);
        self.eye = eye;
        self.target = target;
    }

    pub fn hud(&self) -> Hud {
        let s = &self.session;
        Hud {
            score: s.score,
            time_remaining: s.time_remaining,
            paused: s.is_paused(),
            started: s.is_started(),
            game_over: s.is_game_over(),
            reason: s.game_over_reason(),
            view_index: s.view.index(),
            headlight: s.headlight,
            time_low: s.time_remaining <= self.config.low_time_warning,
            banner: s.banner(),
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            terrain: &self.terrain,
            vehicle: self.vehicle.transform(),
            collectibles: self.collectibles.as_slice(),
            eye: self.eye,
            target: self.target,
            hud: self.hud(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn terrain(&self) -> &HeightField {
        &self.terrain
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn vehicle_mut(&mut self) -> &mut VehicleState {
        &mut self.vehicle
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn collectibles(&self) -> &Collectibles {
        &self.collectibles
    }

    pub fn collectibles_mut(&mut self) -> &mut Collectibles {
        &mut self.collectibles
    }
}
