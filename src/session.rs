use crate::camera::CameraMode;
use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    TimeExpired,
    Crashed,
}

/// `NotStarted -> Running <-> Paused`, and `GameOver` once either ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Running,
    Paused,
    GameOver(GameOverReason),
}

/// Score, clock and UI-visible flags for one game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub score: u32,
    /// Ticks left; pickups add to it.
    pub time_remaining: i32,
    pub view: CameraMode,
    pub headlight: bool,
    phase: SessionPhase,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            time_remaining: config.initial_time,
            view: CameraMode::default(),
            headlight: true,
            phase: SessionPhase::NotStarted,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn is_started(&self) -> bool {
        self.phase != SessionPhase::NotStarted
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, SessionPhase::GameOver(_))
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.phase {
            SessionPhase::GameOver(reason) => Some(reason),
            _ => None,
        }
    }

    /// Returns true if the session was waiting to start.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::NotStarted {
            return false;
        }
        self.phase = SessionPhase::Running;
        log::info!("session started with {} ticks on the clock", self.time_remaining);
        true
    }

    /// Flips between running and paused; no effect in any other phase.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            SessionPhase::Running => {
                log::info!("paused");
                SessionPhase::Paused
            }
            SessionPhase::Paused => {
                log::info!("resumed");
                SessionPhase::Running
            }
            other => other,
        };
    }

    pub fn end(&mut self, reason: GameOverReason) {
        if self.is_game_over() {
            return;
        }
        log::info!(
            "game over ({reason:?}): score {}, time {}",
            self.score,
            self.time_remaining
        );
        self.phase = SessionPhase::GameOver(reason);
    }

    /// Burns one tick off the clock; returns true once time has run out.
    pub fn tick_clock(&mut self) -> bool {
        self.time_remaining -= 1;
        self.time_remaining <= 0
    }

    pub fn award(&mut self, pickups: usize, time_bonus: i32) {
        self.score += pickups as u32;
        self.time_remaining += time_bonus * pickups as i32;
    }

    pub fn cycle_view(&mut self) {
        self.view = self.view.next();
        log::debug!("camera view {:?}", self.view);
    }

    pub fn toggle_headlight(&mut self) {
        self.headlight = !self.headlight;
    }

    /// Overlay message for the current phase, if any.
    pub fn banner(&self) -> Option<&'static str> {
        match self.phase {
            SessionPhase::NotStarted => Some("Press Enter to start the game!"),
            SessionPhase::Paused => Some("Paused"),
            SessionPhase::Running => None,
            SessionPhase::GameOver(GameOverReason::TimeExpired) => {
                Some("Time up!! Game over! Press Q to Quit!")
            }
            SessionPhase::GameOver(GameOverReason::Crashed) => {
                Some("Crashed!! Game over! Press Q to Quit!")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(&GameConfig::default())
    }

    #[test]
    fn pause_needs_a_started_game() {
        let mut s = session();
        s.toggle_pause();
        assert_eq!(s.phase(), SessionPhase::NotStarted);

        assert!(s.start());
        assert!(!s.start());
        s.toggle_pause();
        assert!(s.is_paused());
        s.toggle_pause();
        assert!(s.is_running());
    }

    #[test]
    fn game_over_is_sticky() {
        let mut s = session();
        s.start();
        s.end(GameOverReason::Crashed);
        s.toggle_pause();
        s.end(GameOverReason::TimeExpired);
        assert_eq!(s.game_over_reason(), Some(GameOverReason::Crashed));
        assert!(!s.start());
        assert!(s.is_started());
    }

    #[test]
    fn award_scales_with_pickups() {
        let mut s = session();
        s.award(2, 25);
        assert_eq!(s.score, 2);
        assert_eq!(s.time_remaining, 150);
    }

    #[test]
    fn clock_runs_out_at_zero() {
        let mut s = session();
        s.time_remaining = 2;
        assert!(!s.tick_clock());
        assert!(s.tick_clock());
        assert_eq!(s.time_remaining, 0);
    }

    #[test]
    fn banners_follow_phase() {
        let mut s = session();
        assert_eq!(s.banner(), Some("Press Enter to start the game!"));
        s.start();
        assert_eq!(s.banner(), None);
        s.end(GameOverReason::TimeExpired);
        assert!(s.banner().unwrap().starts_with("Time up"));
    }
}
