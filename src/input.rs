use winit::keyboard::KeyCode;

/// Discrete player commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    TogglePause,
    CycleView,
    Quit,
    Confirm,
    SteerLeft,
    SteerRight,
    ThrottleUp,
    ThrottleDown,
    /// Coarse heading change, no lean.
    NudgeLeft,
    NudgeRight,
    ToggleHeadlight,
}

impl InputEvent {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        let event = match code {
            KeyCode::KeyP => Self::TogglePause,
            KeyCode::KeyV => Self::CycleView,
            KeyCode::KeyQ | KeyCode::Escape => Self::Quit,
            KeyCode::Enter | KeyCode::NumpadEnter => Self::Confirm,
            KeyCode::ArrowLeft => Self::SteerLeft,
            KeyCode::ArrowRight => Self::SteerRight,
            KeyCode::ArrowUp => Self::ThrottleUp,
            KeyCode::ArrowDown => Self::ThrottleDown,
            KeyCode::KeyA => Self::NudgeLeft,
            KeyCode::KeyD => Self::NudgeRight,
            KeyCode::KeyH => Self::ToggleHeadlight,
            _ => return None,
        };
        Some(event)
    }
}
