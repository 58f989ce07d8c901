//! Presentation of the timer state as a renderable view

use serde::{Deserialize, Serialize};

use super::{TimerPhase, TimerState};

pub const HEADING: &str = "Digital Timer";
pub const LIMIT_TEXT: &str = "Set Timer Limit";

pub const PLAY_ICON_URL: &str = "https://assets.ccbp.in/frontend/react-js/play-icon-img.png";
pub const PAUSE_ICON_URL: &str = "https://assets.ccbp.in/frontend/react-js/pause-icon-img.png";
pub const RESET_ICON_URL: &str = "https://assets.ccbp.in/frontend/react-js/reset-icon-img.png";

/// A labelled button with an icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlView {
    pub label: String,
    pub icon_url: String,
    pub icon_alt: String,
}

/// Everything needed to draw the timer widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub heading: String,
    pub time: String,
    pub status_label: String,
    pub control: ControlView,
    pub reset: ControlView,
    pub limit_text: String,
    pub limit_minutes: u32,
    pub limit_controls_enabled: bool,
    pub phase: TimerPhase,
    pub state: TimerState,
}

impl TimerView {
    /// Render a view from the current state
    pub fn render(state: &TimerState) -> Self {
        Self {
            heading: HEADING.to_string(),
            time: format_remaining(state),
            status_label: status_label(state).to_string(),
            control: start_or_pause_control(state),
            reset: ControlView {
                label: "Reset".to_string(),
                icon_url: RESET_ICON_URL.to_string(),
                icon_alt: "reset icon".to_string(),
            },
            limit_text: LIMIT_TEXT.to_string(),
            limit_minutes: state.limit_minutes,
            limit_controls_enabled: state.limit_controls_enabled(),
            phase: state.phase(),
            state: *state,
        }
    }
}

/// Remaining time as `MM:SS`
pub fn format_remaining(state: &TimerState) -> String {
    let remaining = state.remaining_seconds();
    format!("{:02}:{:02}", remaining / 60, remaining % 60)
}

/// "Running" while the timer runs. A completed timer also reads "Paused".
pub fn status_label(state: &TimerState) -> &'static str {
    if state.is_running { "Running" } else { "Paused" }
}

fn start_or_pause_control(state: &TimerState) -> ControlView {
    let (label, icon_url, icon_alt) = if state.is_running {
        ("Pause", PAUSE_ICON_URL, "pause icon")
    } else {
        ("Start", PLAY_ICON_URL, "play icon")
    };
    ControlView {
        label: label.to_string(),
        icon_url: icon_url.to_string(),
        icon_alt: icon_alt.to_string(),
    }
}
