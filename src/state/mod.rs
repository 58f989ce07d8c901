//! State management module
//!
//! This module contains the timer state machine, its presentation, and the
//! application state that drives it.

pub mod app_state;
pub mod display;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, Transition};
pub use display::{format_remaining, status_label, ControlView, TimerView};
pub use timer_state::{TimerPhase, TimerState, DEFAULT_LIMIT_MINUTES};
