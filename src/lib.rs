//! Digital Timer - A state-managed HTTP server exposing a countdown timer
//!
//! This library provides the timer state machine, its display formatting,
//! the periodic tick source, and the HTTP controls to drive them.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerState, TimerView};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
