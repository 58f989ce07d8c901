//! Background tasks module
//!
//! This module contains the periodic tick source that drives a running timer.

pub mod ticker;

// Re-export main items
pub use ticker::{spawn_ticker, TickHandle, TICK_PERIOD};
