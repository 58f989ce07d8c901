//! Main application state: the timer and its tick source

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{runtime::Handle, sync::watch};
use tracing::{debug, info, warn};

use super::TimerState;
use crate::tasks::{spawn_ticker, TickHandle, TICK_PERIOD};

/// Timer state together with the tick source currently driving it
#[derive(Debug, Default)]
struct TimerSlot {
    state: TimerState,
    ticker: Option<TickHandle>,
    next_generation: u64,
    shut_down: bool,
}

/// Result of applying a user action to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: TimerState,
    pub current: TimerState,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Main application state that owns the timer and its tick source
#[derive(Debug)]
pub struct AppState {
    /// Timer state and the tick handle, locked together so a transition and
    /// the matching tick acquire/release happen atomically
    timer: Mutex<TimerSlot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState holding an idle timer
    pub fn new(port: u16, host: String) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        Self {
            timer: Mutex::new(TimerSlot::default()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerSlot>, String> {
        self.timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Lock the timer for a user action, refusing once it has been shut down
    fn lock_live_timer(&self) -> Result<MutexGuard<'_, TimerSlot>, String> {
        let slot = self.lock_timer()?;
        if slot.shut_down {
            return Err("Timer has been shut down".to_string());
        }
        Ok(slot)
    }

    /// Apply a pure transition, record the action and notify watchers
    fn apply<F>(&self, action: &str, transition: F) -> Result<Transition, String>
    where
        F: FnOnce(TimerState) -> TimerState,
    {
        let mut slot = self.lock_live_timer()?;
        let previous = slot.state;
        slot.state = transition(previous);
        let current = slot.state;
        drop(slot);

        self.record_action(action);
        self.publish(current);

        Ok(Transition { previous, current })
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, state: TimerState) {
        if let Err(e) = self.timer_update_tx.send(state) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// Raise the limit by one minute
    pub fn increase_limit(&self) -> Result<Transition, String> {
        let transition = self.apply("increase-limit", TimerState::increase_limit)?;
        if transition.changed() {
            info!("Timer limit increased to {} minutes", transition.current.limit_minutes);
        } else {
            warn!(
                "Ignoring limit increase: elapsed={}s, limit={}min",
                transition.current.elapsed_seconds, transition.current.limit_minutes
            );
        }
        Ok(transition)
    }

    /// Lower the limit by one minute, never below one
    pub fn decrease_limit(&self) -> Result<Transition, String> {
        let transition = self.apply("decrease-limit", TimerState::decrease_limit)?;
        if transition.changed() {
            info!("Timer limit decreased to {} minutes", transition.current.limit_minutes);
        } else {
            warn!(
                "Ignoring limit decrease: elapsed={}s, limit={}min",
                transition.current.elapsed_seconds, transition.current.limit_minutes
            );
        }
        Ok(transition)
    }

    /// Start or pause the timer, acquiring or releasing the tick source
    ///
    /// Fails without touching the state when called outside a tokio runtime.
    pub fn start_or_pause(self: &Arc<Self>) -> Result<Transition, String> {
        let runtime = Handle::try_current()
            .map_err(|e| format!("Cannot start timer without a runtime: {}", e))?;
        let mut slot = self.lock_live_timer()?;

        let previous = slot.state;
        slot.state = previous.start_or_pause();
        let current = slot.state;

        // Cancel any previous source before creating a new one
        slot.ticker.take();
        if current.is_running {
            let generation = slot.next_generation;
            slot.next_generation += 1;
            slot.ticker = Some(spawn_ticker(
                &runtime,
                Arc::downgrade(self),
                generation,
                TICK_PERIOD,
            ));
            info!(
                "Timer started: elapsed={}s, limit={}min",
                current.elapsed_seconds, current.limit_minutes
            );
        } else {
            info!(
                "Timer paused: elapsed={}s, limit={}min",
                current.elapsed_seconds, current.limit_minutes
            );
        }
        drop(slot);

        self.record_action(if current.is_running { "start" } else { "pause" });
        self.publish(current);

        Ok(Transition { previous, current })
    }

    /// Cancel the tick source and restore the initial snapshot
    pub fn reset(&self) -> Result<Transition, String> {
        let mut slot = self.lock_live_timer()?;
        slot.ticker.take();
        let previous = slot.state;
        slot.state = previous.reset();
        let current = slot.state;
        drop(slot);

        info!("Timer reset");
        self.record_action("reset");
        self.publish(current);

        Ok(Transition { previous, current })
    }

    /// Feed one tick from the source with the given generation.
    ///
    /// Returns whether that source should keep ticking. Ticks from a source
    /// that has been replaced or cancelled are ignored.
    pub fn tick(&self, generation: u64) -> Result<bool, String> {
        let mut slot = self.lock_timer()?;

        let current_generation = slot.ticker.as_ref().map(TickHandle::generation);
        if current_generation != Some(generation) {
            debug!("Ignoring tick from stale source {}", generation);
            return Ok(false);
        }

        slot.state = slot.state.tick();
        let current = slot.state;
        let keep_running = current.is_running;
        if !keep_running {
            slot.ticker.take();
        }
        drop(slot);

        if keep_running {
            debug!("Tick: elapsed={}s of {}s", current.elapsed_seconds, current.limit_seconds());
        } else {
            info!("Timer completed after {} minutes", current.limit_minutes);
        }
        self.publish(current);

        Ok(keep_running)
    }

    /// Tear the timer down: cancel the tick source and refuse further actions
    pub fn shutdown(&self) -> Result<TimerState, String> {
        let mut slot = self.lock_timer()?;
        slot.ticker.take();
        slot.shut_down = true;
        slot.state.is_running = false;
        let current = slot.state;
        drop(slot);

        info!("Timer shut down");
        self.publish(current);
        Ok(current)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.lock_timer().map(|slot| slot.state)
    }

    /// Whether a tick source is currently held
    pub fn has_tick_source(&self) -> Result<bool, String> {
        let slot = self.lock_timer()?;
        let active = matches!(&slot.ticker, Some(ticker) if !ticker.is_finished());
        Ok(active)
    }

    /// Subscribe to timer state updates
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
