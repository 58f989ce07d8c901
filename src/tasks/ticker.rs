//! Periodic tick source driving a running timer

use std::{sync::Weak, time::Duration};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::state::AppState;

/// Period between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owned handle to a running tick task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TickHandle {
    generation: u64,
    handle: JoinHandle<()>,
}

impl TickHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        debug!("Cancelling tick source generation {}", self.generation);
        self.handle.abort();
    }
}

/// Spawn a tick task on `runtime` feeding `state` once per `period`.
///
/// The first tick fires one period after the call, however late the task is
/// first polled. The task stops when the state is dropped, when its
/// generation is no longer current, or when the timer stops running.
pub fn spawn_ticker(
    runtime: &Handle,
    state: Weak<AppState>,
    generation: u64,
    period: Duration,
) -> TickHandle {
    debug!("Starting tick source generation {}", generation);

    let first_tick = Instant::now() + period;
    let handle = runtime.spawn(async move {
        let mut interval = interval_at(first_tick, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let Some(app) = state.upgrade() else {
                debug!("Timer state dropped, tick source {} exiting", generation);
                break;
            };

            match app.tick(generation) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Tick source {} no longer needed, exiting", generation);
                    break;
                }
                Err(e) => {
                    tracing::error!("Tick source {} failed: {}", generation, e);
                    break;
                }
            }
        }
    });

    TickHandle { generation, handle }
}
