//! Countdown timer background task

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::{AppState, Tick};

/// Owner of a running countdown task. Dropping it aborts the task.
#[derive(Debug)]
pub struct TimerHandle {
    generation: u64,
    handle: JoinHandle<()>,
}

impl TimerHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the countdown for session `generation`, calling `on_expire` once
/// when it reaches zero
pub fn spawn_countdown_timer<F>(state: Arc<AppState>, generation: u64, on_expire: F) -> TimerHandle
where
    F: FnOnce(&AppState) + Send + 'static,
{
    let handle = tokio::spawn(countdown_timer_task(state, generation, on_expire));
    TimerHandle { generation, handle }
}

/// Background task that ticks the session countdown once per second
async fn countdown_timer_task<F>(state: Arc<AppState>, generation: u64, on_expire: F)
where
    F: FnOnce(&AppState) + Send + 'static,
{
    info!("Starting countdown timer for generation {}", generation);

    let period = Duration::from_secs(1);
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.tick_countdown(generation) {
            Ok(Tick::Running(remaining)) => {
                debug!("Countdown {}: {}s remaining", generation, remaining);
            }
            Ok(Tick::Expired) => {
                info!("Countdown {} expired, finishing quiz", generation);
                on_expire(&*state);
                break;
            }
            Ok(Tick::Idle) => {
                debug!("Countdown {} no longer active, stopping", generation);
                break;
            }
            Err(e) => {
                error!("Failed to tick countdown: {}", e);
                break;
            }
        }
    }
}
