//! Scheduler Module
//!
//! Runs a callback repeatedly at a fixed interval until cancelled.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, info};

/// Callback invoked on every period.
pub type Tick = Arc<dyn Fn() + Send + Sync>;

// == Scheduler Trait ==
/// Something that can run a [`Tick`] periodically.
pub trait Scheduler: Send + Sync {
    /// Starts calling `tick` every `interval`. The first call happens one
    /// interval from now.
    fn schedule_repeating(&self, interval: Duration, tick: Tick) -> ScheduleHandle;
}

// == Schedule Handle ==
/// Cancels a repetition started by a [`Scheduler`].
///
/// Dropping the handle without calling [`cancel`](Self::cancel) leaves the
/// repetition running.
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduleHandle {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stops the repetition.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for ScheduleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// == Tokio Scheduler ==
/// Runs ticks on a spawned tokio task.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime the caller is running in, if any.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, interval: Duration, tick: Tick) -> ScheduleHandle {
        let task = self.handle.spawn(async move {
            info!("Starting expiry sweep with interval of {:?}", interval);

            loop {
                // Sleep for the configured interval
                tokio::time::sleep(interval).await;
                tick();
            }
        });

        ScheduleHandle::new(move || {
            task.abort();
            debug!("Expiry sweep task aborted");
        })
    }
}

// == Manual Scheduler ==
#[derive(Default)]
struct ManualState {
    next_id: u64,
    active: Vec<(u64, Duration, Tick)>,
    captured: Vec<Tick>,
}

/// A scheduler that only runs ticks when [`fire`](Self::fire) is called.
///
/// Clones share state, so a test can keep one handle while the cache owns
/// another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every active tick once, returning how many ran.
    pub fn fire(&self) -> usize {
        let ticks: Vec<Tick> = self
            .state
            .lock()
            .active
            .iter()
            .map(|(_, _, tick)| Arc::clone(tick))
            .collect();

        for tick in &ticks {
            tick();
        }
        ticks.len()
    }

    /// Number of repetitions not yet cancelled.
    pub fn active_count(&self) -> usize {
        self.state.lock().active.len()
    }

    /// Intervals of the active repetitions.
    pub fn intervals(&self) -> Vec<Duration> {
        self.state
            .lock()
            .active
            .iter()
            .map(|(_, interval, _)| *interval)
            .collect()
    }

    /// Every tick ever scheduled, cancelled ones included.
    pub fn captured(&self) -> Vec<Tick> {
        self.state.lock().captured.clone()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, interval: Duration, tick: Tick) -> ScheduleHandle {
        let id = {
            let mut state = self.state.lock();
            state.next_id += 1;
            let id = state.next_id;
            state.captured.push(Arc::clone(&tick));
            state.active.push((id, interval, tick));
            id
        };

        let state = Arc::clone(&self.state);
        ScheduleHandle::new(move || {
            state.lock().active.retain(|(existing, _, _)| *existing != id);
        })
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualScheduler")
            .field("active", &state.active.len())
            .field("captured", &state.captured.len())
            .finish()
    }
}
