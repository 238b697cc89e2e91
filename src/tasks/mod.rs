//! Background Tasks Module
//!
//! Scheduling of work that runs independently of callers.
//!
//! # Tasks
//! - Expiry sweep: Removes expired cache entries at the configured interval

mod cleanup;
mod scheduler;

pub(crate) use cleanup::sweep_task;
pub use scheduler::{ManualScheduler, ScheduleHandle, Scheduler, Tick, TokioScheduler};
