//! Timezone-aware task scheduler.
//!
//! Ticks on a fixed interval and fires registered tasks at their scheduled
//! local times: the daily posts and the multi-day problem cadence.

pub mod runner;
pub mod tasks;

pub use runner::{Scheduler, TaskExecutor};
pub use tasks::{Schedule, ScheduledTask, TaskResult};
