//! Scheduler tick loop.
//!
//! Spawns a tokio task that periodically checks for due tasks and runs each
//! one to completion through an async executor callback. Task state lives in
//! memory only; the problem pool file is the bot's single piece of durable
//! state.

use crate::scheduler::tasks::{ScheduledTask, TaskResult};
use chrono::Utc;
use chrono_tz::Tz;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Interval between scheduler ticks (seconds).
const TICK_INTERVAL_SECS: u64 = 30;

/// Callback type for executing a due task.
///
/// Takes the scheduled task and returns a future resolving to its
/// [`TaskResult`]. Flows are async because delivery and pacing are.
pub type TaskExecutor =
    Box<dyn Fn(&ScheduledTask) -> Pin<Box<dyn Future<Output = TaskResult> + Send>> + Send + Sync>;

/// Runs registered tasks at their scheduled local times.
pub struct Scheduler {
    /// Registered tasks, in registration order.
    tasks: Vec<ScheduledTask>,
    /// Timezone all schedules are evaluated in.
    timezone: Tz,
    /// Channel reporting each task outcome to the host.
    result_tx: mpsc::UnboundedSender<TaskResult>,
    /// Task executor callback.
    executor: Option<TaskExecutor>,
}

impl Scheduler {
    /// Creates a scheduler for the given timezone and result channel.
    pub fn new(timezone: Tz, result_tx: mpsc::UnboundedSender<TaskResult>) -> Self {
        Self {
            tasks: Vec::new(),
            timezone,
            result_tx,
            executor: None,
        }
    }

    /// Sets the executor callback for running tasks.
    pub fn with_executor(mut self, executor: TaskExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Adds (or replaces, by ID) a task.
    pub fn add_task(&mut self, task: ScheduledTask) {
        info!(task = %task.id, schedule = %task.schedule, "task registered");
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        } else {
            self.tasks.push(task);
        }
    }

    /// Returns registered tasks.
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Starts the scheduler background loop.
    pub fn run(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                timezone = %self.timezone,
                tasks = self.tasks.len(),
                "scheduler started"
            );
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(TICK_INTERVAL_SECS));

            loop {
                interval.tick().await;
                if !self.tick().await {
                    return;
                }
            }
        })
    }

    /// Executes one tick at the current instant.
    ///
    /// Returns `false` when the result channel has closed and the loop
    /// should stop.
    async fn tick(&mut self) -> bool {
        self.tick_at(Utc::now()).await
    }

    /// Executes one tick as of `now`: runs every due task to completion, in
    /// registration order, marking each as run whether it succeeded or not.
    pub(crate) async fn tick_at(&mut self, now: chrono::DateTime<Utc>) -> bool {
        let local_now = now.with_timezone(&self.timezone);
        let due_ids: Vec<String> = self
            .tasks
            .iter()
            .filter(|t| t.is_due(local_now))
            .map(|t| t.id.clone())
            .collect();

        for task_id in due_ids {
            let Some(task) = self.tasks.iter().find(|t| t.id == task_id).cloned() else {
                continue;
            };

            debug!(task = %task.id, "executing scheduled task");
            let result = self.execute(&task).await;
            match &result {
                TaskResult::Success(msg) => info!(task = %task.id, "{msg}"),
                TaskResult::Skipped(msg) => warn!(task = %task.id, "skipped: {msg}"),
                TaskResult::Error(err) => error!(task = %task.id, "task failed: {err}"),
            }

            // A failed run still consumes this occurrence; the next
            // scheduled trigger retries naturally.
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                task.mark_run(now);
            }

            if self.result_tx.send(result).is_err() {
                debug!("scheduler result channel closed, stopping");
                return false;
            }
        }

        true
    }

    /// Executes a single task through the registered callback.
    async fn execute(&self, task: &ScheduledTask) -> TaskResult {
        match &self.executor {
            Some(executor) => executor(task).await,
            None => TaskResult::Error(format!("no executor registered for task {}", task.id)),
        }
    }
}
