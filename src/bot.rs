//! Delivery flows: what each scheduled trigger actually does.
//!
//! Three flows, one per trigger: the daily morning motivation post, the
//! daily reminder ping, and the multi-day problem drop. Each flow is the
//! executor target of one scheduled task and runs to completion before the
//! scheduler moves on.

use crate::config::BotConfig;
use crate::messenger::{Messenger, PAD};
use crate::policy::engine;
use crate::policy::store::PoolStore;
use crate::quotes;
use crate::scheduler::runner::TaskExecutor;
use crate::scheduler::tasks::{
    Schedule, ScheduledTask, TaskResult, TASK_MORNING, TASK_PROBLEM, TASK_REMINDER,
};
use crate::scheduler::Scheduler;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Pause between the two problem-drop messages, purely for client-side
/// display pacing.
pub const MESSAGE_PACING_MS: u64 = 800;

/// The bot: configuration plus collaborators, shared across flows.
pub struct Bot {
    config: BotConfig,
    messenger: Arc<dyn Messenger>,
    /// Pool access is one read-modify-write unit per selection; the mutex
    /// serializes it in case triggers ever overlap.
    store: Mutex<PoolStore>,
}

impl Bot {
    /// Creates the bot from its configuration and a messenger.
    pub fn new(config: BotConfig, messenger: Arc<dyn Messenger>) -> Self {
        let store = Mutex::new(PoolStore::new(config.pool.path.clone()));
        Self {
            config,
            messenger,
            store,
        }
    }

    /// Daily morning motivation post.
    pub async fn morning_message(&self) -> TaskResult {
        let quote = quotes::pick_random(quotes::MORNING_QUOTES, &mut rand::thread_rng());
        let text = format!("{PAD}\n\u{2600}\u{fe0f} Good morning, everyone \u{1f44b}\n\n{quote}");

        match self
            .messenger
            .send(&self.config.discord.channel_id, &text)
            .await
        {
            Ok(()) => TaskResult::Success("sent morning motivation".to_owned()),
            Err(e) => TaskResult::Error(format!("morning message: {e}")),
        }
    }

    /// Daily reminder ping with a role mention.
    pub async fn daily_reminder(&self) -> TaskResult {
        let quote = quotes::pick_random(quotes::REMINDER_QUOTES, &mut rand::thread_rng());
        let text = format!(
            "{PAD}\n\u{1f514} Just a nudge \u{1f9e0}\n<@&{}>\n\n{quote}",
            self.config.discord.role_id
        );

        match self
            .messenger
            .send(&self.config.discord.channel_id, &text)
            .await
        {
            Ok(()) => TaskResult::Success("sent daily reminder".to_owned()),
            Err(e) => TaskResult::Error(format!("daily reminder: {e}")),
        }
    }

    /// Problem-drop flow: select and persist, then deliver two paced
    /// messages.
    ///
    /// The pool read-modify-write completes and is persisted before the
    /// first send, so a delivery failure never corrupts pool state. A
    /// selection whose delivery then fails stays recorded as served; with a
    /// multi-day trigger cadence that at-most-once durability gap is
    /// accepted rather than re-marking the item unused.
    pub async fn problem_drop(&self) -> TaskResult {
        let problem = {
            let store = self.store.lock().await;
            let mut pool = match store.load() {
                Ok(pool) => pool,
                Err(e) => return TaskResult::Error(format!("problem drop: {e}")),
            };

            let Some(problem) = engine::select_next(&mut pool, Utc::now(), &mut rand::thread_rng())
            else {
                return TaskResult::Skipped("problem pool is empty".to_owned());
            };

            if let Err(e) = store.save(&pool) {
                return TaskResult::Error(format!("problem drop: {e}"));
            }
            problem
        };

        let motivation = quotes::pick_random(quotes::NEW_PROBLEM_QUOTES, &mut rand::thread_rng());
        let intro = format!("{PAD}\n\u{1f9e0} problem-lab\n\n{motivation}");
        if let Err(e) = self
            .messenger
            .send(&self.config.discord.channel_id, &intro)
            .await
        {
            return TaskResult::Error(format!("problem intro: {e}"));
        }

        tokio::time::sleep(std::time::Duration::from_millis(MESSAGE_PACING_MS)).await;

        let card = format!(
            "{PAD}\n\u{1f4cc} New problem\n\n{}\n{}\n\n\u{23f1}\u{fe0f} 20-25 min max\n\u{1f4ac} one idea is enough",
            problem.title, problem.url
        );
        if let Err(e) = self
            .messenger
            .send(&self.config.discord.channel_id, &card)
            .await
        {
            return TaskResult::Error(format!("problem card: {e}"));
        }

        TaskResult::Success(format!("sent new problem: {}", problem.title))
    }

    /// Builds the scheduler executor dispatching task IDs to flows.
    pub fn executor(self: &Arc<Self>) -> TaskExecutor {
        let bot = Arc::clone(self);
        Box::new(move |task: &ScheduledTask| {
            let bot = Arc::clone(&bot);
            let task_id = task.id.clone();
            Box::pin(async move {
                match task_id.as_str() {
                    TASK_MORNING => bot.morning_message().await,
                    TASK_REMINDER => bot.daily_reminder().await,
                    TASK_PROBLEM => bot.problem_drop().await,
                    other => TaskResult::Error(format!("unknown task: {other}")),
                }
            })
        })
    }

    /// Registers the three production tasks on a scheduler.
    pub fn register_tasks(&self, scheduler: &mut Scheduler) {
        let times = &self.config.schedule;
        scheduler.add_task(ScheduledTask::new(
            TASK_MORNING,
            "Morning motivation",
            Schedule::Daily {
                hour: times.morning_hour,
                min: times.morning_min,
            },
        ));
        scheduler.add_task(ScheduledTask::new(
            TASK_REMINDER,
            "Daily reminder",
            Schedule::Daily {
                hour: times.reminder_hour,
                min: times.reminder_min,
            },
        ));
        scheduler.add_task(ScheduledTask::new(
            TASK_PROBLEM,
            "Problem drop",
            Schedule::EveryNDays {
                days: times.problem_interval_days,
                hour: times.problem_hour,
                min: times.problem_min,
            },
        ));
        info!("all production schedules registered");
    }
}
