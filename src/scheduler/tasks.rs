//! Scheduled task definitions and due-time computation.
//!
//! All wall-clock fields are evaluated in the bot's single configured
//! timezone. Due-ness takes the current instant as a parameter so tests can
//! pin time instead of waiting for it.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;

/// Well-known task ID for the daily morning motivation post.
pub const TASK_MORNING: &str = "morning_motivation";

/// Well-known task ID for the daily reminder ping.
pub const TASK_REMINDER: &str = "daily_reminder";

/// Well-known task ID for the problem-drop flow.
pub const TASK_PROBLEM: &str = "problem_drop";

/// When a task should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run once daily at a given local hour and minute.
    Daily {
        /// Hour of day (0-23, local).
        hour: u8,
        /// Minute of hour (0-59).
        min: u8,
    },
    /// Run at a given local hour and minute on every Nth civil day.
    ///
    /// Days are anchored on the proleptic day number of the local date, so
    /// the cadence stays steady across month boundaries.
    EveryNDays {
        /// Cadence in days (at least 1).
        days: u32,
        /// Hour of day (0-23, local).
        hour: u8,
        /// Minute of hour (0-59).
        min: u8,
    },
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily { hour, min } => write!(f, "daily at {hour:02}:{min:02}"),
            Self::EveryNDays { days, hour, min } => {
                write!(f, "every {days} days at {hour:02}:{min:02}")
            }
        }
    }
}

impl Schedule {
    /// The scheduled instant for the local day of `now`, if that instant has
    /// already arrived and the day matches the cadence.
    fn current_occurrence(&self, now: DateTime<Tz>) -> Option<DateTime<Utc>> {
        let (hour, min) = match self {
            Self::Daily { hour, min } => (*hour, *min),
            Self::EveryNDays { days, hour, min } => {
                let cadence = (*days).max(1);
                let day_number = now.date_naive().num_days_from_ce();
                if day_number.rem_euclid(cadence as i32) != 0 {
                    return None;
                }
                (*hour, *min)
            }
        };

        let date = now.date_naive();
        let scheduled = now
            .timezone()
            .with_ymd_and_hms(
                date.year(),
                date.month(),
                date.day(),
                u32::from(hour),
                u32::from(min),
                0,
            )
            // A DST gap can swallow the instant; take the earliest valid one.
            .earliest()?
            .with_timezone(&Utc);

        (now.with_timezone(&Utc) >= scheduled).then_some(scheduled)
    }
}

/// Outcome of executing a scheduled task.
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed and delivered, with a summary message.
    Success(String),
    /// Task ran but had nothing to deliver (e.g. an empty pool).
    Skipped(String),
    /// Task failed with an error message.
    Error(String),
}

impl TaskResult {
    /// Human-readable summary of the outcome.
    pub fn summary(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Skipped(msg) | Self::Error(msg) => msg,
        }
    }
}

/// A task that runs on a schedule.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    /// Unique task identifier (e.g. [`TASK_MORNING`]).
    pub id: String,
    /// Human-readable task name.
    pub name: String,
    /// When to run this task.
    pub schedule: Schedule,
    /// Instant of the last run, successful or not.
    pub last_run: Option<DateTime<Utc>>,
    /// Whether the task is enabled.
    pub enabled: bool,
}

impl ScheduledTask {
    /// Creates a new enabled task with the given schedule.
    pub fn new(id: impl Into<String>, name: impl Into<String>, schedule: Schedule) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            schedule,
            last_run: None,
            enabled: true,
        }
    }

    /// Returns `true` when the task is enabled, its scheduled instant for
    /// the current day has arrived, and it has not yet run at that instant.
    ///
    /// A task fires at most once per scheduled occurrence: a failed run
    /// counts as run, and the next occurrence tries again naturally.
    pub fn is_due(&self, now: DateTime<Tz>) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(scheduled) = self.schedule.current_occurrence(now) else {
            return false;
        };
        match self.last_run {
            None => true,
            Some(last) => last < scheduled,
        }
    }

    /// Records that the task ran at `now`.
    pub fn mark_run(&mut self, now: DateTime<Utc>) {
        self.last_run = Some(now);
    }
}
