//! Error types for the nudge bot.

/// Top-level error type for the bot.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Problem pool error (load, parse, or persist).
    #[error("pool error: {0}")]
    Pool(String),

    /// Scheduler error (task execution, due-time computation).
    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// Message delivery error.
    #[error("delivery error: {0}")]
    Delivery(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, BotError>;
