//! Bot binary: wiring and lifecycle.
//!
//! Loads the config (path from `NUDGE_CONFIG` or the default location),
//! reads the bot token from the environment, registers the three production
//! schedules, and runs the scheduler until ctrl-c.

use nudge::bot::Bot;
use nudge::messenger::DiscordMessenger;
use nudge::scheduler::Scheduler;
use nudge::BotConfig;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nudge=info")),
        )
        .init();

    let config_path = std::env::var_os("NUDGE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(BotConfig::default_config_path);
    let config = if config_path.exists() {
        BotConfig::from_file(&config_path)?
    } else {
        tracing::info!(path = %config_path.display(), "no config file found, using defaults");
        BotConfig::default()
    };

    let timezone = config.timezone()?;
    let token = config.token()?;
    tracing::info!(%timezone, pool = %config.pool.path.display(), "nudge starting");

    let messenger = Arc::new(DiscordMessenger::new(token));
    let bot = Arc::new(Bot::new(config, messenger));

    let (result_tx, mut result_rx) = mpsc::unbounded_channel();
    let mut scheduler = Scheduler::new(timezone, result_tx).with_executor(bot.executor());
    bot.register_tasks(&mut scheduler);
    let handle = scheduler.run();

    // The scheduler already logs each outcome; just keep the result channel
    // drained until shutdown.
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("received ctrl-c, shutting down");
                break;
            }
            result = result_rx.recv() => {
                if result.is_none() {
                    break;
                }
            }
        }
    }

    handle.abort();
    tracing::info!("nudge shut down cleanly");
    Ok(())
}
