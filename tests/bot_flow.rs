//! Integration tests: delivery flows against a recording messenger.

use async_trait::async_trait;
use nudge::bot::Bot;
use nudge::config::BotConfig;
use nudge::error::{BotError, Result};
use nudge::messenger::{Messenger, PAD};
use nudge::policy::pool::{Difficulty, Pool, PoolMeta, Problem};
use nudge::policy::store::PoolStore;
use nudge::scheduler::tasks::TaskResult;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Messenger double that records every send, optionally failing them all.
struct RecordingMessenger {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingMessenger {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, channel_id: &str, text: &str) -> Result<()> {
        if self.fail {
            return Err(BotError::Delivery("wire down".to_owned()));
        }
        self.sent
            .lock()
            .await
            .push((channel_id.to_owned(), text.to_owned()));
        Ok(())
    }
}

fn problem(id: u64, difficulty: Difficulty) -> Problem {
    Problem {
        id,
        title: format!("Problem {id}"),
        url: format!("https://example.com/{id}"),
        difficulty,
        used: false,
    }
}

/// Bot wired to a temp pool file seeded with `pool`.
fn bot_with_pool(
    pool: &Pool,
    messenger: Arc<RecordingMessenger>,
) -> (tempfile::TempDir, Arc<RecordingMessenger>, Bot, PoolStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool_path = dir.path().join("problems.json");
    let store = PoolStore::new(&pool_path);
    store.save(pool).expect("seed pool");

    let mut config = BotConfig::default();
    config.discord.channel_id = "chan-1".to_owned();
    config.discord.role_id = "role-9".to_owned();
    config.pool.path = pool_path;

    let bot = Bot::new(config, messenger.clone());
    (dir, messenger, bot, store)
}

#[tokio::test]
async fn morning_message_delivers_a_padded_quote() {
    let (_dir, messenger, bot, _store) =
        bot_with_pool(&Pool::default(), Arc::new(RecordingMessenger::new()));

    let result = bot.morning_message().await;
    assert!(matches!(result, TaskResult::Success(_)));

    let sent = messenger.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "chan-1");
    assert!(sent[0].1.starts_with(PAD));
}

#[tokio::test]
async fn daily_reminder_mentions_the_role() {
    let (_dir, messenger, bot, _store) =
        bot_with_pool(&Pool::default(), Arc::new(RecordingMessenger::new()));

    let result = bot.daily_reminder().await;
    assert!(matches!(result, TaskResult::Success(_)));

    let sent = messenger.sent().await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("<@&role-9>"));
}

#[tokio::test]
async fn failed_delivery_is_an_error_result_not_a_panic() {
    let (_dir, _messenger, bot, _store) =
        bot_with_pool(&Pool::default(), Arc::new(RecordingMessenger::failing()));

    let result = bot.morning_message().await;
    assert!(matches!(result, TaskResult::Error(_)));
}

#[tokio::test]
async fn problem_drop_sends_intro_then_card_and_persists_state() {
    let pool = Pool {
        problems: vec![problem(1, Difficulty::Easy)],
        meta: PoolMeta::default(),
    };
    let (_dir, messenger, bot, store) =
        bot_with_pool(&pool, Arc::new(RecordingMessenger::new()));

    let result = bot.problem_drop().await;
    assert!(matches!(result, TaskResult::Success(_)));

    let sent = messenger.sent().await;
    assert_eq!(sent.len(), 2, "intro and card");
    assert!(sent[0].1.contains("problem-lab"));
    assert!(sent[1].1.contains("Problem 1"));
    assert!(sent[1].1.contains("https://example.com/1"));

    // State was persisted before delivery.
    let reloaded = store.load().expect("reload");
    assert!(reloaded.problems[0].used);
    assert_eq!(reloaded.meta.history, vec![Difficulty::Easy]);
}

#[tokio::test]
async fn problem_drop_on_empty_pool_skips_without_sending() {
    let (_dir, messenger, bot, store) =
        bot_with_pool(&Pool::default(), Arc::new(RecordingMessenger::new()));

    let result = bot.problem_drop().await;
    assert!(matches!(result, TaskResult::Skipped(_)));
    assert!(messenger.sent().await.is_empty());

    // No mutation was persisted either.
    let reloaded = store.load().expect("reload");
    assert!(reloaded.meta.started_at.is_none());
}

#[tokio::test]
async fn problem_drop_with_missing_pool_file_is_an_error() {
    let mut config = BotConfig::default();
    config.pool.path = std::path::PathBuf::from("/nonexistent/problems.json");
    let bot = Bot::new(config, Arc::new(RecordingMessenger::new()));

    let result = bot.problem_drop().await;
    assert!(matches!(result, TaskResult::Error(_)));
}

#[tokio::test]
async fn delivery_failure_after_selection_keeps_item_served() {
    // The documented at-most-once durability gap: the selection persists
    // even though nothing was delivered.
    let pool = Pool {
        problems: vec![problem(1, Difficulty::Easy)],
        meta: PoolMeta::default(),
    };
    let (_dir, _messenger, bot, store) =
        bot_with_pool(&pool, Arc::new(RecordingMessenger::failing()));

    let result = bot.problem_drop().await;
    assert!(matches!(result, TaskResult::Error(_)));

    let reloaded = store.load().expect("reload");
    assert!(reloaded.problems[0].used, "selection was already persisted");
}
