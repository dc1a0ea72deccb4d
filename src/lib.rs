//! Nudge: a scheduled Discord community bot.
//!
//! Posts time-triggered motivational and reminder content, and every few
//! days serves a "problem" chosen by a stateful difficulty-alternation
//! policy persisted to a JSON pool file.
//!
//! # Architecture
//!
//! Independent pieces wired together by the binary:
//! - **Policy engine** ([`policy::engine`]): pure selection over the pool
//!   state; current time and randomness are injected by the caller.
//! - **Pool store** ([`policy::store`]): whole-file JSON load and atomic
//!   save of the persisted pool.
//! - **Scheduler** ([`scheduler`]): timezone-aware tick loop firing the
//!   daily posts and the multi-day problem cadence.
//! - **Messenger** ([`messenger`]): fallible delivery to a Discord channel
//!   over the REST API, behind a trait for testing.
//! - **Flows** ([`bot`]): the three trigger handlers tying it all together.

pub mod bot;
pub mod config;
pub mod error;
pub mod messenger;
pub mod policy;
pub mod quotes;
pub mod scheduler;

pub use bot::Bot;
pub use config::BotConfig;
pub use error::{BotError, Result};
pub use messenger::{DiscordMessenger, Messenger};
pub use policy::engine::select_next;
pub use policy::pool::{Difficulty, Phase, Pool, PoolMeta, Problem};
pub use policy::store::PoolStore;
pub use scheduler::Scheduler;
