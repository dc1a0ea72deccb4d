//! Problem-selection policy: pool data model, selection engine, and
//! persistence.
//!
//! The engine alternates difficulties after a one-week warmup, suppresses
//! streaks of hard problems over a rolling five-item window, and cycles the
//! pool once every problem has been served.

pub mod engine;
pub mod pool;
pub mod store;

pub use engine::select_next;
pub use pool::{Difficulty, Phase, Pool, PoolMeta, Problem};
pub use store::PoolStore;
