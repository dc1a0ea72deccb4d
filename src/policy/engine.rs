//! The problem-selection policy engine.
//!
//! [`select_next`] is pure with respect to its explicit inputs: the pool
//! state, the current instant, and the randomness source all come from the
//! caller, and the updated pool goes back out for the caller to persist.
//! One invocation is one read-modify-write unit against the persisted pool;
//! overlapping invocations could double-serve an item or corrupt the
//! history, so callers with concurrent triggers must serialize access
//! (see [`crate::policy::store::PoolStore`]).
//!
//! Selection runs in four stages: cycle reset when the pool is exhausted,
//! a one-way phase transition after the warmup window, phase-dependent
//! candidate filtering, and history maintenance after the pick.

use crate::policy::pool::{Difficulty, Phase, Pool, Problem};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::{debug, info};

/// Rolling history window length.
pub const HISTORY_LIMIT: usize = 5;

/// How many trailing history entries the burnout check inspects.
pub const BURNOUT_WINDOW: usize = 5;

/// Medium count within the burnout window that forces an Easy pick.
pub const BURNOUT_MEDIUM_THRESHOLD: usize = 3;

/// Warmup length in days before the phase advances from easy to mixed.
pub const WARMUP_DAYS: i64 = 7;

/// Selects the next problem to serve and updates the pool state in place.
///
/// Returns `None` only when the pool holds no problems at all; the pool is
/// then left untouched and the caller should log and skip this delivery.
/// Otherwise the chosen problem is marked used, its difficulty is appended
/// to the bounded history, and a clone of it is returned.
pub fn select_next<R: Rng + ?Sized>(
    pool: &mut Pool,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<Problem> {
    if pool.problems.is_empty() {
        return None;
    }

    if pool.meta.started_at.is_none() {
        pool.meta.started_at = Some(now);
    }

    // Reset before candidate computation so a fresh cycle is what
    // candidates are drawn from.
    reset_cycle_if_exhausted(pool);
    advance_phase(pool, now);

    let candidates = candidate_indexes(pool);
    if candidates.is_empty() {
        return None;
    }
    let pick = candidates[rng.gen_range(0..candidates.len())];

    pool.problems[pick].used = true;
    let difficulty = pool.problems[pick].difficulty;
    push_history(&mut pool.meta.history, difficulty);
    debug!(id = pool.problems[pick].id, %difficulty, "problem selected");

    Some(pool.problems[pick].clone())
}

/// Starts a new cycle when every problem has been served.
fn reset_cycle_if_exhausted(pool: &mut Pool) {
    if !pool.is_exhausted() {
        return;
    }
    pool.meta.cycle += 1;
    for problem in &mut pool.problems {
        problem.used = false;
    }
    info!(cycle = pool.meta.cycle, "pool exhausted, starting new cycle");
}

/// One-way easy-to-mixed transition once the warmup window has elapsed.
fn advance_phase(pool: &mut Pool, now: DateTime<Utc>) {
    if pool.meta.phase == Phase::Mixed {
        return;
    }
    let Some(started) = pool.meta.started_at else {
        return;
    };
    if now.signed_duration_since(started) >= Duration::days(WARMUP_DAYS) {
        pool.meta.phase = Phase::Mixed;
        info!("warmup complete, phase advanced to mixed");
    }
}

/// Indexes of unused problems, optionally restricted to one difficulty.
fn unused_indexes(pool: &Pool, difficulty: Option<Difficulty>) -> Vec<usize> {
    pool.problems
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.used && difficulty.map_or(true, |d| p.difficulty == d))
        .map(|(i, _)| i)
        .collect()
}

/// Phase-dependent candidate filtering.
///
/// In the mixed phase the fallback ladder is: target bucket, then the
/// opposite bucket, then any unused problem. Availability always wins over
/// strict policy adherence.
fn candidate_indexes(pool: &Pool) -> Vec<usize> {
    match pool.meta.phase {
        Phase::Easy => {
            let easy = unused_indexes(pool, Some(Difficulty::Easy));
            if easy.is_empty() {
                unused_indexes(pool, None)
            } else {
                easy
            }
        }
        Phase::Mixed => {
            let target = mixed_target(&pool.meta.history);
            let wanted = unused_indexes(pool, Some(target));
            if !wanted.is_empty() {
                return wanted;
            }
            let opposite = unused_indexes(pool, Some(target.opposite()));
            if !opposite.is_empty() {
                debug!(%target, "target bucket empty, serving the opposite difficulty");
                return opposite;
            }
            unused_indexes(pool, None)
        }
    }
}

/// Target difficulty in the mixed phase.
///
/// Burnout protection comes first: three or more Mediums among the last
/// five served force an Easy pick. Otherwise strict alternation against the
/// most recent entry, starting calm (Easy) on an empty history.
fn mixed_target(history: &[Difficulty]) -> Difficulty {
    let window = &history[history.len().saturating_sub(BURNOUT_WINDOW)..];
    let mediums = window
        .iter()
        .filter(|d| **d == Difficulty::Medium)
        .count();
    if mediums >= BURNOUT_MEDIUM_THRESHOLD {
        debug!(mediums, "burnout protection engaged, forcing Easy");
        return Difficulty::Easy;
    }

    match history.last() {
        Some(Difficulty::Easy) => Difficulty::Medium,
        Some(Difficulty::Medium) => Difficulty::Easy,
        None => Difficulty::Easy,
    }
}

/// Appends to the rolling history, evicting the oldest entries beyond the
/// limit (FIFO).
fn push_history(history: &mut Vec<Difficulty>, difficulty: Difficulty) {
    history.push(difficulty);
    if history.len() > HISTORY_LIMIT {
        let drop_count = history.len() - HISTORY_LIMIT;
        history.drain(0..drop_count);
    }
}
