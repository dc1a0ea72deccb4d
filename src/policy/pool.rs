//! Persisted problem pool data model.
//!
//! Serde field names match the on-disk `problems.json` layout used by
//! earlier deployments (including the camelCase `meta.startedAt`), so
//! existing state files keep loading unchanged. Missing meta fields
//! deserialize to their defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty label attached to a problem.
///
/// Serialized exactly as `"Easy"` / `"Medium"`, matching both the stored
/// problem entries and the rolling history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Warmup-friendly problem.
    Easy,
    /// Harder problem, rationed by the alternation policy.
    Medium,
}

impl Difficulty {
    /// The other difficulty bucket.
    pub fn opposite(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Easy,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
        }
    }
}

/// Coarse policy mode. Advances easy to mixed once, never reverts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Warmup: serve easy problems only.
    #[default]
    Easy,
    /// Alternate difficulties, with burnout protection.
    Mixed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

/// One unit of servable content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    /// Unique identifier, stable across runs.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Link to the problem statement.
    pub url: String,
    /// Difficulty label.
    pub difficulty: Difficulty,
    /// True once served in the current cycle.
    #[serde(default)]
    pub used: bool,
}

/// Pool-wide persisted meta state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolMeta {
    /// Completed-pass counter, incremented on each cycle reset.
    pub cycle: u32,
    /// When the policy began running. Set on first selection, then immutable.
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    /// Current policy phase.
    pub phase: Phase,
    /// Difficulties of the most recently served problems, newest last.
    pub history: Vec<Difficulty>,
}

/// The full persisted collection: problems plus meta state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pool {
    /// All problems, used and unused.
    pub problems: Vec<Problem>,
    /// Selection meta state.
    #[serde(default)]
    pub meta: PoolMeta,
}

impl Pool {
    /// Returns `true` when every problem has been served this cycle.
    pub fn is_exhausted(&self) -> bool {
        self.problems.iter().all(|p| p.used)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn problem(id: u64, difficulty: Difficulty, used: bool) -> Problem {
        Problem {
            id,
            title: format!("Problem {id}"),
            url: format!("https://example.com/{id}"),
            difficulty,
            used,
        }
    }

    #[test]
    fn difficulty_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), "\"Easy\"");
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            "\"Medium\""
        );
    }

    #[test]
    fn phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Easy).unwrap(), "\"easy\"");
        assert_eq!(serde_json::to_string(&Phase::Mixed).unwrap(), "\"mixed\"");
    }

    #[test]
    fn difficulty_opposite_flips() {
        assert_eq!(Difficulty::Easy.opposite(), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.opposite(), Difficulty::Easy);
    }

    #[test]
    fn meta_defaults_when_fields_absent() {
        // A stored file from before meta tracking existed.
        let json = r#"{
            "problems": [
                {"id": 1, "title": "Two Sum", "url": "https://example.com/1", "difficulty": "Easy"}
            ]
        }"#;
        let pool: Pool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.meta.cycle, 0);
        assert!(pool.meta.started_at.is_none());
        assert_eq!(pool.meta.phase, Phase::Easy);
        assert!(pool.meta.history.is_empty());
        assert!(!pool.problems[0].used);
    }

    #[test]
    fn full_meta_round_trips_with_camel_case_started_at() {
        let json = r#"{
            "problems": [
                {"id": 1, "title": "A", "url": "u", "difficulty": "Medium", "used": true}
            ],
            "meta": {
                "cycle": 3,
                "startedAt": "2025-01-01T10:00:00Z",
                "phase": "mixed",
                "history": ["Easy", "Medium"]
            }
        }"#;
        let pool: Pool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.meta.cycle, 3);
        assert!(pool.meta.started_at.is_some());
        assert_eq!(pool.meta.phase, Phase::Mixed);
        assert_eq!(
            pool.meta.history,
            vec![Difficulty::Easy, Difficulty::Medium]
        );

        let serialized = serde_json::to_string(&pool).unwrap();
        assert!(serialized.contains("\"startedAt\""));
        let restored: Pool = serde_json::from_str(&serialized).unwrap();
        assert_eq!(restored.meta.cycle, 3);
        assert_eq!(restored.meta.phase, Phase::Mixed);
    }

    #[test]
    fn is_exhausted_requires_every_problem_used() {
        let mut pool = Pool {
            problems: vec![
                problem(1, Difficulty::Easy, true),
                problem(2, Difficulty::Medium, false),
            ],
            meta: PoolMeta::default(),
        };
        assert!(!pool.is_exhausted());

        pool.problems[1].used = true;
        assert!(pool.is_exhausted());
    }

    #[test]
    fn empty_pool_counts_as_exhausted() {
        let pool = Pool::default();
        assert!(pool.is_exhausted());
    }
}
