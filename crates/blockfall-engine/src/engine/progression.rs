use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Points awarded per simultaneously cleared line count (index = lines).
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

const SOFT_DROP_POINTS_PER_CELL: usize = 1;
const HARD_DROP_POINTS_PER_CELL: usize = 2;

const BASE_DROP_MS: f64 = 1000.0;
const MIN_DROP_MS: u64 = 60;
const SPEEDUP_PER_LEVEL: f64 = 0.85;
const LINES_PER_LEVEL: usize = 10;

/// Returns the gravity interval for a level.
///
/// Every level shaves 15% off the base interval, floored at 60 ms.
/// Non-positive levels are clamped to level 1.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn drop_interval_for_level(level: usize) -> Duration {
    let level = i32::try_from(level.max(1)).unwrap_or(i32::MAX);
    let millis = (BASE_DROP_MS * SPEEDUP_PER_LEVEL.powi(level - 1)).floor() as u64;
    Duration::from_millis(millis.max(MIN_DROP_MS))
}

/// Score, line, and level bookkeeping for one session.
///
/// Level is derived from the cleared-line total; the gravity interval is
/// derived from the level and only ever shrinks as play progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    score: usize,
    cleared_lines: usize,
    level: usize,
    drop_interval: Duration,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    #[must_use]
    pub fn new() -> Self {
        Self {
            score: 0,
            cleared_lines: 0,
            level: 1,
            drop_interval: drop_interval_for_level(1),
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Current level, starting at 1 and advancing every 10 cleared lines.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Time between gravity steps at the current level.
    #[must_use]
    pub const fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Records a completed lock, updating score, line total, level, and the
    /// gravity interval.
    pub fn record_lock(&mut self, cleared: usize) {
        self.score += SCORE_TABLE[cleared.min(SCORE_TABLE.len() - 1)];
        self.cleared_lines += cleared;
        let level = self.cleared_lines / LINES_PER_LEVEL + 1;
        if level != self.level {
            self.level = level;
            self.drop_interval = drop_interval_for_level(level);
        }
    }

    /// One point per soft-dropped cell.
    pub const fn award_soft_drop(&mut self) {
        self.score += SOFT_DROP_POINTS_PER_CELL;
    }

    /// Two points per hard-dropped cell.
    pub const fn award_hard_drop(&mut self, cells: usize) {
        self.score += cells * HARD_DROP_POINTS_PER_CELL;
    }

    /// Read-only copy of the counters, for display sinks and persistence.
    #[must_use]
    pub const fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            score: self.score,
            cleared_lines: self.cleared_lines,
            level: self.level,
        }
    }
}

/// Serializable summary of the score counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProgressionSnapshot {
    pub score: usize,
    pub cleared_lines: usize,
    pub level: usize,
}
