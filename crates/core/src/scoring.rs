//! Scoring and level progression
//!
//! Classic rules: a fixed per-clear table multiplied by `(level + 1)`, and a
//! level threshold of `level * lines_per_level + lines_per_level` cleared
//! lines with any excess carried into the next level's counter. Kept as pure
//! functions plus a small [`Progress`] struct so the rules are testable
//! without a grid or a clock.

use blockfall_types::{FALL_TIMEOUTS, LINE_SCORES};

/// Points for clearing `lines` rows in one lock at `level`.
///
/// The table covers 1..=4; larger clears (only reachable with a scan bound
/// above the default) clamp to the 4-line entry. Zero lines scores nothing.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let idx = (lines as usize - 1).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx] * (level + 1)
}

/// Cleared lines required to finish `level`.
pub fn lines_to_next_level(level: u32, lines_per_level: u32) -> u32 {
    level * lines_per_level + lines_per_level
}

/// Gravity interval for a level, clamped to the fastest defined speed.
pub fn fall_timeout_for_level(level: u32) -> f64 {
    let idx = (level as usize).min(FALL_TIMEOUTS.len() - 1);
    FALL_TIMEOUTS[idx]
}

/// What one recorded clear did to the session's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    pub score_awarded: u32,
    pub leveled_up: bool,
}

/// Score, level, and line accounting for one session.
///
/// Level only increases, and the derived fall timeout only speeds up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    score: u32,
    level: u32,
    cleared_this_level: u32,
    total_lines: u32,
    lines_to_next: u32,
    lines_per_level: u32,
}

impl Progress {
    pub fn new(lines_per_level: u32) -> Self {
        Self {
            score: 0,
            level: 0,
            cleared_this_level: 0,
            total_lines: 0,
            lines_to_next: lines_to_next_level(0, lines_per_level),
            lines_per_level,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Lines cleared since the last level-up.
    pub fn cleared_this_level(&self) -> u32 {
        self.cleared_this_level
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    /// Current gravity interval in seconds.
    pub fn fall_timeout(&self) -> f64 {
        fall_timeout_for_level(self.level)
    }

    /// Account for a lock that cleared `lines` rows.
    ///
    /// The threshold check applies once per clear event; a single event that
    /// overshoots the threshold carries the excess into the next level.
    pub fn record_clear(&mut self, lines: u32) -> ClearOutcome {
        let score_awarded = line_clear_score(lines, self.level);
        self.score += score_awarded;
        self.cleared_this_level += lines;
        self.total_lines += lines;

        let mut leveled_up = false;
        if self.cleared_this_level >= self.lines_to_next {
            self.cleared_this_level -= self.lines_to_next;
            self.lines_to_next = lines_to_next_level(self.level + 1, self.lines_per_level);
            self.level += 1;
            leveled_up = true;
        }

        ClearOutcome {
            score_awarded,
            leveled_up,
        }
    }
}
