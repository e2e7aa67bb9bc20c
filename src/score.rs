//! Scoring, leveling, and drop speed
//!
//! Pure formulas: line clears award table points scaled by level, the level
//! is derived from total lines, and the drop interval decays geometrically
//! with level down to a floor.

use std::time::Duration;

/// Points per simultaneous line clear, indexed by count (1-4)
const LINE_POINTS: [u64; 5] = [0, 100, 300, 500, 800];

/// Base drop interval at level 1
const BASE_INTERVAL_MS: f64 = 1000.0;
/// Per-level speedup factor
const SPEED_FACTOR: f64 = 0.85;
/// Fastest allowed drop interval
const MIN_INTERVAL_MS: f64 = 100.0;

/// Lines needed per level step
const LINES_PER_LEVEL: u32 = 10;

/// Score, level, and line bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, derived from lines
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
        }
    }

    /// Record the lines cleared by a lock.
    ///
    /// Advances the line total, recomputes the level, then awards the table
    /// points at the new level. A lock that clears nothing changes nothing.
    pub fn add_line_clear(&mut self, cleared: usize) {
        if cleared == 0 {
            return;
        }
        self.lines += cleared as u32;
        self.level = level_for_lines(self.lines);
        self.points += LINE_POINTS[cleared] * u64::from(self.level);
    }

    /// Add score for a hard drop (2 points per cell fallen)
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.points += u64::from(cells) * 2;
    }

    /// Time between gravity ticks at the current level
    pub fn drop_interval(&self) -> Duration {
        let ms = (BASE_INTERVAL_MS * SPEED_FACTOR.powi(self.level as i32 - 1))
            .max(MIN_INTERVAL_MS);
        Duration::from_secs_f64(ms / 1000.0)
    }
}

/// Level for a line total: one step every 10 lines, starting at 1
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_points_at_level_one() {
        for (cleared, expected) in [(1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut score = Score::new();
            score.add_line_clear(cleared);
            assert_eq!(score.points, expected);
            assert_eq!(score.lines, cleared as u32);
        }
    }

    #[test]
    fn test_no_clear_changes_nothing() {
        let mut score = Score::new();
        score.add_line_clear(0);
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_level_up_applies_to_same_clear() {
        let mut score = Score::new();
        for _ in 0..9 {
            score.add_line_clear(1);
        }
        assert_eq!(score.level, 1);

        // The 10th line levels up first, so it pays out at level 2
        score.add_line_clear(1);
        assert_eq!(score.level, 2);
        assert_eq!(score.points, 9 * 100 + 100 * 2);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(35), 4);
    }

    #[test]
    fn test_hard_drop_points() {
        let mut score = Score::new();
        score.add_hard_drop(19);
        assert_eq!(score.points, 38);
    }

    #[test]
    fn test_drop_interval_decays() {
        let mut score = Score::new();
        assert_eq!(score.drop_interval(), Duration::from_millis(1000));

        score.level = 2;
        assert_eq!(score.drop_interval(), Duration::from_millis(850));

        let faster = Score { level: 5, ..score };
        assert!(faster.drop_interval() < score.drop_interval());
    }

    #[test]
    fn test_drop_interval_floor() {
        let score = Score {
            points: 0,
            level: 16,
            lines: 150,
        };
        assert_eq!(score.drop_interval(), Duration::from_millis(100));

        let deeper = Score { level: 40, ..score };
        assert_eq!(deeper.drop_interval(), Duration::from_millis(100));
    }
}
