//! Scoring module - line-clear points, drop bonuses and the level curve
//!
//! Levels start at 1 and go up every 10 lines. Line clears pay
//! `LINE_SCORES[n] * level`; gravity speeds up by 100ms per level and bottoms
//! out at 100ms.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_SCORES,
};

/// Points for clearing `lines` rows at `level` (1-based).
///
/// More than four rows at once cannot come out of a single lock and pays 0.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Level for a total line count: `lines / 10 + 1`.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level: `max(100, 1000 - (level - 1) * 100)`.
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Hard drop bonus for a number of drop steps.
pub fn hard_drop_score(steps: u32) -> u32 {
    steps.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_at_level_one() {
        assert_eq!(line_clear_score(0, 1), 0);
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(2, 1), 300);
        assert_eq!(line_clear_score(3, 1), 500);
        assert_eq!(line_clear_score(4, 1), 800);
    }

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(line_clear_score(4, 3), 2400);
        assert_eq!(line_clear_score(1, 5), 500);
    }

    #[test]
    fn test_impossible_clear_pays_nothing() {
        assert_eq!(line_clear_score(5, 1), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(95), 10);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 900);
        assert_eq!(drop_interval_ms(9), 200);
        assert_eq!(drop_interval_ms(10), 100);
        assert_eq!(drop_interval_ms(11), 100);
        assert_eq!(drop_interval_ms(500), 100);
    }

    #[test]
    fn test_level_zero_is_treated_as_base_speed() {
        assert_eq!(drop_interval_ms(0), 1000);
    }

    #[test]
    fn test_hard_drop_score() {
        assert_eq!(hard_drop_score(0), 0);
        assert_eq!(hard_drop_score(19), 38);
    }
}
