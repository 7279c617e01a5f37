//! Scoring module - line clear points, levels and gravity cadence
//!
//! All functions are pure and saturate instead of overflowing.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_CELL, LINES_PER_LEVEL,
    LINE_SCORES,
};

/// Points for clearing `lines` rows at `level`
///
/// `level` is the level before the clear is counted. Anything other than
/// 1-4 lines scores nothing.
pub fn score_delta(lines: usize, level: u32) -> u32 {
    let base = match lines {
        1..=4 => LINE_SCORES[lines],
        _ => 0,
    };
    base.saturating_mul(level.saturating_add(1))
}

/// Level reached after `total_lines` cleared lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level (in milliseconds)
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

/// Hard drop bonus: +2 per cell
pub fn hard_drop_bonus(cells: u32) -> u32 {
    cells.saturating_mul(HARD_DROP_POINTS_PER_CELL)
}
