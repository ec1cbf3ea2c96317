//! Level arithmetic inside a unit.
//!
//! A unit is split into `LEVELS_PER_UNIT` levels of equal size. Questions are
//! delivered cumulatively: level `n` covers every index below
//! `n * questions_per_level`, and the last level always covers the whole unit.

use std::ops::Range;

pub const LEVELS_PER_UNIT: u32 = 10;

#[must_use]
pub fn questions_per_level(item_count: u32) -> u32 {
    (item_count / LEVELS_PER_UNIT).max(1)
}

/// 1-based level of the question at `index`, or `None` past the end of the unit.
#[must_use]
pub fn level_of(index: u32, item_count: u32) -> Option<u32> {
    if index >= item_count {
        return None;
    }
    let level = index / questions_per_level(item_count) + 1;
    Some(level.min(LEVELS_PER_UNIT))
}

/// Index range delivered when practicing `level` (1-based).
#[must_use]
pub fn cumulative_range(level: u32, item_count: u32) -> Option<Range<u32>> {
    if level == 0 || level > LEVELS_PER_UNIT {
        return None;
    }
    let end = if level == LEVELS_PER_UNIT {
        item_count
    } else {
        (level * questions_per_level(item_count)).min(item_count)
    };
    Some(0..end)
}
