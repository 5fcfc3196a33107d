//! Level ladder.
//!
//! Ten fixed tiers, each with the total XP needed to reach it, a name and
//! a reward line shown on level-up.
//!
//! | Level | XP     | Name             |
//! |-------|--------|------------------|
//! | 1     | 0      | Seedling         |
//! | 2     | 100    | Sprout           |
//! | 3     | 250    | Sapling          |
//! | 4     | 500    | Young Tree       |
//! | 5     | 1000   | Flourishing Tree |
//! | 6     | 2000   | Wise Oak         |
//! | 7     | 4000   | Guardian Tree    |
//! | 8     | 8000   | Ancient Wisdom   |
//! | 9     | 15000  | Life Beacon      |
//! | 10    | 25000  | Wellness Sage    |

use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    pub level: u8,
    pub xp_required: u64,
    pub name: &'static str,
    pub reward: &'static str,
}

#[rustfmt::skip]
pub const LEVELS: [LevelInfo; 10] = [
    LevelInfo { level: 1, xp_required: 0, name: "Seedling", reward: "Welcome to your journey!" },
    LevelInfo { level: 2, xp_required: 100, name: "Sprout", reward: "First steps taken!" },
    LevelInfo { level: 3, xp_required: 250, name: "Sapling", reward: "Growing stronger!" },
    LevelInfo { level: 4, xp_required: 500, name: "Young Tree", reward: "Building resilience!" },
    LevelInfo { level: 5, xp_required: 1000, name: "Flourishing Tree", reward: "Thriving mindfully!" },
    LevelInfo { level: 6, xp_required: 2000, name: "Wise Oak", reward: "Sharing wisdom!" },
    LevelInfo { level: 7, xp_required: 4000, name: "Guardian Tree", reward: "Protecting others!" },
    LevelInfo { level: 8, xp_required: 8000, name: "Ancient Wisdom", reward: "Master of wellness!" },
    LevelInfo { level: 9, xp_required: 15000, name: "Life Beacon", reward: "Inspiring many!" },
    LevelInfo { level: 10, xp_required: 25000, name: "Wellness Sage", reward: "Ultimate wisdom!" },
];

/// Highest level whose threshold `xp` meets. Negative XP resolves to level 1.
pub fn level_for_xp(xp: i64) -> u8 {
    if xp < 0 {
        return MIN_LEVEL;
    }
    LEVELS
        .iter()
        .rev()
        .find(|l| xp as u64 >= l.xp_required)
        .map(|l| l.level)
        .unwrap_or(MIN_LEVEL)
}

/// Ladder entry for a level, clamped into 1-10
pub fn level_info(level: u8) -> &'static LevelInfo {
    let idx = level.clamp(MIN_LEVEL, MAX_LEVEL) as usize - 1;
    &LEVELS[idx]
}

/// Percent of the way from the current level's threshold to the next (0-100).
/// At the top of the ladder this is always 100.
pub fn progress_to_next(level: u8, total_xp: u64) -> f64 {
    let current = level_info(level);
    if current.level >= MAX_LEVEL {
        return 100.0;
    }
    let next = level_info(current.level + 1);
    let range = next.xp_required.saturating_sub(current.xp_required);
    if range == 0 {
        return 100.0;
    }
    let progress = total_xp.saturating_sub(current.xp_required) as f64 / range as f64 * 100.0;
    progress.clamp(0.0, 100.0)
}

/// XP still missing for the next level; 0 at max level
pub fn xp_to_next(level: u8, total_xp: u64) -> u64 {
    let current = level_info(level);
    if current.level >= MAX_LEVEL {
        return 0;
    }
    level_info(current.level + 1)
        .xp_required
        .saturating_sub(total_xp)
}

/// Serializable level number, clamped to the ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Level(u8);

impl Level {
    pub fn new(level: u8) -> Self {
        Self(level.clamp(MIN_LEVEL, MAX_LEVEL))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn info(&self) -> &'static LevelInfo {
        level_info(self.0)
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(MIN_LEVEL)
    }
}

impl From<i64> for Level {
    fn from(raw: i64) -> Self {
        Self::new(raw.clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u8)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_xp_thresholds() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(249), 2);
        assert_eq!(level_for_xp(250), 3);
        assert_eq!(level_for_xp(24_999), 9);
        assert_eq!(level_for_xp(25_000), 10);
        assert_eq!(level_for_xp(i64::MAX), 10);
    }

    #[test]
    fn test_negative_xp_is_level_one() {
        assert_eq!(level_for_xp(-1), 1);
        assert_eq!(level_for_xp(i64::MIN), 1);
    }

    #[test]
    fn test_level_monotonic_and_bounded() {
        let mut previous = level_for_xp(0);
        for xp in (0..30_000).step_by(7) {
            let level = level_for_xp(xp);
            assert!(level >= previous, "level dropped at {} XP", xp);
            assert!((MIN_LEVEL..=MAX_LEVEL).contains(&level));
            previous = level;
        }
    }

    #[test]
    fn test_ladder_ascending() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].xp_required > pair[0].xp_required);
            assert_eq!(pair[1].level, pair[0].level + 1);
        }
    }

    #[test]
    fn test_progress_to_next() {
        assert_eq!(progress_to_next(1, 0), 0.0);
        assert_eq!(progress_to_next(1, 50), 50.0);
        assert_eq!(progress_to_next(2, 175), 50.0);
        assert_eq!(progress_to_next(10, 30_000), 100.0);
    }

    #[test]
    fn test_xp_to_next() {
        assert_eq!(xp_to_next(1, 40), 60);
        assert_eq!(xp_to_next(10, 99_999), 0);
    }

    #[test]
    fn test_level_serde_clamps() {
        let level: Level = serde_json::from_str("42").unwrap();
        assert_eq!(level.value(), 10);
        let level: Level = serde_json::from_str("-3").unwrap();
        assert_eq!(level.value(), 1);
        assert_eq!(serde_json::to_string(&Level::new(4)).unwrap(), "4");
    }
}
