//! Gamified progression: levels, achievements, virtual garden.

pub mod achievements;
pub mod engine;
pub mod garden;
pub mod levels;

pub use achievements::{Achievement, AchievementCategory, AchievementDef, Rarity, ACHIEVEMENTS};
pub use engine::{ProgressSummary, ProgressionEngine, ProgressionRecord};
pub use garden::{GardenElement, GrowthCondition, VirtualGarden};
pub use levels::{Level, LevelInfo, LEVELS};
