//! Virtual garden.
//!
//! Five plants, each tied to a growth condition over the wellness journal.
//! Whenever the condition holds on an evaluation pass the plant grows exactly
//! one stage, until it reaches its last stage.

use crate::record::{TaskCategory, WellnessRecord};
use serde::{Deserialize, Serialize};

/// Consecutive good-mood entries needed by the sunflower
pub const GOOD_MOOD_RUN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthCondition {
    CompleteFirstTask,
    WeekStreak,
    #[serde(rename = "learning_tasks_10")]
    LearningTasks10,
    #[serde(rename = "mindfulness_tasks_5")]
    MindfulnessTasks5,
    #[serde(rename = "good_mood_streak_7")]
    GoodMoodStreak7,
}

impl GrowthCondition {
    pub fn is_met(&self, record: &WellnessRecord) -> bool {
        match self {
            Self::CompleteFirstTask => record.tasks_completed >= 1,
            Self::WeekStreak => record.streak >= 7,
            Self::LearningTasks10 => record.completed_in_category(TaskCategory::Learning) >= 10,
            Self::MindfulnessTasks5 => {
                record.completed_in_category(TaskCategory::Mindfulness) >= 5
            }
            Self::GoodMoodStreak7 => {
                let start = record.mood_entries.len().saturating_sub(GOOD_MOOD_RUN);
                record.mood_entries[start..]
                    .iter()
                    .filter(|m| m.is_good())
                    .count()
                    >= GOOD_MOOD_RUN
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenElement {
    pub id: String,
    pub name: String,
    pub unlock_condition: GrowthCondition,
    pub growth_stages: Vec<String>,
    pub current_stage: usize,
    pub happiness: u32,
}

impl GardenElement {
    fn new(
        id: &str,
        name: &str,
        condition: GrowthCondition,
        stages: [&str; 4],
        happiness: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            unlock_condition: condition,
            growth_stages: stages.iter().map(|s| s.to_string()).collect(),
            current_stage: 0,
            happiness,
        }
    }

    pub fn last_stage(&self) -> usize {
        self.growth_stages.len().saturating_sub(1)
    }

    pub fn is_fully_grown(&self) -> bool {
        self.current_stage >= self.last_stage()
    }

    /// Glyph for the current stage
    pub fn stage_label(&self) -> &str {
        self.growth_stages
            .get(self.current_stage)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Advance one stage if the condition holds. Returns true if it grew.
    pub fn try_grow(&mut self, record: &WellnessRecord) -> bool {
        if self.is_fully_grown() || !self.unlock_condition.is_met(record) {
            return false;
        }
        self.current_stage += 1;
        true
    }
}

/// Garden-wide totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VirtualGarden {
    #[serde(default)]
    pub happiness: u64,
    /// Stage advances so far, across all plants
    #[serde(default)]
    pub growth: u64,
}

/// The starting garden, every plant at its first stage
#[rustfmt::skip]
pub fn default_garden() -> Vec<GardenElement> {
    vec![
        GardenElement::new("hope_flower", "🌸 Hope Flower", GrowthCondition::CompleteFirstTask, ["🌱", "🌿", "🌸", "🌺"], 10),
        GardenElement::new("strength_tree", "🌳 Strength Tree", GrowthCondition::WeekStreak, ["🌱", "🌿", "🌳", "🌲"], 25),
        GardenElement::new("wisdom_oak", "🍃 Wisdom Oak", GrowthCondition::LearningTasks10, ["🌰", "🌿", "🍃", "🌳"], 30),
        GardenElement::new("peace_lotus", "🪷 Peace Lotus", GrowthCondition::MindfulnessTasks5, ["🌱", "🍀", "🪷", "🌺"], 20),
        GardenElement::new("joy_sunflower", "🌻 Joy Sunflower", GrowthCondition::GoodMoodStreak7, ["🌱", "🌿", "🌻", "🌞"], 35),
    ]
}

/// Rebuild the garden from the defaults, carrying over saved stages.
/// Saved stages are clamped to each plant's last stage; unknown plants are dropped.
pub fn merge_saved(saved: &[GardenElement]) -> Vec<GardenElement> {
    let mut garden = default_garden();
    for element in &mut garden {
        if let Some(prev) = saved.iter().find(|s| s.id == element.id) {
            element.current_stage = prev.current_stage.min(element.last_stage());
        }
    }
    garden
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Mood, MoodEntry};
    use chrono::{Duration, TimeZone, Utc};

    fn moods(values: &[u8]) -> Vec<MoodEntry> {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| MoodEntry {
                id: i as u64,
                date: start + Duration::days(i as i64),
                mood: Mood::new(v),
            })
            .collect()
    }

    #[test]
    fn test_grows_one_stage_per_pass_and_caps() {
        let record = WellnessRecord { tasks_completed: 1, ..Default::default() };
        let mut flower = default_garden().remove(0);
        assert_eq!(flower.stage_label(), "🌱");

        for expected in 1..=3 {
            assert!(flower.try_grow(&record));
            assert_eq!(flower.current_stage, expected);
        }
        assert!(flower.is_fully_grown());
        assert!(!flower.try_grow(&record));
        assert_eq!(flower.current_stage, 3);
        assert_eq!(flower.stage_label(), "🌺");
    }

    #[test]
    fn test_no_growth_when_condition_unmet() {
        let record = WellnessRecord { streak: 6, ..Default::default() };
        let mut tree = default_garden().remove(1);
        assert!(!tree.try_grow(&record));
        assert_eq!(tree.current_stage, 0);
    }

    #[test]
    fn test_good_mood_run_needs_last_seven() {
        let mut record = WellnessRecord {
            mood_entries: moods(&[1, 4, 4, 5, 4, 4, 5, 4]),
            ..Default::default()
        };
        assert!(GrowthCondition::GoodMoodStreak7.is_met(&record));

        record.mood_entries = moods(&[4, 4, 5, 4, 4, 5, 2]);
        assert!(!GrowthCondition::GoodMoodStreak7.is_met(&record));

        record.mood_entries = moods(&[5, 5, 5]);
        assert!(!GrowthCondition::GoodMoodStreak7.is_met(&record));
    }

    #[test]
    fn test_condition_serde_names() {
        let json = serde_json::to_string(&GrowthCondition::LearningTasks10).unwrap();
        assert_eq!(json, "\"learning_tasks_10\"");
        let parsed: GrowthCondition = serde_json::from_str("\"complete_first_task\"").unwrap();
        assert_eq!(parsed, GrowthCondition::CompleteFirstTask);
    }

    #[test]
    fn test_merge_saved_clamps_stage() {
        let mut saved = default_garden();
        saved[0].current_stage = 2;
        saved[1].current_stage = 99;
        let merged = merge_saved(&saved);
        assert_eq!(merged[0].current_stage, 2);
        assert_eq!(merged[1].current_stage, 3);
        assert_eq!(merged[2].current_stage, 0);
    }
}
