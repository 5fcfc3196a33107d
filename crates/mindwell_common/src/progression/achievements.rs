//! Achievement badges.
//!
//! Each achievement is a row in a static table: display data, a fixed XP
//! bonus, a rarity tier, and a predicate over a read-only view of the
//! wellness journal. Predicates are pure; unlocking lives in the engine.

use crate::record::{TaskCategory, WellnessRecord};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cosmetic tier shown with the unlock notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Mythic => "mythic",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Milestones,
    Streaks,
    Wellness,
    Learning,
    Social,
    Special,
}

/// Unlock condition over the journal at a point in time
pub type Predicate = fn(&WellnessRecord, DateTime<Utc>) -> bool;

/// Static definition of an achievement
#[derive(Clone, Copy)]
pub struct AchievementDef {
    pub id: &'static str,
    pub icon: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub xp_reward: u64,
    pub rarity: Rarity,
    /// `None` means the achievement is never unlocked automatically
    pub predicate: Option<Predicate>,
}

impl AchievementDef {
    pub fn is_met(&self, record: &WellnessRecord, now: DateTime<Utc>) -> bool {
        self.predicate.map(|p| p(record, now)).unwrap_or(false)
    }
}

impl fmt::Debug for AchievementDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AchievementDef")
            .field("id", &self.id)
            .field("xp_reward", &self.xp_reward)
            .field("rarity", &self.rarity)
            .field("automatic", &self.predicate.is_some())
            .finish()
    }
}

const fn def(
    id: &'static str,
    icon: &'static str,
    name: &'static str,
    description: &'static str,
    category: AchievementCategory,
    xp_reward: u64,
    rarity: Rarity,
    predicate: Option<Predicate>,
) -> AchievementDef {
    AchievementDef { id, icon, name, description, category, xp_reward, rarity, predicate }
}

/// Window and count for the three-month achievement
pub const LIFE_CHANGER_WINDOW_DAYS: i64 = 90;
pub const LIFE_CHANGER_MIN_SCORE: u8 = 70;
pub const LIFE_CHANGER_MIN_ASSESSMENTS: usize = 12;

/// All available achievements, in evaluation order
#[rustfmt::skip]
pub static ACHIEVEMENTS: [AchievementDef; 13] = [
    // Milestones and streaks
    def("first_day", "🌱", "First Step", "Complete your first daily task",
        AchievementCategory::Milestones, 50, Rarity::Common, Some(first_day)),
    def("week_warrior", "🔥", "Week Warrior", "Maintain a 7-day streak",
        AchievementCategory::Streaks, 200, Rarity::Rare, Some(week_warrior)),
    def("month_master", "👑", "Month Master", "Maintain a 30-day streak",
        AchievementCategory::Streaks, 1000, Rarity::Legendary, Some(month_master)),

    // Wellness
    def("mood_tracker", "💙", "Mood Tracker", "Track your mood for 10 days",
        AchievementCategory::Wellness, 150, Rarity::Common, Some(mood_tracker)),
    def("assessment_master", "🧠", "Assessment Master", "Complete 3 mental health assessments",
        AchievementCategory::Wellness, 300, Rarity::Uncommon, Some(assessment_master)),
    def("wellness_warrior", "🏆", "Wellness Warrior", "Complete 100 wellness tasks",
        AchievementCategory::Wellness, 500, Rarity::Epic, Some(wellness_warrior)),

    // Learning
    def("knowledge_seeker", "📚", "Knowledge Seeker", "Complete 25 learning tasks",
        AchievementCategory::Learning, 250, Rarity::Uncommon, Some(knowledge_seeker)),
    def("brain_booster", "🚀", "Brain Booster", "Complete 10 cognitive tasks",
        AchievementCategory::Learning, 200, Rarity::Common, Some(brain_booster)),

    // Social
    def("friend_connector", "🤝", "Friend Connector", "Complete 5 social connection tasks",
        AchievementCategory::Social, 180, Rarity::Common, Some(friend_connector)),
    def("community_helper", "❤️", "Community Helper", "Help others in the community",
        AchievementCategory::Social, 300, Rarity::Rare, None),

    // Special
    def("gratitude_guru", "🙏", "Gratitude Guru", "Practice gratitude for 21 days",
        AchievementCategory::Special, 400, Rarity::Epic, Some(gratitude_guru)),
    def("mindfulness_master", "🧘", "Mindfulness Master", "Complete 50 mindfulness activities",
        AchievementCategory::Special, 600, Rarity::Legendary, Some(mindfulness_master)),
    def("life_changer", "🌟", "Life Changer", "Maintain excellent mental health for 3 months",
        AchievementCategory::Special, 2000, Rarity::Mythic, Some(life_changer)),
];

pub fn find_def(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|d| d.id == id)
}

fn first_day(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.tasks_completed >= 1
}

fn week_warrior(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.streak >= 7
}

fn month_master(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.streak >= 30
}

fn mood_tracker(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.mood_entries.len() >= 10
}

fn assessment_master(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.assessments.len() >= 3
}

fn wellness_warrior(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.tasks_completed >= 100
}

fn knowledge_seeker(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.completed_in_category(TaskCategory::Learning) >= 25
}

fn brain_booster(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.completed_in_category(TaskCategory::Cognitive) >= 10
}

fn friend_connector(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.completed_in_category(TaskCategory::Social) >= 5
}

fn gratitude_guru(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.completed_tasks()
        .filter(|t| t.title().to_lowercase().contains("gratitude"))
        .count()
        >= 21
}

fn mindfulness_master(r: &WellnessRecord, _: DateTime<Utc>) -> bool {
    r.completed_in_category(TaskCategory::Mindfulness) >= 50
}

/// Roughly weekly good assessments over the last three months
fn life_changer(r: &WellnessRecord, now: DateTime<Utc>) -> bool {
    let since = now - Duration::days(LIFE_CHANGER_WINDOW_DAYS);
    r.assessments
        .iter()
        .filter(|a| a.date >= since && a.score() >= LIFE_CHANGER_MIN_SCORE)
        .count()
        >= LIFE_CHANGER_MIN_ASSESSMENTS
}

/// Achievement state as tracked and persisted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<AchievementCategory>,
    #[serde(default)]
    pub xp_reward: u64,
    pub rarity: Option<Rarity>,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    pub fn from_def(def: &AchievementDef) -> Self {
        Self {
            id: def.id.to_string(),
            icon: def.icon.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            category: Some(def.category),
            xp_reward: def.xp_reward,
            rarity: Some(def.rarity),
            unlocked: false,
            unlocked_at: None,
        }
    }

    pub fn def(&self) -> Option<&'static AchievementDef> {
        find_def(&self.id)
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity.unwrap_or(Rarity::Common)
    }
}

/// Fresh, all-locked list in table order
pub fn all_achievements() -> Vec<Achievement> {
    ACHIEVEMENTS.iter().map(Achievement::from_def).collect()
}

/// Rebuild the list from the table, carrying over unlock flags from a saved
/// list. Ids no longer in the table are dropped.
pub fn merge_saved(saved: &[Achievement]) -> Vec<Achievement> {
    let mut achievements = all_achievements();
    for ach in &mut achievements {
        if let Some(prev) = saved.iter().find(|s| s.id == ach.id && s.unlocked) {
            ach.unlocked = true;
            ach.unlocked_at = prev.unlocked_at;
        }
    }
    achievements
}

/// One-line unlock message
pub fn format_achievement_unlock(ach: &Achievement) -> String {
    format!(
        "{} Achievement unlocked: {} - {} (+{} XP, {})",
        ach.icon,
        ach.name,
        ach.description,
        ach.xp_reward,
        ach.rarity()
    )
}
