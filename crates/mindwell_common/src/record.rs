//! The wellness journal document.
//!
//! Everything the user records lives in one `WellnessRecord`, owned by
//! [`crate::store::WellnessStore`]. Field names serialize in camelCase so the
//! document keeps the shape of the browser-era `mindwell_data` key.

use crate::assessment::AssessmentResult;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Advisory deadline for a freshly created task
pub const TASK_DEADLINE_HOURS: i64 = 20;

/// Mood values at or above this count as a good day
pub const GOOD_MOOD_VALUE: u8 = 4;

/// Calendar day of a timestamp (UTC)
pub fn day_of(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Next identifier for a sequence: the current millisecond, bumped past the
/// largest id already present. Saturates at `u64::MAX`.
pub fn next_id(existing: impl Iterator<Item = u64>, now: DateTime<Utc>) -> u64 {
    let stamp = now.timestamp_millis().max(0) as u64;
    match existing.max() {
        Some(max) if max >= stamp => max.saturating_add(1),
        _ => stamp,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub registration_date: DateTime<Utc>,
    #[serde(default)]
    pub mental_health_score: Option<u8>,
    #[serde(default)]
    pub last_assessment_date: Option<DateTime<Utc>>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            registration_date: Utc::now(),
            mental_health_score: None,
            last_assessment_date: None,
        }
    }
}

/// A scored questionnaire, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: u64,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub result: AssessmentResult,
}

impl Assessment {
    pub fn score(&self) -> u8 {
        self.result.score
    }
}

/// Mood as submitted by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub emoji: String,
    /// 1 (awful) to 5 (great)
    pub value: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Mood {
    pub fn new(value: u8) -> Self {
        Self {
            emoji: Self::emoji_for(value).to_string(),
            value,
            note: None,
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    /// Default face for a mood value
    pub fn emoji_for(value: u8) -> &'static str {
        match value {
            0 | 1 => "😢",
            2 => "😔",
            3 => "😐",
            4 => "😊",
            _ => "😄",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: u64,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub mood: Mood,
}

impl MoodEntry {
    pub fn is_good(&self) -> bool {
        self.mood.value >= GOOD_MOOD_VALUE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Cognitive,
    Mindfulness,
    Creative,
    Physical,
    Social,
    Learning,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 6] = [
        Self::Cognitive,
        Self::Mindfulness,
        Self::Creative,
        Self::Physical,
        Self::Social,
        Self::Learning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cognitive => "cognitive",
            Self::Mindfulness => "mindfulness",
            Self::Creative => "creative",
            Self::Physical => "physical",
            Self::Social => "social",
            Self::Learning => "learning",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("unknown task category '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// What a task is, independent of when it was scheduled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTemplate {
    pub category: TaskCategory,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wisdom: Option<String>,
}

impl TaskTemplate {
    pub fn new(category: TaskCategory, title: &str) -> Self {
        Self {
            category,
            title: title.to_string(),
            description: String::new(),
            duration_minutes: 0,
            difficulty: Difficulty::Easy,
            wisdom: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    /// Creation time; the streak rule buckets tasks by this day
    pub date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    #[serde(flatten)]
    pub template: TaskTemplate,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn from_template(id: u64, template: TaskTemplate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            date: now,
            deadline: now + Duration::hours(TASK_DEADLINE_HOURS),
            template,
            completed: false,
            completed_at: None,
        }
    }

    pub fn category(&self) -> TaskCategory {
        self.template.category
    }

    pub fn title(&self) -> &str {
        &self.template.title
    }

    /// Deadline passed without completion. Display only.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && now > self.deadline
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: u64,
    pub booking_date: DateTime<Utc>,
    /// Free-form booking fields, kept apart from `id` and `bookingDate`
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// The canonical wellness journal
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WellnessRecord {
    pub user: UserProfile,
    pub assessments: Vec<Assessment>,
    pub mood_entries: Vec<MoodEntry>,
    pub daily_tasks: Vec<Task>,
    pub appointments: Vec<Appointment>,
    pub streak: u32,
    pub tasks_completed: u64,
}

impl WellnessRecord {
    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.daily_tasks.iter().filter(|t| t.completed)
    }

    pub fn completed_in_category(&self, category: TaskCategory) -> usize {
        self.completed_tasks()
            .filter(|t| t.category() == category)
            .count()
    }

    /// Completed tasks whose creation date falls on `day`
    pub fn completed_on(&self, day: NaiveDate) -> usize {
        self.completed_tasks()
            .filter(|t| day_of(t.date) == day)
            .count()
    }

    pub fn tasks_on(&self, day: NaiveDate) -> impl Iterator<Item = &Task> {
        self.daily_tasks.iter().filter(move |t| day_of(t.date) == day)
    }

    pub fn mood_on(&self, day: NaiveDate) -> Option<&MoodEntry> {
        self.mood_entries.iter().find(|m| day_of(m.date) == day)
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.daily_tasks.iter().find(|t| t.id == id)
    }
}
