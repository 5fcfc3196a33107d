//! Progression engine: XP, level, achievements and garden.
//!
//! All four are derived views over the same action stream. Each
//! `add_experience` call adds XP, then re-evaluates level, every locked
//! achievement and every growing plant against the current journal. Already
//! unlocked achievements and fully grown plants are skipped, so replaying an
//! action never unlocks anything twice.
//!
//! The engine only reads the journal; it owns and persists its own
//! `ProgressionRecord` under [`PROGRESSION_KEY`].

use super::achievements::{self, Achievement};
use super::garden::{self, GardenElement, VirtualGarden};
use super::levels::{self, Level, LevelInfo};
use crate::config::RewardConfig;
use crate::error::Result;
use crate::events::{ExperienceAction, Notification, WellnessEvent};
use crate::kv::{KeyValueStore, PROGRESSION_KEY};
use crate::record::WellnessRecord;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

/// Persisted progression document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionRecord {
    #[serde(default)]
    pub user_level: Level,
    #[serde(rename = "totalXP", default, deserialize_with = "lenient_xp")]
    pub total_xp: u64,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub virtual_garden: VirtualGarden,
    #[serde(default)]
    pub garden_elements: Vec<GardenElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self {
            user_level: Level::default(),
            total_xp: 0,
            achievements: achievements::all_achievements(),
            virtual_garden: VirtualGarden::default(),
            garden_elements: garden::default_garden(),
            last_updated: None,
        }
    }
}

impl ProgressionRecord {
    /// Re-anchor saved state on the current achievement and garden tables
    fn normalized(mut self) -> Self {
        self.achievements = achievements::merge_saved(&self.achievements);
        self.garden_elements = garden::merge_saved(&self.garden_elements);
        self
    }
}

/// Negative, fractional or non-numeric XP reads as the nearest sane value
fn lenient_xp<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|x| x.is_finite() && *x > 0.0)
                .map(|x| x as u64)
        })
        .unwrap_or(0))
}

/// Compact progress view for a status widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub level: u8,
    pub level_name: &'static str,
    pub xp: u64,
    pub xp_to_next: u64,
    pub progress_percent: f64,
    pub unlocked_achievements: usize,
    pub total_achievements: usize,
    pub garden_happiness: u64,
}

pub struct ProgressionEngine {
    record: ProgressionRecord,
    kv: Box<dyn KeyValueStore>,
}

impl ProgressionEngine {
    /// Load from storage. Missing or corrupt documents start fresh.
    pub fn load(kv: Box<dyn KeyValueStore>) -> Self {
        let record = match kv.get(PROGRESSION_KEY) {
            Ok(Some(data)) => match serde_json::from_str::<ProgressionRecord>(&data) {
                Ok(record) => record.normalized(),
                Err(e) => {
                    warn!("Corrupt progression document, starting fresh: {}", e);
                    ProgressionRecord::default()
                }
            },
            Ok(None) => ProgressionRecord::default(),
            Err(e) => {
                warn!("Failed to read progression document, starting fresh: {}", e);
                ProgressionRecord::default()
            }
        };
        debug!(
            "Progression loaded: level {} with {} XP",
            record.user_level, record.total_xp
        );
        Self { record, kv }
    }

    pub fn record(&self) -> &ProgressionRecord {
        &self.record
    }

    pub fn level(&self) -> Level {
        self.record.user_level
    }

    pub fn level_info(&self) -> &'static LevelInfo {
        self.record.user_level.info()
    }

    pub fn total_xp(&self) -> u64 {
        self.record.total_xp
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.record.achievements
    }

    pub fn garden(&self) -> &[GardenElement] {
        &self.record.garden_elements
    }

    pub fn virtual_garden(&self) -> VirtualGarden {
        self.record.virtual_garden
    }

    pub fn progress_to_next_level(&self) -> f64 {
        levels::progress_to_next(self.record.user_level.value(), self.record.total_xp)
    }

    pub fn summary(&self) -> ProgressSummary {
        let level = self.record.user_level;
        ProgressSummary {
            level: level.value(),
            level_name: level.name(),
            xp: self.record.total_xp,
            xp_to_next: levels::xp_to_next(level.value(), self.record.total_xp),
            progress_percent: self.progress_to_next_level(),
            unlocked_achievements: self.record.achievements.iter().filter(|a| a.unlocked).count(),
            total_achievements: self.record.achievements.len(),
            garden_happiness: self.record.virtual_garden.happiness,
        }
    }

    /// Award XP for a domain event using the configured amounts
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        event: &WellnessEvent,
        journal: &WellnessRecord,
        rewards: &RewardConfig,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<Notification> {
        let amount = rewards.xp_for(event);
        self.add_experience(event.action(), amount, journal, now, rng)
    }

    /// Add XP and re-derive level, achievements and garden.
    ///
    /// Notifications come back in emission order: level-ups, achievement
    /// unlocks (each possibly followed by the level-up its bonus caused),
    /// garden growth, then the reward line.
    pub fn add_experience<R: Rng + ?Sized>(
        &mut self,
        action: ExperienceAction,
        amount: u64,
        journal: &WellnessRecord,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<Notification> {
        let mut notes = Vec::new();

        self.add_xp_quiet(amount, &mut notes);
        self.check_achievements(journal, now, &mut notes);
        self.update_garden(journal, &mut notes);

        let message = action
            .celebration_messages()
            .choose(rng)
            .copied()
            .unwrap_or("🎉 Great job on your wellness journey!");
        let level = self.record.user_level;
        notes.push(Notification::Reward {
            action,
            xp: amount,
            message: message.to_string(),
            level: level.value(),
            level_name: level.name().to_string(),
        });

        info!(
            "[XP] +{} ({}) total={} level={}",
            amount, action, self.record.total_xp, level
        );

        if let Err(e) = self.save(now) {
            warn!("Failed to save progression: {}", e);
        }
        notes
    }

    /// Add XP and re-check level without touching achievements or garden
    fn add_xp_quiet(&mut self, amount: u64, notes: &mut Vec<Notification>) {
        self.record.total_xp = self.record.total_xp.saturating_add(amount);
        self.check_level_up(notes);
    }

    fn check_level_up(&mut self, notes: &mut Vec<Notification>) {
        let xp = i64::try_from(self.record.total_xp).unwrap_or(i64::MAX);
        let new_level = levels::level_for_xp(xp);
        let old_level = self.record.user_level.value();
        if new_level <= old_level {
            return;
        }

        self.record.user_level = Level::new(new_level);
        let info = levels::level_info(new_level);
        info!("Level up: {} -> {} ({})", old_level, new_level, info.name);
        notes.push(Notification::LevelUp {
            old_level,
            new_level,
            name: info.name.to_string(),
            reward: info.reward.to_string(),
        });
    }

    fn check_achievements(
        &mut self,
        journal: &WellnessRecord,
        now: DateTime<Utc>,
        notes: &mut Vec<Notification>,
    ) {
        for idx in 0..self.record.achievements.len() {
            let achievement = &self.record.achievements[idx];
            if achievement.unlocked {
                continue;
            }
            let Some(def) = achievement.def() else {
                continue;
            };
            if !def.is_met(journal, now) {
                continue;
            }

            let achievement = &mut self.record.achievements[idx];
            achievement.unlocked = true;
            achievement.unlocked_at = Some(now);
            let unlocked = achievement.clone();
            info!("Achievement unlocked: {} (+{} XP)", def.id, def.xp_reward);

            notes.push(Notification::AchievementUnlocked(unlocked));
            self.add_xp_quiet(def.xp_reward, notes);
        }
    }

    fn update_garden(&mut self, journal: &WellnessRecord, notes: &mut Vec<Notification>) {
        for element in &mut self.record.garden_elements {
            if !element.try_grow(journal) {
                continue;
            }
            self.record.virtual_garden.happiness += element.happiness as u64;
            self.record.virtual_garden.growth += 1;
            debug!(
                "Garden: {} grew to stage {}",
                element.id, element.current_stage
            );
            notes.push(Notification::GardenGrown(element.clone()));
        }
    }

    /// Persist the full progression document
    pub fn save(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.record.last_updated = Some(now);
        let data = serde_json::to_string_pretty(&self.record)?;
        self.kv.set(PROGRESSION_KEY, &data)
    }
}

impl std::fmt::Debug for ProgressionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressionEngine")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, 10, 0, 0).unwrap()
    }

    fn engine() -> (ProgressionEngine, MemoryStore) {
        let kv = MemoryStore::new();
        (ProgressionEngine::load(Box::new(kv.clone())), kv)
    }

    fn level_ups(notes: &[Notification]) -> usize {
        notes
            .iter()
            .filter(|n| matches!(n, Notification::LevelUp { .. }))
            .count()
    }

    #[test]
    fn test_fresh_engine_defaults() {
        let (engine, _) = engine();
        assert_eq!(engine.level().value(), 1);
        assert_eq!(engine.total_xp(), 0);
        assert_eq!(engine.achievements().len(), 13);
        assert_eq!(engine.garden().len(), 5);
    }

    #[test]
    fn test_four_tasks_reach_sprout_once() {
        let (mut engine, _) = engine();
        let mut rng = StdRng::seed_from_u64(0);
        let journal = WellnessRecord::default();

        let task = ExperienceAction::CompleteTask;
        let mut all = Vec::new();
        for _ in 0..4 {
            all.extend(engine.add_experience(task, 25, &journal, now(), &mut rng));
        }

        assert_eq!(engine.total_xp(), 100);
        assert_eq!(engine.level().value(), 2);
        assert_eq!(engine.level_info().name, "Sprout");
        assert_eq!(level_ups(&all), 1);
        assert!(all.contains(&Notification::LevelUp {
            old_level: 1,
            new_level: 2,
            name: "Sprout".to_string(),
            reward: "First steps taken!".to_string(),
        }));
    }

    #[test]
    fn test_first_day_unlocks_once_with_bonus() {
        let (mut engine, _) = engine();
        let mut rng = StdRng::seed_from_u64(0);
        let journal = WellnessRecord { tasks_completed: 1, ..Default::default() };

        let task = ExperienceAction::CompleteTask;
        let notes = engine.add_experience(task, 25, &journal, now(), &mut rng);
        let unlocked: Vec<_> = notes
            .iter()
            .filter_map(|n| match n {
                Notification::AchievementUnlocked(a) => Some(a.id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(unlocked, vec!["first_day"]);
        assert_eq!(engine.total_xp(), 75);

        let again = engine.add_experience(task, 0, &journal, now(), &mut rng);
        assert!(!again.iter().any(|n| matches!(n, Notification::AchievementUnlocked(_))));
        assert_eq!(engine.total_xp(), 75);
    }

    #[test]
    fn test_bonus_can_level_up_without_recursion() {
        let (mut engine, _) = engine();
        let mut rng = StdRng::seed_from_u64(0);
        // Streak of 7 unlocks week_warrior (+200); first_day not met
        let journal = WellnessRecord { streak: 7, ..Default::default() };

        let streak = ExperienceAction::StreakMaintained;
        let notes = engine.add_experience(streak, 35, &journal, now(), &mut rng);
        assert_eq!(engine.total_xp(), 235);
        assert_eq!(engine.level().value(), 2);
        assert_eq!(level_ups(&notes), 1);
        // strength_tree grows exactly one stage
        assert_eq!(engine.garden()[1].current_stage, 1);
    }

    #[test]
    fn test_garden_advances_one_stage_per_action() {
        let (mut engine, _) = engine();
        let mut rng = StdRng::seed_from_u64(0);
        let journal = WellnessRecord { tasks_completed: 1, ..Default::default() };

        for expected in [1, 2, 3, 3, 3] {
            engine.add_experience(ExperienceAction::CompleteTask, 25, &journal, now(), &mut rng);
            assert_eq!(engine.garden()[0].current_stage, expected);
        }
        // Three advances of the hope flower at 10 happiness each
        assert_eq!(engine.virtual_garden().happiness, 30);
        assert_eq!(engine.virtual_garden().growth, 3);
    }

    #[test]
    fn test_reward_is_last_notification() {
        let (mut engine, _) = engine();
        let mut rng = StdRng::seed_from_u64(9);
        let journal = WellnessRecord { tasks_completed: 1, ..Default::default() };
        let mood = ExperienceAction::MoodTrack;
        let notes = engine.add_experience(mood, 15, &journal, now(), &mut rng);
        match notes.last() {
            Some(Notification::Reward { action, xp, message, .. }) => {
                assert_eq!(*action, mood);
                assert_eq!(*xp, 15);
                assert!(mood.celebration_messages().contains(&message.as_str()));
            }
            other => panic!("expected reward, got {:?}", other),
        }
    }

    #[test]
    fn test_state_survives_reload() {
        let (mut engine, kv) = engine();
        let mut rng = StdRng::seed_from_u64(0);
        let journal = WellnessRecord { tasks_completed: 1, ..Default::default() };
        engine.add_experience(ExperienceAction::CompleteTask, 25, &journal, now(), &mut rng);

        let reloaded = ProgressionEngine::load(Box::new(kv));
        assert_eq!(reloaded.total_xp(), 75);
        assert!(reloaded.achievements().iter().any(|a| a.id == "first_day" && a.unlocked));
        assert_eq!(reloaded.garden()[0].current_stage, 1);
        assert_eq!(reloaded.record().last_updated, Some(now()));
    }

    #[test]
    fn test_corrupt_document_starts_fresh() {
        let kv = MemoryStore::new();
        kv.set(PROGRESSION_KEY, "{not json").unwrap();
        let engine = ProgressionEngine::load(Box::new(kv));
        assert_eq!(engine.total_xp(), 0);
        assert_eq!(engine.level().value(), 1);
    }

    #[test]
    fn test_negative_xp_and_bad_level_are_sanitized() {
        let kv = MemoryStore::new();
        kv.set(PROGRESSION_KEY, r#"{"userLevel": 0, "totalXP": -500}"#).unwrap();
        let engine = ProgressionEngine::load(Box::new(kv));
        assert_eq!(engine.total_xp(), 0);
        assert_eq!(engine.level().value(), 1);
        assert_eq!(engine.achievements().len(), 13);
    }

    #[test]
    fn test_level_never_decreases() {
        let kv = MemoryStore::new();
        // Level ahead of XP: inconsistent bookkeeping
        kv.set(PROGRESSION_KEY, r#"{"userLevel": 5, "totalXP": 10}"#).unwrap();
        let mut engine = ProgressionEngine::load(Box::new(kv));
        let mut rng = StdRng::seed_from_u64(0);
        let notes = engine.add_experience(
            ExperienceAction::CompleteTask,
            25,
            &WellnessRecord::default(),
            now(),
            &mut rng,
        );
        assert_eq!(engine.level().value(), 5);
        assert_eq!(level_ups(&notes), 0);
    }

    #[test]
    fn test_handle_maps_event_amounts() {
        let (mut engine, _) = engine();
        let mut rng = StdRng::seed_from_u64(0);
        let rewards = RewardConfig::default();
        let journal = WellnessRecord::default();

        let assessed = WellnessEvent::AssessmentCompleted { score: 80 };
        engine.handle(&assessed, &journal, &rewards, now(), &mut rng);
        assert_eq!(engine.total_xp(), 50);
        let streak = WellnessEvent::StreakMaintained { streak_days: 40 };
        engine.handle(&streak, &journal, &rewards, now(), &mut rng);
        assert_eq!(engine.total_xp(), 150);
    }

    #[test]
    fn test_summary() {
        let (mut engine, _) = engine();
        let mut rng = StdRng::seed_from_u64(0);
        let journal = WellnessRecord { tasks_completed: 1, ..Default::default() };
        engine.add_experience(ExperienceAction::CompleteTask, 25, &journal, now(), &mut rng);

        let summary = engine.summary();
        assert_eq!(summary.level, 1);
        assert_eq!(summary.level_name, "Seedling");
        assert_eq!(summary.xp, 75);
        assert_eq!(summary.xp_to_next, 25);
        assert_eq!(summary.progress_percent, 75.0);
        assert_eq!(summary.unlocked_achievements, 1);
        assert_eq!(summary.total_achievements, 13);
        assert_eq!(summary.garden_happiness, 10);
    }
}
