//! MindWell session.
//!
//! Ties one journal store, one progression engine and a notification bus
//! together. Every user action goes through here: the store records it, the
//! outcome becomes a `WellnessEvent`, the engine turns that into
//! notifications, and subscribers see each notification in order.

use crate::assessment::{AssessmentResult, Questionnaire};
use crate::catalog::{self, Wisdom};
use crate::config::{MindWellConfig, RewardConfig};
use crate::error::Result;
use crate::events::{EventBus, Notification, WellnessEvent};
use crate::kv::KeyValueStore;
use crate::progression::{ProgressSummary, ProgressionEngine};
use crate::record::{day_of, Appointment, Mood, MoodEntry, Task, TaskTemplate, WellnessRecord};
use crate::store::WellnessStore;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{Map, Value};
use tracing::debug;

pub struct MindWell {
    store: WellnessStore,
    engine: ProgressionEngine,
    bus: EventBus<Notification>,
    questionnaire: Questionnaire,
    rewards: RewardConfig,
    daily_task_count: usize,
    rng: StdRng,
}

impl MindWell {
    /// Open both documents from the same backing store
    pub fn open<K>(kv: K, config: &MindWellConfig) -> Self
    where
        K: KeyValueStore + Clone + 'static,
    {
        Self::with_rng(kv, config, StdRng::from_entropy())
    }

    /// Like `open`, with a caller-supplied RNG for reproducible selection
    pub fn with_rng<K>(kv: K, config: &MindWellConfig, rng: StdRng) -> Self
    where
        K: KeyValueStore + Clone + 'static,
    {
        Self {
            store: WellnessStore::load(Box::new(kv.clone())),
            engine: ProgressionEngine::load(Box::new(kv)),
            bus: EventBus::new(),
            questionnaire: Questionnaire::standard(),
            rewards: config.rewards.clone(),
            daily_task_count: config.tasks.daily_count,
            rng,
        }
    }

    /// Score assessments against a different battery
    pub fn with_questionnaire(mut self, questionnaire: Questionnaire) -> Self {
        self.questionnaire = questionnaire;
        self
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&Notification) + 'static) {
        self.bus.subscribe(handler);
    }

    pub fn journal(&self) -> &WellnessRecord {
        self.store.data()
    }

    pub fn store(&self) -> &WellnessStore {
        &self.store
    }

    pub fn engine(&self) -> &ProgressionEngine {
        &self.engine
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn summary(&self) -> ProgressSummary {
        self.engine.summary()
    }

    pub fn set_name(&mut self, name: &str) {
        self.store.update_user(name);
    }

    pub fn create_task(&mut self, template: TaskTemplate, now: DateTime<Utc>) -> Task {
        self.store.create_task(template, now)
    }

    /// Schedule `count` random tasks from the catalog, or the configured
    /// daily count when `None`
    pub fn generate_daily_tasks(&mut self, count: Option<usize>, now: DateTime<Utc>) -> Vec<Task> {
        let count = count.unwrap_or(self.daily_task_count);
        catalog::generate_daily_tasks(count, &mut self.rng)
            .into_iter()
            .map(|template| self.store.create_task(template, now))
            .collect()
    }

    /// Complete a task and award progression.
    ///
    /// `None` when the task is unknown or already done; nothing is awarded.
    pub fn complete_task(&mut self, id: u64, now: DateTime<Utc>) -> Option<Vec<Notification>> {
        let completion = self.store.complete_task(id, now)?;
        let mut notes = self.dispatch(WellnessEvent::TaskCompleted { task_id: id }, now);
        if completion.streak_advanced {
            notes.extend(self.dispatch(
                WellnessEvent::StreakMaintained {
                    streak_days: completion.streak,
                },
                now,
            ));
        }
        Some(notes)
    }

    pub fn track_mood(&mut self, mood: Mood, now: DateTime<Utc>) -> (MoodEntry, Vec<Notification>) {
        let entry = self.store.record_mood(mood, now);
        let notes = self.dispatch(WellnessEvent::MoodTracked { value: entry.mood.value }, now);
        (entry, notes)
    }

    /// Score and record an assessment. Invalid answers award nothing.
    pub fn submit_assessment(
        &mut self,
        answers: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(AssessmentResult, Vec<Notification>)> {
        let result = self.store.record_assessment(&self.questionnaire, answers, now)?;
        let notes = self.dispatch(WellnessEvent::AssessmentCompleted { score: result.score }, now);
        Ok((result, notes))
    }

    /// Appointments are journaled but earn no XP
    pub fn book_appointment(
        &mut self,
        details: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Appointment {
        self.store.record_appointment(details, now)
    }

    pub fn todays_wisdom(&self, now: DateTime<Utc>) -> &'static Wisdom {
        catalog::todays_wisdom(day_of(now))
    }

    pub fn random_wisdom(&mut self) -> &'static Wisdom {
        catalog::random_wisdom(&mut self.rng)
    }

    pub fn motivational_message(&mut self) -> &'static str {
        catalog::motivational_message(&mut self.rng)
    }

    fn dispatch(&mut self, event: WellnessEvent, now: DateTime<Utc>) -> Vec<Notification> {
        debug!("Dispatching {:?}", event);
        let notes = self.engine.handle(
            &event,
            self.store.data(),
            &self.rewards,
            now,
            &mut self.rng,
        );
        for note in &notes {
            self.bus.publish(note);
        }
        notes
    }
}

impl std::fmt::Debug for MindWell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MindWell")
            .field("store", &self.store)
            .field("engine", &self.engine)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
