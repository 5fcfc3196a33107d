//! Wellness journal store.
//!
//! Owns the `WellnessRecord` for the session. The document is read once at
//! construction and written back after every mutation. A failed write is
//! logged and the in-memory record stays authoritative.

use crate::assessment::{AssessmentResult, Questionnaire};
use crate::error::Result;
use crate::kv::{KeyValueStore, WELLNESS_KEY};
use crate::record::{
    day_of, next_id, Appointment, Assessment, Mood, MoodEntry, Task, TaskTemplate,
    WellnessRecord,
};
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Outcome of a successful task completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCompletion {
    pub task_id: u64,
    /// The streak rule fired for this completion
    pub streak_advanced: bool,
    /// Streak after the rule ran
    pub streak: u32,
}

pub struct WellnessStore {
    record: WellnessRecord,
    kv: Box<dyn KeyValueStore>,
}

impl WellnessStore {
    /// Load the journal. Missing or corrupt documents start fresh.
    pub fn load(kv: Box<dyn KeyValueStore>) -> Self {
        let record = match kv.get(WELLNESS_KEY) {
            Ok(Some(data)) => match serde_json::from_str::<WellnessRecord>(&data) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Corrupt wellness document, starting fresh: {}", e);
                    WellnessRecord::default()
                }
            },
            Ok(None) => WellnessRecord::default(),
            Err(e) => {
                warn!("Failed to read wellness document, starting fresh: {}", e);
                WellnessRecord::default()
            }
        };
        debug!(
            "Journal loaded: {} tasks, {} moods, streak {}",
            record.daily_tasks.len(),
            record.mood_entries.len(),
            record.streak
        );
        Self { record, kv }
    }

    pub fn data(&self) -> &WellnessRecord {
        &self.record
    }

    pub fn update_user(&mut self, name: &str) {
        self.record.user.name = name.trim().to_string();
        self.persist();
    }

    /// Score and append an assessment. Invalid answers leave the journal untouched.
    pub fn record_assessment(
        &mut self,
        questionnaire: &Questionnaire,
        answers: &[u8],
        now: DateTime<Utc>,
    ) -> Result<AssessmentResult> {
        let result = questionnaire.score(answers)?;
        let id = next_id(self.record.assessments.iter().map(|a| a.id), now);
        self.record.assessments.push(Assessment {
            id,
            date: now,
            result: result.clone(),
        });
        self.record.user.mental_health_score = Some(result.score);
        self.record.user.last_assessment_date = Some(now);
        info!(
            "Assessment recorded: score {} ({})",
            result.score, result.interpretation
        );
        self.persist();
        Ok(result)
    }

    /// At most one mood per day: a second entry on the same day replaces the first
    pub fn record_mood(&mut self, mood: Mood, now: DateTime<Utc>) -> MoodEntry {
        let today = day_of(now);
        let entry = match self
            .record
            .mood_entries
            .iter_mut()
            .find(|m| day_of(m.date) == today)
        {
            Some(existing) => {
                existing.mood = mood;
                existing.date = now;
                existing.clone()
            }
            None => {
                let id = next_id(self.record.mood_entries.iter().map(|m| m.id), now);
                let entry = MoodEntry { id, date: now, mood };
                self.record.mood_entries.push(entry.clone());
                entry
            }
        };
        debug!("Mood {} recorded for {}", entry.mood.value, today);
        self.persist();
        entry
    }

    pub fn create_task(&mut self, template: TaskTemplate, now: DateTime<Utc>) -> Task {
        let id = next_id(self.record.daily_tasks.iter().map(|t| t.id), now);
        let task = Task::from_template(id, template, now);
        self.record.daily_tasks.push(task.clone());
        debug!("Task {} created: {}", task.id, task.title());
        self.persist();
        task
    }

    /// Complete a pending task.
    ///
    /// Unknown ids and already completed tasks return `None` and change nothing.
    /// The streak rule runs once per completion: it advances when something
    /// created today is done and either something created yesterday was done
    /// too or there is no streak yet.
    pub fn complete_task(&mut self, id: u64, now: DateTime<Utc>) -> Option<TaskCompletion> {
        let task = self
            .record
            .daily_tasks
            .iter_mut()
            .find(|t| t.id == id && !t.completed)?;
        task.completed = true;
        task.completed_at = Some(now);
        self.record.tasks_completed += 1;

        let today = day_of(now);
        let yesterday = day_of(now - Duration::days(1));
        let done_today = self.record.completed_on(today);
        let done_yesterday = self.record.completed_on(yesterday);

        let streak_advanced =
            done_today > 0 && (done_yesterday > 0 || self.record.streak == 0);
        if streak_advanced {
            self.record.streak += 1;
        }
        info!(
            "Task {} completed (total {}, streak {})",
            id, self.record.tasks_completed, self.record.streak
        );
        self.persist();

        Some(TaskCompletion {
            task_id: id,
            streak_advanced,
            streak: self.record.streak,
        })
    }

    pub fn record_appointment(
        &mut self,
        details: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Appointment {
        let id = next_id(self.record.appointments.iter().map(|a| a.id), now);
        let appointment = Appointment {
            id,
            booking_date: now,
            details,
        };
        self.record.appointments.push(appointment.clone());
        info!("Appointment {} booked", id);
        self.persist();
        appointment
    }

    pub fn todays_mood(&self, now: DateTime<Utc>) -> Option<&MoodEntry> {
        self.record.mood_on(day_of(now))
    }

    pub fn todays_tasks(&self, now: DateTime<Utc>) -> Vec<&Task> {
        self.record.tasks_on(day_of(now)).collect()
    }

    /// Every task not yet completed, oldest first
    pub fn pending_tasks(&self) -> Vec<&Task> {
        let mut pending: Vec<&Task> = self
            .record
            .daily_tasks
            .iter()
            .filter(|t| !t.completed)
            .collect();
        pending.sort_by_key(|t| t.date);
        pending
    }

    /// Write the journal now
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.record)?;
        self.kv.set(WELLNESS_KEY, &data)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to save wellness journal: {}", e);
        }
    }
}

impl std::fmt::Debug for WellnessStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WellnessStore")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AssessmentError, MindWellError};
    use crate::kv::MemoryStore;
    use crate::record::TaskCategory;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, day, hour, 0, 0).unwrap()
    }

    fn store() -> (WellnessStore, MemoryStore) {
        let kv = MemoryStore::new();
        (WellnessStore::load(Box::new(kv.clone())), kv)
    }

    fn breathe() -> TaskTemplate {
        TaskTemplate::new(TaskCategory::Mindfulness, "Deep Breathing Practice")
    }

    #[test]
    fn test_complete_task_once() {
        let (mut store, _) = store();
        let task = store.create_task(breathe(), at(3, 8));
        assert!(!task.completed);
        assert_eq!(task.deadline, at(4, 4));

        let done = store.complete_task(task.id, at(3, 9)).unwrap();
        assert_eq!(done.task_id, task.id);
        assert_eq!(store.data().tasks_completed, 1);
        assert_eq!(store.data().task(task.id).unwrap().completed_at, Some(at(3, 9)));

        assert!(store.complete_task(task.id, at(3, 10)).is_none());
        assert_eq!(store.data().tasks_completed, 1);
    }

    #[test]
    fn test_unknown_task_is_noop() {
        let (mut store, kv) = store();
        assert!(store.complete_task(42, at(3, 9)).is_none());
        assert_eq!(store.data().tasks_completed, 0);
        assert!(kv.get(WELLNESS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_first_completion_starts_streak() {
        let (mut store, _) = store();
        let task = store.create_task(breathe(), at(3, 8));
        let done = store.complete_task(task.id, at(3, 9)).unwrap();
        assert!(done.streak_advanced);
        assert_eq!(done.streak, 1);
    }

    #[test]
    fn test_streak_holds_without_yesterday() {
        let (mut store, _) = store();
        store.record.streak = 3;
        let task = store.create_task(breathe(), at(10, 8));
        let done = store.complete_task(task.id, at(10, 9)).unwrap();
        assert!(!done.streak_advanced);
        assert_eq!(store.data().streak, 3);
    }

    #[test]
    fn test_streak_advances_after_yesterday() {
        let (mut store, _) = store();
        let first = store.create_task(breathe(), at(9, 8));
        store.complete_task(first.id, at(9, 9));
        assert_eq!(store.data().streak, 1);

        let second = store.create_task(breathe(), at(10, 8));
        let done = store.complete_task(second.id, at(10, 9)).unwrap();
        assert!(done.streak_advanced);
        assert_eq!(done.streak, 2);
    }

    #[test]
    fn test_streak_counts_every_completion_in_a_day() {
        let (mut store, _) = store();
        let a = store.create_task(breathe(), at(9, 8));
        store.complete_task(a.id, at(9, 9));

        let b = store.create_task(breathe(), at(10, 8));
        let c = store.create_task(breathe(), at(10, 8));
        store.complete_task(b.id, at(10, 9));
        store.complete_task(c.id, at(10, 10));
        assert_eq!(store.data().streak, 3);
    }

    #[test]
    fn test_streak_buckets_by_creation_day() {
        let (mut store, _) = store();
        store.record.streak = 2;
        // Created yesterday, completed today: counts for yesterday only
        let old = store.create_task(breathe(), at(9, 20));
        let done = store.complete_task(old.id, at(10, 9)).unwrap();
        assert!(!done.streak_advanced);
        assert_eq!(store.data().streak, 2);
    }

    #[test]
    fn test_mood_upsert_same_day() {
        let (mut store, _) = store();
        let first = store.record_mood(Mood::new(2), at(3, 8));
        let second = store.record_mood(Mood::new(5).with_note("better"), at(3, 20));
        assert_eq!(first.id, second.id);
        assert_eq!(store.data().mood_entries.len(), 1);
        let today = store.todays_mood(at(3, 21)).unwrap();
        assert_eq!(today.mood.value, 5);
        assert_eq!(today.mood.note.as_deref(), Some("better"));
        assert_eq!(today.date, at(3, 20));

        store.record_mood(Mood::new(3), at(4, 8));
        assert_eq!(store.data().mood_entries.len(), 2);
    }

    #[test]
    fn test_record_assessment_updates_profile() {
        let (mut store, _) = store();
        let battery = Questionnaire::standard();
        let result = store.record_assessment(&battery, &[0; 10], at(3, 8)).unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(store.data().assessments.len(), 1);
        assert_eq!(store.data().user.mental_health_score, Some(100));
        assert_eq!(store.data().user.last_assessment_date, Some(at(3, 8)));
    }

    #[test]
    fn test_bad_assessment_records_nothing() {
        let (mut store, _) = store();
        let battery = Questionnaire::standard();
        let err = store.record_assessment(&battery, &[1, 2, 3], at(3, 8)).unwrap_err();
        assert!(matches!(
            err,
            MindWellError::Assessment(AssessmentError::AnswerCount { expected: 10, got: 3 })
        ));
        assert!(store.data().assessments.is_empty());
        assert_eq!(store.data().user.mental_health_score, None);
    }

    #[test]
    fn test_appointment_keeps_details() {
        let (mut store, _) = store();
        let mut details = Map::new();
        details.insert("therapist".to_string(), Value::from("Dr. Rivera"));
        details.insert("slot".to_string(), Value::from("2026-05-06T15:00"));
        let appt = store.record_appointment(details, at(3, 8));
        assert_eq!(appt.booking_date, at(3, 8));
        assert_eq!(store.data().appointments[0].details["therapist"], "Dr. Rivera");
    }

    #[test]
    fn test_pending_and_todays_tasks() {
        let (mut store, _) = store();
        let old = store.create_task(breathe(), at(2, 8));
        let today = store.create_task(breathe(), at(3, 8));
        store.complete_task(today.id, at(3, 9));

        let pending: Vec<u64> = store.pending_tasks().iter().map(|t| t.id).collect();
        assert_eq!(pending, vec![old.id]);
        assert_eq!(store.todays_tasks(at(3, 12)).len(), 1);
    }

    #[test]
    fn test_reload_round_trip() {
        let (mut store, kv) = store();
        store.update_user("  Sam ");
        let task = store.create_task(breathe(), at(3, 8));
        store.complete_task(task.id, at(3, 9));
        store.record_mood(Mood::new(4).with_note("rested"), at(3, 10));
        let answers = [1, 0, 2, 0, 3, 1, 0, 4, 2, 1];
        store
            .record_assessment(&Questionnaire::standard(), &answers, at(3, 11))
            .unwrap();

        let mut details = Map::new();
        details.insert("therapist".to_string(), Value::from("Dr. Rivera"));
        details.insert("duration".to_string(), Value::from(50));
        details.insert("online".to_string(), Value::from(true));
        store.record_appointment(details, at(3, 12));

        let reloaded = WellnessStore::load(Box::new(kv));
        assert_eq!(reloaded.data(), store.data());
        assert_eq!(reloaded.data().user.name, "Sam");
        assert_eq!(reloaded.data().assessments[0].result.category_scores.len(), 8);
        assert_eq!(reloaded.data().appointments[0].details["duration"], 50);
    }

    #[test]
    fn test_appointment_reserved_keys_survive_reload() {
        let (mut store, kv) = store();
        store.update_user("Sam");
        let mut details = Map::new();
        details.insert("id".to_string(), Value::from(5));
        details.insert("bookingDate".to_string(), Value::from("next week"));
        let appt = store.record_appointment(details, at(3, 8));

        let reloaded = WellnessStore::load(Box::new(kv));
        assert_eq!(reloaded.data().user.name, "Sam");
        assert_eq!(reloaded.data().appointments.len(), 1);
        let saved = &reloaded.data().appointments[0];
        assert_eq!(saved.id, appt.id);
        assert_eq!(saved.booking_date, at(3, 8));
        assert_eq!(saved.details["id"], 5);
        assert_eq!(saved.details["bookingDate"], "next week");
    }

    #[test]
    fn test_corrupt_document_starts_fresh() {
        let kv = MemoryStore::new();
        kv.set(WELLNESS_KEY, "[1, 2").unwrap();
        let store = WellnessStore::load(Box::new(kv));
        assert_eq!(store.data().streak, 0);
        assert!(store.data().daily_tasks.is_empty());
    }
}
