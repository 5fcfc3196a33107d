//! End-to-end sessions against a file-backed store

use chrono::{DateTime, Duration, TimeZone, Utc};
use mindwell_common::assessment::{Category, Question, FREQUENCY, STRESS};
use mindwell_common::kv::{PROGRESSION_KEY, WELLNESS_KEY};
use mindwell_common::{
    FileStore, KeyValueStore, MemoryStore, MindWell, MindWellConfig, Mood, Notification,
    Questionnaire, TaskCategory, TaskTemplate,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::tempdir;

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap() + Duration::days(n)
}

fn open(kv: impl KeyValueStore + Clone + 'static) -> MindWell {
    MindWell::with_rng(kv, &MindWellConfig::default(), StdRng::seed_from_u64(42))
}

fn breathe() -> TaskTemplate {
    TaskTemplate::new(TaskCategory::Mindfulness, "Deep Breathing Practice")
}

#[test]
fn session_survives_restart() {
    let dir = tempdir().unwrap();
    let kv = FileStore::new(dir.path());

    {
        let mut mw = open(kv.clone());
        mw.set_name("Robin");
        let task = mw.create_task(breathe(), day(0));
        mw.complete_task(task.id, day(0)).unwrap();
        mw.track_mood(Mood::new(4), day(0));
    }

    assert!(dir.path().join(format!("{}.json", WELLNESS_KEY)).exists());
    assert!(dir.path().join(format!("{}.json", PROGRESSION_KEY)).exists());

    let mw = open(kv);
    assert_eq!(mw.journal().user.name, "Robin");
    assert_eq!(mw.journal().tasks_completed, 1);
    assert_eq!(mw.journal().mood_entries.len(), 1);
    // 25 task + 50 first_day + 5 streak + 15 mood
    assert_eq!(mw.engine().total_xp(), 95);
    assert!(mw.engine().achievements().iter().any(|a| a.id == "first_day" && a.unlocked));
}

#[test]
fn session_four_tasks_reach_sprout() {
    let mut mw = open(MemoryStore::new());
    let level_ups = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&level_ups);
    mw.subscribe(move |n| {
        if matches!(n, Notification::LevelUp { .. }) {
            *counter.borrow_mut() += 1;
        }
    });

    // Spread over days with a gap so the streak never advances past 1
    for n in [0, 2, 4, 6] {
        let task = mw.create_task(breathe(), day(n));
        mw.complete_task(task.id, day(n)).unwrap();
    }

    let summary = mw.summary();
    assert_eq!(summary.level, 2);
    assert_eq!(summary.level_name, "Sprout");
    assert_eq!(*level_ups.borrow(), 1);
    assert_eq!(mw.journal().streak, 1);
}

#[test]
fn session_streak_week_grows_strength_tree() {
    let mut mw = open(MemoryStore::new());
    for n in 0..7 {
        let task = mw.create_task(breathe(), day(n));
        mw.complete_task(task.id, day(n)).unwrap();
    }
    assert_eq!(mw.journal().streak, 7);
    assert!(mw.engine().achievements().iter().any(|a| a.id == "week_warrior" && a.unlocked));
    let tree = mw.engine().garden().iter().find(|e| e.id == "strength_tree").unwrap();
    assert!(tree.current_stage >= 1);
}

#[test]
fn session_custom_battery_scores_good() {
    let mut questions = Vec::new();
    for id in 1..=7 {
        questions.push(Question {
            id,
            category: Category::Mood,
            prompt: "How often?",
            options: FREQUENCY,
        });
    }
    for id in 8..=10 {
        questions.push(Question {
            id,
            category: Category::Stress,
            prompt: "How much?",
            options: STRESS,
        });
    }
    let mut mw = open(MemoryStore::new()).with_questionnaire(Questionnaire::new(questions));

    let (result, notes) = mw.submit_assessment(&[1; 10], day(0)).unwrap();
    assert_eq!(result.max_possible_score, 33);
    assert_eq!(result.score, 70);
    assert_eq!(result.interpretation.label(), "Good mental health");
    assert!(matches!(notes.last(), Some(Notification::Reward { xp: 50, .. })));
    assert_eq!(mw.journal().user.mental_health_score, Some(70));
}

#[test]
fn session_corrupt_documents_load_as_defaults() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("mindwell_data.json"), "not json at all").unwrap();
    std::fs::write(dir.path().join("mindwell_gamification.json"), "{\"totalXP\": ").unwrap();

    let mut mw = open(FileStore::new(dir.path()));
    assert_eq!(mw.journal().streak, 0);
    assert_eq!(mw.engine().total_xp(), 0);

    assert!(mw.complete_task(12345, day(0)).is_none());
    assert_eq!(mw.engine().total_xp(), 0);
}
