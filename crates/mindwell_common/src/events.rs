//! Domain events, progression notifications, and a synchronous event bus.
//!
//! Subscribers run in registration order, each to completion, on the caller's
//! thread. There is no queueing: `publish` returns once every subscriber has
//! seen the event.

use crate::progression::achievements::Achievement;
use crate::progression::garden::GardenElement;
use serde::Serialize;
use std::fmt;

/// XP-earning user actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceAction {
    CompleteTask,
    MoodTrack,
    AssessmentComplete,
    StreakMaintained,
}

impl ExperienceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompleteTask => "complete_task",
            Self::MoodTrack => "mood_track",
            Self::AssessmentComplete => "assessment_complete",
            Self::StreakMaintained => "streak_maintained",
        }
    }

    /// Celebration lines shown with the XP award
    pub fn celebration_messages(&self) -> &'static [&'static str] {
        match self {
            Self::CompleteTask => &[
                "🎉 Amazing! You completed a wellness task!",
                "✨ You're building healthy habits!",
                "🌟 Every step counts towards your wellbeing!",
                "💪 You're getting stronger mentally!",
            ],
            Self::MoodTrack => &[
                "💙 Thank you for checking in with yourself!",
                "🎯 Self-awareness is the first step to growth!",
                "📊 Your emotional intelligence is growing!",
            ],
            Self::AssessmentComplete => &[
                "🧠 Brave of you to assess your mental health!",
                "📈 Knowledge is power - you're empowered!",
                "🔬 Understanding yourself better each day!",
            ],
            Self::StreakMaintained => &[
                "🔥 Your consistency is inspiring!",
                "💎 You're building diamond-strong habits!",
                "🚀 Your dedication is paying off!",
            ],
        }
    }
}

impl fmt::Display for ExperienceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts emitted after a successful journal mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WellnessEvent {
    TaskCompleted { task_id: u64 },
    MoodTracked { value: u8 },
    AssessmentCompleted { score: u8 },
    StreakMaintained { streak_days: u32 },
}

impl WellnessEvent {
    pub fn action(&self) -> ExperienceAction {
        match self {
            Self::TaskCompleted { .. } => ExperienceAction::CompleteTask,
            Self::MoodTracked { .. } => ExperienceAction::MoodTrack,
            Self::AssessmentCompleted { .. } => ExperienceAction::AssessmentComplete,
            Self::StreakMaintained { .. } => ExperienceAction::StreakMaintained,
        }
    }
}

/// What the presentation layer is told to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    Reward {
        action: ExperienceAction,
        xp: u64,
        message: String,
        level: u8,
        level_name: String,
    },
    LevelUp {
        old_level: u8,
        new_level: u8,
        name: String,
        reward: String,
    },
    AchievementUnlocked(Achievement),
    GardenGrown(GardenElement),
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Synchronous in-process event bus
pub struct EventBus<E> {
    handlers: Vec<Handler<E>>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn publish(&mut self, event: &E) {
        for handler in &mut self.handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
