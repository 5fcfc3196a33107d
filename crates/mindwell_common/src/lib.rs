//! MindWell Common - wellness journal and progression engine
//!
//! The journal records moods, tasks, assessments and appointments. The
//! progression engine derives XP, level, achievements and a virtual garden
//! from it. `MindWell` wires the two together for a session.

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod kv;
pub mod progression;
pub mod record;
pub mod session;
pub mod store;

pub use assessment::{AssessmentResult, Interpretation, Questionnaire};
pub use config::MindWellConfig;
pub use error::{AssessmentError, MindWellError, Result};
pub use events::{EventBus, ExperienceAction, Notification, WellnessEvent};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use progression::{ProgressSummary, ProgressionEngine};
pub use record::{Mood, Task, TaskCategory, TaskTemplate, WellnessRecord};
pub use session::MindWell;
pub use store::{TaskCompletion, WellnessStore};
