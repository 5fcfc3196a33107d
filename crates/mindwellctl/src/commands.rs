//! Command handlers for mindwellctl.
//!
//! Handlers act on an open session. Progression notifications are not printed
//! here: the caller subscribes a renderer to the session bus.

use crate::cli::{Commands, TaskCommands};
use crate::display;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use mindwell_common::{MindWell, Mood, TaskCategory, TaskTemplate};
use serde_json::{Map, Value};

pub fn run(mw: &mut MindWell, command: Commands, now: DateTime<Utc>) -> Result<()> {
    match command {
        Commands::Status => status(mw, now),
        Commands::Tasks { action } => tasks(mw, action, now),
        Commands::Mood { value, emoji, note } => mood(mw, value, emoji, note, now),
        Commands::Assess { answers } => assess(mw, &answers, now),
        Commands::Appointment { fields } => appointment(mw, &fields, now),
        Commands::Achievements => {
            display::print_achievements(mw.engine().achievements());
            Ok(())
        }
        Commands::Garden => {
            display::print_garden(mw.engine().garden(), mw.engine().virtual_garden());
            Ok(())
        }
        Commands::Wisdom { random } => {
            let wisdom = if random {
                mw.random_wisdom()
            } else {
                mw.todays_wisdom(now)
            };
            display::print_wisdom(wisdom);
            Ok(())
        }
        Commands::Name { name } => {
            if name.trim().is_empty() {
                bail!("Name cannot be empty");
            }
            mw.set_name(&name);
            println!("Nice to meet you, {}.", name.trim());
            Ok(())
        }
    }
}

fn status(mw: &MindWell, now: DateTime<Utc>) -> Result<()> {
    let todays = mw.store().todays_tasks(now);
    display::print_status(&mw.summary(), mw.journal(), &todays, now);
    Ok(())
}

fn tasks(mw: &mut MindWell, action: TaskCommands, now: DateTime<Utc>) -> Result<()> {
    match action {
        TaskCommands::Generate { count } => {
            let created = mw.generate_daily_tasks(count, now);
            println!("Scheduled {} tasks for today:", created.len());
            let refs: Vec<_> = created.iter().collect();
            display::print_tasks(&refs, now);
            Ok(())
        }
        TaskCommands::List { all } => {
            let tasks = if all {
                mw.journal().daily_tasks.iter().collect()
            } else {
                mw.store().pending_tasks()
            };
            display::print_tasks(&tasks, now);
            Ok(())
        }
        TaskCommands::Add { title, category, minutes } => {
            let task = mw.create_task(custom_task(&title, category, minutes)?, now);
            println!("Added task {}: {}", task.id, task.title());
            Ok(())
        }
        TaskCommands::Complete { id } => match mw.complete_task(id, now) {
            Some(_) => {
                println!("{}", mw.motivational_message());
                Ok(())
            }
            None => bail!("No pending task with id {}", id),
        },
    }
}

fn mood(
    mw: &mut MindWell,
    value: u8,
    emoji: Option<String>,
    note: Option<String>,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut mood = Mood::new(value);
    if let Some(emoji) = emoji {
        mood.emoji = emoji;
    }
    if let Some(note) = note {
        mood = mood.with_note(&note);
    }
    let (entry, _) = mw.track_mood(mood, now);
    println!("Mood logged: {} ({}/5)", entry.mood.emoji, entry.mood.value);
    Ok(())
}

fn assess(mw: &mut MindWell, answers: &[u8], now: DateTime<Utc>) -> Result<()> {
    let (result, _) = mw
        .submit_assessment(answers, now)
        .context("Assessment not recorded")?;
    println!(
        "Wellbeing score: {}/100 - {}",
        result.score, result.interpretation
    );
    for (category, score) in &result.category_scores {
        println!("  {:<10} {:>3}%", category.to_string(), score.percentage);
    }
    Ok(())
}

fn appointment(mw: &mut MindWell, fields: &[String], now: DateTime<Utc>) -> Result<()> {
    let details = parse_fields(fields)?;
    let booked = mw.book_appointment(details, now);
    println!("Appointment {} booked", booked.id);
    Ok(())
}

/// Build a template for a user-defined task
pub fn custom_task(
    title: &str,
    category: TaskCategory,
    minutes: Option<u32>,
) -> Result<TaskTemplate> {
    let title = title.trim();
    if title.is_empty() {
        bail!("Task title cannot be empty");
    }
    let mut template = TaskTemplate::new(category, title);
    template.duration_minutes = minutes.unwrap_or(0);
    Ok(template)
}

/// Parse `key=value` pairs. Values that parse as JSON keep their type;
/// anything else is stored as a string.
pub fn parse_fields(fields: &[String]) -> Result<Map<String, Value>> {
    let mut details = Map::new();
    for field in fields {
        let (key, raw) = field
            .split_once('=')
            .with_context(|| format!("Expected KEY=VALUE, got '{}'", field))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("Empty key in '{}'", field);
        }
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::from(raw));
        details.insert(key.to_string(), value);
    }
    Ok(details)
}
