//! Display helpers for mindwellctl.
//!
//! `format_*` functions build plain strings (tests read these); the `print_*`
//! wrappers add colour and write to stdout.

use chrono::{DateTime, Utc};
use mindwell_common::catalog::Wisdom;
use mindwell_common::progression::{Achievement, GardenElement, Rarity, VirtualGarden};
use mindwell_common::{Notification, ProgressSummary, Task, WellnessRecord};
use owo_colors::OwoColorize;

pub const HR: &str = "──────────────────────────────────────────";

const KEY_WIDTH: usize = 14;

fn print_kv(key: &str, value: &str) {
    println!("{:width$} {}", key, value, width = KEY_WIDTH);
}

/// Text-mode progress bar, `width` cells wide
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn colorize_rarity(text: &str, rarity: Rarity) -> String {
    match rarity {
        Rarity::Common => text.white().to_string(),
        Rarity::Uncommon => text.green().to_string(),
        Rarity::Rare => text.blue().to_string(),
        Rarity::Epic => text.magenta().to_string(),
        Rarity::Legendary => text.yellow().bold().to_string(),
        Rarity::Mythic => text.bright_red().bold().to_string(),
    }
}

pub fn format_notification(note: &Notification) -> String {
    match note {
        Notification::Reward { xp, message, level, level_name, .. } => {
            format!("+{} XP  {}  (level {} {})", xp, message, level, level_name)
        }
        Notification::LevelUp { new_level, name, reward, .. } => {
            format!("LEVEL UP! You are now level {} {}. {}", new_level, name, reward)
        }
        Notification::AchievementUnlocked(ach) => {
            mindwell_common::progression::achievements::format_achievement_unlock(ach)
        }
        Notification::GardenGrown(element) => {
            format!("{} grew to {}", element.name, element.stage_label())
        }
    }
}

/// Rendered on the notification bus as each event fires
pub fn print_notification(note: &Notification) {
    let line = format_notification(note);
    match note {
        Notification::Reward { .. } => println!("{}", line.cyan()),
        Notification::LevelUp { .. } => println!("{}", line.bright_yellow().bold()),
        Notification::AchievementUnlocked(ach) => {
            println!("{}", colorize_rarity(&line, ach.rarity()))
        }
        Notification::GardenGrown(_) => println!("{}", line.green()),
    }
}

pub fn format_task(task: &Task, now: DateTime<Utc>) -> String {
    let mark = if task.completed {
        "[x]"
    } else if task.is_overdue(now) {
        "[!]"
    } else {
        "[ ]"
    };
    let minutes = if task.template.duration_minutes > 0 {
        format!(" ({} min)", task.template.duration_minutes)
    } else {
        String::new()
    };
    format!(
        "{} {:>13}  {:<11} {}{}",
        mark,
        task.id,
        task.category().as_str(),
        task.title(),
        minutes
    )
}

pub fn print_tasks(tasks: &[&Task], now: DateTime<Utc>) {
    if tasks.is_empty() {
        println!("{}", "No tasks. Try `mindwellctl tasks generate`.".dimmed());
        return;
    }
    for task in tasks {
        let line = format_task(task, now);
        if task.completed {
            println!("{}", line.dimmed());
        } else if task.is_overdue(now) {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
        if let Some(wisdom) = &task.template.wisdom {
            println!("{:19}{}", "", wisdom.italic().dimmed());
        }
    }
}

pub fn print_status(
    summary: &ProgressSummary,
    journal: &WellnessRecord,
    todays_tasks: &[&Task],
    now: DateTime<Utc>,
) {
    let name = if journal.user.name.is_empty() {
        "friend"
    } else {
        journal.user.name.as_str()
    };
    println!();
    println!("{}", format!("MindWell - hello, {}", name).bold());
    println!("{}", HR.dimmed());

    print_kv("level", &format!("{} {}", summary.level, summary.level_name));
    print_kv(
        "xp",
        &format!(
            "{} {} {:.0}% ({} to next)",
            summary.xp,
            progress_bar(summary.progress_percent, 20),
            summary.progress_percent,
            summary.xp_to_next
        ),
    );
    print_kv("streak", &format!("{} days", journal.streak));
    print_kv("completed", &journal.tasks_completed.to_string());
    print_kv(
        "achievements",
        &format!("{}/{}", summary.unlocked_achievements, summary.total_achievements),
    );
    print_kv("garden", &format!("{} happiness", summary.garden_happiness));
    match journal.user.mental_health_score {
        Some(score) => print_kv("wellbeing", &format!("{}/100", score)),
        None => print_kv("wellbeing", "not assessed yet"),
    }
    println!();

    let done = todays_tasks.iter().filter(|t| t.completed).count();
    println!("{} ({}/{})", "Today".bold(), done, todays_tasks.len());
    print_tasks(todays_tasks, now);
    println!();
}

pub fn format_achievement(ach: &Achievement) -> String {
    let state = if ach.unlocked { "[x]" } else { "[ ]" };
    format!(
        "{} {} {:<22} {:<9} +{:<5} {}",
        state,
        ach.icon,
        ach.name,
        ach.rarity().as_str(),
        ach.xp_reward,
        ach.description
    )
}

pub fn print_achievements(achievements: &[Achievement]) {
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    println!("{} ({}/{})", "Achievements".bold(), unlocked, achievements.len());
    println!("{}", HR.dimmed());
    for ach in achievements {
        let line = format_achievement(ach);
        if ach.unlocked {
            println!("{}", colorize_rarity(&line, ach.rarity()));
        } else {
            println!("{}", line.dimmed());
        }
    }
}

pub fn format_garden_element(element: &GardenElement) -> String {
    let stages: Vec<String> = element
        .growth_stages
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if i == element.current_stage {
                format!("[{}]", s)
            } else {
                s.clone()
            }
        })
        .collect();
    format!(
        "{:<18} {}  stage {}/{}",
        element.name,
        stages.join(" "),
        element.current_stage + 1,
        element.growth_stages.len()
    )
}

pub fn print_garden(elements: &[GardenElement], totals: VirtualGarden) {
    println!("{}", "Your garden".bold());
    println!("{}", HR.dimmed());
    for element in elements {
        let line = format_garden_element(element);
        if element.is_fully_grown() {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
    println!();
    print_kv("happiness", &totals.happiness.to_string());
    print_kv("growth", &format!("{} stages", totals.growth));
}

pub fn print_wisdom(wisdom: &Wisdom) {
    println!("{}", wisdom.rule.bold());
    println!("{}", wisdom.description);
    println!();
    println!("  \"{}\"", wisdom.quote.italic());
    println!("  {}", format!("- {}", wisdom.movie).dimmed());
    println!();
    println!("{}", wisdom.wisdom);
}
