//! Command-line argument parsing.
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use mindwell_common::TaskCategory;
use std::path::PathBuf;

/// MindWell terminal client
#[derive(Parser, Debug)]
#[command(name = "mindwellctl")]
#[command(about = "MindWell - daily wellness journal with a growing garden", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (overrides the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides $MINDWELL_DATA_DIR and config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Level, XP, streak and today's tasks
    Status,

    /// Manage daily tasks
    Tasks {
        #[command(subcommand)]
        action: TaskCommands,
    },

    /// Log today's mood (1-5); a second entry today replaces the first
    Mood {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        value: u8,

        /// Override the default face for this value
        #[arg(long)]
        emoji: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Submit the wellbeing assessment, one weight per question
    Assess {
        #[arg(required = true, num_args = 1..)]
        answers: Vec<u8>,
    },

    /// Book an appointment; details are free-form key=value pairs
    Appointment {
        #[arg(long = "field", value_name = "KEY=VALUE", required = true)]
        fields: Vec<String>,
    },

    /// List achievements
    Achievements,

    /// Show the virtual garden
    Garden,

    /// Today's wisdom quote
    Wisdom {
        /// Pick a random quote instead
        #[arg(long)]
        random: bool,
    },

    /// Set your display name
    Name { name: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Schedule random tasks from the catalog
    Generate {
        #[arg(long)]
        count: Option<usize>,
    },

    /// List tasks
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },

    /// Add a custom task
    Add {
        title: String,

        #[arg(long, default_value = "mindfulness")]
        category: TaskCategory,

        #[arg(long)]
        minutes: Option<u32>,
    },

    /// Mark a task done
    Complete { id: u64 },
}
