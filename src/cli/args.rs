// src/cli/args.rs
use crate::domain::LessonField;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to the TOML config file (optional)
    #[arg(long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Path to the JSON store, overriding the config (optional)
    #[arg(short, long, value_name = "STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a page and open it in the browser
    Open {
        /// Location fragment, e.g. `#/agenda` or `#/prepare-lesson?lessonId=...`
        #[arg(value_name = "FRAGMENT", default_value = "")]
        fragment: String,

        /// Print the HTML instead of opening the browser
        #[arg(long)]
        print: bool,
    },

    /// Agenda notes
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },

    /// Prepared lessons
    Lesson {
        #[command(subcommand)]
        action: LessonCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum NoteCommand {
    /// Add a note; the category comes from the tag or the content
    Add {
        #[arg(value_name = "CONTENT")]
        content: String,

        /// Category tag overriding keyword classification
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// List notes newest first
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum LessonCommand {
    /// List saved lessons with ID and name
    List {
        /// Output lessons as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one lesson
    Show {
        #[arg(value_name = "LESSON_ID")]
        id: String,

        /// Output lesson as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a lesson, or update one when `--id` names a saved lesson
    Save {
        #[arg(long, value_name = "LESSON_ID")]
        id: Option<String>,

        /// Field assignment, e.g. `--set courseName=Geometry`
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_field_assignment)]
        fields: Vec<(LessonField, String)>,

        /// Lesson date, combined with `--time`
        #[arg(long, requires = "time")]
        date: Option<String>,

        /// Lesson clock time, combined with `--date`
        #[arg(long, requires = "date")]
        time: Option<String>,

        /// Files to embed in the lesson
        #[arg(long = "attach", value_name = "PATH")]
        attachments: Vec<PathBuf>,
    },

    /// Delete a lesson
    Delete {
        #[arg(value_name = "LESSON_ID")]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_field_assignment(s: &str) -> Result<(LessonField, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{s}`"))?;
    let field = LessonField::from_key(key.trim()).ok_or_else(|| {
        let known: Vec<_> = LessonField::ALL.iter().map(|f| f.key()).collect();
        format!("unknown field `{key}`, expected one of: {}", known.join(", "))
    })?;
    Ok((field, value.to_string()))
}
