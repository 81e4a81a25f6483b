// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use application::agenda::AgendaView;
use application::lesson_form::find_lesson;
use application::sidebar::{lesson_label, Sidebar};
use application::storage::load_lessons;
use application::{ActiveView, App, AppEvent, Confirm, Location, SystemClock};
use cli::args::{Args, Command, LessonCommand, NoteCommand};
use infrastructure::{AssumeYes, Config, JsonFileStore, PageRenderer, TerminalConfirm};
use tracing::{debug, info};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting lessonpad with arguments");

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load_or_default(&config_path)?;
    let store_path = args.store.clone().unwrap_or_else(|| config.storage.path.clone());
    let store = JsonFileStore::open(&store_path)?;
    info!(store = %store.path().display(), "Using store");

    let confirm: Box<dyn Confirm> = match &args.command {
        Command::Lesson {
            action: LessonCommand::Delete { yes: true, .. },
        } => Box::new(AssumeYes),
        _ => Box::new(TerminalConfirm),
    };
    let mut app = App::new(
        Box::new(store),
        confirm,
        Box::new(SystemClock),
        config.general.user_name,
    );

    match args.command {
        Command::Open { fragment, print } => open(&mut app, &fragment, print),
        Command::Note { action } => note(&mut app, action),
        Command::Lesson { action } => lesson(&mut app, action),
    }
}

fn open(app: &mut App, fragment: &str, print: bool) -> Result<()> {
    app.start(fragment);
    let html = app.document();

    if print {
        println!("{html}");
        return Ok(());
    }

    let mut renderer = PageRenderer::new();
    let path = renderer.create_temp_file(&html)?;
    renderer.open_in_browser(&path)?;
    Ok(())
}

fn note(app: &mut App, action: NoteCommand) -> Result<()> {
    match action {
        NoteCommand::Add { content, tag } => {
            app.start("#/agenda");
            let before = AgendaView::load(app.store()).notes().len();
            app.handle(AppEvent::AddNote { content, tag });

            let view = AgendaView::load(app.store());
            if view.notes().len() == before {
                println!("Nothing added: note content is empty");
                return Ok(());
            }
            if let Some(note) = view.notes().last() {
                println!("{}\t[{}]\t{}", note.date, note.category.label(), note.content);
            }
        }
        NoteCommand::List { json } => {
            let mut view = AgendaView::load(app.store());
            let timeline = view.render_timeline();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(view.notes())
                        .context("Failed to serialize notes")?
                );
            } else {
                for card in timeline.cards {
                    println!("{}\t[{}]\t{}", card.date, card.label, card.content);
                }
            }
        }
    }
    Ok(())
}

fn lesson(app: &mut App, action: LessonCommand) -> Result<()> {
    match action {
        LessonCommand::List { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&load_lessons(app.store()))
                        .context("Failed to serialize lessons")?
                );
            } else {
                let mut sidebar = Sidebar::new();
                for entry in &sidebar.refresh(app.store()).entries {
                    println!("{}\t{}", entry.id, entry.label);
                }
            }
        }
        LessonCommand::Show { id, json } => {
            let lesson = find_lesson(app.store(), &id)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&lesson).context("Failed to serialize lesson")?
                );
            } else {
                println!("{}\t{}", lesson.id, lesson_label(&lesson));
                for field in domain::LessonField::ALL {
                    println!("{}: {}", field.title(), lesson.field(field));
                }
                for file in &lesson.files {
                    println!("文件: {} ({}, {} bytes)", file.name, file.mime_type, file.size);
                }
            }
        }
        LessonCommand::Save {
            id,
            fields,
            date,
            time,
            attachments,
        } => {
            app.start(&Location::lesson_form(id.as_deref()));
            let lesson_id = match app.active() {
                ActiveView::LessonForm(form) => form.working().id.clone(),
                _ => anyhow::bail!("Lesson form did not open"),
            };

            for (field, value) in fields {
                app.handle(AppEvent::EditField { field, value });
            }
            if let (Some(date), Some(time)) = (date, time) {
                app.handle(AppEvent::EditLessonTime { date, time });
            }
            if !attachments.is_empty() {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .context("Failed to start file reader runtime")?;
                runtime.block_on(infrastructure::file_reader::read_all(attachments, |file| {
                    app.handle(AppEvent::FileReady(file))
                }));
            }
            app.handle(AppEvent::SaveLesson);
            println!("{lesson_id}");
        }
        LessonCommand::Delete { id, .. } => {
            app.start("");
            let before = load_lessons(app.store()).len();
            app.handle(AppEvent::DeleteLesson(id.clone()));
            if load_lessons(app.store()).len() < before {
                println!("Deleted lesson {id}");
            } else {
                println!("Lesson {id} not deleted");
            }
        }
    }
    Ok(())
}
