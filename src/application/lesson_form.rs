// src/application/lesson_form.rs
use crate::application::events::{Signal, SignalQueue};
use crate::application::storage::{load_lessons, save_lessons, KeyValueStore};
use crate::constants::LESSON_ID_RANDOM_LEN;
use crate::domain::{compose_lesson_time, DomainError, LessonField, LessonFile, LessonRecord};
use chrono::Utc;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

const CREATE_TITLE: &str = "创建新课程";
const UNNAMED: &str = "未命名";
const TEXTAREA_ROWS: usize = 5;

/// One of the form's display cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCard {
    pub field: LessonField,
    pub value: String,
}

/// Input shown in the modal when a card is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEditor {
    TextArea { value: String, rows: usize },
    DateTime { date: String, time: String },
    Number { value: String },
}

impl FieldEditor {
    pub fn for_field(field: LessonField, current: &str) -> Self {
        match field {
            LessonField::LessonTime => {
                let (date, time) = current.split_once(' ').unwrap_or((current, ""));
                FieldEditor::DateTime {
                    date: date.to_string(),
                    time: time.to_string(),
                }
            }
            LessonField::LessonCount | LessonField::Duration => FieldEditor::Number {
                value: current.to_string(),
            },
            LessonField::CourseName
            | LessonField::StudentProfile
            | LessonField::Requirements
            | LessonField::OutputFormat => FieldEditor::TextArea {
                value: current.to_string(),
                rows: TEXTAREA_ROWS,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonFormPage {
    pub title: String,
    pub cards: Vec<FieldCard>,
    pub files: Vec<FileEntry>,
    pub editor: Option<(LessonField, FieldEditor)>,
}

/// The lesson preparation screen and its working copy.
#[derive(Debug, Clone)]
pub struct LessonForm {
    working: LessonRecord,
    title: String,
    editing: Option<LessonField>,
}

impl LessonForm {
    /// Open the form. A known id loads that lesson; an unknown id or no id
    /// starts a new lesson under a fresh id. Nothing is written.
    #[instrument(level = "debug", skip(store))]
    pub fn open(store: &dyn KeyValueStore, id: Option<&str>) -> Self {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return Self::create();
        };

        match find_lesson(store, id) {
            Ok(lesson) => {
                info!(lesson_id = %lesson.id, "Editing lesson");
                let title = format!("编辑课程: {}", lesson.display_name().unwrap_or(UNNAMED));
                Self {
                    working: lesson,
                    title,
                    editing: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "Falling back to a new lesson");
                Self::create()
            }
        }
    }

    fn create() -> Self {
        let id = generate_lesson_id();
        debug!(lesson_id = %id, "Creating new lesson");
        Self {
            working: LessonRecord::with_id(id),
            title: CREATE_TITLE.to_string(),
            editing: None,
        }
    }

    pub fn working(&self) -> &LessonRecord {
        &self.working
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Show the modal editor for a card.
    pub fn begin_edit(&mut self, field: LessonField) {
        self.editing = Some(field);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn edit_field(&mut self, field: LessonField, value: &str) {
        debug!(field = field.key(), "Editing lesson field");
        self.working.set_field(field, value);
        self.editing = None;
    }

    /// Store the date and time inputs as one opaque `"<date> <time>"` string.
    pub fn edit_lesson_time(&mut self, date: &str, time: &str) {
        let value = compose_lesson_time(date, time);
        self.edit_field(LessonField::LessonTime, &value);
    }

    /// Add a decoded file. Reads may finish in any order; each completion is
    /// applied to the current list.
    pub fn attach_file(&mut self, file: LessonFile) {
        debug!(name = %file.name, size = file.size, "Attaching file");
        self.working.files.push(file);
    }

    /// Remove by current position. Out of range is ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<LessonFile> {
        if index < self.working.files.len() {
            Some(self.working.files.remove(index))
        } else {
            debug!(index, "No file at index");
            None
        }
    }

    /// Write the working copy into the lessons list, replacing an entry with
    /// the same id or appending, and announce the change.
    #[instrument(level = "debug", skip_all, fields(lesson_id = %self.working.id))]
    pub fn save(&self, store: &mut dyn KeyValueStore, signals: &mut SignalQueue) {
        let mut lessons = load_lessons(store);
        match lessons.iter_mut().find(|l| l.id == self.working.id) {
            Some(existing) => {
                *existing = self.working.clone();
                info!("Updated lesson");
            }
            None => {
                lessons.push(self.working.clone());
                info!("Saved new lesson");
            }
        }
        save_lessons(store, &lessons);
        signals.emit(Signal::LessonSaved);
    }

    pub fn render(&self) -> LessonFormPage {
        LessonFormPage {
            title: self.title.clone(),
            cards: LessonField::ALL
                .into_iter()
                .map(|field| FieldCard {
                    field,
                    value: self.working.field(field).to_string(),
                })
                .collect(),
            files: self
                .working
                .files
                .iter()
                .enumerate()
                .map(|(index, f)| FileEntry {
                    index,
                    name: f.name.clone(),
                })
                .collect(),
            editor: self
                .editing
                .map(|field| (field, FieldEditor::for_field(field, self.working.field(field)))),
        }
    }
}

pub fn find_lesson(store: &dyn KeyValueStore, id: &str) -> Result<LessonRecord, DomainError> {
    load_lessons(store)
        .into_iter()
        .find(|l| l.id == id)
        .ok_or_else(|| DomainError::LessonNotFound(id.to_string()))
}

/// `lesson-` + base36 millisecond clock + random base36 tail.
pub fn generate_lesson_id() -> String {
    let millis = u128::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let mut rng = rand::thread_rng();
    let tail: String = (0..LESSON_ID_RANDOM_LEN)
        .map(|_| base36_digit(rng.gen_range(0..36)))
        .collect();
    format!("lesson-{}{}", to_base36(millis), tail)
}

fn base36_digit(n: u32) -> char {
    char::from_digit(n, 36).unwrap_or('0')
}

fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(base36_digit((n % 36) as u32));
        n /= 36;
    }
    digits.iter().rev().collect()
}
