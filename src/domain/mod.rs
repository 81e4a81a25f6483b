// src/domain/mod.rs
pub mod classifier;
pub mod error;
pub mod lesson;
pub mod note;

pub use classifier::{categorize, classify};
pub use error::DomainError;
pub use lesson::{compose_lesson_time, LessonField, LessonFile, LessonRecord};
pub use note::{Category, Note, NOTE_DATE_FORMAT, NOTE_DAY_FORMAT};
