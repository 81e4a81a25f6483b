// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Lesson not found: {0}")]
    LessonNotFound(String),
}
