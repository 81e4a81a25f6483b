// src/domain/classifier.rs
use crate::domain::Category;

const TASK_KEYWORDS: [&str; 3] = ["作业", "任务", "deadline"];
const CLASS_KEYWORDS: [&str; 3] = ["课程", "上课", "讲座"];

/// Keyword classification of free text. Task keywords win over class keywords.
pub fn classify(text: &str) -> Category {
    if TASK_KEYWORDS.iter().any(|k| text.contains(k)) {
        Category::Todo
    } else if CLASS_KEYWORDS.iter().any(|k| text.contains(k)) {
        Category::Course
    } else {
        Category::Note
    }
}

/// Category for a new note: a non-empty tag always wins, content is only
/// consulted without one. Unrecognized tags land in the catch-all.
pub fn categorize(content: &str, tag: Option<&str>) -> Category {
    match tag.map(str::trim).filter(|t| !t.is_empty()) {
        Some(tag) => Category::from_label(tag).unwrap_or(Category::Note),
        None => classify(content),
    }
}
