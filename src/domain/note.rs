// src/domain/note.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of `Note::date`, minute precision local time.
pub const NOTE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Prefix of `Note::date` identifying a calendar day.
pub const NOTE_DAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Todo,
    Course,
    Note,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Todo, Category::Course, Category::Note];

    /// Label persisted in the store and shown on cards.
    pub fn label(self) -> &'static str {
        match self {
            Category::Todo => "待办",
            Category::Course => "课程",
            Category::Note => "笔记",
        }
    }

    /// Map a label (persisted or user-typed) onto a category.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Category::ALL.into_iter().find(|c| {
            c.label() == label || c.english_name().eq_ignore_ascii_case(label)
        })
    }

    fn english_name(self) -> &'static str {
        match self {
            Category::Todo => "todo",
            Category::Course => "course",
            Category::Note => "note",
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_label(&value).unwrap_or(Category::Note)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub content: String,
    pub date: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Note {
    pub fn new(content: impl Into<String>, at: NaiveDateTime, category: Category) -> Self {
        Self {
            content: content.into(),
            date: at.format(NOTE_DATE_FORMAT).to_string(),
            category,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Parse `date` back into a comparable instant.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.date.trim(), NOTE_DATE_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|day| day.and_hms_opt(h, min, 0))
            .expect("valid test date")
    }

    #[test]
    fn given_new_note_when_formatting_then_uses_minute_precision() {
        let note = Note::new("完成作业", at(2024, 3, 5, 9, 7), Category::Todo);

        assert_eq!(note.date, "2024-03-05 09:07");
        assert_eq!(note.timestamp(), Some(at(2024, 3, 5, 9, 7)));
    }

    #[test]
    fn given_malformed_date_when_parsing_then_returns_none() {
        let mut note = Note::new("x", at(2024, 3, 5, 9, 7), Category::Note);
        note.date = "yesterday".to_string();

        assert_eq!(note.timestamp(), None);
    }

    #[rstest]
    #[case("待办", Some(Category::Todo))]
    #[case("课程", Some(Category::Course))]
    #[case("笔记", Some(Category::Note))]
    #[case("TODO", Some(Category::Todo))]
    #[case(" course ", Some(Category::Course))]
    #[case("会议", None)]
    fn test_category_from_label(#[case] label: &str, #[case] expected: Option<Category>) {
        assert_eq!(Category::from_label(label), expected);
    }

    #[test]
    fn given_note_when_serializing_then_category_is_persisted_as_label() {
        let note = Note::new("上课", at(2024, 3, 5, 9, 7), Category::Course);

        let json = serde_json::to_string(&note).expect("serialize");

        assert_eq!(
            json,
            r#"{"content":"上课","date":"2024-03-05 09:07","category":"课程"}"#
        );
    }

    #[test]
    fn given_unknown_persisted_category_when_deserializing_then_falls_back_to_note() {
        let json = r#"{"content":"x","date":"2024-03-05 09:07","category":"会议"}"#;

        let note: Note = serde_json::from_str(json).expect("deserialize");

        assert_eq!(note.category, Category::Note);
        assert_eq!(note.tag, None);
    }
}
