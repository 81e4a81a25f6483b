// src/domain/lesson.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonFile {
    pub name: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "dataUrl", default)]
    pub data_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LessonRecord {
    pub id: String,
    pub course_name: String,
    pub student_profile: String,
    pub lesson_time: String,
    pub lesson_count: String,
    pub duration: String,
    pub requirements: String,
    pub output_format: String,
    pub files: Vec<LessonFile>,
}

impl LessonRecord {
    /// Empty working copy carrying a fresh id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn field(&self, field: LessonField) -> &str {
        match field {
            LessonField::CourseName => &self.course_name,
            LessonField::StudentProfile => &self.student_profile,
            LessonField::LessonTime => &self.lesson_time,
            LessonField::LessonCount => &self.lesson_count,
            LessonField::Duration => &self.duration,
            LessonField::Requirements => &self.requirements,
            LessonField::OutputFormat => &self.output_format,
        }
    }

    pub fn set_field(&mut self, field: LessonField, value: impl Into<String>) {
        let slot = match field {
            LessonField::CourseName => &mut self.course_name,
            LessonField::StudentProfile => &mut self.student_profile,
            LessonField::LessonTime => &mut self.lesson_time,
            LessonField::LessonCount => &mut self.lesson_count,
            LessonField::Duration => &mut self.duration,
            LessonField::Requirements => &mut self.requirements,
            LessonField::OutputFormat => &mut self.output_format,
        };
        *slot = value.into();
    }

    /// Course name if set, otherwise `None`.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.course_name.trim();
        (!name.is_empty()).then_some(self.course_name.as_str())
    }
}

/// Editable text fields of a lesson, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonField {
    CourseName,
    StudentProfile,
    LessonTime,
    LessonCount,
    Duration,
    Requirements,
    OutputFormat,
}

impl LessonField {
    pub const ALL: [LessonField; 7] = [
        LessonField::CourseName,
        LessonField::StudentProfile,
        LessonField::LessonTime,
        LessonField::LessonCount,
        LessonField::Duration,
        LessonField::Requirements,
        LessonField::OutputFormat,
    ];

    /// Persisted key, also used as the card's `data-field`.
    pub fn key(self) -> &'static str {
        match self {
            LessonField::CourseName => "courseName",
            LessonField::StudentProfile => "studentProfile",
            LessonField::LessonTime => "lessonTime",
            LessonField::LessonCount => "lessonCount",
            LessonField::Duration => "duration",
            LessonField::Requirements => "requirements",
            LessonField::OutputFormat => "outputFormat",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LessonField::CourseName => "课程名字",
            LessonField::StudentProfile => "学生情况",
            LessonField::LessonTime => "上课时间",
            LessonField::LessonCount => "课时",
            LessonField::Duration => "时长",
            LessonField::Requirements => "课程要求",
            LessonField::OutputFormat => "输出格式",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        LessonField::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Join a date and a clock time into the opaque `lessonTime` string.
///
/// Both parts are required; otherwise the field is cleared.
pub fn compose_lesson_time(date: &str, time: &str) -> String {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        String::new()
    } else {
        format!("{date} {time}")
    }
}
