mod helpers;

use anyhow::Result;
use helpers::{at, TestStore};
use lessonpad::application::storage::{load_lessons, save_lessons, save_notes};
use lessonpad::application::KeyValueStore;
use lessonpad::domain::{Category, LessonFile, LessonRecord, Note};

#[test]
fn given_notes_when_persisting_then_uses_content_date_category_keys() -> Result<()> {
    // Arrange
    let test_store = TestStore::new()?;
    let mut store = test_store.open()?;
    let notes = vec![Note::new("完成作业", at(2024, 5, 1, 8, 30), Category::Todo)];

    // Act
    save_notes(&mut store, &notes);

    // Assert
    let raw = test_store.open()?.get("notes")?.expect("notes persisted");
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(value[0]["content"], "完成作业");
    assert_eq!(value[0]["date"], "2024-05-01 08:30");
    assert_eq!(value[0]["category"], "待办");
    assert!(value[0].get("tag").is_none());
    Ok(())
}

#[test]
fn given_lesson_with_file_when_persisting_then_uses_camel_case_keys() -> Result<()> {
    // Arrange
    let test_store = TestStore::new()?;
    let mut store = test_store.open()?;
    let mut lesson = LessonRecord::with_id("lesson-abc");
    lesson.course_name = "几何".to_string();
    lesson.files.push(LessonFile {
        name: "plan.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        size: 3,
        data_url: "data:application/pdf;base64,YWJj".to_string(),
    });

    // Act
    save_lessons(&mut store, &[lesson.clone()]);

    // Assert
    let raw = test_store.open()?.get("lessons")?.expect("lessons persisted");
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(value[0]["courseName"], "几何");
    assert_eq!(value[0]["studentProfile"], "");
    assert_eq!(value[0]["files"][0]["type"], "application/pdf");
    assert_eq!(value[0]["files"][0]["dataUrl"], "data:application/pdf;base64,YWJj");
    assert_eq!(load_lessons(&test_store.open()?), vec![lesson]);
    Ok(())
}

#[test]
fn given_null_lessons_entry_when_loading_then_empty_list() -> Result<()> {
    // Arrange
    let test_store = TestStore::with_entries(&[("lessons", "null")])?;

    // Act
    let lessons = load_lessons(&test_store.open()?);

    // Assert
    assert!(lessons.is_empty());
    Ok(())
}

#[test]
fn given_store_file_that_is_not_an_object_when_opening_then_fails() -> Result<()> {
    // Arrange
    let test_store = TestStore::new()?;
    if let Some(parent) = test_store.store_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&test_store.store_path, "[1, 2, 3]")?;

    // Act
    let result = test_store.open();

    // Assert
    assert!(result.is_err());
    Ok(())
}
