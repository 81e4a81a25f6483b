use clap::Parser;
use lessonpad::cli::args::{Args, Command, LessonCommand, NoteCommand};
use lessonpad::domain::LessonField;
use std::path::PathBuf;

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["lessonpad"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_open_without_fragment_when_parsing_then_defaults_to_home() {
    // Arrange
    let args = vec!["lessonpad", "open"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Open { fragment, print } => {
            assert_eq!(fragment, "");
            assert!(!print);
        }
        _ => panic!("Expected Open command"),
    }
    assert_eq!(parsed.store, None);
    assert_eq!(parsed.config, None);
}

#[test]
fn given_open_with_fragment_and_print_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["lessonpad", "open", "#/agenda", "--print"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Open { fragment, print } => {
            assert_eq!(fragment, "#/agenda");
            assert!(print);
        }
        _ => panic!("Expected Open command"),
    }
}

#[test]
fn given_note_add_with_tag_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["lessonpad", "note", "add", "去开会", "--tag", "会议"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Note {
            action: NoteCommand::Add { content, tag },
        } => {
            assert_eq!(content, "去开会");
            assert_eq!(tag.as_deref(), Some("会议"));
        }
        _ => panic!("Expected Note Add command"),
    }
}

#[test]
fn given_global_store_flag_after_subcommand_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["lessonpad", "note", "list", "--json", "-s", "/tmp/store.json"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.store, Some(PathBuf::from("/tmp/store.json")));
    assert!(matches!(
        parsed.command,
        Command::Note {
            action: NoteCommand::List { json: true }
        }
    ));
}

#[test]
fn given_lesson_save_with_assignments_when_parsing_then_fields_are_typed() {
    // Arrange
    let args = vec![
        "lessonpad",
        "lesson",
        "save",
        "--set",
        "courseName=Geometry",
        "--set",
        "requirements=a=b",
        "--date",
        "2024-05-01",
        "--time",
        "14:00",
        "--attach",
        "plan.pdf",
    ];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Lesson {
            action:
                LessonCommand::Save {
                    id,
                    fields,
                    date,
                    time,
                    attachments,
                },
        } => {
            assert_eq!(id, None);
            assert_eq!(
                fields,
                vec![
                    (LessonField::CourseName, "Geometry".to_string()),
                    (LessonField::Requirements, "a=b".to_string()),
                ]
            );
            assert_eq!(date.as_deref(), Some("2024-05-01"));
            assert_eq!(time.as_deref(), Some("14:00"));
            assert_eq!(attachments, vec![PathBuf::from("plan.pdf")]);
        }
        _ => panic!("Expected Lesson Save command"),
    }
}

#[test]
fn given_unknown_lesson_field_when_parsing_then_fails() {
    // Arrange
    let args = vec!["lessonpad", "lesson", "save", "--set", "instructor=Bob"];

    // Act
    let result = Args::try_parse_from(args);

    // Assert
    let err = result.expect_err("unknown field must be rejected");
    assert!(err.to_string().contains("courseName"));
}

#[test]
fn given_date_without_time_when_parsing_then_fails() {
    // Arrange
    let args = vec!["lessonpad", "lesson", "save", "--date", "2024-05-01"];

    // Act & Assert
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn given_lesson_delete_with_yes_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["lessonpad", "lesson", "delete", "lesson-abc", "-y"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Lesson {
            action: LessonCommand::Delete { id, yes },
        } => {
            assert_eq!(id, "lesson-abc");
            assert!(yes);
        }
        _ => panic!("Expected Lesson Delete command"),
    }
}

#[test]
fn given_verbose_flags_when_parsing_then_counts_them() {
    // Arrange
    let args = vec!["lessonpad", "-vv", "lesson", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.verbose, 2);
}
