// src/application/events.rs
use crate::domain::{LessonField, LessonFile};
use chrono::NaiveDate;
use std::collections::VecDeque;

/// Everything the UI can tell the application. Tests synthesize these
/// directly; the CLI translates subcommands into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Location fragment changed, e.g. `#/prepare-lesson?lessonId=...`.
    Navigate(String),
    OpenNoteModal,
    CancelNoteModal,
    AddNote { content: String, tag: Option<String> },
    ToggleAgendaView,
    SelectDay(NaiveDate),
    OpenFieldEditor(LessonField),
    CloseFieldEditor,
    EditField { field: LessonField, value: String },
    EditLessonTime { date: String, time: String },
    /// A queued file read finished.
    FileReady(LessonFile),
    RemoveFile(usize),
    SaveLesson,
    DeleteLesson(String),
    /// Menu toggle button: slide the sidebar in or out.
    ToggleSidebar,
    /// Lessons menu header: expand or collapse the submenu.
    ToggleSubmenu,
    /// One-second clock refresh.
    ClockTick,
    /// Sixty-second usage check.
    UsageTick,
}

/// Cross-component notifications. They carry no payload: receivers re-read
/// the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    LessonSaved,
}

#[derive(Debug, Default)]
pub struct SignalQueue {
    pending: VecDeque<Signal>,
}

impl SignalQueue {
    pub fn emit(&mut self, signal: Signal) {
        self.pending.push_back(signal);
    }

    pub fn drain(&mut self) -> Vec<Signal> {
        self.pending.drain(..).collect()
    }
}
