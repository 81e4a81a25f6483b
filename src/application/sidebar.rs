// src/application/sidebar.rs
use crate::application::router::Location;
use crate::application::storage::{load_lessons, save_lessons, KeyValueStore};
use crate::constants::LESSON_ID_PREFIX_LEN;
use crate::domain::LessonRecord;
use tracing::{debug, info, instrument};

/// Asks the user a yes/no question before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: String,
    pub label: String,
    pub hover: String,
    pub href: String,
}

impl SidebarEntry {
    fn from_lesson(lesson: &LessonRecord) -> Self {
        let label = lesson_label(lesson);

        let mut hover = format!("课程名称: {label}");
        if !lesson.student_profile.is_empty() {
            hover.push_str(&format!("\n学生特点: {}", lesson.student_profile));
        }
        if !lesson.lesson_time.is_empty() {
            hover.push_str(&format!("\n上课时间: {}", lesson.lesson_time));
        }

        Self {
            id: lesson.id.clone(),
            label,
            hover,
            href: Location::lesson_form(Some(&lesson.id)),
        }
    }
}

/// Sidebar projection of the saved lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
    pub entries: Vec<SidebarEntry>,
    /// Lessons submenu shown. A refresh opens it exactly when it has
    /// entries; the menu header toggles it in between.
    pub expanded: bool,
    /// Sidebar slid in through the menu toggle.
    pub open: bool,
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
    Missing,
}

#[derive(Debug, Default)]
pub struct Sidebar {
    view: Option<SidebarView>,
    open: bool,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read the lessons list and rebuild the projection.
    #[instrument(level = "debug", skip_all)]
    pub fn refresh(&mut self, store: &dyn KeyValueStore) -> &SidebarView {
        let entries: Vec<_> = load_lessons(store)
            .iter()
            .map(SidebarEntry::from_lesson)
            .collect();
        debug!(count = entries.len(), "Sidebar lessons refreshed");
        self.view.insert(SidebarView {
            expanded: !entries.is_empty(),
            open: self.open,
            entries,
        })
    }

    pub fn view(&self) -> Option<&SidebarView> {
        self.view.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the lessons submenu by hand. Ignored before the first refresh.
    pub fn toggle_submenu(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.expanded = !view.expanded;
            debug!(expanded = view.expanded, "Toggled lessons submenu");
        }
    }

    /// Slide the sidebar in or out.
    pub fn toggle_open(&mut self) {
        self.set_open(!self.open);
    }

    /// Slide the sidebar out, e.g. after following one of its links.
    /// Returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.open;
        self.set_open(false);
        was_open
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
        if let Some(view) = self.view.as_mut() {
            view.open = open;
        }
        debug!(open, "Sidebar visibility changed");
    }

    /// Delete a lesson after confirmation and rebuild the projection.
    #[instrument(level = "debug", skip(self, store, confirm))]
    pub fn delete(
        &mut self,
        store: &mut dyn KeyValueStore,
        confirm: &mut dyn Confirm,
        id: &str,
    ) -> DeleteOutcome {
        let mut lessons = load_lessons(store);
        let Some(position) = lessons.iter().position(|l| l.id == id) else {
            debug!("No lesson with this id");
            self.refresh(store);
            return DeleteOutcome::Missing;
        };

        let prompt = format!("确定要删除课程 \"{}\" 吗？", lesson_label(&lessons[position]));
        if !confirm.confirm(&prompt) {
            debug!("Deletion declined");
            return DeleteOutcome::Declined;
        }

        lessons.remove(position);
        save_lessons(store, &lessons);
        info!(lesson_id = id, "Deleted lesson");
        self.refresh(store);
        DeleteOutcome::Deleted
    }
}

/// Course name, or a placeholder built from the start of the id.
pub fn lesson_label(lesson: &LessonRecord) -> String {
    match lesson.display_name() {
        Some(name) => name.to_string(),
        None => {
            let prefix: String = lesson.id.chars().take(LESSON_ID_PREFIX_LEN).collect();
            format!("新课程 ({prefix}...)")
        }
    }
}
