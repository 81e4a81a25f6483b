// src/application/agenda.rs
use crate::application::storage::{load_notes, save_notes, KeyValueStore};
use crate::constants::{TIMELINE_DOT_OFFSET_PX, TIMELINE_PADDING_PX, TIMELINE_PITCH_PX};
use crate::domain::{categorize, Category, Note, NOTE_DAY_FORMAT};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaMode {
    Timeline,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Card(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineCard {
    pub index: usize,
    pub side: Side,
    pub top_px: usize,
    pub dot_top_px: usize,
    pub date: String,
    pub category: Category,
    pub label: String,
    pub content: String,
}

impl TimelineCard {
    /// Visible text of the card, in rendering order.
    pub fn text(&self) -> String {
        format!("{} [{}] {}", self.date, self.label, self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineView {
    pub cards: Vec<TimelineCard>,
    pub height_px: usize,
    pub scroll: ScrollTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: u32,
    pub date: String,
    pub has_activity: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub month: String,
    pub cells: Vec<CalendarCell>,
}

/// Sidebar lists of the agenda page. `all` is the catch-all list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteLists {
    pub all: Vec<String>,
    pub todos: Vec<String>,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaPage {
    pub mode: AgendaMode,
    pub timeline: TimelineView,
    pub calendar: Option<CalendarView>,
    pub lists: NoteLists,
    pub modal_open: bool,
}

/// Agenda screen state: the notes list loaded on entry plus view toggles.
#[derive(Debug, Clone)]
pub struct AgendaView {
    notes: Vec<Note>,
    mode: AgendaMode,
    scroll: ScrollTarget,
    calendar: Option<CalendarView>,
    modal_open: bool,
}

impl AgendaView {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let notes = load_notes(store);
        debug!(count = notes.len(), "Loaded agenda notes");
        Self::with_notes(notes)
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            mode: AgendaMode::Timeline,
            scroll: ScrollTarget::Top,
            calendar: None,
            modal_open: false,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn mode(&self) -> AgendaMode {
        self.mode
    }

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    pub fn cancel_modal(&mut self) {
        self.modal_open = false;
    }

    /// Append a note and persist the full list. Blank content is ignored.
    ///
    /// Returns whether a note was created.
    #[instrument(level = "debug", skip(self, store))]
    pub fn add_note(
        &mut self,
        store: &mut dyn KeyValueStore,
        content: &str,
        tag: Option<&str>,
        now: NaiveDateTime,
    ) -> bool {
        let content = content.trim();
        if content.is_empty() {
            debug!("Ignoring note with empty content");
            return false;
        }

        let tag = tag.map(str::trim).filter(|t| !t.is_empty());
        let category = categorize(content, tag);
        let mut note = Note::new(content, now, category);
        if let Some(tag) = tag {
            note = note.with_tag(tag);
        }

        info!(category = category.label(), date = %note.date, "Adding note");
        self.notes.push(note);
        save_notes(store, &self.notes);
        self.modal_open = false;
        true
    }

    /// Sort notes newest first and lay them out as alternating cards.
    ///
    /// The sort is applied to the owned list itself, so the order persisted by
    /// the next `add_note` is the rendered order. Notes with unparseable
    /// dates sort last; ties keep their current order.
    pub fn render_timeline(&mut self) -> TimelineView {
        self.notes
            .sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

        let cards = self
            .notes
            .iter()
            .enumerate()
            .map(|(index, note)| TimelineCard {
                index,
                side: if index % 2 == 0 { Side::Left } else { Side::Right },
                top_px: index * TIMELINE_PITCH_PX,
                dot_top_px: index * TIMELINE_PITCH_PX + TIMELINE_DOT_OFFSET_PX,
                date: note.date.clone(),
                category: note.category,
                label: note
                    .tag
                    .clone()
                    .unwrap_or_else(|| note.category.label().to_string()),
                content: note.content.clone(),
            })
            .collect();

        TimelineView {
            cards,
            height_px: self.notes.len() * TIMELINE_PITCH_PX + TIMELINE_PADDING_PX,
            scroll: self.scroll,
        }
    }

    /// One cell per day of `today`'s month, marking days with notes.
    pub fn render_calendar(&self, today: NaiveDate) -> CalendarView {
        let first = today.with_day(1).unwrap_or(today);
        let days = days_in_month(first);

        let cells = (1..=days)
            .filter_map(|day| first.with_day(day))
            .map(|date| {
                let prefix = date.format(NOTE_DAY_FORMAT).to_string();
                let has_activity = self.notes.iter().any(|n| n.date.starts_with(&prefix));
                CalendarCell {
                    day: date.day(),
                    date: prefix,
                    has_activity,
                }
            })
            .collect();

        CalendarView {
            month: first.format("%Y-%m").to_string(),
            cells,
        }
    }

    /// Partition notes into the three sidebar lists.
    pub fn render_lists(&self) -> NoteLists {
        let mut lists = NoteLists::default();
        for note in &self.notes {
            match note.category {
                Category::Todo => lists.todos.push(note.content.clone()),
                Category::Course => lists.courses.push(note.content.clone()),
                Category::Note => {}
            }
            lists.all.push(note.content.clone());
        }
        lists
    }

    /// Flip between timeline and calendar. Entering the calendar rebuilds it.
    pub fn toggle_view(&mut self, today: NaiveDate) {
        self.mode = match self.mode {
            AgendaMode::Timeline => {
                self.calendar = Some(self.render_calendar(today));
                AgendaMode::Calendar
            }
            AgendaMode::Calendar => AgendaMode::Timeline,
        };
        debug!(mode = ?self.mode, "Toggled agenda view");
    }

    /// Jump from a calendar day back to the timeline.
    ///
    /// The target card is found by searching card text for the day's date,
    /// so a note that merely mentions the date can also match.
    pub fn select_day(&mut self, date: NaiveDate) -> ScrollTarget {
        self.mode = AgendaMode::Timeline;
        let needle = date.format(NOTE_DAY_FORMAT).to_string();
        let timeline = self.render_timeline();

        self.scroll = timeline
            .cards
            .iter()
            .find(|card| card.text().contains(&needle))
            .map_or(ScrollTarget::Top, |card| ScrollTarget::Card(card.index));
        debug!(%needle, scroll = ?self.scroll, "Selected calendar day");
        self.scroll
    }

    /// Full page description. Re-sorts the notes as a side effect.
    ///
    /// A pending scroll target is consumed: it applies to this render only.
    pub fn render(&mut self) -> AgendaPage {
        let timeline = self.render_timeline();
        self.scroll = ScrollTarget::Top;
        let calendar = match self.mode {
            AgendaMode::Calendar => self.calendar.clone(),
            AgendaMode::Timeline => None,
        };
        AgendaPage {
            mode: self.mode,
            timeline,
            calendar,
            lists: self.render_lists(),
            modal_open: self.modal_open,
        }
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryStore;
    use rstest::rstest;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .and_then(|day| day.and_hms_opt(h, m, 0))
            .expect("valid test date")
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).expect("valid test date")
    }

    #[test]
    fn given_task_content_without_tag_when_adding_then_stored_as_todo() {
        // Arrange
        let mut store = MemoryStore::new();
        let mut view = AgendaView::load(&store);

        // Act
        let added = view.add_note(&mut store, "完成作业", None, at(1, 9, 0));

        // Assert
        assert!(added);
        let stored = load_notes(&store);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].category, Category::Todo);
        assert_eq!(stored[0].category.label(), "待办");
        assert_eq!(stored[0].date, "2024-05-01 09:00");
    }

    #[test]
    fn given_plain_content_when_adding_then_stored_as_note() {
        let mut store = MemoryStore::new();
        let mut view = AgendaView::load(&store);

        view.add_note(&mut store, "去开会", None, at(1, 9, 0));

        assert_eq!(load_notes(&store)[0].category, Category::Note);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn given_blank_content_when_adding_then_nothing_is_stored(#[case] content: &str) {
        let mut store = MemoryStore::new();
        let mut view = AgendaView::load(&store);

        let added = view.add_note(&mut store, content, Some("待办"), at(1, 9, 0));

        assert!(!added);
        assert!(view.notes().is_empty());
        assert!(store.get(crate::constants::NOTES_KEY).expect("get").is_none());
    }

    #[test]
    fn given_tag_when_adding_then_tag_wins_over_keywords() {
        let mut store = MemoryStore::new();
        let mut view = AgendaView::load(&store);

        view.add_note(&mut store, "完成作业", Some(" 课程 "), at(1, 9, 0));

        let stored = load_notes(&store);
        assert_eq!(stored[0].category, Category::Course);
        assert_eq!(stored[0].tag.as_deref(), Some("课程"));
    }

    #[test]
    fn given_content_with_spaces_when_adding_then_content_is_trimmed() {
        let mut store = MemoryStore::new();
        let mut view = AgendaView::load(&store);

        view.add_note(&mut store, "  读书  ", None, at(1, 9, 0));

        assert_eq!(view.notes()[0].content, "读书");
    }

    #[test]
    fn given_notes_when_rendering_timeline_then_sorted_newest_first_and_alternating() {
        // Arrange
        let mut view = AgendaView::with_notes(vec![
            Note::new("old", at(1, 8, 0), Category::Note),
            Note::new("new", at(3, 8, 0), Category::Todo),
            Note::new("mid", at(2, 8, 0), Category::Course),
        ]);

        // Act
        let timeline = view.render_timeline();

        // Assert
        let contents: Vec<_> = timeline.cards.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["new", "mid", "old"]);
        assert_eq!(timeline.cards[0].side, Side::Left);
        assert_eq!(timeline.cards[1].side, Side::Right);
        assert_eq!(timeline.cards[2].side, Side::Left);
        assert_eq!(timeline.cards[2].top_px, 240);
        assert_eq!(timeline.cards[2].dot_top_px, 260);
        assert_eq!(timeline.height_px, 3 * 120 + 100);
    }

    #[test]
    fn given_render_when_adding_note_then_persisted_order_follows_sorted_order() {
        // Arrange
        let mut store = MemoryStore::new();
        let mut view = AgendaView::with_notes(vec![
            Note::new("old", at(1, 8, 0), Category::Note),
            Note::new("new", at(3, 8, 0), Category::Note),
        ]);
        view.render_timeline();

        // Act
        view.add_note(&mut store, "latest", None, at(4, 8, 0));

        // Assert
        let stored: Vec<_> = load_notes(&store).into_iter().map(|n| n.content).collect();
        assert_eq!(stored, ["new", "old", "latest"]);
    }

    #[test]
    fn given_unparseable_date_when_rendering_timeline_then_sorts_last() {
        let mut broken = Note::new("broken", at(1, 8, 0), Category::Note);
        broken.date = "someday".to_string();
        let mut view = AgendaView::with_notes(vec![
            broken,
            Note::new("dated", at(1, 8, 0), Category::Note),
        ]);

        let timeline = view.render_timeline();

        assert_eq!(timeline.cards[0].content, "dated");
        assert_eq!(timeline.cards[1].content, "broken");
    }

    #[test]
    fn given_notes_when_rendering_lists_then_todo_and_course_also_in_catch_all() {
        let view = AgendaView::with_notes(vec![
            Note::new("作业", at(1, 8, 0), Category::Todo),
            Note::new("上课", at(1, 9, 0), Category::Course),
            Note::new("随笔", at(1, 10, 0), Category::Note),
        ]);

        let lists = view.render_lists();

        assert_eq!(lists.todos, ["作业"]);
        assert_eq!(lists.courses, ["上课"]);
        assert_eq!(lists.all, ["作业", "上课", "随笔"]);
    }

    #[test]
    fn given_notes_when_rendering_calendar_then_one_cell_per_day_with_activity() {
        let view = AgendaView::with_notes(vec![
            Note::new("a", at(3, 8, 0), Category::Note),
            Note::new("b", at(17, 8, 0), Category::Note),
        ]);

        let calendar = view.render_calendar(day(20));

        assert_eq!(calendar.month, "2024-05");
        assert_eq!(calendar.cells.len(), 31);
        assert_eq!(calendar.cells[0].date, "2024-05-01");
        let active: Vec<_> = calendar
            .cells
            .iter()
            .filter(|c| c.has_activity)
            .map(|c| c.day)
            .collect();
        assert_eq!(active, [3, 17]);
    }

    #[rstest]
    #[case(NaiveDate::from_ymd_opt(2024, 2, 10), 29)]
    #[case(NaiveDate::from_ymd_opt(2023, 2, 10), 28)]
    #[case(NaiveDate::from_ymd_opt(2024, 4, 30), 30)]
    #[case(NaiveDate::from_ymd_opt(2024, 12, 1), 31)]
    fn test_calendar_length(#[case] today: Option<NaiveDate>, #[case] expected: usize) {
        let view = AgendaView::with_notes(vec![]);

        let calendar = view.render_calendar(today.expect("valid date"));

        assert_eq!(calendar.cells.len(), expected);
    }

    #[test]
    fn given_timeline_when_toggling_twice_then_exactly_one_view_visible() {
        let mut view = AgendaView::with_notes(vec![]);

        view.toggle_view(day(1));
        let calendar_page = view.render();
        view.toggle_view(day(1));
        let timeline_page = view.render();

        assert_eq!(calendar_page.mode, AgendaMode::Calendar);
        assert!(calendar_page.calendar.is_some());
        assert_eq!(timeline_page.mode, AgendaMode::Timeline);
        assert!(timeline_page.calendar.is_none());
    }

    #[test]
    fn given_note_added_while_in_calendar_when_toggling_again_then_calendar_is_fresh() {
        let mut store = MemoryStore::new();
        let mut view = AgendaView::with_notes(vec![]);
        view.toggle_view(day(5));
        view.toggle_view(day(5));

        view.add_note(&mut store, "x", None, at(5, 8, 0));
        view.toggle_view(day(5));

        let page = view.render();
        let calendar = page.calendar.expect("calendar visible");
        assert!(calendar.cells[4].has_activity);
    }

    #[test]
    fn given_day_with_note_when_selecting_then_scrolls_to_matching_card() {
        let mut view = AgendaView::with_notes(vec![
            Note::new("a", at(3, 8, 0), Category::Note),
            Note::new("b", at(17, 8, 0), Category::Note),
        ]);
        view.toggle_view(day(20));

        let target = view.select_day(day(3));

        assert_eq!(view.mode(), AgendaMode::Timeline);
        assert_eq!(target, ScrollTarget::Card(1));
        assert_eq!(view.render().timeline.scroll, ScrollTarget::Card(1));
        assert_eq!(view.render().timeline.scroll, ScrollTarget::Top);
    }

    #[test]
    fn given_selected_day_when_adding_note_then_stale_card_index_is_dropped() {
        // Arrange
        let mut store = MemoryStore::new();
        let mut view = AgendaView::with_notes(vec![
            Note::new("a", at(3, 8, 0), Category::Note),
            Note::new("b", at(17, 8, 0), Category::Note),
        ]);
        assert_eq!(view.select_day(day(3)), ScrollTarget::Card(1));
        view.render();

        // Act
        view.add_note(&mut store, "newest", None, at(20, 8, 0));
        let page = view.render();

        // Assert
        assert_eq!(page.timeline.scroll, ScrollTarget::Top);
        assert_eq!(page.timeline.cards[1].content, "b");
    }

    #[test]
    fn given_selected_day_when_toggling_away_and_back_then_scroll_resets() {
        let mut view = AgendaView::with_notes(vec![
            Note::new("a", at(3, 8, 0), Category::Note),
            Note::new("b", at(17, 8, 0), Category::Note),
        ]);
        view.select_day(day(3));
        view.render();

        view.toggle_view(day(20));
        view.toggle_view(day(20));

        assert_eq!(view.render().timeline.scroll, ScrollTarget::Top);
    }

    #[test]
    fn given_day_without_note_when_selecting_then_scrolls_to_top() {
        let mut view = AgendaView::with_notes(vec![Note::new("a", at(3, 8, 0), Category::Note)]);

        assert_eq!(view.select_day(day(4)), ScrollTarget::Top);
    }

    #[test]
    fn given_note_mentioning_date_when_selecting_day_then_content_match_counts() {
        let mut view = AgendaView::with_notes(vec![
            Note::new("a", at(9, 8, 0), Category::Note),
            Note::new("复习 2024-05-04 的内容", at(8, 8, 0), Category::Note),
        ]);

        assert_eq!(view.select_day(day(4)), ScrollTarget::Card(1));
    }

    #[test]
    fn given_open_modal_when_saving_note_then_modal_closes() {
        let mut store = MemoryStore::new();
        let mut view = AgendaView::with_notes(vec![]);
        view.open_modal();
        assert!(view.render().modal_open);

        view.add_note(&mut store, "x", None, at(1, 8, 0));

        assert!(!view.render().modal_open);
    }
}
