// src/constants.rs
//
// Application-wide constants shared by the views, the presenter and the store.

/// Store key holding the agenda notes list.
pub const NOTES_KEY: &str = "notes";

/// Store key holding the prepared lessons list.
pub const LESSONS_KEY: &str = "lessons";

/// Vertical distance between consecutive timeline cards, in pixels.
pub const TIMELINE_PITCH_PX: usize = 120;

/// Offset of a timeline dot below the top of its card.
pub const TIMELINE_DOT_OFFSET_PX: usize = 20;

/// Extra room below the last timeline card.
pub const TIMELINE_PADDING_PX: usize = 100;

/// Minutes of use per usage indicator step.
pub const USAGE_STEP_MINUTES: i64 = 30;

/// Most leaves the usage indicator shows before the rest reminder.
pub const USAGE_MAX_LEAVES: usize = 6;

/// Session length after which the usage indicator asks for a break.
pub const USAGE_REST_MINUTES: i64 = 180;

/// Width of a single usage indicator item, in pixels.
pub const USAGE_LEAF_WIDTH_PX: usize = 20;

/// Characters of a lesson id shown when the lesson has no name.
pub const LESSON_ID_PREFIX_LEN: usize = 8;

/// Random base36 characters appended to generated lesson ids.
pub const LESSON_ID_RANDOM_LEN: usize = 5;

/// Delay in milliseconds after writing the HTML file before opening the browser.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 200;
