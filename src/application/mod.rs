// src/application/mod.rs
pub mod agenda;
pub mod app;
pub mod events;
pub mod lesson_form;
pub mod router;
pub mod session;
pub mod sidebar;
pub mod storage;

pub use agenda::AgendaView;
pub use app::{ActiveView, App};
pub use events::{AppEvent, Signal, SignalQueue};
pub use lesson_form::LessonForm;
pub use router::{Location, Route, Router};
pub use session::{Clock, SystemClock};
pub use sidebar::{Confirm, Sidebar};
pub use storage::{KeyValueStore, StorageError};
