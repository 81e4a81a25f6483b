// src/infrastructure/mod.rs
pub mod config;
pub mod file_reader;
pub mod prompt;
pub mod renderer;
pub mod store;

pub use config::Config;
pub use prompt::{AssumeYes, TerminalConfirm};
pub use renderer::PageRenderer;
pub use store::{JsonFileStore, MemoryStore};
