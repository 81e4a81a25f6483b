// src/ports/mod.rs
pub mod html;
pub mod page;

pub use html::HtmlPresenter;
pub use page::{Page, RenderError};
