// src/ports/page.rs
use std::collections::BTreeMap;
use thiserror::Error;

/// Region replaced by the active view on every navigation.
pub const MAIN_CONTENT: &str = "main-content";
pub const NAVBAR: &str = "navbar-container";
pub const SIDEBAR: &str = "sidebar-container";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("Render target not found: {0}")]
    MissingRegion(String),
}

/// Headless stand-in for the document: a set of named regions whose markup
/// is replaced wholesale, like assigning `innerHTML`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    regions: BTreeMap<String, String>,
}

impl Page {
    /// The shell every screen uses: navbar, sidebar and the shared content area.
    pub fn standard() -> Self {
        Self::with_regions(&[NAVBAR, SIDEBAR, MAIN_CONTENT])
    }

    pub fn with_regions(names: &[&str]) -> Self {
        Self {
            regions: names
                .iter()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
        }
    }

    /// Replace a region's markup. A missing region aborts the render before
    /// anything is written.
    pub fn replace(&mut self, region: &str, html: String) -> Result<(), RenderError> {
        match self.regions.get_mut(region) {
            Some(slot) => {
                *slot = html;
                Ok(())
            }
            None => Err(RenderError::MissingRegion(region.to_string())),
        }
    }

    pub fn region(&self, name: &str) -> Option<&str> {
        self.regions.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_standard_page_when_replacing_main_content_then_region_holds_markup() {
        let mut page = Page::standard();

        page.replace(MAIN_CONTENT, "<h1>hi</h1>".to_string())
            .expect("region exists");

        assert_eq!(page.region(MAIN_CONTENT), Some("<h1>hi</h1>"));
        assert_eq!(page.region(NAVBAR), Some(""));
    }

    #[test]
    fn given_page_without_region_when_replacing_then_returns_missing_region() {
        let mut page = Page::with_regions(&[NAVBAR]);

        let result = page.replace(MAIN_CONTENT, "<p>x</p>".to_string());

        assert_eq!(result, Err(RenderError::MissingRegion(MAIN_CONTENT.to_string())));
        assert_eq!(page.region(MAIN_CONTENT), None);
    }
}
