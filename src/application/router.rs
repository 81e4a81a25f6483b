// src/application/router.rs
use tracing::{debug, warn};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Agenda,
    PrepareLesson,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "",
            Route::Agenda => "/agenda",
            Route::PrepareLesson => "/prepare-lesson",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "首页",
            Route::Agenda => "Agenda",
            Route::PrepareLesson => "备课",
        }
    }
}

/// Routes in navigation order.
pub const ROUTES: [Route; 3] = [Route::Home, Route::Agenda, Route::PrepareLesson];

/// A parsed location fragment: `/path?key=value&...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Location {
    /// Parse a fragment with or without its leading `#`. `/` alone is home.
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let (path, query) = fragment.split_once('?').unwrap_or((fragment, ""));
        let path = if path == "/" { "" } else { path };

        Self {
            path: path.to_string(),
            params: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Fragment of the lesson form, optionally editing `lesson_id`.
    pub fn lesson_form(lesson_id: Option<&str>) -> String {
        match lesson_id {
            Some(id) => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("lessonId", id)
                    .finish();
                format!("#{}?{}", Route::PrepareLesson.path(), query)
            }
            None => format!("#{}", Route::PrepareLesson.path()),
        }
    }
}

/// Outcome of resolving a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Render(Route, Location),
    NotFound(Location),
}

/// Maps locations onto routes and remembers which navigation link is active.
#[derive(Debug, Default)]
pub struct Router {
    current: Option<Location>,
    active_path: Option<String>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, fragment: &str) -> Dispatch {
        let location = Location::parse(fragment);
        self.current = Some(location.clone());

        match ROUTES.into_iter().find(|r| r.path() == location.path) {
            Some(route) => {
                debug!(route = route.name(), params = ?location.params, "Routing");
                Dispatch::Render(route, location)
            }
            None => {
                warn!(path = %location.path, "Route not found");
                Dispatch::NotFound(location)
            }
        }
    }

    /// Mark the link for `path` active after a successful render.
    pub fn mark_active(&mut self, path: &str) {
        self.active_path = Some(path.to_string());
    }

    /// Whether a link pointing at `href` (with its leading `#`) is active.
    pub fn is_active(&self, href: &str) -> bool {
        let target = Location::parse(href);
        self.active_path.as_deref() == Some(target.path.as_str())
    }

    pub fn active_path(&self) -> Option<&str> {
        self.active_path.as_deref()
    }

    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// Navigation links with their highlighting.
    pub fn nav_links(&self) -> Vec<NavLink> {
        ROUTES
            .into_iter()
            .map(|route| {
                let href = format!("#{}", route.path());
                NavLink {
                    active: self.is_active(&href),
                    title: route.name(),
                    href,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub title: &'static str,
    pub active: bool,
}
