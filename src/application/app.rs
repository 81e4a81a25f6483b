// src/application/app.rs
use crate::application::agenda::AgendaView;
use crate::application::events::{AppEvent, Signal, SignalQueue};
use crate::application::lesson_form::LessonForm;
use crate::application::router::{Dispatch, Location, Route, Router};
use crate::application::session::{clock_text, greeting, Clock, Session};
use crate::application::sidebar::{Confirm, DeleteOutcome, Sidebar, SidebarView};
use crate::application::storage::KeyValueStore;
use crate::ports::page::{Page, RenderError, MAIN_CONTENT, NAVBAR, SIDEBAR};
use crate::ports::HtmlPresenter;
use tracing::{debug, error, info, instrument};

/// The view currently owning the shared content region.
#[derive(Debug)]
pub enum ActiveView {
    Blank,
    Home,
    Agenda(AgendaView),
    LessonForm(LessonForm),
    NotFound,
}

/// Single-threaded application shell: routes events to the active view and
/// keeps the page regions in sync.
pub struct App {
    store: Box<dyn KeyValueStore>,
    confirm: Box<dyn Confirm>,
    clock: Box<dyn Clock>,
    user_name: String,
    page: Page,
    presenter: HtmlPresenter,
    router: Router,
    sidebar: Sidebar,
    session: Session,
    signals: SignalQueue,
    active: ActiveView,
}

impl App {
    pub fn new(
        store: Box<dyn KeyValueStore>,
        confirm: Box<dyn Confirm>,
        clock: Box<dyn Clock>,
        user_name: impl Into<String>,
    ) -> Self {
        let session = Session::start(clock.now());
        Self {
            store,
            confirm,
            clock,
            user_name: user_name.into(),
            page: Page::standard(),
            presenter: HtmlPresenter::new(),
            router: Router::new(),
            sidebar: Sidebar::new(),
            session,
            signals: SignalQueue::default(),
            active: ActiveView::Blank,
        }
    }

    /// Render into a custom page, e.g. one lacking a region.
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Draw the chrome and route the initial location.
    pub fn start(&mut self, fragment: &str) {
        info!(fragment, "Starting application");
        self.refresh_sidebar();
        self.navigate(fragment);
        self.redraw_navbar();
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn active(&self) -> &ActiveView {
        &self.active
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn sidebar(&self) -> Option<&SidebarView> {
        self.sidebar.view()
    }

    /// Full HTML document for the current page.
    pub fn document(&self) -> String {
        self.presenter.render_document(&self.page, "lessonpad")
    }

    #[instrument(level = "debug", skip(self))]
    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Navigate(fragment) => self.navigate(&fragment),
            AppEvent::ClockTick => self.redraw_navbar(),
            AppEvent::UsageTick => {
                if self.session.tick(self.clock.now()) {
                    self.redraw_navbar();
                }
            }
            AppEvent::DeleteLesson(id) => self.delete_lesson(&id),
            AppEvent::ToggleSidebar => {
                self.sidebar.toggle_open();
                self.redraw_chrome_links();
            }
            AppEvent::ToggleSubmenu => {
                self.sidebar.toggle_submenu();
                self.draw_sidebar();
            }
            event => self.handle_view_event(event),
        }

        for signal in self.signals.drain() {
            match signal {
                Signal::LessonSaved => {
                    debug!("Lesson saved, refreshing sidebar");
                    self.refresh_sidebar();
                }
            }
        }
    }

    fn handle_view_event(&mut self, event: AppEvent) {
        let now = self.clock.now();
        let mut after_save = false;

        match (&mut self.active, event) {
            (ActiveView::Agenda(view), AppEvent::OpenNoteModal) => view.open_modal(),
            (ActiveView::Agenda(view), AppEvent::CancelNoteModal) => view.cancel_modal(),
            (ActiveView::Agenda(view), AppEvent::AddNote { content, tag }) => {
                view.add_note(self.store.as_mut(), &content, tag.as_deref(), now);
            }
            (ActiveView::Agenda(view), AppEvent::ToggleAgendaView) => view.toggle_view(now.date()),
            (ActiveView::Agenda(view), AppEvent::SelectDay(date)) => {
                view.select_day(date);
            }
            (ActiveView::LessonForm(form), AppEvent::OpenFieldEditor(field)) => form.begin_edit(field),
            (ActiveView::LessonForm(form), AppEvent::CloseFieldEditor) => form.cancel_edit(),
            (ActiveView::LessonForm(form), AppEvent::EditField { field, value }) => {
                form.edit_field(field, &value);
            }
            (ActiveView::LessonForm(form), AppEvent::EditLessonTime { date, time }) => {
                form.edit_lesson_time(&date, &time);
            }
            (ActiveView::LessonForm(form), AppEvent::FileReady(file)) => form.attach_file(file),
            (ActiveView::LessonForm(form), AppEvent::RemoveFile(index)) => {
                form.remove_file(index);
            }
            (ActiveView::LessonForm(form), AppEvent::SaveLesson) => {
                form.save(self.store.as_mut(), &mut self.signals);
                after_save = true;
            }
            (_, event) => {
                debug!(?event, "Event not handled by active view");
                return;
            }
        }

        if after_save {
            self.navigate(&Location::lesson_form(None));
        } else {
            self.redraw_main();
        }
    }

    /// Resolve a location, build the view it names and draw it.
    #[instrument(level = "debug", skip(self))]
    pub fn navigate(&mut self, fragment: &str) {
        let (active, path) = match self.router.resolve(fragment) {
            Dispatch::Render(Route::Home, location) => (ActiveView::Home, location.path),
            Dispatch::Render(Route::Agenda, location) => {
                (ActiveView::Agenda(AgendaView::load(self.store.as_ref())), location.path)
            }
            Dispatch::Render(Route::PrepareLesson, location) => {
                let form = LessonForm::open(self.store.as_ref(), location.param("lessonId"));
                (ActiveView::LessonForm(form), location.path)
            }
            Dispatch::NotFound(_) => {
                self.active = ActiveView::NotFound;
                self.redraw_main();
                return;
            }
        };

        self.active = active;
        if self.redraw_main() {
            self.router.mark_active(&path);
            if self.sidebar.close() {
                debug!("Closed sidebar after navigation");
            }
            self.redraw_chrome_links();
        }
    }

    fn delete_lesson(&mut self, id: &str) {
        let outcome = self
            .sidebar
            .delete(self.store.as_mut(), self.confirm.as_mut(), id);
        if outcome == DeleteOutcome::Declined {
            return;
        }
        // Missing ids still refresh the projection, so the region follows it.
        self.draw_sidebar();
        if outcome != DeleteOutcome::Deleted {
            return;
        }

        let editing_deleted = matches!(
            &self.active,
            ActiveView::LessonForm(form) if form.working().id == id
        );
        if editing_deleted {
            info!(lesson_id = id, "Open lesson was deleted, starting a new one");
            self.navigate(&Location::lesson_form(None));
        }
    }

    fn refresh_sidebar(&mut self) {
        self.sidebar.refresh(self.store.as_ref());
        self.draw_sidebar();
    }

    fn draw_sidebar(&mut self) {
        let Some(view) = self.sidebar.view() else {
            return;
        };
        let html = self.presenter.render_sidebar(&self.router.nav_links(), view);
        self.apply(SIDEBAR, html);
    }

    fn redraw_navbar(&mut self) {
        let html = self.presenter.render_navbar(
            &self.router.nav_links(),
            &clock_text(self.clock.now()),
            self.session.indicator(),
            self.sidebar.is_open(),
        );
        self.apply(NAVBAR, html);
    }

    fn redraw_chrome_links(&mut self) {
        self.redraw_navbar();
        self.draw_sidebar();
    }

    /// Draw the active view into the content region. Returns false when the
    /// region is missing and nothing was drawn.
    fn redraw_main(&mut self) -> bool {
        let html = match &mut self.active {
            ActiveView::Blank => return true,
            ActiveView::Home => self
                .presenter
                .render_home(greeting(self.clock.now()), &self.user_name),
            ActiveView::Agenda(view) => self.presenter.render_agenda(&view.render()),
            ActiveView::LessonForm(form) => self.presenter.render_lesson_form(&form.render()),
            ActiveView::NotFound => self.presenter.render_not_found(),
        };
        self.apply(MAIN_CONTENT, html)
    }

    fn apply(&mut self, region: &str, html: String) -> bool {
        match self.page.replace(region, html) {
            Ok(()) => true,
            Err(e @ RenderError::MissingRegion(_)) => {
                error!(error = %e, "Render aborted");
                false
            }
        }
    }
}
