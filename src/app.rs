use anyhow::Result;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::Config;
use crate::modules::{
    chrome::Chrome,
    clipboard::{self, CopyFeedback, CopyOutcome},
    navigation::{self, DemoHandler, DrawerSide, NavOutcome, Navigation, Viewport},
    search::{Search, SearchTarget},
    theme::{self, Theme, ThemeState},
    toast::{PresentationAdapter, ToastRequest, ToastStack, Variant},
};
use crate::ui::toasts::ToastLayer;

/// How often the loop redraws while something is animating.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);
/// Idle redraw interval (keeps the header clock current).
pub const IDLE_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Normal,
    Search,
    Submenu,
}

pub struct App {
    pub config: Config,
    pub theme: ThemeState,
    pub nav: Navigation,
    pub chrome: Chrome,
    pub search: Search,
    pub toasts: ToastStack,
    pub toast_layer: ToastLayer,
    pub viewport: Viewport,
    pub status_message: String,
    pub show_help: bool,
    pub copy_feedback: Option<CopyFeedback>,
}

impl App {
    pub fn new(width: u16) -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config, theme::detect_terminal_scheme(), width))
    }

    pub fn with_config(config: Config, system_theme: Option<Theme>, width: u16) -> Self {
        let toast_layer = ToastLayer::new();
        let root: Option<Box<dyn PresentationAdapter>> = if config.toasts {
            Some(Box::new(toast_layer.clone()))
        } else {
            None
        };
        let theme = ThemeState::resolve(config.theme, system_theme);
        info!(theme = theme.current().name(), toasts = config.toasts, "shell starting");

        Self {
            theme,
            nav: Navigation::new(config.rail_collapsed),
            chrome: Chrome::new(),
            search: Search::new(),
            toasts: ToastStack::mount(root),
            toast_layer,
            viewport: Viewport::from_width(width),
            status_message: String::from("Welcome to railshell! Press '?' for help"),
            show_help: false,
            copy_feedback: None,
            config,
        }
    }

    pub fn state(&self) -> AppState {
        if self.search.is_open() {
            AppState::Search
        } else if self.chrome.submenu().is_some() {
            AppState::Submenu
        } else {
            AppState::Normal
        }
    }

    pub fn resize(&mut self, width: u16) {
        let viewport = Viewport::from_width(width);
        if viewport != self.viewport {
            debug!(?viewport, width, "viewport changed");
            // Bottom sheets only exist on compact layouts.
            if viewport == Viewport::Regular {
                self.chrome.close_submenus();
            }
            self.viewport = viewport;
        }
    }

    /// Follows the terminal's scheme unless the user picked one.
    pub fn refresh_system_theme(&mut self) {
        self.theme.system_changed(theme::detect_terminal_scheme());
    }

    pub fn activate_focused(&mut self) {
        if let Some(outcome) = self.nav.activate_focused(self.viewport) {
            self.apply(outcome);
        }
    }

    pub fn activate_index(&mut self, index: usize) {
        if let Some(outcome) = self.nav.activate(index, self.viewport) {
            self.apply(outcome);
        }
    }

    fn apply(&mut self, outcome: NavOutcome) {
        match outcome {
            NavOutcome::Navigated(href) => {
                self.status_message = format!("Navigated to {}", href);
            }
            NavOutcome::OpenDrawer(side) => self.chrome.open_drawer(side),
            NavOutcome::OpenSubmenu(id) => {
                self.chrome.open_submenu(id);
            }
            NavOutcome::Demo(handler) => self.run_demo(handler),
        }
    }

    pub fn run_demo(&mut self, handler: DemoHandler) {
        match handler {
            DemoHandler::ToastDemo => {
                self.toasts.show(
                    ToastRequest::new()
                        .title("Tasks synced")
                        .message("All tasks are up to date.")
                        .variant(Variant::Success),
                );
            }
        }
    }

    /// Closes the newest toast still on screen, like its close button.
    pub fn dismiss_newest_toast(&mut self) {
        if let Some(id) = self.toasts.newest_live() {
            self.toasts.dismiss(id);
        }
    }

    /// The inset panel opens from the Create drawer.
    pub fn open_inset(&mut self) {
        self.chrome.close_drawer(DrawerSide::Left);
        self.chrome.open_inset();
    }

    pub fn choose_submenu_item(&mut self) {
        let title = self.chrome.submenu().map(|menu| menu.title);
        if let (Some(title), Some(item)) = (title, self.chrome.choose_submenu_item()) {
            self.status_message = format!("{} › {}", title, item.label);
        }
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.theme.toggle();
        self.status_message = format!("Theme: {}", theme.name());
        if let Err(e) = self.config.set_theme(theme) {
            self.report_error("Saving theme failed", e);
        }
    }

    pub fn toggle_rail(&mut self) {
        let Some(collapsed) = self.nav.toggle_rail(self.viewport) else {
            return;
        };
        if let Err(e) = self.config.set_rail_collapsed(collapsed) {
            self.report_error("Saving rail state failed", e);
        }
    }

    pub fn copy_page_link(&mut self) {
        let link = self.nav.page();
        match clipboard::copy_text(link) {
            Ok(()) => {
                self.copy_feedback = Some(CopyFeedback::new(CopyOutcome::Copied));
                self.status_message = format!("Copied {}", link);
            }
            Err(e) => {
                self.copy_feedback = Some(CopyFeedback::new(CopyOutcome::Failed));
                self.report_error("Copy failed", e);
            }
        }
    }

    pub fn report_error(&mut self, context: &str, err: anyhow::Error) {
        let msg = format!("{}: {:#}", context, err);
        tracing::warn!(error = %msg, "reported to user");
        self.status_message = msg.clone();
        self.toasts.show(
            ToastRequest::new()
                .title(context)
                .message(format!("{:#}", err))
                .variant(Variant::Error),
        );
    }

    pub fn open_search(&mut self) {
        self.search.open();
    }

    pub fn close_search(&mut self) {
        self.search.close();
    }

    pub fn submit_search(&mut self) {
        let target = self.search.selected_result().map(|r| r.target);
        self.search.close();
        match target {
            Some(SearchTarget::Nav(id)) => {
                if let Some(outcome) = self.nav.activate_id(id, self.viewport) {
                    self.apply(outcome);
                }
            }
            Some(SearchTarget::SubmenuItem { submenu, item }) => {
                let menu = navigation::submenu(submenu);
                let label = menu
                    .and_then(|m| m.items.iter().find(|i| i.id == item))
                    .map(|i| i.label)
                    .unwrap_or(item);
                let title = menu.map(|m| m.title).unwrap_or(submenu);
                self.status_message = format!("{} › {}", title, label);
            }
            None => {}
        }
    }

    /// Escape closes overlays first, then help.
    pub fn escape(&mut self) {
        if self.search.is_open() {
            self.search.close();
        } else if !self.chrome.escape() {
            self.show_help = false;
        }
    }

    /// Called after each frame reaches the terminal.
    pub fn frame_drawn(&mut self) {
        self.toasts.frame_committed();
        self.toast_layer.advance();
        if self.copy_feedback.is_some_and(|f| f.expired()) {
            self.copy_feedback = None;
        }
    }

    pub fn tick(&mut self) {
        self.toasts.tick();
    }

    /// How long the loop may wait for input before it must redraw.
    pub fn next_wakeup(&self) -> Duration {
        let base = if self.toast_layer.is_animating() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        match self.toasts.next_deadline() {
            Some(deadline) => base.min(deadline.saturating_duration_since(Instant::now())),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chrome::Panel;
    use crate::modules::toast::{Announcement, ToastState};

    fn app_in(dir: &tempfile::TempDir, width: u16) -> App {
        let config = Config::load_from(dir.path().join("config.toml")).unwrap();
        App::with_config(config, None, width)
    }

    fn index_of(id: &str) -> usize {
        navigation::NAVIGATION.iter().position(|i| i.id == id).unwrap()
    }

    #[test]
    fn tasks_item_shows_success_toast() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 120);
        app.activate_index(index_of("tasks"));

        let views = app.toasts.snapshot();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].title, "Tasks synced");
        assert_eq!(views[0].variant, Variant::Success);
    }

    #[test]
    fn create_opens_sheet_on_compact_and_drawer_on_regular() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 60);
        app.activate_index(index_of("create"));
        assert_eq!(app.state(), AppState::Submenu);

        app.resize(120);
        assert_eq!(app.state(), AppState::Normal);
        app.activate_index(index_of("create"));
        assert_eq!(app.chrome.drawer(DrawerSide::Left), Panel::Open);
    }

    #[test]
    fn choosing_submenu_item_reports_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 60);
        app.activate_index(index_of("create"));
        app.chrome.submenu_next();
        app.choose_submenu_item();
        assert_eq!(app.status_message, "Create New › Invite Owners");
        assert_eq!(app.state(), AppState::Normal);
    }

    #[test]
    fn theme_toggle_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 120);
        assert_eq!(app.theme.current(), Theme::Light);
        app.toggle_theme();

        let reloaded = Config::load_from(dir.path().join("config.toml")).unwrap();
        assert_eq!(reloaded.theme, Some(Theme::Dark));
    }

    #[test]
    fn rail_toggle_is_persisted_on_regular_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 60);
        app.toggle_rail();
        assert!(!app.nav.rail_collapsed());

        app.resize(120);
        app.toggle_rail();
        let reloaded = Config::load_from(dir.path().join("config.toml")).unwrap();
        assert!(reloaded.rail_collapsed);
    }

    #[test]
    fn errors_become_alert_toasts() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 120);
        app.report_error("Copy failed", anyhow::anyhow!("no display"));

        let view = &app.toasts.snapshot()[0];
        assert_eq!(view.title, "Copy failed");
        assert_eq!(view.message.as_deref(), Some("no display"));
        assert_eq!(view.announcement(), Announcement::Alert);
        assert!(app.status_message.contains("no display"));
    }

    #[test]
    fn disabled_toasts_drop_requests() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "toasts = false\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        let mut app = App::with_config(config, None, 120);

        assert!(!app.toasts.is_mounted());
        app.run_demo(DemoHandler::ToastDemo);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn frames_drive_toasts_to_visible_and_out() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 120);
        app.run_demo(DemoHandler::ToastDemo);
        let id = app.toasts.newest_live().unwrap();

        app.frame_drawn();
        assert_eq!(app.toasts.state_of(id), Some(ToastState::Visible));

        app.dismiss_newest_toast();
        assert_eq!(app.toasts.state_of(id), Some(ToastState::Dismissing));
        for _ in 0..10 {
            app.frame_drawn();
        }
        assert_eq!(app.toasts.state_of(id), None);
    }

    #[test]
    fn search_jumps_to_nav_item() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 120);
        app.open_search();
        for c in "journal".chars() {
            app.search.input_char(c);
        }
        app.submit_search();
        assert_eq!(app.state(), AppState::Normal);
        assert_eq!(app.nav.page(), "#journal");
    }

    #[test]
    fn escape_closes_overlays_before_help() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 120);
        app.show_help = true;
        app.chrome.open_drawer(DrawerSide::Right);

        app.escape();
        assert_eq!(app.chrome.scrim(), Panel::Closed);
        assert!(app.show_help);

        app.escape();
        assert!(!app.show_help);
    }

    #[test]
    fn settled_toasts_let_the_loop_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 120);
        app.toasts.show(ToastRequest::new().title("pinned").persistent());
        assert_eq!(app.next_wakeup(), FRAME_INTERVAL);

        for _ in 0..10 {
            app.frame_drawn();
        }
        assert!(!app.toasts.is_empty());
        assert_eq!(app.next_wakeup(), IDLE_INTERVAL);
    }

    #[test]
    fn inset_replaces_the_create_drawer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, 120);
        app.activate_index(index_of("create"));
        app.open_inset();
        assert_eq!(app.chrome.drawer(DrawerSide::Left), Panel::Closed);
        assert_eq!(app.chrome.inset(), Panel::Open);

        app.escape();
        assert_eq!(app.chrome.inset(), Panel::Closed);
    }
}
