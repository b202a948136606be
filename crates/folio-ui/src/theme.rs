use tracing::{debug, warn};

use folio_types::{Severity, Theme};

use crate::notification::Notifier;
use crate::page::Task;
use crate::scheduler::Scheduler;

/// How long the color cross-fade class stays on after a toggle.
pub const TRANSITION_MS: u64 = 400;

/// Persistent key/value storage for the visitor's theme choice.
///
/// Values are stored as raw attribute strings and parsed on the way out.
pub trait PreferenceStore: Send {
    fn load_theme(&self) -> Option<String>;
    fn save_theme(&mut self, value: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    theme: Option<String>,
}

impl MemoryPreferences {
    pub fn with_theme(value: impl Into<String>) -> Self {
        Self { theme: Some(value.into()) }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load_theme(&self) -> Option<String> {
        self.theme.clone()
    }

    fn save_theme(&mut self, value: &str) {
        self.theme = Some(value.to_string());
    }
}

pub struct ThemeController {
    theme: Theme,
    transitioning: bool,
    store: Box<dyn PreferenceStore>,
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("theme", &self.theme)
            .field("transitioning", &self.transitioning)
            .finish_non_exhaustive()
    }
}

impl ThemeController {
    /// A saved choice wins over the system preference.
    pub fn new(store: Box<dyn PreferenceStore>, system_prefers_dark: bool) -> Self {
        let theme = saved_theme(store.as_ref()).unwrap_or(Theme::from_system(system_prefers_dark));
        debug!("Initial theme: {}", theme);
        Self {
            theme,
            transitioning: false,
            store,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn toggle(&mut self, sched: &mut Scheduler<Task>, notifier: &mut Notifier) -> Theme {
        self.theme = self.theme.toggled();
        self.store.save_theme(self.theme.as_str());

        self.transitioning = true;
        sched.schedule(TRANSITION_MS, Task::EndThemeTransition);

        notifier.show(activation_message(self.theme), Severity::Success, sched);
        self.theme
    }

    pub fn end_transition(&mut self) {
        self.transitioning = false;
    }

    /// Follow the OS setting, but only while the visitor hasn't chosen.
    pub fn on_system_change(&mut self, prefers_dark: bool) {
        if self.store.load_theme().is_none() {
            self.theme = Theme::from_system(prefers_dark);
        }
    }
}

fn saved_theme(store: &dyn PreferenceStore) -> Option<Theme> {
    let raw = store.load_theme()?;
    match raw.parse() {
        Ok(theme) => Some(theme),
        Err(e) => {
            warn!("Ignoring saved theme: {}", e);
            None
        }
    }
}

pub fn activation_message(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "🌙 Dark mode activated!",
        Theme::Light => "☀️ Light mode activated!",
    }
}
