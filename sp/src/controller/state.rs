//! Application state owned by the controller

use serde::Serialize;

use crate::curriculum::FIRST_DAY;
use crate::generation::Session;

/// Which screen is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ViewMode {
    /// Landing screen
    #[default]
    Home,
    /// All 360 days grouped by phase
    Plan,
    /// One day's study module
    Content,
}

/// Everything the presentation layer reads
///
/// Mutated only through [`super::Controller`] transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub view_mode: ViewMode,
    /// Always within `FIRST_DAY..=LAST_DAY`
    pub selected_day: u32,
    pub is_generating: bool,
    pub sessions: Option<Vec<Session>>,
    pub error: Option<String>,
    pub sidebar_open: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Home,
            selected_day: FIRST_DAY,
            is_generating: false,
            sessions: None,
            error: None,
            sidebar_open: false,
        }
    }
}

impl AppState {
    pub fn has_sessions(&self) -> bool {
        self.sessions.as_ref().is_some_and(|s| !s.is_empty())
    }
}
