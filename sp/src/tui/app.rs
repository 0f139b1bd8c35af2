//! TUI application - key handling
//!
//! The App struct owns the TuiState and turns key presses into controller
//! transitions or pending actions for the runner. It does not render.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::state::{PAGE_SIZE, TuiState};
use crate::controller::ViewMode;
use crate::curriculum::{FIRST_DAY, LAST_DAY};

#[derive(Debug, Default)]
pub struct App {
    state: TuiState,
}

impl App {
    pub fn new() -> Self {
        debug!("App::new: called");
        Self { state: TuiState::new() }
    }

    pub fn state(&self) -> &TuiState {
        trace!("App::state: called");
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TuiState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit immediately.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        self.state.clear_status();

        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            debug!("App::handle_key: Ctrl+C force quit");
            return true;
        }

        if self.state.show_help {
            return self.handle_help_key(key);
        }

        match key.code {
            KeyCode::Char('q') => {
                debug!("App::handle_key: quit requested");
                self.state.should_quit = true;
                return false;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                debug!("App::handle_key: showing help");
                self.state.show_help = true;
                return false;
            }
            _ => {}
        }

        match self.state.controller.state().view_mode {
            ViewMode::Home => self.handle_home_key(key),
            ViewMode::Plan => self.handle_plan_key(key),
            ViewMode::Content => self.handle_content_key(key),
        }
        false
    }

    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_help_key: called");
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1) => {
                self.state.show_help = false;
            }
            _ => {}
        }
        false
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_home_key: called");
        if let KeyCode::Enter | KeyCode::Char(' ') = key.code {
            self.state.plan_cursor = self.state.controller.state().selected_day;
            self.state.controller.open_plan();
        }
    }

    fn handle_plan_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_plan_key: called");
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_cursor(-1),
            KeyCode::PageDown => self.state.move_cursor(PAGE_SIZE as i64),
            KeyCode::PageUp => self.state.move_cursor(-(PAGE_SIZE as i64)),
            KeyCode::Char('g') | KeyCode::Home => self.state.plan_cursor = FIRST_DAY,
            KeyCode::Char('G') | KeyCode::End => self.state.plan_cursor = LAST_DAY,
            KeyCode::Enter => {
                let day = self.state.plan_cursor as i64;
                debug!(%day, "App::handle_plan_key: start learning");
                let ticket = self.state.controller.begin_generation(Some(day));
                self.state.start_generation(ticket);
            }
            KeyCode::Esc => self.state.controller.back(),
            _ => {}
        }
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_content_key: called");
        let generating = self.state.controller.state().is_generating;
        match key.code {
            // the in-flight module belongs to the selected day
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('[') if !generating => {
                self.state.controller.step_day(-1);
                self.state.content_scroll = 0;
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(']') if !generating => {
                self.state.controller.step_day(1);
                self.state.content_scroll = 0;
            }
            KeyCode::Enter | KeyCode::Char('r') => {
                if generating {
                    debug!("App::handle_content_key: already generating, ignoring");
                    return;
                }
                let ticket = if self.state.controller.state().error.is_some() {
                    self.state.controller.retry_ticket()
                } else {
                    self.state.controller.begin_generation(None)
                };
                self.state.start_generation(ticket);
            }
            KeyCode::Char('s') => {
                if self.state.controller.state().has_sessions() {
                    self.state.pending_export = true;
                } else {
                    self.state.set_status("Nothing to save yet - generate a module first");
                }
            }
            KeyCode::Char('b') => self.state.controller.toggle_sidebar(),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_content(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_content(-1),
            KeyCode::PageDown => self.state.scroll_content(PAGE_SIZE as i32),
            KeyCode::PageUp => self.state.scroll_content(-(PAGE_SIZE as i32)),
            KeyCode::Char('g') | KeyCode::Home => self.state.content_scroll = 0,
            KeyCode::Esc => {
                self.state.plan_cursor = self.state.controller.state().selected_day;
                self.state.controller.back();
            }
            _ => {}
        }
    }
}
