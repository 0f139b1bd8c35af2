//! View/state controller
//!
//! Owns [`AppState`] and exposes the transitions the UI drives: view routing,
//! day selection and the generation lifecycle. Generation is split into
//! [`Controller::begin_generation`] and [`Controller::complete_generation`] so
//! the caller can run the request on another task; every request carries a
//! sequence number and a completion for anything but the latest one is
//! discarded.

mod state;

pub use state::{AppState, ViewMode};

use tracing::{debug, info, warn};

use crate::curriculum::{FIRST_DAY, LAST_DAY, ResolvedSlot, resolve};
use crate::export::ExportedModule;
use crate::generation::{ContentGenerator, GenerationError, GenerationRequest, Session};

/// Shown when a failure carries no message of its own
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to generate content. Please try again.";

/// A started generation: run `request`, then hand the result back with `seq`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub seq: u64,
    pub request: GenerationRequest,
}

/// Clamp any integer onto the plan's day range
pub fn clamp_day(day: i64) -> u32 {
    day.clamp(FIRST_DAY as i64, LAST_DAY as i64) as u32
}

#[derive(Debug, Default)]
pub struct Controller {
    state: AppState,
    /// Last sequence number handed out
    seq: u64,
    /// Sequence number of the generation still awaiting completion
    pending: Option<u64>,
}

impl Controller {
    pub fn new() -> Self {
        debug!("Controller::new: called");
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Sequence number of the in-flight generation, if any
    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    /// Resolved phase/subject/topic for the selected day
    pub fn slot(&self) -> ResolvedSlot {
        resolve(self.state.selected_day as i64)
    }

    /// Home -> Plan
    pub fn open_plan(&mut self) {
        debug!(view = ?self.state.view_mode, "Controller::open_plan: called");
        if self.state.view_mode == ViewMode::Home {
            self.state.view_mode = ViewMode::Plan;
        }
    }

    /// Content -> Plan -> Home
    pub fn back(&mut self) {
        debug!(view = ?self.state.view_mode, "Controller::back: called");
        self.state.view_mode = match self.state.view_mode {
            ViewMode::Content => ViewMode::Plan,
            ViewMode::Plan | ViewMode::Home => ViewMode::Home,
        };
    }

    /// Select a day (clamped) and drop any module shown for the previous one
    pub fn select_day(&mut self, day: i64) {
        let day = clamp_day(day);
        debug!(%day, "Controller::select_day: called");
        self.state.selected_day = day;
        self.state.sessions = None;
    }

    pub fn step_day(&mut self, delta: i64) {
        self.select_day(self.state.selected_day as i64 + delta);
    }

    pub fn toggle_sidebar(&mut self) {
        self.state.sidebar_open = !self.state.sidebar_open;
        debug!(open = self.state.sidebar_open, "Controller::toggle_sidebar: called");
    }

    /// Enter the generating state for `day` (or the selected day)
    ///
    /// Any earlier generation still in flight is superseded: its completion
    /// will be discarded.
    pub fn begin_generation(&mut self, day: Option<i64>) -> GenerationTicket {
        debug!(?day, "Controller::begin_generation: called");
        if let Some(day) = day {
            self.select_day(day);
        }
        if let Some(previous) = self.pending {
            debug!(%previous, "Controller::begin_generation: superseding in-flight generation");
        }

        self.seq += 1;
        self.pending = Some(self.seq);
        self.state.is_generating = true;
        self.state.error = None;
        self.state.sessions = None;
        self.state.view_mode = ViewMode::Content;
        self.state.sidebar_open = false;

        GenerationTicket {
            seq: self.seq,
            request: GenerationRequest::for_slot(&self.slot()),
        }
    }

    /// Store the outcome of generation `seq`
    ///
    /// Returns false, leaving the state untouched, when `seq` is not the
    /// generation currently awaited.
    pub fn complete_generation(&mut self, seq: u64, result: Result<Vec<Session>, GenerationError>) -> bool {
        debug!(%seq, pending = ?self.pending, "Controller::complete_generation: called");
        if self.pending != Some(seq) {
            debug!(%seq, "Controller::complete_generation: stale result discarded");
            return false;
        }

        self.pending = None;
        self.state.is_generating = false;
        match result {
            Ok(sessions) => {
                info!(day = self.state.selected_day, sessions = sessions.len(), "Study module ready");
                self.state.sessions = Some(sessions);
            }
            Err(err) => {
                warn!(day = self.state.selected_day, kind = ?err.kind, error = %err, "Study module generation failed");
                let message = if err.message.trim().is_empty() {
                    DEFAULT_ERROR_MESSAGE.to_string()
                } else {
                    err.message
                };
                self.state.error = Some(message);
            }
        }
        true
    }

    /// Generate for `day` (or the selected day) and wait for the result
    pub async fn generate(&mut self, day: Option<i64>, generator: &dyn ContentGenerator) -> bool {
        let ticket = self.begin_generation(day);
        let result = generator.generate(&ticket.request).await;
        self.complete_generation(ticket.seq, result)
    }

    /// Start the same request again for the selected day
    pub fn retry_ticket(&mut self) -> GenerationTicket {
        debug!(day = self.state.selected_day, "Controller::retry_ticket: called");
        self.begin_generation(None)
    }

    pub async fn retry(&mut self, generator: &dyn ContentGenerator) -> bool {
        self.generate(None, generator).await
    }

    /// The current module as a text file, if there is one
    pub fn export(&self) -> Option<ExportedModule> {
        debug!(day = self.state.selected_day, "Controller::export: called");
        match &self.state.sessions {
            Some(sessions) if !sessions.is_empty() => Some(ExportedModule::new(self.state.selected_day, sessions)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationErrorKind;
    use crate::generation::mock::{MockGenerator, sample_sessions};

    #[test]
    fn test_initial_state() {
        let controller = Controller::new();
        let state = controller.state();
        assert_eq!(state.view_mode, ViewMode::Home);
        assert_eq!(state.selected_day, 1);
        assert!(!state.is_generating);
        assert!(state.sessions.is_none());
        assert!(state.error.is_none());
        assert!(!state.sidebar_open);
    }

    #[test]
    fn test_view_routing() {
        let mut controller = Controller::new();
        controller.open_plan();
        assert_eq!(controller.state().view_mode, ViewMode::Plan);

        controller.begin_generation(Some(3));
        assert_eq!(controller.state().view_mode, ViewMode::Content);

        controller.back();
        assert_eq!(controller.state().view_mode, ViewMode::Plan);
        controller.back();
        assert_eq!(controller.state().view_mode, ViewMode::Home);
        controller.back();
        assert_eq!(controller.state().view_mode, ViewMode::Home);
    }

    #[test]
    fn test_open_plan_only_from_home() {
        let mut controller = Controller::new();
        controller.begin_generation(None);
        controller.open_plan();
        assert_eq!(controller.state().view_mode, ViewMode::Content);
    }

    #[test]
    fn test_select_day_clamps() {
        let mut controller = Controller::new();
        controller.select_day(-5);
        assert_eq!(controller.state().selected_day, 1);
        controller.select_day(9999);
        assert_eq!(controller.state().selected_day, 360);
        controller.select_day(0);
        assert_eq!(controller.state().selected_day, 1);
        controller.select_day(42);
        assert_eq!(controller.state().selected_day, 42);
    }

    #[test]
    fn test_step_day() {
        let mut controller = Controller::new();
        controller.step_day(-1);
        assert_eq!(controller.state().selected_day, 1);
        controller.step_day(10);
        assert_eq!(controller.state().selected_day, 11);
        controller.select_day(360);
        controller.step_day(1);
        assert_eq!(controller.state().selected_day, 360);
    }

    #[tokio::test]
    async fn test_select_day_clears_sessions_keeps_view() {
        let mut controller = Controller::new();
        let generator = MockGenerator::succeeding();
        controller.generate(Some(5), &generator).await;
        assert!(controller.state().has_sessions());

        controller.select_day(6);
        assert_eq!(controller.state().view_mode, ViewMode::Content);
        assert!(controller.state().sessions.is_none());
        assert_eq!(controller.slot().day, 6);
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut controller = Controller::new();
        controller.toggle_sidebar();
        let generator = MockGenerator::succeeding();

        assert!(controller.generate(Some(5), &generator).await);

        let state = controller.state();
        assert_eq!(state.view_mode, ViewMode::Content);
        assert_eq!(state.selected_day, 5);
        assert!(!state.is_generating);
        assert_eq!(state.sessions.as_ref().map(Vec::len), Some(4));
        assert!(state.error.is_none());
        assert!(!state.sidebar_open);

        let request = &generator.requests()[0];
        assert_eq!(request.day, 5);
        assert_eq!(request.topic, resolve(5).topic);
    }

    #[tokio::test]
    async fn test_generate_failure() {
        let mut controller = Controller::new();
        let generator = MockGenerator::failing(GenerationError::network("timeout"));

        controller.generate(Some(5), &generator).await;

        let state = controller.state();
        assert!(!state.is_generating);
        assert!(state.sessions.is_none());
        assert_eq!(state.error.as_deref(), Some("timeout"));
    }

    #[tokio::test]
    async fn test_empty_error_message_uses_default() {
        let mut controller = Controller::new();
        let generator = MockGenerator::failing(GenerationError::new(GenerationErrorKind::RemoteServiceError, ""));

        controller.generate(None, &generator).await;
        assert_eq!(controller.state().error.as_deref(), Some(DEFAULT_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_retry_reuses_selected_day() {
        let mut controller = Controller::new();
        let generator = MockGenerator::failing(GenerationError::malformed("bad json"));

        controller.generate(Some(17), &generator).await;
        assert!(controller.state().error.is_some());

        controller.retry(&generator).await;
        assert!(controller.state().error.is_none());
        assert!(controller.state().has_sessions());

        let requests = generator.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
    }

    #[test]
    fn test_begin_generation_clears_previous_result() {
        let mut controller = Controller::new();
        let first = controller.begin_generation(Some(2));
        controller.complete_generation(first.seq, Err(GenerationError::network("down")));
        assert!(controller.state().error.is_some());

        controller.retry_ticket();
        let state = controller.state();
        assert!(state.is_generating);
        assert!(state.error.is_none());
        assert!(state.sessions.is_none());
    }

    #[test]
    fn test_stale_completion_discarded() {
        let mut controller = Controller::new();
        let first = controller.begin_generation(Some(10));
        let second = controller.begin_generation(Some(20));
        assert!(second.seq > first.seq);

        // the slow first request lands after the second started
        let stale = sample_sessions(&first.request);
        assert!(!controller.complete_generation(first.seq, Ok(stale)));
        assert!(controller.state().is_generating);
        assert!(controller.state().sessions.is_none());

        let fresh = sample_sessions(&second.request);
        assert!(controller.complete_generation(second.seq, Ok(fresh.clone())));
        assert_eq!(controller.state().sessions, Some(fresh));
        assert_eq!(controller.state().selected_day, 20);
        assert!(controller.pending().is_none());
    }

    #[test]
    fn test_duplicate_completion_discarded() {
        let mut controller = Controller::new();
        let ticket = controller.begin_generation(None);
        assert!(controller.complete_generation(ticket.seq, Ok(sample_sessions(&ticket.request))));
        assert!(!controller.complete_generation(ticket.seq, Err(GenerationError::network("late"))));
        assert!(controller.state().error.is_none());
    }

    #[tokio::test]
    async fn test_export_requires_sessions() {
        let mut controller = Controller::new();
        assert!(controller.export().is_none());

        let generator = MockGenerator::succeeding();
        controller.generate(Some(12), &generator).await;

        let first = controller.export().unwrap();
        let second = controller.export().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.file_name, "Day_12_Study_Module.txt");
        assert!(first.contents.contains("(Theory)"));
        assert!(first.contents.contains("(Application)"));
    }

    #[test]
    fn test_export_none_with_empty_sessions() {
        let mut controller = Controller::new();
        let ticket = controller.begin_generation(None);
        controller.complete_generation(ticket.seq, Ok(vec![]));
        assert!(controller.export().is_none());
    }
}
