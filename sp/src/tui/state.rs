//! TUI state
//!
//! Presentation-only data wrapped around the [`Controller`]. No rendering
//! logic here.

use std::time::Instant;

use rand::seq::IndexedRandom;
use tracing::debug;

use crate::controller::{Controller, GenerationTicket};
use crate::curriculum::{FIRST_DAY, LAST_DAY};

/// Words for the generating indicator
pub const BUILDING_WORDS: &[&str] = &[
    "Surveying",
    "Excavating",
    "Pouring",
    "Curing",
    "Reinforcing",
    "Levelling",
    "Drafting",
    "Framing",
    "Compacting",
    "Plastering",
];

/// Rows a page-up/page-down moves in the plan view
pub const PAGE_SIZE: u32 = 10;

/// State read by the views and mutated by [`super::App`]
#[derive(Debug)]
pub struct TuiState {
    pub controller: Controller,

    /// Highlighted day in the plan view
    pub plan_cursor: u32,
    /// Vertical scroll of the content view
    pub content_scroll: u16,

    pub show_help: bool,
    /// One-shot message for the footer (export results and the like)
    pub status_message: Option<String>,
    pub should_quit: bool,

    /// Word shown while generating
    pub building_word: String,
    pub generation_start: Option<Instant>,
    /// Generator label for the footer, e.g. "gemini/gemini-2.5-flash"
    pub generator_label: String,

    // === Actions picked up by the runner ===
    pub pending_generation: Option<GenerationTicket>,
    pub pending_export: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        debug!("TuiState::new: called");
        Self {
            controller: Controller::new(),
            plan_cursor: FIRST_DAY,
            content_scroll: 0,
            show_help: false,
            status_message: None,
            should_quit: false,
            building_word: BUILDING_WORDS[0].to_string(),
            generation_start: None,
            generator_label: String::new(),
            pending_generation: None,
            pending_export: false,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "TuiState::set_status: called");
        self.status_message = Some(msg);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Move the plan cursor, staying on the plan
    pub fn move_cursor(&mut self, delta: i64) {
        let next = (self.plan_cursor as i64 + delta).clamp(FIRST_DAY as i64, LAST_DAY as i64);
        self.plan_cursor = next as u32;
    }

    /// Queue a generation ticket and reset the indicator
    pub fn start_generation(&mut self, ticket: GenerationTicket) {
        debug!(seq = ticket.seq, day = ticket.request.day, "TuiState::start_generation: called");
        let mut rng = rand::rng();
        self.building_word = BUILDING_WORDS.choose(&mut rng).unwrap_or(&"Building").to_string();
        self.generation_start = Some(Instant::now());
        self.content_scroll = 0;
        self.plan_cursor = self.controller.state().selected_day;
        self.pending_generation = Some(ticket);
    }

    /// Seconds since the current generation started
    pub fn generation_elapsed(&self) -> u64 {
        self.generation_start.map(|t| t.elapsed().as_secs()).unwrap_or(0)
    }

    pub fn scroll_content(&mut self, delta: i32) {
        self.content_scroll = (self.content_scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
    }
}
