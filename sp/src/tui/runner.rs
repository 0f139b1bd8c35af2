//! TUI Runner - owns the terminal and drives the event loop
//!
//! The TuiRunner is responsible for:
//! - Dispatching terminal events to App
//! - Spawning generation tasks for tickets App queues
//! - Feeding tagged generation results back to the controller
//! - Saving exports through the configured sink

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::controller::GenerationTicket;
use crate::export::ExportSink;
use crate::generation::{ContentGenerator, GenerationError, Session};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// A finished generation, tagged with its ticket sequence number
#[derive(Debug)]
struct GenerationOutcome {
    seq: u64,
    result: Result<Vec<Session>, GenerationError>,
}

pub struct TuiRunner {
    app: App,
    terminal: Tui,
    event_handler: EventHandler,
    generator: Arc<dyn ContentGenerator>,
    sink: Box<dyn ExportSink + Send>,
    outcome_tx: mpsc::Sender<GenerationOutcome>,
    outcome_rx: mpsc::Receiver<GenerationOutcome>,
    /// Handle to the in-flight generation task
    generation_task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    pub fn new(
        terminal: Tui,
        generator: Arc<dyn ContentGenerator>,
        sink: Box<dyn ExportSink + Send>,
        tick_rate: Duration,
    ) -> Self {
        debug!(?tick_rate, "TuiRunner::new: called");
        let (outcome_tx, outcome_rx) = mpsc::channel(4);
        Self {
            app: App::new(),
            terminal,
            event_handler: EventHandler::new(tick_rate),
            generator,
            sink,
            outcome_tx,
            outcome_rx,
            generation_task: None,
        }
    }

    /// Label shown in the footer
    pub fn with_generator_label(mut self, label: impl Into<String>) -> Self {
        self.app.state_mut().generator_label = label.into();
        self
    }

    /// Run until the user quits
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: called");
        loop {
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Key(key) => {
                            if self.app.handle_key(key) {
                                debug!("TuiRunner::run: force quit");
                                break;
                            }
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize");
                        }
                        Event::Tick => {}
                    }
                }
                Some(outcome) = self.outcome_rx.recv() => {
                    self.handle_outcome(outcome);
                }
            }

            self.process_pending();

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        if let Some(task) = self.generation_task.take() {
            task.abort();
        }
        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Start queued generations and exports
    fn process_pending(&mut self) {
        if let Some(ticket) = self.app.state_mut().pending_generation.take() {
            self.start_generation(ticket);
        }
        if std::mem::take(&mut self.app.state_mut().pending_export) {
            self.save_export();
        }
    }

    fn start_generation(&mut self, ticket: GenerationTicket) {
        debug!(seq = ticket.seq, day = ticket.request.day, "TuiRunner::start_generation: called");
        if let Some(previous) = self.generation_task.take() {
            debug!("TuiRunner::start_generation: aborting superseded generation");
            previous.abort();
        }

        info!(day = ticket.request.day, topic = %ticket.request.topic, "Generating study module");
        let generator = Arc::clone(&self.generator);
        let tx = self.outcome_tx.clone();
        self.generation_task = Some(tokio::spawn(async move {
            let GenerationTicket { seq, request } = ticket;
            let result = generator.generate(&request).await;
            if tx.send(GenerationOutcome { seq, result }).await.is_err() {
                debug!(%seq, "generation task: runner gone, dropping result");
            }
        }));
    }

    fn handle_outcome(&mut self, outcome: GenerationOutcome) {
        debug!(seq = outcome.seq, ok = outcome.result.is_ok(), "TuiRunner::handle_outcome: called");
        let state = self.app.state_mut();
        if state.controller.complete_generation(outcome.seq, outcome.result) {
            state.generation_start = None;
            self.generation_task = None;
        }
    }

    fn save_export(&mut self) {
        debug!("TuiRunner::save_export: called");
        let Some(module) = self.app.state().controller.export() else {
            return;
        };
        let message = match module.save(self.sink.as_ref()) {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => {
                warn!(error = %e, "Export failed");
                format!("Export failed: {}", e)
            }
        };
        self.app.state_mut().set_status(message);
    }
}
