//! Terminal input
//!
//! A blocking thread polls crossterm and forwards key presses, resizes and
//! periodic ticks over a tokio channel.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use eyre::{Result, eyre};
use tokio::sync::mpsc;
use tracing::{debug, trace};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    /// No input within one tick interval
    Tick,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        debug!(?tick_rate, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            debug!("EventHandler: polling thread started");
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        // Windows reports releases too
                        Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                        Ok(event::Event::Resize(w, h)) => Event::Resize(w, h),
                        Ok(other) => {
                            trace!(?other, "EventHandler: ignoring event");
                            continue;
                        }
                        Err(e) => {
                            debug!(error = %e, "EventHandler: read failed");
                            continue;
                        }
                    }
                } else {
                    Event::Tick
                };

                if tx.send(event).is_err() {
                    debug!("EventHandler: receiver dropped, exiting");
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Wait for the next event
    pub async fn next(&mut self) -> Result<Event> {
        trace!("EventHandler::next: called");
        self.rx.recv().await.ok_or_else(|| eyre!("Event channel closed"))
    }
}
