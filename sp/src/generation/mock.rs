//! Scripted content generators for tests and offline demos

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::ContentGenerator;
use super::types::{GenerationError, GenerationRequest, Session, SessionType};

/// A plausible four-session module for `request`
pub fn sample_sessions(request: &GenerationRequest) -> Vec<Session> {
    vec![
        Session::new(
            format!("{}: core concepts", request.topic),
            SessionType::Theory,
            format!("## {}\n\nKey definitions for {}.", request.topic, request.subject),
        ),
        Session::new(
            format!("{}: formulas and codes", request.topic),
            SessionType::Theory,
            "- formula one\n- formula two".to_string(),
        ),
        Session::new(
            format!("{}: worked numericals", request.topic),
            SessionType::Application,
            "1. Given ... find ...".to_string(),
        ),
        Session::new(
            format!("{}: previous year questions", request.topic),
            SessionType::Application,
            "**Q1.** ...".to_string(),
        ),
    ]
}

enum Script {
    /// Every call answers with a fresh sample module
    Sample,
    /// Calls pop queued results; an empty queue answers with a sample module
    Queue(Mutex<VecDeque<Result<Vec<Session>, GenerationError>>>),
}

/// Generator that answers from a script and records what it was asked
pub struct MockGenerator {
    script: Script,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Always succeeds with [`sample_sessions`]
    pub fn succeeding() -> Self {
        Self::with_script(Script::Sample)
    }

    /// Replays `results` in order
    pub fn scripted(results: Vec<Result<Vec<Session>, GenerationError>>) -> Self {
        Self::with_script(Script::Queue(Mutex::new(results.into())))
    }

    /// Fails once with `err`, then succeeds
    pub fn failing(err: GenerationError) -> Self {
        Self::scripted(vec![Err(err)])
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Session>, GenerationError> {
        debug!(day = request.day, "MockGenerator::generate: called");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        match &self.script {
            Script::Sample => Ok(sample_sessions(request)),
            Script::Queue(queue) => queue
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front()
                .unwrap_or_else(|| Ok(sample_sessions(request))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::resolve;

    #[tokio::test]
    async fn test_scripted_then_sample() {
        let generator = MockGenerator::failing(GenerationError::network("timeout"));
        let request = GenerationRequest::for_slot(&resolve(3));

        assert_eq!(generator.generate(&request).await.unwrap_err().message, "timeout");
        assert_eq!(generator.generate(&request).await.unwrap().len(), 4);
        assert_eq!(generator.call_count(), 2);
        assert_eq!(generator.requests()[1].day, 3);
    }
}
