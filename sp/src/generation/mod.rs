//! Study module generation
//!
//! Turns a resolved day into four study sessions by asking a language model.
//! One request per call: no caching, no automatic retry.

use async_trait::async_trait;

mod generator;
pub mod mock;
mod parse;
mod types;

pub use generator::{DEFAULT_MAX_TOKENS, LlmContentGenerator, UnavailableGenerator, classify_llm_error};
pub use parse::{EXPECTED_SESSIONS, parse_sessions};
pub use types::{GenerationError, GenerationErrorKind, GenerationRequest, Session, SessionType};

/// Produces the study sessions for one day
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Session>, GenerationError>;
}
