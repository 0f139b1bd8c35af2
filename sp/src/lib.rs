//! SSC JE Architect - 360-day civil engineering study planner
//!
//! Walks a learner through a fixed 360-day curriculum in which the syllabus is
//! taught by "building an imaginary city" phase by phase. Each day resolves
//! deterministically to a phase, subject and topic; on demand a language
//! model writes the day's four study sessions.
//!
//! # Modules
//!
//! - [`curriculum`] - static phase/topic tables and the day resolver
//! - [`generation`] - study module generation over an LLM
//! - [`llm`] - provider clients (Gemini, Anthropic, OpenAI)
//! - [`prompts`] - Handlebars prompt templates
//! - [`controller`] - view/state controller driven by the UI
//! - [`export`] - plain-text export of a generated module
//! - [`tui`] - terminal user interface
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod controller;
pub mod curriculum;
pub mod export;
pub mod generation;
pub mod llm;
pub mod prompts;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, LlmConfig};
pub use controller::{AppState, Controller, GenerationTicket, ViewMode};
pub use curriculum::{Phase, ResolvedSlot, resolve};
pub use export::{DirectorySink, ExportError, ExportSink, ExportedModule, export_file_name, render_export};
pub use generation::{
    ContentGenerator, GenerationError, GenerationErrorKind, GenerationRequest, LlmContentGenerator, Session,
    SessionType,
};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, create_client};
pub use prompts::{ModuleContext, PromptLoader};
