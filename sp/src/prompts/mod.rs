//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for study module generation.
//!
//! Template loading chain:
//! 1. `~/.config/studyplan/prompts/{name}.pmt` (user override)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{ModuleContext, PromptLoader, SYSTEM_TEMPLATE, USER_TEMPLATE};
