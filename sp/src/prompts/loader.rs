//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to the
//! embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Template used for the system prompt
pub const SYSTEM_TEMPLATE: &str = "module-system";

/// Template used for the per-day user prompt
pub const USER_TEMPLATE: &str = "module-user";

/// Context for rendering study module templates
#[derive(Debug, Clone, Serialize)]
pub struct ModuleContext {
    pub day: i64,
    pub topic: String,
    pub subject: String,
    pub phase_description: String,
    /// Number of sessions the module should contain
    pub session_count: usize,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory (e.g., `~/.config/studyplan/prompts/`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that checks `dir` for `{name}.pmt` overrides first
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let exists = dir.is_dir();
        debug!(?dir, %exists, "PromptLoader::new: called");

        Self {
            hbs: Self::engine(),
            override_dir: if exists { Some(dir.to_path_buf()) } else { None },
        }
    }

    /// Loader using the user's config directory for overrides
    pub fn from_user_config() -> Self {
        debug!("PromptLoader::from_user_config: called");
        match dirs::config_dir() {
            Some(dir) => Self::new(dir.join("studyplan").join("prompts")),
            None => Self::embedded_only(),
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        // Prompts are plain text; HTML escaping would mangle "&" in phase names
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.set_strict_mode(true);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `{override_dir}/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt override {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &ModuleContext) -> Result<String> {
        debug!(%template_name, day = context.day, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Render the system and user prompts for one study module
    pub fn render_module(&self, context: &ModuleContext) -> Result<(String, String)> {
        Ok((
            self.render(SYSTEM_TEMPLATE, context)?,
            self.render(USER_TEMPLATE, context)?,
        ))
    }
}
