//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System prompt for study module generation
pub const MODULE_SYSTEM: &str = include_str!("../../prompts/module-system.pmt");

/// Per-day user prompt for study module generation
pub const MODULE_USER: &str = include_str!("../../prompts/module-user.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "module-system" => Some(MODULE_SYSTEM),
        "module-user" => Some(MODULE_USER),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
