//! Render configuration signals.
//!
//! Settings are reactive: the render effect of every mount reads them, so
//! changing one re-renders mounted trees.

use spark_signals::signal;
use std::cell::RefCell;

/// Default prefix of inline handler tokens.
pub const DEFAULT_HANDLER_PREFIX: &str = "_event";

// =============================================================================
// Escape Mode
// =============================================================================

/// How text content is escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Only `<` and non-breaking spaces. Ampersands and quotes pass through.
    #[default]
    Minimal,
    /// `& < > " '` and non-breaking spaces.
    Full,
}

thread_local! {
    static ESCAPE_MODE: RefCell<spark_signals::Signal<EscapeMode>> = RefCell::new(signal(EscapeMode::Minimal));
    static HANDLER_PREFIX: RefCell<spark_signals::Signal<String>> =
        RefCell::new(signal(DEFAULT_HANDLER_PREFIX.to_string()));
}

/// Get the current escape mode.
pub fn escape_mode() -> EscapeMode {
    ESCAPE_MODE.with(|m| m.borrow().get())
}

/// Set the escape mode.
pub fn set_escape_mode(mode: EscapeMode) {
    ESCAPE_MODE.with(|m| m.borrow().set(mode));
}

// =============================================================================
// Handler Prefix
// =============================================================================

/// Get the prefix used for handler tokens.
pub fn handler_prefix() -> String {
    HANDLER_PREFIX.with(|p| p.borrow().get())
}

/// Set the prefix used for handler tokens.
///
/// Empty prefixes are ignored: a token must stay a valid identifier.
pub fn set_handler_prefix(prefix: &str) {
    let valid = prefix
        .chars()
        .next()
        .is_some_and(|c| c == '_' || c == '$' || c.is_ascii_alphabetic());
    if !valid {
        tracing::warn!(%prefix, "ignoring invalid handler prefix");
        return;
    }
    HANDLER_PREFIX.with(|p| p.borrow().set(prefix.to_string()));
}

/// Restore defaults (for testing).
pub fn reset_config() {
    set_escape_mode(EscapeMode::Minimal);
    set_handler_prefix(DEFAULT_HANDLER_PREFIX);
}

// =============================================================================
// Tests
// =============================================================================
