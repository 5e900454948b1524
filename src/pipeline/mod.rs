//! Render Pipeline
//!
//! This module connects the element builder to a page.
//!
//! # Pipeline Architecture
//!
//! ```text
//! root factory → node tree → HtmlSerializer → Document container
//!                                   └→ handler table (per mount)
//! ```
//!
//! ## Data Flow
//!
//! 1. **render effect** - One per mount, re-runs on state writes and config changes
//! 2. **render pass** - Builds the tree inside the mount's render context
//! 3. **document write** - Replaces the container markup, then swaps handlers

pub mod config;
pub mod document;
pub mod mount;

// Re-exports
pub use config::{
    escape_mode, handler_prefix, reset_config, set_escape_mode, set_handler_prefix, EscapeMode,
    DEFAULT_HANDLER_PREFIX,
};
pub use document::{Document, MemoryDocument};
pub use mount::{mount, render, render_pass, render_to_string, unmount, MountHandle, RenderStats};
