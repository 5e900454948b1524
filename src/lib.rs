//! # spark-html
//!
//! Reactive HTML rendering for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! render effect that drives each mount.
//!
//! ## Architecture
//!
//! A tree is built by calling [`create_element`] (components run right away),
//! serialized to a markup string, and written into a page container. There is
//! no diffing: every change re-renders the whole mount.
//!
//! ```text
//! observe() write → mount trigger → render effect → render pass → container markup
//! ```
//!
//! Event handlers cannot live in markup, so each pass registers them in a
//! table and writes `onclick="_event3(event)"` instead. The host routes that
//! call back through [`MountHandle::dispatch_event`] or [`dispatch_event`].
//!
//! ## Modules
//!
//! - [`types`] - Node tree, attributes, style values, events
//! - [`primitives`] - Element builder, props, components
//! - [`renderer`] - HTML serializer and escaping
//! - [`engine`] - Scope/slot registry, pass counter, handler tables
//! - [`state`] - Observed state and re-render triggers
//! - [`pipeline`] - Config, document seam, mount driver
//! - [`error`] - Render errors
//!
//! ## Example
//!
//! ```ignore
//! use spark_html::*;
//!
//! fn app() -> Node {
//!     let count = observe(0u32);
//!     let handle = count.clone();
//!     create_element(
//!         "button",
//!         Props::new().on("click", move |_| handle.update(|n| *n += 1)),
//!         children![format!("Clicked {} times", count.get())],
//!     )
//! }
//!
//! let document = MemoryDocument::new().with_container("app");
//! let handle = mount(document, "#app", app)?;
//! ```

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::RenderError;

pub use engine::{
    current_pass_counter, dispatch_event, live_handler_count, reset_handlers, reset_registry,
    ComponentId, HandlerTable, ScopePath, ScopeSegment, SlotKey,
};

pub use renderer::{escape, serialize, HtmlSerializer};

pub use pipeline::{
    escape_mode, handler_prefix, mount, render, render_pass, render_to_string, reset_config,
    set_escape_mode, set_handler_prefix, unmount, Document, EscapeMode, MemoryDocument,
    MountHandle, RenderStats,
};

pub use primitives::{component, create_element, fragment, h, text, Component, PropValue, Props, Tag};

pub use state::{batch, notify_observers, observe, reset_notify, reset_store, Observed};

/// Reset every thread-local registry (for testing).
pub fn reset_all() {
    engine::reset_registry();
    engine::reset_handlers();
    engine::reset_pass_counter();
    engine::clear_pass_counter();
    state::reset_notify();
    pipeline::reset_config();
}
