//! Render Engine - Process-wide (per-thread) registries.
//!
//! The engine holds the state that outlives a single builder call:
//! - Registry: mount ids, render/component scope stack, state slot arena
//! - Pass: the render pass counter
//! - Handlers: per-pass event handler tables and token dispatch
//!
//! # Architecture
//!
//! Nodes are throwaway values; identity lives here instead:
//!
//! ```text
//! mount#1 /                 -> slot 0 (Root's counter)
//! mount#1 /Heading#0        -> slot 0
//! mount#1 /Row[foo]         -> slot 0, slot 1
//! ```
//!
//! Everything is thread-local. The render path is single-threaded and
//! synchronous, so no locking is involved.

mod registry;
mod pass;
pub mod handlers;

pub use registry::*;
pub use pass::*;
pub use handlers::{
    dispatch_event, dispatch_event_in, install_handler_table, live_handler_count,
    lookup_handler, release_handler_table, reset_handlers, HandlerTable,
};
