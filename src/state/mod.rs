//! State Module - Reactivity store.
//!
//! - **Observe** - State slots bound to component scopes, write-triggered re-renders
//! - **Notify** - Per-mount re-render triggers, batching

mod notify;
mod observe;

pub use notify::*;
pub use observe::*;
