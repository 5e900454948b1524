//! Handler Tables - Event handler tokens for inline bindings.
//!
//! Serialized markup references handlers through tokens:
//! `onclick="_event3(event)"`. Every render pass builds a fresh
//! [`HandlerTable`]; the mount swaps it in wholesale once the pass succeeds,
//! so tokens from earlier passes stop resolving. Token numbers come from a
//! thread-wide counter and are never reused.
//!
//! # Example
//!
//! ```ignore
//! let mut table = HandlerTable::new("_event");
//! let token = table.register(Rc::new(|e| println!("{}", e.event_type)));
//! install_handler_table(mount, table);
//!
//! let mut event = DomEvent::new("click");
//! assert_eq!(dispatch_event(&token, &mut event), Some(false));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::types::{DomEvent, EventCallback, MountId};

// =============================================================================
// Handler Table
// =============================================================================

/// Handlers registered during one render pass.
pub struct HandlerTable {
    prefix: String,
    handlers: HashMap<String, EventCallback>,
}

impl HandlerTable {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under a fresh token.
    pub fn register(&mut self, handler: EventCallback) -> String {
        let token = format!("{}{}", self.prefix, next_token_number());
        tracing::trace!(%token, "registered event handler");
        self.handlers.insert(token.clone(), handler);
        token
    }

    pub fn get(&self, token: &str) -> Option<EventCallback> {
        self.handlers.get(token).cloned()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.handlers.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens: Vec<&String> = self.handlers.keys().collect();
        tokens.sort();
        f.debug_struct("HandlerTable")
            .field("prefix", &self.prefix)
            .field("tokens", &tokens)
            .finish()
    }
}

// =============================================================================
// State
// =============================================================================

thread_local! {
    static NEXT_TOKEN: Cell<u64> = const { Cell::new(0) };

    /// Live table per mount (the one from its latest successful pass).
    static LIVE_TABLES: RefCell<HashMap<MountId, HandlerTable>> = RefCell::new(HashMap::new());
}

fn next_token_number() -> u64 {
    NEXT_TOKEN.with(|next| {
        let n = next.get();
        next.set(n + 1);
        n
    })
}

// =============================================================================
// Live Tables
// =============================================================================

/// Replace the live table of `mount`.
pub fn install_handler_table(mount: MountId, table: HandlerTable) {
    LIVE_TABLES.with(|tables| {
        tables.borrow_mut().insert(mount, table);
    });
}

/// Drop the live table of `mount`.
pub fn release_handler_table(mount: MountId) {
    LIVE_TABLES.with(|tables| {
        tables.borrow_mut().remove(&mount);
    });
}

/// Number of live handlers for `mount`.
pub fn live_handler_count(mount: MountId) -> usize {
    LIVE_TABLES.with(|tables| tables.borrow().get(&mount).map_or(0, HandlerTable::len))
}

/// Find a live handler. Searches every mount when `mount` is `None`.
pub fn lookup_handler(mount: Option<MountId>, token: &str) -> Option<EventCallback> {
    LIVE_TABLES.with(|tables| {
        let tables = tables.borrow();
        match mount {
            Some(mount) => tables.get(&mount).and_then(|t| t.get(token)),
            None => tables.values().find_map(|t| t.get(token)),
        }
    })
}

// =============================================================================
// Dispatch
// =============================================================================

/// Invoke the handler behind `token`, as the host would for `token(event)`.
///
/// Calls the handler, then `prevent_default`, and yields `Some(false)`.
/// Unknown or stale tokens yield `None`.
pub fn dispatch_event(token: &str, event: &mut DomEvent) -> Option<bool> {
    dispatch(None, token, event)
}

/// Like [`dispatch_event`], restricted to one mount.
pub fn dispatch_event_in(mount: MountId, token: &str, event: &mut DomEvent) -> Option<bool> {
    dispatch(Some(mount), token, event)
}

fn dispatch(mount: Option<MountId>, token: &str, event: &mut DomEvent) -> Option<bool> {
    // Clone out first: the handler may re-render and swap the table.
    let Some(handler) = lookup_handler(mount, token) else {
        tracing::warn!(%token, "event for unknown handler token");
        return None;
    };
    handler(&*event);
    event.prevent_default();
    Some(false)
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all handler state (for testing).
pub fn reset_handlers() {
    NEXT_TOKEN.with(|next| next.set(0));
    LIVE_TABLES.with(|tables| tables.borrow_mut().clear());
}
