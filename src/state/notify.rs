//! Re-render triggers.
//!
//! Every mount registers one trigger. A write to observed state calls the
//! trigger of the mount that owns it, synchronously, once per write.
//! Inside [`batch`], triggers are collected and each affected mount fires
//! once when the outermost batch ends.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::types::MountId;

thread_local! {
    static TRIGGERS: RefCell<HashMap<MountId, Rc<dyn Fn()>>> = RefCell::new(HashMap::new());
    static BATCH_DEPTH: Cell<usize> = const { Cell::new(0) };
    static PENDING: RefCell<Vec<MountId>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Registration
// =============================================================================

/// Register (or replace) the re-render trigger of `mount`.
pub fn register_trigger(mount: MountId, trigger: impl Fn() + 'static) {
    TRIGGERS.with(|t| {
        t.borrow_mut().insert(mount, Rc::new(trigger));
    });
}

/// Remove the trigger of `mount`. Later writes to its state are no-ops.
pub fn unregister_trigger(mount: MountId) {
    TRIGGERS.with(|t| {
        t.borrow_mut().remove(&mount);
    });
    PENDING.with(|p| p.borrow_mut().retain(|m| *m != mount));
}

pub fn has_trigger(mount: MountId) -> bool {
    TRIGGERS.with(|t| t.borrow().contains_key(&mount))
}

// =============================================================================
// Notification
// =============================================================================

/// Request a full re-render of `mount`.
pub fn notify_observers(mount: MountId) {
    if is_batching() {
        PENDING.with(|p| {
            let mut pending = p.borrow_mut();
            if !pending.contains(&mount) {
                pending.push(mount);
            }
        });
        return;
    }
    fire(mount);
}

fn fire(mount: MountId) {
    // Clone out: the trigger re-renders, which may register more state.
    let trigger = TRIGGERS.with(|t| t.borrow().get(&mount).cloned());
    match trigger {
        Some(trigger) => trigger(),
        None => tracing::trace!(%mount, "no trigger registered; write ignored"),
    }
}

/// Run `f`, coalescing re-renders it causes into one per mount.
///
/// Nested batches flush when the outermost one returns.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    BATCH_DEPTH.with(|d| d.set(d.get() + 1));
    let result = f();
    let depth = BATCH_DEPTH.with(|d| {
        let depth = d.get().saturating_sub(1);
        d.set(depth);
        depth
    });

    if depth == 0 {
        let pending = PENDING.with(|p| std::mem::take(&mut *p.borrow_mut()));
        for mount in pending {
            fire(mount);
        }
    }
    result
}

pub fn is_batching() -> bool {
    BATCH_DEPTH.with(|d| d.get() > 0)
}

/// Reset all trigger state (for testing).
pub fn reset_notify() {
    TRIGGERS.with(|t| t.borrow_mut().clear());
    BATCH_DEPTH.with(|d| d.set(0));
    PENDING.with(|p| p.borrow_mut().clear());
}
