//! Render pass counter.
//!
//! Reset to 0 when a top-level render pass starts, advanced once for every
//! node the serializer visits, cleared when the pass ends. `None` means no
//! pass is running. A pass started inside another one (a `render_to_string`
//! from a component) puts the outer value back when it ends.

use std::cell::Cell;

thread_local! {
    static PASS_COUNTER: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Start counting for a new pass.
pub fn reset_pass_counter() {
    PASS_COUNTER.with(|c| c.set(Some(0)));
}

/// Count one visited node. Returns the new value, or `None` outside a pass.
pub fn advance_pass_counter() -> Option<usize> {
    PASS_COUNTER.with(|c| {
        let next = c.get().map(|n| n + 1);
        c.set(next);
        next
    })
}

/// Current counter value.
pub fn current_pass_counter() -> Option<usize> {
    PASS_COUNTER.with(Cell::get)
}

/// End the pass.
pub fn clear_pass_counter() {
    PASS_COUNTER.with(|c| c.set(None));
}

/// Restores the counter saved by [`begin_pass`] when dropped.
#[must_use = "the pass ends when the guard is dropped"]
pub struct PassGuard {
    previous: Option<usize>,
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        let previous = self.previous;
        PASS_COUNTER.with(|c| c.set(previous));
    }
}

/// Start a pass, saving whatever pass was running.
pub fn begin_pass() -> PassGuard {
    let previous = current_pass_counter();
    reset_pass_counter();
    PassGuard { previous }
}
