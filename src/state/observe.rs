//! Observed state.
//!
//! `observe(initial)` hands back a handle to a state slot owned by the
//! component scope it was called from. The first call for a slot stores
//! `initial`; later renders get the stored value back and ignore `initial`.
//! Every write through the handle re-renders the owning mount.
//!
//! # Example
//!
//! ```ignore
//! fn counter(_: Props) -> Node {
//!     let count = observe(0u32);
//!     let handle = count.clone();
//!     create_element(
//!         "button",
//!         Props::new().on("click", move |_| handle.update(|n| *n += 1)),
//!         children![format!("clicked {}", count.get())],
//!     )
//! }
//! ```
//!
//! Called outside a mounted render, `observe` returns a detached handle:
//! reads and writes work, but nothing re-renders.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::engine::{clear_slots, get_slot, insert_slot, next_slot_key, SlotKey};
use crate::types::MountId;
use super::notify::notify_observers;

/// Handle to an observed state slot.
///
/// Cheap to clone; clones share the slot. Do not write while a borrow from
/// [`Observed::with`] is still alive.
pub struct Observed<T> {
    cell: Rc<RefCell<T>>,
    key: Option<SlotKey>,
}

/// Get or create the state slot for the current scope.
pub fn observe<T: 'static>(initial: T) -> Observed<T> {
    let Some(key) = next_slot_key() else {
        tracing::trace!("observe outside a mounted render; state is detached");
        return Observed {
            cell: Rc::new(RefCell::new(initial)),
            key: None,
        };
    };

    if let Some(existing) = get_slot(&key) {
        match existing.downcast::<RefCell<T>>() {
            Ok(cell) => return Observed { cell, key: Some(key) },
            Err(_) => tracing::warn!(
                mount = %key.mount,
                scope = %key.path,
                ordinal = key.ordinal,
                "observed state changed type; resetting slot"
            ),
        }
    }

    tracing::trace!(mount = %key.mount, scope = %key.path, ordinal = key.ordinal, "new state slot");
    let cell = Rc::new(RefCell::new(initial));
    insert_slot(key.clone(), cell.clone());
    Observed { cell, key: Some(key) }
}

/// Drop all observed state of every mount (for testing).
///
/// Handles obtained earlier keep their values but are no longer found by
/// the next render.
pub fn reset_store() {
    clear_slots();
}

impl<T: 'static> Observed<T> {
    /// Current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.cell.borrow().clone()
    }

    /// Read through a borrow.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.borrow())
    }

    /// Replace the value and re-render.
    pub fn set(&self, value: T) {
        *self.cell.borrow_mut() = value;
        self.notify();
    }

    /// Mutate in place and re-render once.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut value = self.cell.borrow_mut();
            f(&mut value);
        }
        self.notify();
    }

    /// Mount owning this state, `None` when detached.
    pub fn mount(&self) -> Option<MountId> {
        self.key.as_ref().map(|k| k.mount)
    }

    pub fn slot(&self) -> Option<&SlotKey> {
        self.key.as_ref()
    }

    pub fn is_detached(&self) -> bool {
        self.key.is_none()
    }

    fn notify(&self) {
        if let Some(mount) = self.mount() {
            notify_observers(mount);
        }
    }
}

impl<T> Clone for Observed<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            key: self.key.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observed")
            .field("value", &self.cell.borrow())
            .field("slot", &self.key)
            .finish()
    }
}
