//! Scope Registry - Render scopes and the state slot arena.
//!
//! Manages the identity side of reactivity:
//! - Mount id allocation
//! - Render context stack (one context per active render)
//! - Component scope stack inside a render (path-based identity)
//! - State slot arena keyed by (mount, scope path, ordinal)
//!
//! A component's scope path is the chain of component invocations from the
//! root. Each segment is the component's `key` prop when one was given, or
//! its position among un-keyed components of the enclosing scope. Both carry
//! the component's [`ComponentId`], so swapping one component for another at
//! the same position never inherits the old one's state. That holds for
//! closures too: every closure has its own type.

use std::any::{type_name, Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::types::MountId;

// =============================================================================
// Keys
// =============================================================================

/// Identity of a component function.
///
/// Compared by type; the name is only for display.
#[derive(Debug, Clone, Copy)]
pub struct ComponentId {
    type_id: TypeId,
    name: &'static str,
}

impl ComponentId {
    pub fn of<F: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<F>(),
            name: type_name::<F>(),
        }
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComponentId {}

impl std::hash::Hash for ComponentId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(short_name(self.name))
    }
}

/// One step of a scope path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeSegment {
    /// Component invoked with a `key` prop.
    Keyed { component: ComponentId, key: String },
    /// Component identified by call order in its parent scope.
    Indexed { component: ComponentId, position: usize },
}

/// Chain of component scopes from the root of a mount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ScopePath(Vec<ScopeSegment>);

impl ScopePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[ScopeSegment] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    fn child(&self, segment: ScopeSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match segment {
                ScopeSegment::Keyed { component, key } => write!(f, "{component}[{key}]")?,
                ScopeSegment::Indexed { component, position } => write!(f, "{component}#{position}")?,
            }
        }
        Ok(())
    }
}

/// Last path component of a type name, for readable logs.
///
/// Closures keep their enclosing function: `app::root::{{closure}}`
/// becomes `root::{{closure}}`.
fn short_name(type_name: &str) -> &str {
    let mut parts = type_name.rsplitn(3, "::");
    let last = parts.next().unwrap_or(type_name);
    if last.starts_with("{{closure}}") {
        if let Some(parent) = parts.next() {
            let start = type_name.len() - last.len() - parent.len() - 2;
            return &type_name[start..];
        }
    }
    last
}

/// Address of one observed state slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub mount: MountId,
    pub path: ScopePath,
    pub ordinal: usize,
}

// =============================================================================
// Registry State
// =============================================================================

struct ScopeFrame {
    path: ScopePath,
    next_position: usize,
    next_slot: usize,
}

impl ScopeFrame {
    fn new(path: ScopePath) -> Self {
        Self {
            path,
            next_position: 0,
            next_slot: 0,
        }
    }
}

struct RenderContext {
    /// `None` for one-shot renders; state created there is detached.
    mount: Option<MountId>,
    frames: Vec<ScopeFrame>,
}

thread_local! {
    /// Counter for mount ids. Never reused within a thread.
    static NEXT_MOUNT_ID: Cell<u64> = const { Cell::new(1) };

    /// Stack of active renders. Nested when a render triggers another mount.
    static CONTEXT_STACK: RefCell<Vec<RenderContext>> = const { RefCell::new(Vec::new()) };

    /// Observed state, type-erased. Values are `RefCell<T>`.
    static SLOTS: RefCell<HashMap<SlotKey, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Mount Ids
// =============================================================================

/// Allocate a fresh mount id.
pub fn allocate_mount_id() -> MountId {
    NEXT_MOUNT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        MountId(id)
    })
}

// =============================================================================
// Render Context
// =============================================================================

/// Enter a render for `mount` (or a detached one-shot render).
pub fn begin_render(mount: Option<MountId>) {
    CONTEXT_STACK.with(|stack| {
        stack.borrow_mut().push(RenderContext {
            mount,
            frames: vec![ScopeFrame::new(ScopePath::root())],
        });
    });
}

/// Leaves the render opened by [`enter_render`] when dropped, also while
/// unwinding from a panicking component.
#[must_use = "the render ends when the guard is dropped"]
pub struct RenderGuard(());

impl Drop for RenderGuard {
    fn drop(&mut self) {
        end_render();
    }
}

/// [`begin_render`] paired with a guard that ends it.
pub fn enter_render(mount: Option<MountId>) -> RenderGuard {
    begin_render(mount);
    RenderGuard(())
}

/// Leave the innermost render.
pub fn end_render() {
    CONTEXT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

/// Whether any render is in progress on this thread.
pub fn is_rendering() -> bool {
    CONTEXT_STACK.with(|stack| !stack.borrow().is_empty())
}

/// Mount of the innermost render, if it has one.
pub fn current_mount() -> Option<MountId> {
    CONTEXT_STACK.with(|stack| stack.borrow().last().and_then(|ctx| ctx.mount))
}

/// Scope path of the innermost component scope.
pub fn current_scope_path() -> Option<ScopePath> {
    CONTEXT_STACK.with(|stack| {
        stack
            .borrow()
            .last()
            .and_then(|ctx| ctx.frames.last())
            .map(|frame| frame.path.clone())
    })
}

// =============================================================================
// Component Scopes
// =============================================================================

/// Open a child scope for a component invocation.
///
/// Outside a render this is a no-op; [`pop_component_scope`] tolerates it.
pub fn push_component_scope(component: ComponentId, key: Option<&str>) {
    CONTEXT_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let Some(ctx) = stack.last_mut() else { return };
        let Some(parent) = ctx.frames.last_mut() else { return };

        let segment = match key {
            Some(key) => ScopeSegment::Keyed {
                component,
                key: key.to_string(),
            },
            None => {
                let position = parent.next_position;
                parent.next_position += 1;
                ScopeSegment::Indexed { component, position }
            }
        };
        let path = parent.path.child(segment);
        ctx.frames.push(ScopeFrame::new(path));
    });
}

/// Close the innermost component scope. The root scope is never popped.
pub fn pop_component_scope() {
    CONTEXT_STACK.with(|stack| {
        if let Some(ctx) = stack.borrow_mut().last_mut() {
            if ctx.frames.len() > 1 {
                ctx.frames.pop();
            }
        }
    });
}

struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        pop_component_scope();
    }
}

/// Run `f` inside a component scope. The scope is closed even if `f` panics.
pub fn with_component_scope<R>(component: ComponentId, key: Option<&str>, f: impl FnOnce() -> R) -> R {
    push_component_scope(component, key);
    let _scope = ScopeGuard;
    f()
}

// =============================================================================
// Slots
// =============================================================================

/// Claim the next slot key of the current scope.
///
/// Returns `None` when there is no mounted render in progress.
pub fn next_slot_key() -> Option<SlotKey> {
    CONTEXT_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let ctx = stack.last_mut()?;
        let mount = ctx.mount?;
        let frame = ctx.frames.last_mut()?;
        let ordinal = frame.next_slot;
        frame.next_slot += 1;
        Some(SlotKey {
            mount,
            path: frame.path.clone(),
            ordinal,
        })
    })
}

/// Look up a slot.
pub fn get_slot(key: &SlotKey) -> Option<Rc<dyn Any>> {
    SLOTS.with(|slots| slots.borrow().get(key).cloned())
}

/// Store (or replace) a slot.
pub fn insert_slot(key: SlotKey, value: Rc<dyn Any>) {
    SLOTS.with(|slots| {
        slots.borrow_mut().insert(key, value);
    });
}

/// Drop every slot owned by `mount`.
pub fn release_mount_slots(mount: MountId) {
    SLOTS.with(|slots| {
        slots.borrow_mut().retain(|key, _| key.mount != mount);
    });
}

/// Drop every slot of every mount.
pub fn clear_slots() {
    SLOTS.with(|slots| slots.borrow_mut().clear());
}

/// Number of slots owned by `mount`.
pub fn slot_count(mount: MountId) -> usize {
    SLOTS.with(|slots| slots.borrow().keys().filter(|key| key.mount == mount).count())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state (for testing).
pub fn reset_registry() {
    NEXT_MOUNT_ID.with(|next| next.set(1));
    CONTEXT_STACK.with(|stack| stack.borrow_mut().clear());
    SLOTS.with(|slots| slots.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    struct Heading;
    struct Row;

    #[test]
    fn test_allocate_mount_id() {
        reset_registry();

        let a = allocate_mount_id();
        let b = allocate_mount_id();
        assert_ne!(a, b);
        assert_eq!(b.get(), a.get() + 1);
    }

    #[test]
    fn test_no_slot_outside_render() {
        reset_registry();

        assert!(!is_rendering());
        assert_eq!(next_slot_key(), None);
    }

    #[test]
    fn test_detached_render_has_no_slots() {
        reset_registry();

        begin_render(None);
        assert!(is_rendering());
        assert_eq!(next_slot_key(), None);
        end_render();
        assert!(!is_rendering());
    }

    #[test]
    fn test_slot_ordinals_per_scope() {
        reset_registry();
        let mount = allocate_mount_id();

        begin_render(Some(mount));
        let root0 = next_slot_key().unwrap();
        let root1 = next_slot_key().unwrap();
        assert_eq!(root0.ordinal, 0);
        assert_eq!(root1.ordinal, 1);
        assert_eq!(root0.path, ScopePath::root());

        let child = with_component_scope(ComponentId::of::<Heading>(), None, || next_slot_key().unwrap());
        assert_eq!(child.ordinal, 0);
        assert_eq!(child.path.depth(), 1);
        end_render();
    }

    #[test]
    fn test_scope_paths_stable_across_renders() {
        reset_registry();
        let mount = allocate_mount_id();

        let collect = || {
            begin_render(Some(mount));
            let a = with_component_scope(ComponentId::of::<Row>(), None, || current_scope_path().unwrap());
            let b = with_component_scope(ComponentId::of::<Row>(), None, || current_scope_path().unwrap());
            end_render();
            (a, b)
        };

        let first = collect();
        let second = collect();
        assert_ne!(first.0, first.1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_keyed_scope_ignores_position() {
        reset_registry();
        let mount = allocate_mount_id();

        begin_render(Some(mount));
        let _ = with_component_scope(ComponentId::of::<Row>(), None, || ());
        let keyed = with_component_scope(ComponentId::of::<Row>(), Some("foo"), || current_scope_path().unwrap());
        let unkeyed = with_component_scope(ComponentId::of::<Row>(), None, || current_scope_path().unwrap());
        end_render();

        assert_eq!(
            keyed.segments(),
            &[ScopeSegment::Keyed { component: ComponentId::of::<Row>(), key: "foo".to_string() }]
        );
        // Keyed siblings don't consume positions.
        assert_eq!(
            unkeyed.segments(),
            &[ScopeSegment::Indexed { component: ComponentId::of::<Row>(), position: 1 }]
        );
        assert_eq!(keyed.to_string(), "/Row[foo]");
    }

    #[test]
    fn test_distinct_closures_get_distinct_ids() {
        fn id_of<F: 'static>(_: &F) -> ComponentId {
            ComponentId::of::<F>()
        }

        let a = || 1;
        let b = || 2;
        assert_ne!(id_of(&a), id_of(&b));
        assert_eq!(id_of(&a), id_of(&a));
        assert_eq!(id_of(&a).name(), id_of(&b).name());
        assert!(id_of(&a).to_string().ends_with("{{closure}}"));
    }

    #[test]
    fn test_closure_scopes_do_not_collide() {
        fn id_of<F: 'static>(_: &F) -> ComponentId {
            ComponentId::of::<F>()
        }

        reset_registry();
        let mount = allocate_mount_id();
        let a = || ();
        let b = || ();

        begin_render(Some(mount));
        let first = with_component_scope(id_of(&a), None, || next_slot_key().unwrap());
        end_render();

        begin_render(Some(mount));
        let second = with_component_scope(id_of(&b), None, || next_slot_key().unwrap());
        end_render();

        assert_ne!(first, second);
    }

    #[test]
    fn test_panicking_component_closes_its_scope() {
        reset_registry();
        let mount = allocate_mount_id();

        begin_render(Some(mount));
        let result = catch_unwind(AssertUnwindSafe(|| {
            with_component_scope::<()>(ComponentId::of::<Row>(), None, || panic!("render failed"))
        }));
        assert!(result.is_err());
        assert_eq!(current_scope_path(), Some(ScopePath::root()));
        end_render();
    }

    #[test]
    fn test_render_guard_ends_render_on_panic() {
        reset_registry();

        let result = catch_unwind(|| {
            let _render = enter_render(None);
            panic!("render failed");
        });
        assert!(result.is_err());
        assert!(!is_rendering());
    }

    #[test]
    fn test_release_mount_slots() {
        reset_registry();
        let a = allocate_mount_id();
        let b = allocate_mount_id();

        for mount in [a, b] {
            begin_render(Some(mount));
            let key = next_slot_key().unwrap();
            insert_slot(key, Rc::new(RefCell::new(0u32)));
            end_render();
        }

        assert_eq!(slot_count(a), 1);
        release_mount_slots(a);
        assert_eq!(slot_count(a), 0);
        assert_eq!(slot_count(b), 1);
    }
}
