//! Mount API - Mounting a root and the render effect.
//!
//! `mount` binds a root factory to a container and sets up ONE render
//! effect per mount. Each run of the effect is a full render pass:
//!
//! ```text
//! reset pass counter → build tree (components run) → serialize
//!     → replace container markup → swap in the new handler table
//! ```
//!
//! The effect re-runs when:
//! - observed state owned by the mount is written (through its trigger)
//! - a config signal it read changes (escape mode, handler prefix)
//! - any other signal a component read during the pass changes
//!
//! # Example
//!
//! ```ignore
//! use spark_html::{mount, MemoryDocument};
//!
//! let document = MemoryDocument::new().with_container("app");
//! let handle = mount(document.clone(), "#app", || app())?;
//!
//! // The host calls `_event0(event)` from the markup:
//! handle.dispatch_event("_event0", &mut DomEvent::new("click"));
//!
//! handle.unmount();
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use spark_signals::{effect, signal, Signal};

use crate::engine::{
    allocate_mount_id, begin_pass, dispatch_event_in, enter_render, install_handler_table,
    live_handler_count, release_handler_table, release_mount_slots,
};
use crate::error::RenderError;
use crate::renderer::HtmlSerializer;
use crate::state::{register_trigger, unregister_trigger};
use crate::types::{DomEvent, MountId, Node};
use super::document::Document;

// =============================================================================
// Render Pass
// =============================================================================

/// Numbers from one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Element and text nodes serialized.
    pub nodes_visited: usize,
    /// Handlers registered in the pass table.
    pub handlers: usize,
    /// Length of the markup written.
    pub bytes: usize,
}

fn build_and_serialize<N: Into<Node>>(
    mount: Option<MountId>,
    root: impl FnOnce() -> N,
) -> (String, HtmlSerializer) {
    let _pass = begin_pass();

    let tree = {
        let _render = enter_render(mount);
        root().into()
    };

    let mut serializer = HtmlSerializer::from_config();
    let html = serializer.serialize(&tree);
    (html, serializer)
}

/// Run one full render pass into the container at `selector`.
///
/// The handler table of `mount` is replaced only after the markup was
/// written, so a failed write keeps the previous handlers live.
pub fn render_pass<D, N>(
    document: &D,
    selector: &str,
    root: impl FnOnce() -> N,
    mount: Option<MountId>,
) -> Result<RenderStats, RenderError>
where
    D: Document + ?Sized,
    N: Into<Node>,
{
    let (html, serializer) = build_and_serialize(mount, root);
    document.set_inner_html(selector, &html)?;

    let stats = RenderStats {
        nodes_visited: serializer.nodes_visited(),
        handlers: serializer.handlers().len(),
        bytes: html.len(),
    };
    if let Some(mount) = mount {
        install_handler_table(mount, serializer.into_handlers());
    }

    tracing::debug!(
        mount = ?mount.map(MountId::get),
        %selector,
        nodes = stats.nodes_visited,
        handlers = stats.handlers,
        bytes = stats.bytes,
        "render pass"
    );
    Ok(stats)
}

/// Render once to a string. State is detached and handlers are discarded.
pub fn render_to_string<N: Into<Node>>(root: impl FnOnce() -> N) -> String {
    build_and_serialize(None, root).0
}

// =============================================================================
// Mount Handle
// =============================================================================

struct MountShared {
    id: MountId,
    selector: String,
    revision: Cell<u64>,
    rendering: Cell<bool>,
    render_count: Cell<u64>,
    last_stats: Cell<Option<RenderStats>>,
    last_error: RefCell<Option<RenderError>>,
}

/// Marks a mount as rendering until dropped, also while unwinding.
struct RenderingFlag<'a>(&'a Cell<bool>);

impl<'a> RenderingFlag<'a> {
    fn raise(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for RenderingFlag<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl MountShared {
    /// Bump the revision signal, which re-runs the render effect.
    fn request_render(&self, revision: &Signal<u64>) {
        if self.rendering.get() {
            tracing::warn!(mount = %self.id, "state written during its own render; not re-rendering");
            return;
        }
        let next = self.revision.get() + 1;
        self.revision.set(next);
        revision.set(next);
    }
}

/// Handle returned by [`mount`].
///
/// Dropping the handle unmounts: the render effect stops and the mount's
/// state slots and handlers are released. The container keeps its last
/// markup.
#[must_use = "dropping the handle unmounts immediately"]
pub struct MountHandle {
    shared: Rc<MountShared>,
    revision: Signal<u64>,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl MountHandle {
    pub fn id(&self) -> MountId {
        self.shared.id
    }

    pub fn selector(&self) -> &str {
        &self.shared.selector
    }

    /// Render passes run so far, the initial one included.
    pub fn render_count(&self) -> u64 {
        self.shared.render_count.get()
    }

    pub fn last_stats(&self) -> Option<RenderStats> {
        self.shared.last_stats.get()
    }

    /// Error of the most recent pass, if it failed.
    pub fn last_error(&self) -> Option<RenderError> {
        self.shared.last_error.borrow().clone()
    }

    /// Number of handlers reachable from the current markup.
    pub fn handler_count(&self) -> usize {
        live_handler_count(self.shared.id)
    }

    pub fn is_mounted(&self) -> bool {
        self.stop_effect.is_some()
    }

    /// Force a full render pass.
    pub fn rerender(&self) {
        if self.is_mounted() {
            self.shared.request_render(&self.revision);
        }
    }

    /// Deliver an event to a handler token of this mount.
    pub fn dispatch_event(&self, token: &str, event: &mut DomEvent) -> Option<bool> {
        dispatch_event_in(self.shared.id, token, event)
    }

    /// Stop the render effect and release everything owned by this mount.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let Some(stop) = self.stop_effect.take() else {
            return;
        };
        let id = self.shared.id;
        stop();
        unregister_trigger(id);
        release_handler_table(id);
        release_mount_slots(id);
        tracing::debug!(mount = %id, "unmounted");
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for MountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountHandle")
            .field("id", &self.shared.id)
            .field("selector", &self.shared.selector)
            .field("render_count", &self.shared.render_count.get())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

// =============================================================================
// Mount
// =============================================================================

/// Mount `root` into the container at `selector` and render it once.
///
/// # Errors
///
/// [`RenderError::MountPointNotFound`] when the selector resolves to
/// nothing, or the document error of the initial pass.
pub fn mount<D, F, N>(document: D, selector: &str, root: F) -> Result<MountHandle, RenderError>
where
    D: Document + 'static,
    F: Fn() -> N + 'static,
    N: Into<Node>,
{
    if !document.contains(selector) {
        tracing::warn!(%selector, "mount point not found");
        return Err(RenderError::MountPointNotFound(selector.to_string()));
    }

    let id = allocate_mount_id();
    let shared = Rc::new(MountShared {
        id,
        selector: selector.to_string(),
        revision: Cell::new(0),
        rendering: Cell::new(false),
        render_count: Cell::new(0),
        last_stats: Cell::new(None),
        last_error: RefCell::new(None),
    });
    let revision = signal(0u64);

    let trigger_shared = shared.clone();
    let trigger_revision = revision.clone();
    register_trigger(id, move || trigger_shared.request_render(&trigger_revision));

    // The ONE render effect. Runs immediately for the initial pass.
    let effect_shared = shared.clone();
    let effect_revision = revision.clone();
    let stop_fn = effect(move || {
        let _ = effect_revision.get();

        let shared = &effect_shared;
        shared.render_count.set(shared.render_count.get() + 1);
        let result = {
            let _rendering = RenderingFlag::raise(&shared.rendering);
            render_pass(&document, &shared.selector, &root, Some(shared.id))
        };

        match result {
            Ok(stats) => {
                shared.last_stats.set(Some(stats));
                *shared.last_error.borrow_mut() = None;
            }
            Err(err) => {
                tracing::error!(mount = %shared.id, error = %err, "render pass failed");
                *shared.last_error.borrow_mut() = Some(err);
            }
        }
    });

    let handle = MountHandle {
        shared,
        revision,
        stop_effect: Some(Box::new(stop_fn)),
    };

    if let Some(err) = handle.last_error() {
        return Err(err);
    }
    tracing::debug!(mount = %id, %selector, "mounted");
    Ok(handle)
}

/// Alias of [`mount`].
pub fn render<D, F, N>(document: D, selector: &str, root: F) -> Result<MountHandle, RenderError>
where
    D: Document + 'static,
    F: Fn() -> N + 'static,
    N: Into<Node>,
{
    mount(document, selector, root)
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Tests
// =============================================================================
