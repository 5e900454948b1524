//! Document seam.
//!
//! The mount driver never touches a real page. It resolves a selector and
//! replaces the container's inner markup through [`Document`]. The crate
//! ships [`MemoryDocument`], an in-memory page with `#id` containers.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::RenderError;

/// A page that containers can be looked up in and written to.
pub trait Document {
    /// Whether `selector` resolves to a container.
    fn contains(&self, selector: &str) -> bool;

    /// Replace the inner markup of the container at `selector`.
    fn set_inner_html(&self, selector: &str, html: &str) -> Result<(), RenderError>;

    /// Current inner markup of the container at `selector`.
    fn inner_html(&self, selector: &str) -> Option<String>;
}

impl<D: Document + ?Sized> Document for Rc<D> {
    fn contains(&self, selector: &str) -> bool {
        (**self).contains(selector)
    }

    fn set_inner_html(&self, selector: &str, html: &str) -> Result<(), RenderError> {
        (**self).set_inner_html(selector, html)
    }

    fn inner_html(&self, selector: &str) -> Option<String> {
        (**self).inner_html(selector)
    }
}

// =============================================================================
// Memory Document
// =============================================================================

#[derive(Debug, Default)]
struct Container {
    id: String,
    inner_html: String,
}

#[derive(Debug, Default)]
struct DocumentState {
    containers: Vec<Container>,
    writes: usize,
}

/// In-memory page. Clones share the same containers.
///
/// Only `#id` selectors resolve.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryDocument::add_container`].
    pub fn with_container(self, id: &str) -> Self {
        self.add_container(id);
        self
    }

    /// Add an empty container. Existing ids are left untouched.
    pub fn add_container(&self, id: &str) {
        let mut state = self.state.borrow_mut();
        if state.containers.iter().all(|c| c.id != id) {
            state.containers.push(Container {
                id: id.to_string(),
                inner_html: String::new(),
            });
        }
    }

    pub fn remove_container(&self, id: &str) {
        self.state.borrow_mut().containers.retain(|c| c.id != id);
    }

    /// Number of successful `set_inner_html` calls so far.
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }
}

/// `#app` -> `app`. Anything but a bare id selector is rejected.
fn selector_id(selector: &str) -> Option<&str> {
    let id = selector.trim().strip_prefix('#')?;
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}

impl Document for MemoryDocument {
    fn contains(&self, selector: &str) -> bool {
        let Some(id) = selector_id(selector) else {
            return false;
        };
        self.state.borrow().containers.iter().any(|c| c.id == id)
    }

    fn set_inner_html(&self, selector: &str, html: &str) -> Result<(), RenderError> {
        let id = selector_id(selector)
            .ok_or_else(|| RenderError::MountPointNotFound(selector.to_string()))?;

        let mut state = self.state.borrow_mut();
        let container = state
            .containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RenderError::MountPointNotFound(selector.to_string()))?;
        container.inner_html = html.to_string();
        state.writes += 1;
        Ok(())
    }

    fn inner_html(&self, selector: &str) -> Option<String> {
        let id = selector_id(selector)?;
        self.state
            .borrow()
            .containers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.inner_html.clone())
    }
}
