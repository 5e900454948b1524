//! Element Builder - The call behind every tag and component.
//!
//! `create_element` is a single dispatch on [`Tag`]:
//! - a plain tag becomes a [`Node::Element`] with flattened children
//! - a component is invoked right away with `props + children` and its
//!   result is returned as-is
//!
//! Components therefore run synchronously while the tree is being built,
//! interleaved with the builder calls for their own children. Each
//! invocation runs inside its own component scope, which is what gives
//! observed state a stable identity across renders.
//!
//! # Example
//!
//! ```ignore
//! use spark_html::{children, component, create_element, Props, Node};
//!
//! fn heading(props: Props) -> Node {
//!     let title = props.get("title").unwrap_or("<Untitled>").to_string();
//!     create_element("h1", Props::new(), children![title])
//! }
//!
//! let tree = create_element(
//!     "div",
//!     Props::new().attr("title", "Hello"),
//!     children![create_element(component(heading), Props::new().attr("title", "State: 0"), vec![])],
//! );
//! ```

use crate::engine::with_component_scope;
use crate::types::{flatten_children, ElementNode, Node};
use super::types::{Props, Tag};

// =============================================================================
// Builder
// =============================================================================

/// Build an element or invoke a component.
///
/// The `key` prop is removed before anything else; for components it only
/// names the component scope.
pub fn create_element(tag: impl Into<Tag>, mut props: Props, children: Vec<Node>) -> Node {
    let key = props.take_key();

    match tag.into() {
        Tag::Element(name) => Node::Element(ElementNode {
            tag: name,
            attributes: props.into_attributes(),
            children: flatten_children(children),
        }),
        Tag::Component(component) => {
            props.set_children(flatten_children(children));
            with_component_scope(component.id(), key.as_deref(), || component.render(props))
        }
    }
}

/// Shorthand for [`create_element`].
pub fn h(tag: impl Into<Tag>, props: Props, children: Vec<Node>) -> Node {
    create_element(tag, props, children)
}

/// A text node.
pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

/// Sibling nodes without a wrapper, spliced into whatever contains them.
pub fn fragment(children: impl IntoIterator<Item = Node>) -> Node {
    Node::Fragment(children.into_iter().collect())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        allocate_mount_id, begin_render, current_scope_path, end_render, reset_registry,
    };
    use crate::primitives::component;
    use crate::renderer::serialize;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_plain_tag_with_flattened_children() {
        let list = fragment(["a", "b"].iter().map(|n| {
            create_element("h2", Props::new().key(n), vec![text(*n)])
        }));
        let node = create_element("div", Props::new(), vec![text("x"), list]);

        let element = node.as_element().unwrap();
        assert_eq!(element.tag, "div");
        assert_eq!(element.children.len(), 3);
        assert!(element.children.iter().all(|c| !matches!(c, Node::Fragment(_))));
        assert_eq!(serialize(&node), "<div >x<h2 >a</h2><h2 >b</h2></div>");
    }

    #[test]
    fn test_key_is_never_an_attribute() {
        let node = create_element("li", Props::new().key("k1").attr("id", "x"), vec![]);
        let element = node.as_element().unwrap();
        assert_eq!(element.attributes.len(), 1);
        assert_eq!(serialize(&node), r#"<li id="x"></li>"#);
    }

    #[test]
    fn test_component_receives_props_and_children() {
        fn card(props: Props) -> Node {
            let title = props.get("title").unwrap_or("none").to_string();
            assert_eq!(props.get_key(), None);
            let mut props = props;
            let body = props.take_children();
            create_element("section", Props::new(), vec![text(title), fragment(body)])
        }

        let node = create_element(
            component(card),
            Props::new().attr("title", "T").key("c"),
            vec![text("a"), fragment(vec![text("b")])],
        );
        assert_eq!(serialize(&node), "<section >Tab</section>");
    }

    #[test]
    fn test_component_result_is_forwarded() {
        fn list(_: Props) -> Vec<Node> {
            vec![text("1"), text("2")]
        }

        let node = create_element(component(list), Props::new(), vec![]);
        assert!(matches!(&node, Node::Fragment(items) if items.len() == 2));
    }

    #[test]
    fn test_components_run_inside_their_scope() {
        reset_registry();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        let leaf = component(move |_: Props| {
            seen_clone.borrow_mut().push(current_scope_path().unwrap().depth());
            text("leaf")
        });

        let leaf_clone = leaf.clone();
        let parent = component(move |_: Props| {
            create_element("div", Props::new(), vec![create_element(&leaf_clone, Props::new(), vec![])])
        });

        begin_render(Some(allocate_mount_id()));
        let _ = create_element(&parent, Props::new(), vec![]);
        let _ = create_element(&leaf, Props::new(), vec![]);
        end_render();

        assert_eq!(*seen.borrow(), vec![2, 1]);
    }
}
