//! HTML Primitives - Element Builder.
//!
//! This module provides the building blocks of a tree:
//! - [`create_element`] - Plain tags and component calls
//! - [`Props`] - Attributes, style, class, handlers, key
//! - [`component`] - Turn a function into a component tag
//! - [`text`], [`fragment`] - Text nodes and unwrapped sibling lists
//!
//! # Children
//!
//! Children are a `Vec<Node>`; the [`children!`](crate::children) macro
//! converts mixed values:
//!
//! ```ignore
//! create_element("span", Props::new().class("thing"), children!["content ", name]);
//! ```

mod types;
mod element;

pub use types::*;
pub use element::{create_element, fragment, h, text};

/// Build a `Vec<Node>` from anything convertible into a node.
#[macro_export]
macro_rules! children {
    () => {
        ::std::vec::Vec::<$crate::Node>::new()
    };
    ($($child:expr),+ $(,)?) => {
        ::std::vec![$($crate::Node::from($child)),+]
    };
}
