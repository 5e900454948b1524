//! HTML Serializer - Node tree to markup.
//!
//! Output rules:
//! - `<tag attrs>children</tag>` for every element; there is no void-tag
//!   handling, and the space after the tag name is always present
//!   (`<span >` when there are no attributes)
//! - `style` becomes `style="prop-name: value; ..."`
//! - `className` becomes `class="..."`
//! - `on<Event>` handlers are registered in the pass handler table and
//!   emitted as `on<event>="<token>(event)"`
//! - any other attribute is emitted verbatim as `name="value"`, unescaped
//!
//! Every element and text node visited advances the render pass counter.

use crate::engine::{advance_pass_counter, HandlerTable};
use crate::pipeline::config::{self, EscapeMode};
use crate::types::{Attribute, ElementNode, Node, Style};
use super::escape::{escape_text, kebab_case};

// =============================================================================
// Serializer
// =============================================================================

/// Serializer for one render pass.
///
/// Collects the handlers it encounters; hand them to the mount with
/// [`HtmlSerializer::into_handlers`] once the markup is written.
#[derive(Debug)]
pub struct HtmlSerializer {
    escape: EscapeMode,
    handlers: HandlerTable,
    nodes_visited: usize,
}

impl HtmlSerializer {
    pub fn new(escape: EscapeMode, handler_prefix: impl Into<String>) -> Self {
        Self {
            escape,
            handlers: HandlerTable::new(handler_prefix),
            nodes_visited: 0,
        }
    }

    /// Serializer using the current configuration.
    pub fn from_config() -> Self {
        Self::new(config::escape_mode(), config::handler_prefix())
    }

    /// Serialize a node tree.
    pub fn serialize(&mut self, node: &Node) -> String {
        let mut output = String::new();
        self.write_node(node, &mut output);
        output
    }

    /// Nodes visited so far.
    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    pub fn into_handlers(self) -> HandlerTable {
        self.handlers
    }

    fn write_node(&mut self, node: &Node, output: &mut String) {
        match node {
            Node::Text(text) => {
                self.visit();
                escape_text(text, self.escape, output);
            }
            Node::Element(element) => {
                self.visit();
                self.write_element(element, output);
            }
            Node::Fragment(children) => {
                for child in children {
                    self.write_node(child, output);
                }
            }
        }
    }

    fn write_element(&mut self, element: &ElementNode, output: &mut String) {
        output.push('<');
        output.push_str(&element.tag);
        output.push(' ');
        let attributes = self.attribute_string(&element.attributes);
        output.push_str(&attributes);
        output.push('>');

        for child in &element.children {
            self.write_node(child, output);
        }

        output.push_str("</");
        output.push_str(&element.tag);
        output.push('>');
    }

    fn visit(&mut self) {
        self.nodes_visited += 1;
        advance_pass_counter();
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    fn attribute_string(&mut self, attributes: &[Attribute]) -> String {
        let parts: Vec<String> = attributes
            .iter()
            .map(|attr| match attr {
                Attribute::Style(style) => format!("style=\"{}\"", style_declarations(style)),
                Attribute::Class(class) => format!("class=\"{class}\""),
                Attribute::Event { name, handler } => {
                    let token = self.handlers.register(handler.clone());
                    format!("on{}=\"{token}(event)\"", name.to_lowercase())
                }
                Attribute::Generic { name, value } => format!("{name}=\"{value}\""),
            })
            .collect();
        parts.join(" ")
    }
}

/// `prop-name: value` pairs joined by `; `.
pub fn style_declarations(style: &Style) -> String {
    style
        .iter()
        .map(|(name, value)| format!("{}: {value}", kebab_case(name)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Serialize with the current configuration, discarding handlers.
///
/// Event attributes still get tokens, but nothing will resolve them.
/// Use [`crate::pipeline::mount`] for interactive markup.
pub fn serialize(node: &Node) -> String {
    HtmlSerializer::from_config().serialize(node)
}

// =============================================================================
// Tests
// =============================================================================
