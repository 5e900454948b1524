//! Core types for spark-html.
//!
//! These types define the foundation that everything builds on.
//! The builder produces them, the serializer consumes them, and nothing
//! survives past the render pass that created them.

use std::fmt;
use std::rc::Rc;

// =============================================================================
// Mount Identity
// =============================================================================

/// Identifier of a mounted tree.
///
/// State slots and handler tables are scoped to the mount that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountId(pub(crate) u64);

impl MountId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}

// =============================================================================
// Host Events
// =============================================================================

/// Event delivered by the host document to an inline handler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomEvent {
    /// Event type without the `on` prefix (e.g. "click", "input").
    pub event_type: String,
    /// Current value of the event target, for form controls.
    pub value: Option<String>,
    default_prevented: bool,
}

impl DomEvent {
    /// Create an event of the given type.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            value: None,
            default_prevented: false,
        }
    }

    /// Create an event carrying a target value.
    pub fn with_value(event_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(event_type)
        }
    }

    /// Suppress the host's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Event handler attached through an `on<Event>` prop.
pub type EventCallback = Rc<dyn Fn(&DomEvent)>;

// =============================================================================
// Style
// =============================================================================

/// Value of a single style property.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(s) => f.write_str(s),
            StyleValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

/// Inline style map with camelCase property names.
///
/// Properties keep insertion order; setting an existing property replaces
/// its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    properties: Vec<(String, StyleValue)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property (builder form).
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a property in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<StyleValue>) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// A single attribute of an element, classified when the props are built.
#[derive(Clone)]
pub enum Attribute {
    /// `style` map, serialized as kebab-case declarations.
    Style(Style),
    /// `className`, serialized as `class`.
    Class(String),
    /// `on<Event>` handler. `name` is the event name without the `on` prefix.
    Event { name: String, handler: EventCallback },
    /// Anything else, emitted verbatim.
    Generic { name: String, value: String },
}

impl Attribute {
    /// Name of the prop this attribute came from.
    pub fn prop_name(&self) -> String {
        match self {
            Attribute::Style(_) => "style".to_string(),
            Attribute::Class(_) => "className".to_string(),
            Attribute::Event { name, .. } => format!("on{name}"),
            Attribute::Generic { name, .. } => name.clone(),
        }
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Style(style) => f.debug_tuple("Style").field(style).finish(),
            Attribute::Class(class) => f.debug_tuple("Class").field(class).finish(),
            Attribute::Event { name, .. } => f
                .debug_struct("Event")
                .field("name", name)
                .finish_non_exhaustive(),
            Attribute::Generic { name, value } => f
                .debug_struct("Generic")
                .field("name", name)
                .field("value", value)
                .finish(),
        }
    }
}

// =============================================================================
// Nodes
// =============================================================================

/// A plain tag with its attributes and flattened children.
///
/// `children` never contains a [`Node::Fragment`]; the builder splices
/// fragments into the parent.
#[derive(Debug, Clone, Default)]
pub struct ElementNode {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

/// Anything the serializer can turn into markup.
#[derive(Debug, Clone)]
pub enum Node {
    Element(ElementNode),
    Text(String),
    /// A list of siblings, as returned by components that render several
    /// nodes (e.g. a mapped list).
    Fragment(Vec<Node>),
}

impl Node {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<ElementNode> for Node {
    fn from(value: ElementNode) -> Self {
        Node::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<&String> for Node {
    fn from(value: &String) -> Self {
        Node::Text(value.clone())
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Fragment(value)
    }
}

/// Splice fragments into a flat child list.
pub fn flatten_children(children: Vec<Node>) -> Vec<Node> {
    let mut flat = Vec::with_capacity(children.len());
    push_flattened(&mut flat, children);
    flat
}

fn push_flattened(out: &mut Vec<Node>, children: Vec<Node>) {
    for child in children {
        match child {
            Node::Fragment(inner) => push_flattened(out, inner),
            other => out.push(other),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
