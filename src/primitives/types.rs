//! Primitive types - Props, prop values, tags and components.
//!
//! Props are classified into [`Attribute`]s when they are set, so the
//! serializer never has to sniff key names.

use std::fmt;
use std::rc::Rc;

use crate::engine::ComponentId;
use crate::types::{Attribute, DomEvent, EventCallback, Node, Style};

// =============================================================================
// Prop Value - Dynamic property value
// =============================================================================

/// A loosely typed prop value, for [`Props::prop`].
#[derive(Clone)]
pub enum PropValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Style(Style),
    Handler(EventCallback),
}

impl PropValue {
    /// Wrap a closure as a handler value.
    pub fn handler(f: impl Fn(&DomEvent) + 'static) -> Self {
        PropValue::Handler(Rc::new(f))
    }

    /// String form of scalar values. `None` for styles and handlers.
    pub fn as_attribute_value(&self) -> Option<String> {
        match self {
            PropValue::Text(s) => Some(s.clone()),
            PropValue::Number(n) => Some(n.to_string()),
            PropValue::Bool(b) => Some(b.to_string()),
            PropValue::Style(_) | PropValue::Handler(_) => None,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            PropValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            PropValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            PropValue::Style(s) => f.debug_tuple("Style").field(s).finish(),
            PropValue::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(f64::from(value))
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Number(f64::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<Style> for PropValue {
    fn from(value: Style) -> Self {
        PropValue::Style(value)
    }
}

impl From<EventCallback> for PropValue {
    fn from(value: EventCallback) -> Self {
        PropValue::Handler(value)
    }
}

// =============================================================================
// Props
// =============================================================================

/// Props of an element or component.
///
/// Attributes keep insertion order, which is the order they are emitted in.
/// Setting a prop that is already present replaces it in place. For
/// components, `children` carries the flattened children of the call.
#[derive(Debug, Clone, Default)]
pub struct Props {
    attributes: Vec<Attribute>,
    key: Option<String>,
    children: Vec<Node>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain attribute, emitted verbatim.
    pub fn attr(self, name: impl Into<String>, value: impl ToString) -> Self {
        self.with(Attribute::Generic {
            name: name.into(),
            value: value.to_string(),
        })
    }

    /// `className`, emitted as `class`.
    pub fn class(self, value: impl Into<String>) -> Self {
        self.with(Attribute::Class(value.into()))
    }

    pub fn style(self, style: Style) -> Self {
        self.with(Attribute::Style(style))
    }

    /// Event handler. `event` is the name after `on` ("click" or "Click").
    pub fn on(self, event: impl Into<String>, handler: impl Fn(&DomEvent) + 'static) -> Self {
        self.with(Attribute::Event {
            name: event.into(),
            handler: Rc::new(handler),
        })
    }

    /// Identity hint for list children. Never emitted.
    pub fn key(mut self, key: impl ToString) -> Self {
        self.key = Some(key.to_string());
        self
    }

    /// Set a prop by name, classifying it the way JSX props are read:
    /// `style` with a style map, `className`, `key`, `on*` with a handler,
    /// or a plain attribute. A handler under any other name is dropped.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        let name = name.into();
        let value = value.into();

        match (name.as_str(), value) {
            ("key", value) => {
                if let Some(key) = value.as_attribute_value() {
                    self.key = Some(key);
                }
                self
            }
            ("style", PropValue::Style(style)) => self.style(style),
            ("className", value) => match value.as_attribute_value() {
                Some(class) => self.class(class),
                None => self,
            },
            (event, PropValue::Handler(handler)) if event.len() > 2 && event.starts_with("on") => {
                let name = event[2..].to_string();
                self.with(Attribute::Event { name, handler })
            }
            (_, PropValue::Handler(_)) => {
                tracing::trace!(prop = %name, "dropping handler under non-event prop");
                self
            }
            (_, value) => match value.as_attribute_value() {
                Some(value) => self.with(Attribute::Generic { name: name.clone(), value }),
                None => self,
            },
        }
    }

    fn with(mut self, attribute: Attribute) -> Self {
        let name = attribute.prop_name();
        match self.attributes.iter_mut().find(|a| a.prop_name() == name) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
        self
    }

    // =========================================================================
    // Reading
    // =========================================================================

    /// String value of a plain attribute, or of `className`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::Generic { name: n, value } if n == name => Some(value.as_str()),
            Attribute::Class(class) if name == "className" => Some(class.as_str()),
            _ => None,
        })
    }

    pub fn get_style(&self) -> Option<&Style> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::Style(style) => Some(style),
            _ => None,
        })
    }

    /// Handler for `event`, matched case-insensitively.
    pub fn handler(&self, event: &str) -> Option<EventCallback> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::Event { name, handler } if name.eq_ignore_ascii_case(event) => {
                Some(handler.clone())
            }
            _ => None,
        })
    }

    pub fn get_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn take_key(&mut self) -> Option<String> {
        self.key.take()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn into_attributes(self) -> Vec<Attribute> {
        self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    pub(crate) fn set_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.key.is_none() && self.children.is_empty()
    }
}

// =============================================================================
// Tags and Components
// =============================================================================

/// A component function: props in, nodes out.
///
/// Carries the function's [`ComponentId`], which is part of the state
/// identity of every invocation.
#[derive(Clone)]
pub struct Component {
    id: ComponentId,
    render: Rc<dyn Fn(Props) -> Node>,
}

impl Component {
    pub fn new<F, N>(f: F) -> Self
    where
        F: Fn(Props) -> N + 'static,
        N: Into<Node>,
    {
        Self {
            id: ComponentId::of::<F>(),
            render: Rc::new(move |props: Props| -> Node { f(props).into() }),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn render(&self, props: Props) -> Node {
        (self.render)(props)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component").field("name", &self.id.name()).finish_non_exhaustive()
    }
}

/// Wrap a function as a [`Component`].
pub fn component<F, N>(f: F) -> Component
where
    F: Fn(Props) -> N + 'static,
    N: Into<Node>,
{
    Component::new(f)
}

/// What [`super::create_element`] builds: a plain tag or a component call.
#[derive(Debug, Clone)]
pub enum Tag {
    Element(String),
    Component(Component),
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag::Element(value.to_string())
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Tag::Element(value)
    }
}

impl From<Component> for Tag {
    fn from(value: Component) -> Self {
        Tag::Component(value)
    }
}

impl From<&Component> for Tag {
    fn from(value: &Component) -> Self {
        Tag::Component(value.clone())
    }
}
