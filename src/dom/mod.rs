//! Lightweight host document tree.
//!
//! The binding runtime only needs a small node surface: get/set text
//! content, get/set raw markup, get/set/remove attributes, a value field for
//! form controls, event listeners with synthetic dispatch, and reparenting
//! of children. This module provides exactly that surface over shared
//! handles, so the compiler can detach, process, and reattach nodes without
//! cloning them - node identity is preserved throughout.
//!
//! # Example
//!
//! ```ignore
//! use vinebind::Node;
//!
//! let root = Node::element("div");
//! let label = Node::element("span");
//! label.set_attribute("v-text", "msg");
//! root.append_child(label);
//!
//! let input = Node::element("input");
//! input.set_attribute("v-model", "msg");
//! root.append_child(input);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::BindError;

// =============================================================================
// Events
// =============================================================================

/// A synthetic event delivered to listeners on a node.
#[derive(Clone, Debug)]
pub struct Event {
    /// Event name, e.g. `"input"` or `"click"`.
    pub name: String,
    /// The control's value at dispatch time (empty for non-control events).
    pub value: String,
}

/// Listener attached via [`Node::add_event_listener`]. Errors propagate to
/// whoever dispatched the event.
pub type EventHandler = Rc<dyn Fn(&Event) -> Result<(), BindError>>;

// =============================================================================
// Nodes
// =============================================================================

/// What kind of node this is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String },
    Text,
}

struct NodeData {
    kind: NodeKind,
    attributes: RefCell<IndexMap<String, String>>,
    text: RefCell<String>,
    // Raw markup override set by v-html; replaces the children wholesale.
    markup: RefCell<String>,
    value: RefCell<String>,
    children: RefCell<Vec<Node>>,
    listeners: RefCell<HashMap<String, Vec<EventHandler>>>,
}

/// Shared handle to one document node. Cloning clones the handle.
#[derive(Clone)]
pub struct Node {
    data: Rc<NodeData>,
}

impl Node {
    /// Create an element node.
    pub fn element(tag: &str) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.to_string(),
        })
    }

    /// Create a text node with the given content.
    pub fn text(content: &str) -> Self {
        let node = Self::new(NodeKind::Text);
        *node.data.text.borrow_mut() = content.to_string();
        node
    }

    fn new(kind: NodeKind) -> Self {
        Self {
            data: Rc::new(NodeData {
                kind,
                attributes: RefCell::new(IndexMap::new()),
                text: RefCell::new(String::new()),
                markup: RefCell::new(String::new()),
                value: RefCell::new(String::new()),
                children: RefCell::new(Vec::new()),
                listeners: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind.clone()
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data.kind, NodeKind::Element { .. })
    }

    /// Node identity: do both handles point at the same node?
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Rc::ptr_eq(&a.data, &b.data)
    }

    // -------------------------------------------------------------------------
    // Text and markup
    // -------------------------------------------------------------------------

    pub fn text_content(&self) -> String {
        self.data.text.borrow().clone()
    }

    /// Replace the node's full text content. On elements this also clears
    /// any children, like assigning `textContent` does.
    pub fn set_text_content(&self, content: &str) {
        *self.data.text.borrow_mut() = content.to_string();
        if self.is_element() {
            self.data.children.borrow_mut().clear();
        }
    }

    pub fn inner_markup(&self) -> String {
        self.data.markup.borrow().clone()
    }

    /// Replace the node's raw markup content wholesale, dropping children.
    pub fn set_inner_markup(&self, markup: &str) {
        *self.data.markup.borrow_mut() = markup.to_string();
        self.data.children.borrow_mut().clear();
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.data.attributes.borrow().get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.data
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&self, name: &str) {
        self.data.attributes.borrow_mut().shift_remove(name);
    }

    /// Snapshot of all attributes in document order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.data
            .attributes
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Control value
    // -------------------------------------------------------------------------

    /// The form-control value field (what an input displays).
    pub fn value(&self) -> String {
        self.data.value.borrow().clone()
    }

    /// Assign the control value. Does NOT fire the input event; only user
    /// edits (simulated via [`Node::simulate_input`]) do.
    pub fn set_value(&self, value: &str) {
        *self.data.value.borrow_mut() = value.to_string();
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn add_event_listener<F>(&self, event: &str, handler: F)
    where
        F: Fn(&Event) -> Result<(), BindError> + 'static,
    {
        self.data
            .listeners
            .borrow_mut()
            .entry(event.to_string())
            .or_default()
            .push(Rc::new(handler));
    }

    /// Dispatch a synthetic event to this node's listeners, in registration
    /// order. The first failing listener aborts the rest.
    pub fn dispatch_event(&self, name: &str) -> Result<(), BindError> {
        let event = Event {
            name: name.to_string(),
            value: self.value(),
        };
        let handlers: Vec<EventHandler> = self
            .data
            .listeners
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_default();
        for handler in handlers {
            handler(&event)?;
        }
        Ok(())
    }

    /// Simulate a user edit on a control: set the value, then fire `input`.
    pub fn simulate_input(&self, text: &str) -> Result<(), BindError> {
        self.set_value(text);
        self.dispatch_event("input")
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    pub fn append_child(&self, child: Node) {
        self.data.children.borrow_mut().push(child);
    }

    /// Detach all children, returning them in document order. Used by the
    /// compiler's staging step; the handles keep their identity.
    pub fn take_children(&self) -> Vec<Node> {
        std::mem::take(&mut *self.data.children.borrow_mut())
    }

    /// Snapshot of the current children.
    pub fn children(&self) -> Vec<Node> {
        self.data.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.data.children.borrow().len()
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.data.kind {
            NodeKind::Element { tag } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("attributes", &*self.data.attributes.borrow())
                .field("children", &self.data.children.borrow().len())
                .finish(),
            NodeKind::Text => f
                .debug_struct("Text")
                .field("content", &*self.data.text.borrow())
                .finish(),
        }
    }
}
