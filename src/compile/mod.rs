//! Directive compiler - turns template markup into live bindings.
//!
//! The compiler walks a node tree depth-first in pre-order, recognizing
//! directive attributes (`v-...`), the event shorthand (`@...`), and
//! `{{ ... }}` interpolation in text nodes, and dispatches each to the
//! matching handler in [`handlers`].
//!
//! Compilation stages the work: the container's children are detached,
//! processed while disconnected, and reattached in one step, so partially
//! compiled states are never observable through the container and no
//! incremental reattachment happens. Node identity is preserved - nodes are
//! reparented, never cloned.

pub mod directive;
pub mod handlers;
pub mod path;

use std::rc::Rc;

use crate::dom::{Node, NodeKind};
use crate::error::BindError;
use crate::vm::ViewModel;

pub use directive::{parse_directive, Directive, DirectiveKind};
pub use path::{get_path, render_interpolation, set_path};

use directive::{DIRECTIVE_PREFIX, EVENT_SHORTHAND_PREFIX};

/// Compile a container's children against a ViewModel.
///
/// Detaches the children into a staging list, compiles each subtree, then
/// reattaches the fully processed nodes as the container's children.
pub fn compile(container: &Node, vm: &Rc<ViewModel>) -> Result<(), BindError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("compile", children = container.child_count()).entered();

    let staged = container.take_children();
    for child in &staged {
        compile_node(child, vm)?;
    }
    for child in staged {
        container.append_child(child);
    }
    Ok(())
}

/// Compile one node, then its children in document order.
fn compile_node(node: &Node, vm: &Rc<ViewModel>) -> Result<(), BindError> {
    match node.kind() {
        NodeKind::Element { .. } => compile_element(node, vm)?,
        NodeKind::Text => compile_text(node, vm)?,
    }
    // Children are fetched after the handlers ran: v-html, for instance,
    // replaces them wholesale.
    for child in node.children() {
        compile_node(&child, vm)?;
    }
    Ok(())
}

/// Process an element's attributes.
///
/// Every `v-` attribute is stripped after dispatch - unknown directive names
/// included, which are otherwise silently skipped. The `@` shorthand
/// dispatches to the `on` handler but is left in place; only `v-` prefixed
/// attributes disappear from the rendered output.
fn compile_element(node: &Node, vm: &Rc<ViewModel>) -> Result<(), BindError> {
    for (name, value) in node.attributes() {
        if name.starts_with(DIRECTIVE_PREFIX) {
            if let Some(dir) = parse_directive(&name, &value) {
                handlers::apply(dir.kind, node, dir.expr, vm, dir.secondary)?;
            }
            node.remove_attribute(&name);
        } else if let Some(event_name) = name.strip_prefix(EVENT_SHORTHAND_PREFIX) {
            handlers::apply(DirectiveKind::On, node, &value, vm, Some(event_name))?;
        }
    }
    Ok(())
}

/// Dispatch text nodes containing interpolation spans to the text handler
/// with their raw content; plain text nodes are left untouched.
fn compile_text(node: &Node, vm: &Rc<ViewModel>) -> Result<(), BindError> {
    let content = node.text_content();
    if path::has_interpolation(&content) {
        handlers::apply(DirectiveKind::Text, node, &content, vm, None)?;
    }
    Ok(())
}
