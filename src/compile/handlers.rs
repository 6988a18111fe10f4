//! Directive handlers - one per directive kind.
//!
//! Each handler wires an initial render and, where the directive is live, a
//! watcher-driven re-render. Watchers created here are retained by the
//! ViewModel (deps only hold weak references); listener closures hold the
//! ViewModel weakly so the node tree never keeps it alive on its own.
//!
//! Binding directions:
//!
//! - `text` / `html`  data → view
//! - `model`          two-way
//! - `on`             event → method
//! - `bind`           data → attribute (one-shot snapshot)

use std::rc::Rc;

use crate::dom::Node;
use crate::error::BindError;
use crate::reactive::Watcher;
use crate::value::Value;
use crate::vm::ViewModel;

use super::directive::DirectiveKind;
use super::path::{
    get_path, has_interpolation, interpolation_exprs, render_interpolation, set_path,
};

/// Dispatch a directive to its handler. The closed set makes this a plain
/// match; unknown directives never reach here.
pub fn apply(
    kind: DirectiveKind,
    node: &Node,
    expr: &str,
    vm: &Rc<ViewModel>,
    secondary: Option<&str>,
) -> Result<(), BindError> {
    match kind {
        DirectiveKind::Text => text(node, expr, vm),
        DirectiveKind::Html => html(node, expr, vm),
        DirectiveKind::Model => model(node, expr, vm),
        DirectiveKind::On => on(node, expr, vm, secondary),
        DirectiveKind::Bind => bind(node, expr, vm, secondary),
    }
}

// =============================================================================
// text - data → text content
// =============================================================================

/// Content with interpolation spans gets one watcher per span; every change
/// re-runs the substitution over the *original* content string and replaces
/// the node's full text content - never a partial patch. Plain content (the
/// `v-text` form) is a bare dot-path rendered once, statically.
fn text(node: &Node, content: &str, vm: &Rc<ViewModel>) -> Result<(), BindError> {
    if has_interpolation(content) {
        for expr in interpolation_exprs(content) {
            let node = node.clone();
            let data = vm.data().clone();
            let content = content.to_string();
            let watcher = Watcher::spawn(vm.data(), expr, move |_| {
                update_text(&node, &render_interpolation(&content, &data)?);
                Ok(())
            })?;
            vm.retain_binding(watcher);
        }
        update_text(node, &render_interpolation(content, vm.data())?);
    } else {
        let val = get_path(content, vm.data())?;
        update_text(node, &val.to_string());
    }
    Ok(())
}

// =============================================================================
// html - data → raw markup
// =============================================================================

fn html(node: &Node, expr: &str, vm: &Rc<ViewModel>) -> Result<(), BindError> {
    let val = get_path(expr, vm.data())?;

    let node_for_cb = node.clone();
    let watcher = Watcher::spawn(vm.data(), expr, move |new| {
        update_html(&node_for_cb, new);
        Ok(())
    })?;
    vm.retain_binding(watcher);

    update_html(node, &val);
    Ok(())
}

// =============================================================================
// model - two-way control binding
// =============================================================================

/// Data → control via a watcher; control → data via an input listener that
/// writes through `set_path` (no intermediate objects are created). There is
/// no re-entrancy guard between the two directions: assigning the control
/// value does not itself fire the input event.
fn model(node: &Node, expr: &str, vm: &Rc<ViewModel>) -> Result<(), BindError> {
    let val = get_path(expr, vm.data())?;

    let node_for_cb = node.clone();
    let watcher = Watcher::spawn(vm.data(), expr, move |new| {
        update_model(&node_for_cb, new);
        Ok(())
    })?;
    vm.retain_binding(watcher);

    let data = vm.data().clone();
    let expr_owned = expr.to_string();
    node.add_event_listener("input", move |event| {
        set_path(&expr_owned, &data, Value::from(event.value.clone()))
    });

    update_model(node, &val);
    Ok(())
}

// =============================================================================
// on - event → method
// =============================================================================

/// Looks the method up at compile time: a template referencing a
/// non-existent handler is a programmer error and fails loudly here, before
/// any listener is registered. Invocation receives the ViewModel as its
/// receiver.
fn on(node: &Node, expr: &str, vm: &Rc<ViewModel>, secondary: Option<&str>) -> Result<(), BindError> {
    let event_name = secondary.ok_or(BindError::MissingEventArgument)?;
    let method = vm.method(expr).ok_or_else(|| BindError::UnknownMethod {
        name: expr.to_string(),
    })?;

    let weak_vm = Rc::downgrade(vm);
    node.add_event_listener(event_name, move |event| {
        match weak_vm.upgrade() {
            Some(vm) => method(&vm, event),
            // ViewModel gone; the listener is inert.
            None => Ok(()),
        }
    });
    Ok(())
}

// =============================================================================
// bind - data → attribute snapshot
// =============================================================================

/// One-shot: evaluates the expression once at compile time and sets the
/// target attribute (the directive's secondary argument, i.e. the literal
/// attribute name from the markup). No watcher - no live updates.
fn bind(node: &Node, expr: &str, vm: &Rc<ViewModel>, secondary: Option<&str>) -> Result<(), BindError> {
    let attr_name = secondary.ok_or(BindError::MissingAttributeArgument)?;
    let val = get_path(expr, vm.data())?;
    update_attr(node, attr_name, &val);
    Ok(())
}

// =============================================================================
// Updaters - the only code that touches the document
// =============================================================================

fn update_text(node: &Node, value: &str) {
    node.set_text_content(value);
}

fn update_html(node: &Node, value: &Value) {
    node.set_inner_markup(&value.to_string());
}

fn update_model(node: &Node, value: &Value) {
    node.set_value(&value.to_string());
}

fn update_attr(node: &Node, name: &str, value: &Value) {
    node.set_attribute(name, &value.to_string());
}
