//! # vinebind
//!
//! Minimal reactive view-binding runtime for Rust.
//!
//! vinebind keeps a rendered document tree synchronized with a mutable data
//! graph. Reads made while a binding evaluates its expression are tracked
//! transparently; later writes re-run only the bindings whose inputs changed.
//!
//! ## Architecture
//!
//! Two tightly coupled halves:
//!
//! ```text
//! template tree → Compiler → directive handlers → Watcher
//!                                                    ↕
//! data graph    → ReactiveMap slots → Dep ───── notify()
//! ```
//!
//! - [`reactive`] - Dependency tracking: reactive slots, deps, watchers
//! - [`compile`] - Directive compiler: template walk, handlers, path helpers
//! - [`dom`] - Lightweight host document tree (nodes, attributes, events)
//! - [`vm`] - ViewModel construction and method dispatch
//!
//! ## Example
//!
//! ```ignore
//! use vinebind::{Node, ReactiveMap, Value, ViewModel, ViewModelOptions};
//!
//! let root = Node::element("div");
//! let greeting = Node::element("p");
//! greeting.set_attribute("v-text", "msg");
//! root.append_child(greeting);
//!
//! let vm = ViewModel::new(ViewModelOptions {
//!     container: Some(root.clone()),
//!     data: ReactiveMap::observe([("msg", Value::from("hello"))]),
//!     methods: Default::default(),
//! })?;
//!
//! // Writes flow back into the rendered tree synchronously.
//! vinebind::set_path("msg", vm.data(), Value::from("goodbye"))?;
//! ```
//!
//! ## Scope
//!
//! One flat view bound to one (nestable) data object. No virtual-DOM
//! diffing, no batching or async scheduling, no derived properties, no
//! component composition. Reactivity covers exactly the keys present on a
//! map when it is observed.

pub mod compile;
pub mod dom;
pub mod error;
pub mod reactive;
pub mod value;
pub mod vm;

// Re-export commonly used items
pub use compile::{compile, get_path, set_path, DirectiveKind};
pub use dom::{Event, EventHandler, Node, NodeKind};
pub use error::BindError;
pub use reactive::{Dep, ReactiveMap, Watcher};
pub use value::Value;
pub use vm::{Method, ViewModel, ViewModelOptions};
