//! ViewModel - the bound triple of data root, container, and methods.
//!
//! Construction observes nothing by itself (maps are observed when built)
//! and compiles the container's subtree if one was supplied. Without a
//! container the ViewModel stays inert: no compilation, no error. There is
//! no teardown API; the ViewModel lives as long as its owner keeps it.
//!
//! # Example
//!
//! ```ignore
//! use vinebind::{Node, ReactiveMap, Value, ViewModel, ViewModelOptions};
//!
//! let container = Node::element("div");
//! // ... build template nodes under `container` ...
//!
//! let vm = ViewModel::new(ViewModelOptions {
//!     container: Some(container),
//!     data: ReactiveMap::observe([("count", Value::from(0))]),
//!     methods: ViewModel::methods([(
//!         "increment",
//!         ViewModel::method_fn(|vm, _event| {
//!             let Value::Int(n) = vinebind::get_path("count", vm.data())? else {
//!                 return Ok(());
//!             };
//!             vinebind::set_path("count", vm.data(), Value::from(n + 1))
//!         }),
//!     )]),
//! })?;
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::compile::compile;
use crate::dom::{Event, Node};
use crate::error::BindError;
use crate::reactive::{ReactiveMap, Watcher};

/// A method from the methods table. Invocation receives the ViewModel as
/// its receiver plus the triggering event.
pub type Method = Rc<dyn Fn(&ViewModel, &Event) -> Result<(), BindError>>;

/// Construction input for [`ViewModel::new`].
pub struct ViewModelOptions {
    /// Target container. `None` skips compilation entirely.
    pub container: Option<Node>,
    /// The reactive data root.
    pub data: ReactiveMap,
    /// Name → method table consulted by event directives.
    pub methods: HashMap<String, Method>,
}

pub struct ViewModel {
    data: ReactiveMap,
    container: Option<Node>,
    methods: HashMap<String, Method>,
    // Watchers created during compilation. Deps hold weak references, so
    // the ViewModel anchors the bindings' lifetime.
    bindings: RefCell<Vec<Rc<Watcher>>>,
}

impl ViewModel {
    /// Build the ViewModel and, when a container is present, compile its
    /// subtree. Compilation errors (unknown method, missing path segment)
    /// propagate out of construction.
    pub fn new(options: ViewModelOptions) -> Result<Rc<Self>, BindError> {
        let vm = Rc::new(Self {
            data: options.data,
            container: options.container,
            methods: options.methods,
            bindings: RefCell::new(Vec::new()),
        });
        if let Some(container) = vm.container.clone() {
            compile(&container, &vm)?;
        }
        Ok(vm)
    }

    /// The reactive data root.
    pub fn data(&self) -> &ReactiveMap {
        &self.data
    }

    /// The bound container, if any.
    pub fn container(&self) -> Option<&Node> {
        self.container.as_ref()
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<Method> {
        self.methods.get(name).cloned()
    }

    /// Keep a watcher alive for the lifetime of this ViewModel. Called by
    /// the directive handlers for every live binding they create.
    pub fn retain_binding(&self, watcher: Rc<Watcher>) {
        self.bindings.borrow_mut().push(watcher);
    }

    /// Number of live bindings created by compilation.
    pub fn binding_count(&self) -> usize {
        self.bindings.borrow().len()
    }

    /// Wrap a closure as a [`Method`].
    pub fn method_fn<F>(f: F) -> Method
    where
        F: Fn(&ViewModel, &Event) -> Result<(), BindError> + 'static,
    {
        Rc::new(f)
    }

    /// Build a methods table from (name, method) pairs.
    pub fn methods<K, I>(entries: I) -> HashMap<String, Method>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Method)>,
    {
        entries
            .into_iter()
            .map(|(name, method)| (name.into(), method))
            .collect()
    }
}
