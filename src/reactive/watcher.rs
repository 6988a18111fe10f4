//! Watcher - an (expression, callback) pair re-run on notification.
//!
//! A watcher is created per dynamic binding point by the directive handlers.
//! Constructing one evaluates its dot-path expression once with the watcher
//! on the tracking stack, which subscribes it to every reactive slot the
//! traversal touches. From then on, any of those slots changing re-evaluates
//! the expression and, when the result differs from the cached value, runs
//! the callback with the new value.
//!
//! Watchers are owned by whoever created them (conceptually, by the document
//! node they update); deps hold weak references only.

use std::cell::RefCell;
use std::rc::Rc;

use crate::compile::path::get_path;
use crate::error::BindError;
use crate::value::Value;

use super::context;
use super::observe::ReactiveMap;

/// Callback invoked with the freshly evaluated value on every real change.
pub type WatchCallback = Box<dyn Fn(&Value) -> Result<(), BindError>>;

pub struct Watcher {
    data: ReactiveMap,
    expr: String,
    callback: WatchCallback,
    last: RefCell<Value>,
}

impl Watcher {
    /// Create a watcher and run its initial tracked evaluation.
    ///
    /// Fails if any segment of `expr` is missing from the data graph; the
    /// partially registered subscriptions die with the returned error since
    /// deps never keep a watcher alive.
    pub fn spawn<F>(data: &ReactiveMap, expr: &str, callback: F) -> Result<Rc<Self>, BindError>
    where
        F: Fn(&Value) -> Result<(), BindError> + 'static,
    {
        let watcher = Rc::new(Self {
            data: data.clone(),
            expr: expr.to_string(),
            callback: Box::new(callback),
            last: RefCell::new(Value::Null),
        });
        let initial = watcher.tracked_eval()?;
        *watcher.last.borrow_mut() = initial;
        Ok(watcher)
    }

    /// Evaluate the expression with this watcher on the tracking stack.
    /// The pop is unconditional - it runs on evaluation failure too.
    fn tracked_eval(self: &Rc<Self>) -> Result<Value, BindError> {
        context::push_watcher(self);
        let result = get_path(&self.expr, &self.data);
        context::pop_watcher();
        result
    }

    /// Re-evaluate and diff against the cached value.
    ///
    /// Runs the callback only when the result actually changed, then caches
    /// the new value. The re-evaluation is untracked: subscriptions were
    /// established at construction and are not extended here.
    pub fn update(&self) -> Result<(), BindError> {
        let new = get_path(&self.expr, &self.data)?;
        let changed = new != *self.last.borrow();
        if changed {
            (self.callback)(&new)?;
            *self.last.borrow_mut() = new;
        }
        Ok(())
    }

    /// The watched dot-path expression.
    pub fn expr(&self) -> &str {
        &self.expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::context::stack_depth;
    use std::cell::Cell;

    #[test]
    fn test_spawn_caches_initial_value() {
        let data = ReactiveMap::observe([("n", Value::from(7))]);
        let watcher = Watcher::spawn(&data, "n", |_| Ok(())).unwrap();

        assert_eq!(*watcher.last.borrow(), Value::from(7));
        assert_eq!(watcher.expr(), "n");
    }

    #[test]
    fn test_update_fires_once_per_change() {
        let data = ReactiveMap::observe([("n", Value::from(0))]);
        let count = Rc::new(Cell::new(0));

        let count_in_cb = Rc::clone(&count);
        let _watcher = Watcher::spawn(&data, "n", move |_| {
            count_in_cb.set(count_in_cb.get() + 1);
            Ok(())
        })
        .unwrap();

        data.set("n", Value::from(1)).unwrap();
        data.set("n", Value::from(1)).unwrap(); // same value, no callback
        data.set("n", Value::from(2)).unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_nested_path_subscribes_every_segment() {
        let data = ReactiveMap::observe([("user", Value::map([("name", Value::from("ada"))]))]);
        let seen = Rc::new(RefCell::new(String::new()));

        let seen_in_cb = Rc::clone(&seen);
        let _watcher = Watcher::spawn(&data, "user.name", move |new| {
            *seen_in_cb.borrow_mut() = new.to_string();
            Ok(())
        })
        .unwrap();

        let user = data.get("user").unwrap();
        user.as_map().unwrap().set("name", Value::from("lin")).unwrap();
        assert_eq!(*seen.borrow(), "lin");
    }

    #[test]
    fn test_failed_spawn_leaves_stack_balanced() {
        let data = ReactiveMap::observe([("a", Value::from(1))]);

        let result = Watcher::spawn(&data, "a.missing.deep", |_| Ok(()));
        assert!(result.is_err());
        assert_eq!(stack_depth(), 0);
    }

    #[test]
    fn test_missing_segment_aborts_update() {
        let data = ReactiveMap::observe([("a", Value::map([("b", Value::from(1))]))]);

        let fired = Rc::new(Cell::new(0));
        let fired_in_cb = Rc::clone(&fired);
        let _watcher = Watcher::spawn(&data, "a.b", move |_| {
            fired_in_cb.set(fired_in_cb.get() + 1);
            Ok(())
        })
        .unwrap();

        // Replace `a` with a map lacking `b`: the notification for `a`
        // re-evaluates `a.b`, which now fails and propagates to the writer.
        let result = data.set("a", Value::map([("c", Value::from(2))]));
        assert!(matches!(result, Err(BindError::PathSegment { .. })));
        assert_eq!(fired.get(), 0);
    }
}
