//! Dep - Per-slot registry of interested watchers.
//!
//! Every reactive slot owns exactly one `Dep` for its whole lifetime. The
//! dep holds weak references only; it never controls watcher lifetime.
//! Notification is synchronous and unbatched: it runs inside the writing
//! caller's stack frame, in subscription order, with no error isolation (a
//! failing subscriber aborts the remaining notifications).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::BindError;

use super::watcher::Watcher;

/// Ordered collection of watchers subscribed to one reactive slot.
pub struct Dep {
    subs: RefCell<Vec<Weak<Watcher>>>,
}

impl Dep {
    pub fn new() -> Self {
        Self {
            subs: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a watcher, preserving registration order.
    ///
    /// Subscriptions are de-duplicated by watcher identity: an expression
    /// that traverses the same slot more than once during a single
    /// evaluation still yields exactly one callback per change.
    pub fn add_sub(&self, watcher: &Rc<Watcher>) {
        let mut subs = self.subs.borrow_mut();
        let already = subs
            .iter()
            .any(|sub| sub.as_ptr() == Rc::as_ptr(watcher));
        if !already {
            subs.push(Rc::downgrade(watcher));
        }
    }

    /// Run `update()` on every live subscriber in insertion order.
    ///
    /// Dead subscriptions (watchers dropped by their owner) are pruned on
    /// the way through. The first failing subscriber aborts the rest.
    pub fn notify(&self) -> Result<(), BindError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("notify", subs = self.subs.borrow().len()).entered();

        // Snapshot before invoking: callbacks may subscribe new watchers to
        // this same dep while we iterate.
        let snapshot: Vec<Weak<Watcher>> = {
            let mut subs = self.subs.borrow_mut();
            subs.retain(|sub| sub.strong_count() > 0);
            subs.clone()
        };

        for sub in snapshot {
            if let Some(watcher) = sub.upgrade() {
                watcher.update()?;
            }
        }
        Ok(())
    }

    /// Number of live subscribers. Test hook.
    #[cfg(test)]
    pub fn sub_count(&self) -> usize {
        self.subs
            .borrow()
            .iter()
            .filter(|sub| sub.strong_count() > 0)
            .count()
    }
}

impl Default for Dep {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::ReactiveMap;
    use crate::value::Value;

    #[test]
    fn test_add_sub_dedupes_by_identity() {
        let map = ReactiveMap::observe([("k", Value::from(1))]);
        let first = Watcher::spawn(&map, "k", |_| Ok(())).unwrap();
        let second = Watcher::spawn(&map, "k", |_| Ok(())).unwrap();

        let dep = Dep::new();
        dep.add_sub(&first);
        dep.add_sub(&first);
        assert_eq!(dep.sub_count(), 1);

        dep.add_sub(&second);
        assert_eq!(dep.sub_count(), 2);
    }

    #[test]
    fn test_notify_runs_in_subscription_order() {
        use std::cell::RefCell;

        let map = ReactiveMap::observe([("k", Value::from(0))]);
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_first = Rc::clone(&order);
        let _first = Watcher::spawn(&map, "k", move |_| {
            order_first.borrow_mut().push("first");
            Ok(())
        })
        .unwrap();
        let order_second = Rc::clone(&order);
        let _second = Watcher::spawn(&map, "k", move |_| {
            order_second.borrow_mut().push("second");
            Ok(())
        })
        .unwrap();

        map.set("k", Value::from(1)).unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_failing_subscriber_aborts_remaining_notifications() {
        use std::cell::Cell;

        let map = ReactiveMap::observe([("k", Value::from(0))]);
        let second_fired = Rc::new(Cell::new(false));

        // Subscribed first, fails on every change.
        let _first = Watcher::spawn(&map, "k", |_| {
            Err(BindError::UnknownKey {
                key: "k".to_string(),
            })
        })
        .unwrap();
        let second_in_cb = Rc::clone(&second_fired);
        let _second = Watcher::spawn(&map, "k", move |_| {
            second_in_cb.set(true);
            Ok(())
        })
        .unwrap();

        // No error isolation: the failure propagates to the writer and the
        // later subscriber is never reached.
        let result = map.set("k", Value::from(1));
        assert!(matches!(result, Err(BindError::UnknownKey { .. })));
        assert!(!second_fired.get());
    }

    #[test]
    fn test_notify_skips_dropped_watchers() {
        let map = ReactiveMap::observe([("k", Value::from(1))]);
        let watcher = Watcher::spawn(&map, "k", |_| Ok(())).unwrap();

        let dep = Dep::new();
        dep.add_sub(&watcher);
        drop(watcher);

        assert_eq!(dep.sub_count(), 0);
        dep.notify().unwrap();
    }
}
