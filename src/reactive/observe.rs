//! Reactive store - maps whose key reads and writes are intercepted.
//!
//! A [`ReactiveMap`] wraps a set of key/value pairs so every read and write
//! passes through a per-key slot carrying its own [`Dep`]. Observation
//! happens at construction: the slot table is a fixed snapshot of the keys
//! present when the map is built, and it is never consulted for (or extended
//! with) keys outside that snapshot. This is a documented limitation, not a
//! bug: reactivity only covers keys an object owned when it was observed.
//!
//! Nested maps are themselves `ReactiveMap`s, so assigning a brand-new map
//! to a slot makes the new map's keys reactive too - they were observed when
//! that map was constructed.
//!
//! # Example
//!
//! ```ignore
//! use vinebind::{ReactiveMap, Value};
//!
//! let data = ReactiveMap::observe([
//!     ("msg", Value::from("hi")),
//!     ("user", Value::map([("name", Value::from("ada"))])),
//! ]);
//!
//! data.set("msg", Value::from("bye"))?; // notifies subscribed watchers
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::BindError;
use crate::value::Value;

use super::context;
use super::dep::Dep;

// =============================================================================
// Slots
// =============================================================================

/// One reactive property: backing value plus its dep. The pairing is
/// permanent - exactly one dep per slot for the slot's lifetime.
struct Slot {
    value: RefCell<Value>,
    dep: Dep,
}

struct MapInner {
    // Insertion-ordered, fixed at observation time.
    slots: IndexMap<String, Slot>,
}

// =============================================================================
// ReactiveMap
// =============================================================================

/// A shared handle to an observed map. Cloning clones the handle, not the
/// data; equality between handles is identity (see [`ReactiveMap::handle_eq`]).
#[derive(Clone)]
pub struct ReactiveMap {
    inner: Rc<MapInner>,
}

impl ReactiveMap {
    /// Observe a set of key/value pairs, wrapping each into a reactive slot.
    ///
    /// Nested map values are already observed (maps are observed when
    /// constructed), so the whole graph below `entries` is reactive.
    pub fn observe<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let slots = entries
            .into_iter()
            .map(|(key, value)| {
                (
                    key.into(),
                    Slot {
                        value: RefCell::new(value),
                        dep: Dep::new(),
                    },
                )
            })
            .collect();
        Self {
            inner: Rc::new(MapInner { slots }),
        }
    }

    /// Read a key's value.
    ///
    /// If a watcher is currently evaluating, it is subscribed to this slot's
    /// dep as a side effect - this is how dependency tracking stays implicit.
    /// Keys outside the observed snapshot return `None`.
    pub fn get(&self, key: &str) -> Option<Value> {
        let slot = self.inner.slots.get(key)?;
        if let Some(watcher) = context::current_watcher() {
            slot.dep.add_sub(&watcher);
        }
        Some(slot.value.borrow().clone())
    }

    /// Write a key's value.
    ///
    /// No-op when the new value compares equal to the backing value (scalar
    /// equality, map handle identity). Otherwise the backing value is
    /// replaced and the slot's dep notifies synchronously before this call
    /// returns. Keys outside the observed snapshot are rejected.
    pub fn set(&self, key: &str, new: Value) -> Result<(), BindError> {
        let slot = self
            .inner
            .slots
            .get(key)
            .ok_or_else(|| BindError::UnknownKey {
                key: key.to_string(),
            })?;

        let changed = *slot.value.borrow() != new;
        if changed {
            // Release the borrow before notifying: subscribers re-read this
            // slot through `get`.
            *slot.value.borrow_mut() = new;
            slot.dep.notify()?;
        }
        Ok(())
    }

    /// Whether a key belongs to the observed snapshot.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.slots.contains_key(key)
    }

    /// Observed keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.slots.keys().map(String::as_str)
    }

    /// Handle identity: do both handles point at the same observed map?
    pub fn handle_eq(a: &ReactiveMap, b: &ReactiveMap) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl std::fmt::Debug for ReactiveMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (key, slot) in &self.inner.slots {
            map.entry(key, &*slot.value.borrow());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::watcher::Watcher;
    use std::cell::Cell;

    #[test]
    fn test_snapshot_get_set() {
        let map = ReactiveMap::observe([("a", Value::from(1)), ("b", Value::from("x"))]);

        assert_eq!(map.get("a"), Some(Value::from(1)));
        assert_eq!(map.get("missing"), None);

        map.set("a", Value::from(2)).unwrap();
        assert_eq!(map.get("a"), Some(Value::from(2)));

        // Keys outside the snapshot cannot be written.
        assert!(matches!(
            map.set("c", Value::from(3)),
            Err(BindError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_read_without_watcher_does_not_track() {
        let map = ReactiveMap::observe([("a", Value::from(1))]);
        let _ = map.get("a");

        // Writing afterwards must notify nobody (and not fail).
        map.set("a", Value::from(2)).unwrap();
    }

    #[test]
    fn test_equal_write_is_a_noop() {
        let map = ReactiveMap::observe([("a", Value::from(1))]);
        let fired = Rc::new(Cell::new(0));

        let fired_in_cb = Rc::clone(&fired);
        let _watcher = Watcher::spawn(&map, "a", move |_| {
            fired_in_cb.set(fired_in_cb.get() + 1);
            Ok(())
        })
        .unwrap();

        map.set("a", Value::from(1)).unwrap();
        assert_eq!(fired.get(), 0);

        map.set("a", Value::from(2)).unwrap();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_reassigned_map_is_reactive() {
        let map = ReactiveMap::observe([("a", Value::map([("b", Value::from(1))]))]);

        // Replace the nested map wholesale, then watch through it.
        map.set("a", Value::map([("b", Value::from(2))])).unwrap();

        let seen = Rc::new(Cell::new(0i64));
        let seen_in_cb = Rc::clone(&seen);
        let _watcher = Watcher::spawn(&map, "a.b", move |new| {
            if let Value::Int(i) = new {
                seen_in_cb.set(*i);
            }
            Ok(())
        })
        .unwrap();

        let nested = map.get("a").unwrap();
        nested.as_map().unwrap().set("b", Value::from(3)).unwrap();
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn test_dropped_watcher_is_pruned() {
        let map = ReactiveMap::observe([("a", Value::from(1))]);

        let watcher = Watcher::spawn(&map, "a", |_| Ok(())).unwrap();
        drop(watcher);

        // The dep only held a weak reference; the write must not fail.
        map.set("a", Value::from(2)).unwrap();
    }
}
