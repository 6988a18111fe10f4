//! Reactivity engine - dependency tracking and change notification.
//!
//! Leaves first:
//!
//! - [`dep`] - Per-slot registry of interested watchers
//! - [`context`] - Thread-local stack of watchers currently evaluating
//! - [`observe`] - Reactive maps: every key read/write goes through a slot
//! - [`watcher`] - An (expression, callback) pair re-run on notification
//!
//! Tracking is implicit: while a watcher evaluates its dot-path expression it
//! sits on the watcher stack, and every reactive slot read during that
//! evaluation subscribes the stack top to its dep. Writes notify
//! synchronously in the caller's stack frame; there is no batching and no
//! deferral.

pub mod context;
pub mod dep;
pub mod observe;
pub mod watcher;

pub use dep::Dep;
pub use observe::ReactiveMap;
pub use watcher::Watcher;
