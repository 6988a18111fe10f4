//! Current-watcher context - the implicit tracking stack.
//!
//! While a watcher evaluates its expression it is pushed here, and every
//! reactive slot read during the evaluation subscribes the stack top. This
//! is an explicit stack rather than a single slot so that a nested
//! evaluation (one starting while another is in progress) cannot clobber the
//! outer watcher's tracking; each evaluation pairs one push with one pop.

use std::cell::RefCell;
use std::rc::Rc;

use super::watcher::Watcher;

thread_local! {
    /// Stack of watchers currently evaluating their expressions.
    static WATCHER_STACK: RefCell<Vec<Rc<Watcher>>> = const { RefCell::new(Vec::new()) };
}

/// Push a watcher for the duration of one expression evaluation.
pub fn push_watcher(watcher: &Rc<Watcher>) {
    WATCHER_STACK.with(|stack| {
        stack.borrow_mut().push(Rc::clone(watcher));
    })
}

/// Pop the most recently pushed watcher. Must be called exactly once per
/// push, evaluation failure included.
pub fn pop_watcher() {
    WATCHER_STACK.with(|stack| {
        stack.borrow_mut().pop();
    })
}

/// The watcher currently evaluating, if any.
pub fn current_watcher() -> Option<Rc<Watcher>> {
    WATCHER_STACK.with(|stack| stack.borrow().last().cloned())
}

/// Depth of the evaluation stack. Test hook.
#[cfg(test)]
pub fn stack_depth() -> usize {
    WATCHER_STACK.with(|stack| stack.borrow().len())
}
