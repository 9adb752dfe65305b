//! The deferred-action queue decoupling transitions from side effects.
//!
//! `update()` enqueues; it never executes. A consumer loop pops
//! [`DeferredAction`] units, runs them, and (when a handler returns
//! `true`) feeds an application-chosen continuation event back into the
//! machine. This is how slow real-world effects rejoin the synchronous
//! state graph without blocking transition evaluation.

use crate::core::action::Action;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Handler invoked by the consumer for each dequeued action.
///
/// Returning `true` asks the owning application to drive its continuation
/// event into the machine.
pub(crate) type Handler<A> = Arc<dyn Fn(&A) -> bool + Send + Sync>;

/// One unit of deferred work: an action plus the handler that executes it.
pub struct DeferredAction<A: Action> {
    action: A,
    handler: Handler<A>,
}

impl<A: Action> DeferredAction<A> {
    pub(crate) fn new(action: A, handler: Handler<A>) -> Self {
        DeferredAction { action, handler }
    }

    /// The action this unit will execute.
    pub fn action(&self) -> &A {
        &self.action
    }

    /// Invoke the handler with the action.
    ///
    /// The returned flag is the handler's request to drive a continuation
    /// event into the machine.
    pub fn run(self) -> bool {
        (self.handler)(&self.action)
    }
}

impl<A: Action> fmt::Debug for DeferredAction<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredAction")
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

/// FIFO of deferred actions, shared between the engine and its consumers.
///
/// Cloning the queue yields another handle to the same FIFO. The engine is
/// the sole producer; any number of consumers may [`pop`](Self::pop).
/// With a single consumer, dequeue order equals enqueue order (in
/// particular, a transition's exit action before the target's enter
/// action). Multiple consumers keep the pop itself race-free but give up
/// cross-action ordering.
///
/// # Example
///
/// ```rust
/// use flowstate::ActionQueue;
///
/// let queue: ActionQueue<()> = ActionQueue::new();
/// assert!(queue.is_empty());
/// assert!(queue.pop().is_none());
/// ```
pub struct ActionQueue<A: Action> {
    inner: Arc<Mutex<VecDeque<DeferredAction<A>>>>,
}

impl<A: Action> ActionQueue<A> {
    /// Create an empty queue.
    pub fn new() -> Self {
        ActionQueue {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub(crate) fn push(&self, work: DeferredAction<A>) {
        self.inner.lock().push_back(work);
    }

    /// Dequeue the oldest pending action, if any.
    pub fn pop(&self) -> Option<DeferredAction<A>> {
        self.inner.lock().pop_front()
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no actions are pending.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<A: Action> Clone for ActionQueue<A> {
    fn clone(&self) -> Self {
        ActionQueue {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Action> Default for ActionQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    crate::action_enum! {
        enum TestAction {
            First,
            Second,
        }
    }

    fn handler_counting(hits: Arc<AtomicUsize>) -> Handler<TestAction> {
        Arc::new(move |_action| {
            hits.fetch_add(1, Ordering::SeqCst);
            true
        })
    }

    #[test]
    fn queue_preserves_enqueue_order() {
        let queue = ActionQueue::new();
        let handler: Handler<TestAction> = Arc::new(|_| false);

        queue.push(DeferredAction::new(TestAction::First, Arc::clone(&handler)));
        queue.push(DeferredAction::new(TestAction::Second, handler));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().unwrap().action(), &TestAction::First);
        assert_eq!(queue.pop().unwrap().action(), &TestAction::Second);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn run_invokes_handler_and_returns_its_flag() {
        let hits = Arc::new(AtomicUsize::new(0));
        let work = DeferredAction::new(TestAction::First, handler_counting(Arc::clone(&hits)));

        assert!(work.run());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_the_same_fifo() {
        let queue = ActionQueue::new();
        let other = queue.clone();
        let handler: Handler<TestAction> = Arc::new(|_| false);

        queue.push(DeferredAction::new(TestAction::First, handler));

        assert_eq!(other.len(), 1);
        assert_eq!(other.pop().unwrap().action(), &TestAction::First);
        assert!(queue.is_empty());
    }
}
