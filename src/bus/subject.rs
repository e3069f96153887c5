use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use super::subscription::Subscription;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

struct Observer<T> {
    // `None` while the callback is running.
    callback: Option<Callback<T>>,
}

struct SubjectState<T> {
    current: Option<T>,
    observers: IndexMap<ObserverId, Observer<T>>,
    next_id: u64,
    pending: VecDeque<T>,
    dispatching: bool,
}

/// Single-threaded observable value.
///
/// Keeps the last published value and notifies observers in registration
/// order. A publish made while observers are being notified is queued and
/// delivered after the current round, so observers never re-enter each other.
pub struct Subject<T> {
    state: Rc<RefCell<SubjectState<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Clone + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Subject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SubjectState {
                current: None,
                observers: IndexMap::new(),
                next_id: 0,
                pending: VecDeque::new(),
                dispatching: false,
            })),
        }
    }

    #[must_use]
    pub fn with_value(value: T) -> Self {
        let subject = Self::new();
        subject.state.borrow_mut().current = Some(value);
        subject
    }

    /// Last published value, if any.
    #[must_use]
    pub fn current(&self) -> Option<T> {
        self.state.borrow().current.clone()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Registers an observer for every future value.
    #[must_use = "dropping the subscription unregisters the observer"]
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        self.register(Box::new(callback))
    }

    pub fn publish(&self, value: T) {
        {
            let mut state = self.state.borrow_mut();
            state.current = Some(value.clone());
            state.pending.push_back(value);
            if state.dispatching {
                trace!(queued = state.pending.len(), "subject publish queued");
                return;
            }
            state.dispatching = true;
        }

        loop {
            let (value, ids) = {
                let mut state = self.state.borrow_mut();
                let Some(value) = state.pending.pop_front() else {
                    state.dispatching = false;
                    break;
                };
                let ids: Vec<ObserverId> = state.observers.keys().copied().collect();
                (value, ids)
            };
            trace!(observers = ids.len(), "subject dispatch");
            for id in ids {
                self.notify(id, &value);
            }
        }
    }

    fn register(&self, callback: Callback<T>) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = ObserverId(state.next_id);
            state.next_id += 1;
            state.observers.insert(
                id,
                Observer {
                    callback: Some(callback),
                },
            );
            id
        };

        let state = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                let removed = state.borrow_mut().observers.shift_remove(&id);
                drop(removed);
            }
        })
    }

    fn notify(&self, id: ObserverId, value: &T) {
        let callback = self
            .state
            .borrow_mut()
            .observers
            .get_mut(&id)
            .and_then(|observer| observer.callback.take());
        let Some(mut callback) = callback else {
            return;
        };

        callback(value);

        // Dropped outside the borrow: captured state may unsubscribe on drop.
        let finished = match self.state.borrow_mut().observers.get_mut(&id) {
            Some(observer) => {
                observer.callback = Some(callback);
                None
            }
            None => Some(callback),
        };
        drop(finished);
    }
}
