//! Snapshot Store
//!
//! A single-threaded observable cell. Every `set` is delivered to every
//! listener, in order. A `set` issued from inside a listener is queued and
//! delivered after the current dispatch finishes, so listeners never overlap
//! and no value is dropped.
//!
//! In-memory sources (tests, the demo) are built on this store.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::sources::Subscription;

type Listener<T> = Rc<RefCell<Box<dyn FnMut(&T)>>>;

struct Inner<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
    queue: VecDeque<T>,
    dispatching: bool,
}

/// Observable snapshot cell
pub struct SnapshotStore<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for SnapshotStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> SnapshotStore<T> {
    /// Create a store holding `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                listeners: Vec::new(),
                next_id: 0,
                queue: VecDeque::new(),
                dispatching: false,
            })),
        }
    }

    /// Current value
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replace the value and notify listeners
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            inner.queue.push_back(value);
            if inner.dispatching {
                return;
            }
            inner.dispatching = true;
        }
        self.drain();
    }

    /// Modify a copy of the value and store it
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Register a listener; it is not called with the current value
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner
                .listeners
                .push((id, Rc::new(RefCell::new(Box::new(listener)))));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }

    /// Number of registered listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn drain(&self) {
        loop {
            let (snapshot, listeners) = {
                let mut inner = self.inner.borrow_mut();
                let Some(snapshot) = inner.queue.pop_front() else {
                    inner.dispatching = false;
                    return;
                };
                let listeners: Vec<Listener<T>> =
                    inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
                (snapshot, listeners)
            };

            for listener in listeners {
                let mut callback = listener.borrow_mut();
                (*callback)(&snapshot);
            }
        }
    }
}
