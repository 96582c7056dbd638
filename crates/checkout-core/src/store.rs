//! Observable Store
//!
//! A single-threaded value cell that broadcasts changes. Used for the theme
//! preference and for the controller's phase, so the view layer and the
//! controller react to one source of truth instead of polling the DOM.

use std::cell::{Cell, RefCell};
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};

use futures::channel::mpsc;
use futures::{Stream, StreamExt};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Shared<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_id: Cell<u64>,
}

/// Shared observable value. Clones point at the same cell.
pub struct Store<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    /// Replace the value. Listeners run only when it actually changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.shared.value.borrow_mut();
            if *current == value {
                return false;
            }
            current.clone_from(&value);
        }
        self.notify(&value);
        true
    }

    /// Mutate a copy of the value and store it back
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    /// Call `listener` after every change until the subscription is dropped
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);
        self.shared
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let shared: Weak<Shared<T>> = Rc::downgrade(&self.shared);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(shared) = shared.upgrade() {
                    shared.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Stream of future values. The stream ends when the store is dropped.
    pub fn watch(&self) -> Changes<T> {
        let (tx, rx) = mpsc::unbounded();
        let subscription = self.subscribe(move |value| {
            // Receiver gone means the watcher was dropped; nothing to do.
            let _ = tx.unbounded_send(value.clone());
        });
        Changes {
            receiver: rx,
            _subscription: subscription,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }

    fn notify(&self, value: &T) {
        // Snapshot so listeners may subscribe, unsubscribe or set re-entrantly.
        let listeners: Vec<Listener<T>> = self
            .shared
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(value);
        }
    }
}

/// Guard returned by [`Store::subscribe`]; unsubscribes on drop
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Stream returned by [`Store::watch`]
pub struct Changes<T> {
    receiver: mpsc::UnboundedReceiver<T>,
    _subscription: Subscription,
}

impl<T> Stream for Changes<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.receiver.poll_next_unpin(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notifies_only_on_change() {
        let store = Store::new(1_u32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe(move |v| sink.borrow_mut().push(*v));

        assert!(store.set(2));
        assert!(!store.set(2));
        assert!(store.update(|v| *v += 1));

        assert_eq!(*seen.borrow(), vec![2, 3]);
        assert_eq!(store.get(), 3);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = Store::new(0_u32);
        let sub = store.subscribe(|_| {});
        assert_eq!(store.listener_count(), 1);
        drop(sub);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_reentrant_set_from_listener() {
        let store = Store::new(0_u32);
        let inner = store.clone();
        let _sub = store.subscribe(move |v| {
            if *v == 1 {
                inner.set(2);
            }
        });

        store.set(1);
        assert_eq!(store.get(), 2);
    }

    #[tokio::test]
    async fn test_watch_yields_changes() {
        let store = Store::new(String::from("light"));
        let mut changes = store.watch();

        store.set("dark".into());
        store.set("light".into());

        assert_eq!(changes.next().await.as_deref(), Some("dark"));
        assert_eq!(changes.next().await.as_deref(), Some("light"));
    }
}
