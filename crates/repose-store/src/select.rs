use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{Snapshot, Store, Unsubscribe};

impl Store {
    /// Runs `on_change` whenever the value picked by `selector` changes.
    ///
    /// The value is computed once up front; `on_change` is not called for it.
    /// Dispatches that change the snapshot but not the selected value are
    /// filtered out.
    pub fn select<V, S, F>(&self, selector: S, on_change: F) -> Unsubscribe
    where
        V: PartialEq + 'static,
        S: Fn(&Snapshot) -> V + 'static,
        F: Fn(&V) + 'static,
    {
        let last = RefCell::new(self.read(&selector));
        let store = self.downgrade();
        self.subscribe(move || {
            let Some(store) = store.upgrade() else {
                return;
            };
            let value = store.read(&selector);
            if *last.borrow() == value {
                return;
            }
            *last.borrow_mut() = value;
            let current = last.borrow();
            on_change(&*current);
        })
    }

    /// Keeps a selected value current, for callers that poll instead of
    /// reacting.
    pub fn selected<V, S>(&self, selector: S) -> Selected<V>
    where
        V: PartialEq + Clone + 'static,
        S: Fn(&Snapshot) -> V + 'static,
    {
        let value = Rc::new(RefCell::new(self.read(&selector)));
        let changes = Rc::new(Cell::new(0u64));
        let unsubscribe = self.select(selector, {
            let value = value.clone();
            let changes = changes.clone();
            move |v: &V| {
                *value.borrow_mut() = v.clone();
                changes.set(changes.get() + 1);
            }
        });
        Selected {
            value,
            changes,
            unsubscribe,
        }
    }
}

/// A selected value tracked by [`Store::selected`].
pub struct Selected<V> {
    value: Rc<RefCell<V>>,
    changes: Rc<Cell<u64>>,
    unsubscribe: Unsubscribe,
}

impl<V: Clone> Selected<V> {
    pub fn get(&self) -> V {
        self.value.borrow().clone()
    }

    /// How many times the value has changed since selection started.
    pub fn changes(&self) -> u64 {
        self.changes.get()
    }

    pub fn unsubscribe(&self) {
        self.unsubscribe.run();
    }
}
