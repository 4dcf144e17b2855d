use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::{Action, CombinedReducer, ReducerRegistry, Snapshot, StoreError, Unsubscribe};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Root reducer running.
    Reducing,
    /// New snapshot installed, subscribers running.
    Notifying,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Prefixes this store's log lines.
    pub name: String,
    /// Most recent dispatches kept by the inspector.
    #[cfg(feature = "inspector")]
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".into(),
            #[cfg(feature = "inspector")]
            history_limit: 64,
        }
    }
}

struct Subscriber {
    active: Cell<bool>,
    callback: Box<dyn Fn()>,
}

struct Inner {
    config: StoreConfig,
    reducer: CombinedReducer,
    state: RefCell<Rc<Snapshot>>,
    phase: Cell<Phase>,
    subs: RefCell<Vec<Rc<Subscriber>>>,
    #[cfg(feature = "inspector")]
    history: RefCell<crate::inspector::History>,
}

/// Holds the current snapshot and runs dispatches through the root reducer.
///
/// `Store` is a cheap handle; clones share the same state. It is
/// single-threaded (`!Send`): keep one store per thread, or wrap access in
/// your own synchronization.
///
/// Dispatch is synchronous. By the time `dispatch` returns, the new snapshot
/// is installed and every subscriber has run, in the order they subscribed.
/// `dispatch` called from a reducer or from a subscriber fails with
/// [`StoreError::ReentrantDispatch`].
///
/// Subscribers are collected before notification starts, so a callback
/// subscribed during a notification first runs on the next dispatch. A
/// callback unsubscribed during a notification is never invoked again, not
/// even later in the same pass.
#[derive(Clone)]
pub struct Store(Rc<Inner>);

/// Non-owning handle, for reducers and subscribers that need their own store.
#[derive(Clone)]
pub struct WeakStore(Weak<Inner>);

impl WeakStore {
    pub fn upgrade(&self) -> Option<Store> {
        self.0.upgrade().map(Store)
    }
}

// Resets the phase even if a reducer or subscriber panics.
struct PhaseGuard<'a>(&'a Cell<Phase>);

impl<'a> PhaseGuard<'a> {
    fn enter(phase: &'a Cell<Phase>, to: Phase) -> Self {
        phase.set(to);
        Self(phase)
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.0.set(Phase::Idle);
    }
}

impl Store {
    pub fn new(registry: &ReducerRegistry) -> Self {
        Self::with_config(registry, StoreConfig::default())
    }

    pub fn with_config(registry: &ReducerRegistry, config: StoreConfig) -> Self {
        log::debug!(
            "[{}] created with slices {:?}",
            config.name,
            registry.slice_names().collect::<Vec<_>>()
        );
        Self(Rc::new(Inner {
            #[cfg(feature = "inspector")]
            history: RefCell::new(crate::inspector::History::new(config.history_limit)),
            config,
            reducer: registry.combined(),
            state: RefCell::new(registry.initial_state()),
            phase: Cell::new(Phase::Idle),
            subs: RefCell::new(Vec::new()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.config.name
    }

    pub fn config(&self) -> &StoreConfig {
        &self.0.config
    }

    pub fn phase(&self) -> Phase {
        self.0.phase.get()
    }

    /// Current snapshot. Cloning the `Rc` is all this costs.
    pub fn get_state(&self) -> Rc<Snapshot> {
        self.0.state.borrow().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        f(&self.get_state())
    }

    pub fn dispatch(&self, action: impl Into<Action>) -> Result<(), StoreError> {
        let action = action.into();
        let inner = &*self.0;

        let phase = inner.phase.get();
        if phase != Phase::Idle {
            log::warn!(
                "[{}] rejected dispatch of '{}' while {:?}",
                inner.config.name,
                action.kind(),
                phase
            );
            return Err(StoreError::ReentrantDispatch {
                action: action.kind_owned(),
            });
        }

        let guard = PhaseGuard::enter(&inner.phase, Phase::Reducing);
        #[cfg(feature = "inspector")]
        let started = web_time::Instant::now();

        let prev = self.get_state();
        let next = match inner.reducer.reduce(&prev, &action) {
            Ok(next) => next,
            Err(err) => {
                log::warn!(
                    "[{}] dispatch of '{}' failed: {}",
                    inner.config.name,
                    action.kind(),
                    err
                );
                return Err(err);
            }
        };

        let changed = !Rc::ptr_eq(&prev, &next);
        log::debug!(
            "[{}] dispatched '{}' (changed: {})",
            inner.config.name,
            action.kind(),
            changed
        );
        #[cfg(feature = "inspector")]
        inner.history.borrow_mut().record(&action, changed, started);

        if !changed {
            return Ok(());
        }

        *inner.state.borrow_mut() = next;
        inner.phase.set(Phase::Notifying);
        self.notify();
        drop(guard);
        Ok(())
    }

    fn notify(&self) {
        let subs: SmallVec<[Rc<Subscriber>; 8]> = self.0.subs.borrow().iter().cloned().collect();
        log::trace!(
            "[{}] notifying {} subscribers",
            self.0.config.name,
            subs.len()
        );
        for sub in subs {
            if sub.active.get() {
                (sub.callback)();
            }
        }
    }

    /// Registers `callback` to run after every dispatch that changes the
    /// snapshot. Call [`Unsubscribe::run`] on the result to stop it.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Unsubscribe {
        let sub = Rc::new(Subscriber {
            active: Cell::new(true),
            callback: Box::new(callback),
        });
        self.0.subs.borrow_mut().push(sub.clone());

        let weak = Rc::downgrade(&self.0);
        Unsubscribe::new(move || {
            sub.active.set(false);
            if let Some(inner) = weak.upgrade() {
                inner.subs.borrow_mut().retain(|s| !Rc::ptr_eq(s, &sub));
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.subs.borrow().len()
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore(Rc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &Store) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[cfg(feature = "inspector")]
    pub(crate) fn history_cell(&self) -> &RefCell<crate::inspector::History> {
        &self.0.history
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.0.config.name)
            .field("phase", &self.0.phase.get())
            .field("state", &*self.0.state.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
