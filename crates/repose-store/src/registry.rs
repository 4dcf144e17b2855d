//! Slice registration and the combined root reducer.
//!
//! A [`ReducerRegistry`] maps unique slice names to a pure reducer and an
//! initial value. [`ReducerRegistry::combined`] folds them into one
//! [`CombinedReducer`] that runs every slice reducer against its own part of
//! a [`Snapshot`]:
//!
//! ```rust
//! use std::rc::Rc;
//! use repose_store::*;
//!
//! let mut registry = ReducerRegistry::new();
//! registry
//!     .register(
//!         "counter",
//!         |n: &Rc<i64>, action: &Action| {
//!             Ok(if action.is("increment") { Rc::new(**n + 1) } else { n.clone() })
//!         },
//!         0i64,
//!     )
//!     .unwrap();
//!
//! let root = registry.combined();
//! let s0 = registry.initial_state();
//! let s1 = root.reduce(&s0, &Action::new("increment")).unwrap();
//! assert_eq!(s1.get::<i64>("counter"), Some(&1));
//!
//! // Actions no slice handles hand back the very same snapshot.
//! let s2 = root.reduce(&s1, &Action::new("noop")).unwrap();
//! assert!(Rc::ptr_eq(&s1, &s2));
//! ```

use std::rc::Rc;

use crate::snapshot::{SliceSlot, same_rc};
use crate::{Action, ReducerError, Slice, SliceState, Snapshot, StateHolder, StoreError};

type ErasedReducer =
    Box<dyn Fn(&Rc<dyn SliceState>, &Action) -> Result<Rc<dyn SliceState>, ReducerError>>;

struct SliceEntry {
    name: Rc<str>,
    initial: Rc<dyn SliceState>,
    reduce: ErasedReducer,
}

#[derive(Default)]
pub struct ReducerRegistry {
    entries: Vec<Rc<SliceEntry>>,
}

impl ReducerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slice. The reducer must return `Rc::clone(state)` for actions
    /// that do not concern it.
    pub fn register<T, F>(
        &mut self,
        name: impl Into<String>,
        reducer: F,
        initial: T,
    ) -> Result<(), StoreError>
    where
        T: SliceState,
        F: Fn(&Rc<T>, &Action) -> Result<Rc<T>, ReducerError> + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(StoreError::DuplicateSlice { name });
        }
        let name: Rc<str> = Rc::from(name);

        let slice = name.clone();
        let reduce: ErasedReducer = Box::new(move |state: &Rc<dyn SliceState>, action: &Action| {
            reduce_typed::<T, F>(&slice, &reducer, state, action)
        });

        log::debug!("registered slice '{}'", name);
        self.entries.push(Rc::new(SliceEntry {
            name,
            initial: Rc::new(initial),
            reduce,
        }));
        Ok(())
    }

    pub fn register_slice<T>(&mut self, slice: Slice<T>) -> Result<(), StoreError>
    where
        T: SliceState + Clone + PartialEq,
    {
        let (name, initial, reducer) = slice.into_parts();
        self.register(name, reducer, initial)
    }

    pub fn register_holder<H: StateHolder>(&mut self) -> Result<(), StoreError> {
        self.register(H::NAME, H::reduce, H::initial_state())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| &*e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn slice_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| &*e.name)
    }

    /// Snapshot holding every slice's initial value, in registration order.
    pub fn initial_state(&self) -> Rc<Snapshot> {
        Rc::new(Snapshot::from_slots(
            self.entries
                .iter()
                .map(|e| SliceSlot {
                    name: e.name.clone(),
                    value: e.initial.clone(),
                })
                .collect(),
        ))
    }

    /// Root reducer over everything registered so far. Later registrations
    /// do not affect an already combined reducer.
    pub fn combined(&self) -> CombinedReducer {
        CombinedReducer {
            entries: self.entries.clone().into(),
        }
    }
}

impl std::fmt::Debug for ReducerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.slice_names()).finish()
    }
}

/// All registered slice reducers folded into one `(snapshot, action) -> snapshot`.
#[derive(Clone)]
pub struct CombinedReducer {
    entries: Rc<[Rc<SliceEntry>]>,
}

impl CombinedReducer {
    /// Runs every slice reducer in registration order.
    ///
    /// Returns `state` itself (same `Rc`) when every slice reducer handed back
    /// its input. The first failing slice aborts the whole reduction.
    ///
    /// A registered slice missing from `state` starts from its initial value.
    /// Slots in `state` that no registered slice owns are dropped from the
    /// result. Either case counts as a change.
    pub fn reduce(
        &self,
        state: &Rc<Snapshot>,
        action: &Action,
    ) -> Result<Rc<Snapshot>, StoreError> {
        let mut changed = state.slots().len() != self.entries.len();
        let mut next = Vec::with_capacity(self.entries.len());

        for (i, entry) in self.entries.iter().enumerate() {
            let prev = state
                .slots()
                .get(i)
                .filter(|s| s.name == entry.name)
                .or_else(|| state.slots().iter().find(|s| s.name == entry.name));

            let input = match prev {
                Some(slot) => slot.value.clone(),
                None => {
                    changed = true;
                    entry.initial.clone()
                }
            };

            let value = (entry.reduce)(&input, action)
                .map_err(|e| reducer_failed(&entry.name, e))?;
            if !same_rc(&value, &input) {
                changed = true;
            }
            next.push(SliceSlot {
                name: entry.name.clone(),
                value,
            });
        }

        if changed {
            Ok(Rc::new(Snapshot::from_slots(next)))
        } else {
            Ok(state.clone())
        }
    }

    pub fn slice_count(&self) -> usize {
        self.entries.len()
    }
}

fn reduce_typed<T, F>(
    slice: &str,
    reducer: &F,
    state: &Rc<dyn SliceState>,
    action: &Action,
) -> Result<Rc<dyn SliceState>, ReducerError>
where
    T: SliceState,
    F: Fn(&Rc<T>, &Action) -> Result<Rc<T>, ReducerError>,
{
    let typed = state
        .clone()
        .into_any_rc()
        .downcast::<T>()
        .map_err(|_| StoreError::SliceType {
            slice: slice.to_string(),
        })?;
    let next: Rc<dyn SliceState> = reducer(&typed, action)?;
    Ok(next)
}

fn reducer_failed(slice: &str, err: ReducerError) -> StoreError {
    match err.downcast::<StoreError>() {
        Ok(err) => *err,
        Err(source) => StoreError::Reducer {
            slice: slice.to_string(),
            source,
        },
    }
}
