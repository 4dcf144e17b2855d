//! # Store, Slices, and Subscriptions
//!
//! Repose keeps shared application state in a small, explicit container
//! instead of a global singleton. There are three main pieces:
//!
//! - `ReducerRegistry` — named slices, each with a pure reducer and an
//!   initial value, folded into one root reducer.
//! - `Store` — holds the current `Snapshot`, runs dispatched `Action`s
//!   through the root reducer and notifies subscribers.
//! - `Slice` / `StateHolder` — convenient ways of declaring a slice.
//!
//! ## Dispatch and read
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
//!             Ok(match action.kind() {
//!                 "increment" => Rc::new(**n + 1),
//!                 "incrementByAmount" => Rc::new(**n + action.require_payload::<i64>()?),
//!                 _ => n.clone(),
//!             })
//!         },
//!         0i64,
//!     )
//!     .unwrap();
//!
//! let store = Store::new(&registry);
//! store.dispatch("increment").unwrap();
//! store.dispatch("increment").unwrap();
//! store.dispatch(Action::with_payload("incrementByAmount", 5i64)).unwrap();
//! assert_eq!(store.get_state().get::<i64>("counter"), Some(&7));
//! ```
//!
//! ## Snapshots are immutable
//!
//! A reducer never edits its input. It returns a new `Rc` when the slice
//! changes and `Rc::clone(state)` when it does not. The store relies on this:
//! a dispatch that leaves every slice untouched keeps the same snapshot `Rc`
//! and notifies nobody.
//!
//! ## Subscribers
//!
//! ```rust
//! # use std::{cell::Cell, rc::Rc};
//! # use repose_store::*;
//! # let store = Store::new(&ReducerRegistry::new());
//! let hits = Rc::new(Cell::new(0));
//! let unsubscribe = store.subscribe({
//!     let hits = hits.clone();
//!     move || hits.set(hits.get() + 1)
//! });
//! // ...
//! unsubscribe.run();
//! ```
//!
//! Subscribers run synchronously, in subscription order, after the new
//! snapshot is installed and before `dispatch` returns. Reducers and
//! subscribers must not dispatch; doing so fails with
//! `StoreError::ReentrantDispatch`.
//!
//! `Store::select` narrows a subscription to a derived value and only fires
//! when that value changes.

pub mod action;
pub mod effects;
pub mod error;
#[cfg(feature = "inspector")]
pub mod inspector;
pub mod prelude;
pub mod registry;
pub mod select;
pub mod slice;
pub mod snapshot;
pub mod state;
pub mod store;

pub use prelude::*;
