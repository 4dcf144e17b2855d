//! # Slices
//!
//! `Slice<T>` bundles a slice name, its initial value, one *case reducer* per
//! action type, and the matching action creators. Case reducers edit a
//! private clone of the current state; the slice only hands out a new `Rc`
//! when the edit actually changed the value, so untouched slices keep their
//! identity.
//!
//! ```rust
//! use repose_store::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Counter { value: i64 }
//!
//! let counter = Slice::new("counter", Counter { value: 0 })
//!     .case("increment", |s, _| { s.value += 1; Ok(()) })
//!     .case("incrementByAmount", |s, a| {
//!         s.value += *a.require_payload::<i64>()?;
//!         Ok(())
//!     });
//! let actions = counter.creators();
//!
//! let mut registry = ReducerRegistry::new();
//! registry.register_slice(counter).unwrap();
//! let store = Store::new(&registry);
//!
//! store.dispatch(actions.action("increment")).unwrap();
//! store.dispatch(actions.action_with("incrementByAmount", 5i64)).unwrap();
//! assert_eq!(store.get_state().get::<Counter>("counter"), Some(&Counter { value: 6 }));
//! ```
//!
//! Action types are prefixed with the slice name (`"counter/increment"`), so
//! two slices may use the same case names without colliding.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{Action, ReducerError, SliceState};

type CaseReducer<T> = Box<dyn Fn(&mut T, &Action) -> Result<(), ReducerError>>;

pub struct Slice<T> {
    creators: ActionCreators,
    initial: T,
    cases: HashMap<String, CaseReducer<T>>,
}

impl<T> Slice<T>
where
    T: SliceState + Clone + PartialEq,
{
    pub fn new(name: impl Into<String>, initial: T) -> Self {
        Self {
            creators: ActionCreators {
                prefix: Rc::from(name.into()),
            },
            initial,
            cases: HashMap::new(),
        }
    }

    /// Handles actions of type `"{slice}/{action}"`. Registering the same case
    /// twice keeps the later reducer.
    pub fn case(
        mut self,
        action: &str,
        reducer: impl Fn(&mut T, &Action) -> Result<(), ReducerError> + 'static,
    ) -> Self {
        let kind = self.creators.action_type(action);
        if self.cases.insert(kind.clone(), Box::new(reducer)).is_some() {
            log::warn!(
                "slice case '{}' registered twice; keeping the later one",
                kind
            );
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.creators.prefix
    }

    pub fn handles(&self, kind: &str) -> bool {
        self.cases.contains_key(kind)
    }

    pub fn creators(&self) -> ActionCreators {
        self.creators.clone()
    }

    pub fn action(&self, action: &str) -> Action {
        self.creators.action(action)
    }

    pub fn action_with<P: 'static>(&self, action: &str, payload: P) -> Action {
        self.creators.action_with(action, payload)
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        String,
        T,
        impl Fn(&Rc<T>, &Action) -> Result<Rc<T>, ReducerError> + 'static,
    ) {
        let Slice {
            creators,
            initial,
            cases,
        } = self;

        let reducer = move |state: &Rc<T>, action: &Action| -> Result<Rc<T>, ReducerError> {
            let Some(case) = cases.get(action.kind()) else {
                return Ok(state.clone());
            };
            let mut draft = T::clone(state);
            case(&mut draft, action)?;
            if draft == **state {
                Ok(state.clone())
            } else {
                Ok(Rc::new(draft))
            }
        };

        (creators.prefix.to_string(), initial, reducer)
    }
}

/// Builds actions addressed to one slice. Cheap to clone; outlives the
/// `Slice` once it has been registered.
#[derive(Clone, Debug)]
pub struct ActionCreators {
    prefix: Rc<str>,
}

impl ActionCreators {
    pub fn action_type(&self, action: &str) -> String {
        format!("{}/{}", self.prefix, action)
    }

    pub fn action(&self, action: &str) -> Action {
        Action::new(self.action_type(action))
    }

    pub fn action_with<P: 'static>(&self, action: &str, payload: P) -> Action {
        Action::with_payload(self.action_type(action), payload)
    }
}
