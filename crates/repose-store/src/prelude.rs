pub use crate::action::Action;
pub use crate::effects::Unsubscribe;
pub use crate::error::*;
pub use crate::registry::{CombinedReducer, ReducerRegistry};
pub use crate::select::Selected;
pub use crate::slice::{ActionCreators, Slice};
pub use crate::snapshot::{SliceState, Snapshot};
pub use crate::state::StateHolder;
pub use crate::store::{Phase, Store, StoreConfig, WeakStore};

#[cfg(feature = "inspector")]
pub use crate::inspector::ActionRecord;
