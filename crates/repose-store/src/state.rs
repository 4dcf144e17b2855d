use std::rc::Rc;

use crate::{Action, ReducerError, SliceState};

// State holder pattern
/// A slice described at the type level. Register with
/// `ReducerRegistry::register_holder::<H>()` and read back with
/// `Snapshot::of::<H>()`.
pub trait StateHolder: 'static {
    const NAME: &'static str;
    type State: SliceState;

    fn initial_state() -> Self::State;
    fn reduce(state: &Rc<Self::State>, action: &Action) -> Result<Rc<Self::State>, ReducerError>;
}
