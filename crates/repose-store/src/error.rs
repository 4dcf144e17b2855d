use std::borrow::Cow;

/// Error type slice reducers return. Anything implementing `std::error::Error`
/// converts into it with `?`.
pub type ReducerError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("slice '{name}' is already registered")]
    DuplicateSlice { name: String },

    /// `dispatch` was called while the store was reducing or notifying.
    #[error("re-entrant dispatch of '{action}': reducers and subscribers must not dispatch")]
    ReentrantDispatch { action: Cow<'static, str> },

    #[error("action '{action}' has no payload of type {expected}")]
    Payload {
        action: Cow<'static, str>,
        expected: &'static str,
    },

    #[error("snapshot slot '{slice}' does not hold that slice's state type")]
    SliceType { slice: String },

    /// Error raised by a slice reducer; displays as the reducer's own message.
    #[error("{source}")]
    Reducer {
        slice: String,
        #[source]
        source: ReducerError,
    },
}

impl StoreError {
    pub fn is_reentrant(&self) -> bool {
        matches!(self, StoreError::ReentrantDispatch { .. })
    }
}
