use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::StoreError;

/// A tagged, inert description of a state transition.
///
/// ```rust
/// use repose_store::Action;
///
/// let a = Action::with_payload("counter/incrementByAmount", 5i64);
/// assert_eq!(a.kind(), "counter/incrementByAmount");
/// assert_eq!(a.payload::<i64>(), Some(&5));
/// assert_eq!(a.payload::<u8>(), None);
/// ```
#[derive(Clone)]
pub struct Action {
    kind: Cow<'static, str>,
    payload: Option<Rc<dyn Any>>,
}

impl Action {
    pub fn new(kind: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    pub fn with_payload<P: 'static>(kind: impl Into<Cow<'static, str>>, payload: P) -> Self {
        Self {
            kind: kind.into(),
            payload: Some(Rc::new(payload)),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub(crate) fn kind_owned(&self) -> Cow<'static, str> {
        self.kind.clone()
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// `None` if there is no payload or it is not a `P`.
    pub fn payload<P: 'static>(&self) -> Option<&P> {
        self.payload.as_deref()?.downcast_ref::<P>()
    }

    /// Like [`Action::payload`], but as an error reducers can propagate with `?`.
    pub fn require_payload<P: 'static>(&self) -> Result<&P, StoreError> {
        self.payload::<P>().ok_or_else(|| StoreError::Payload {
            action: self.kind.clone(),
            expected: type_name::<P>(),
        })
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Action");
        d.field("kind", &self.kind);
        if self.payload.is_some() {
            d.field("payload", &"..");
        }
        d.finish()
    }
}

impl From<&'static str> for Action {
    fn from(kind: &'static str) -> Self {
        Action::new(kind)
    }
}
