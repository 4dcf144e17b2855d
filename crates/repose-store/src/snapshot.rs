use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Object-safe view of a slice's state. Implemented for every
/// `T: Any + Debug + PartialEq`; there is no need to implement it by hand.
pub trait SliceState: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
    fn dyn_eq(&self, other: &dyn SliceState) -> bool;
}

impl<T: Any + fmt::Debug + PartialEq> SliceState for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }

    fn dyn_eq(&self, other: &dyn SliceState) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Pointer identity, ignoring vtable metadata.
pub(crate) fn same_rc<A: ?Sized, B: ?Sized>(a: &Rc<A>, b: &Rc<B>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[derive(Clone)]
pub(crate) struct SliceSlot {
    pub(crate) name: Rc<str>,
    pub(crate) value: Rc<dyn SliceState>,
}

/// Immutable state of every slice at one point in time, in registration order.
///
/// Snapshots are handed out as `Rc<Snapshot>`. Compare two of them with
/// `Rc::ptr_eq` to learn whether a dispatch changed anything, or with `==`
/// for a slice-by-slice deep comparison.
#[derive(Clone, Default)]
pub struct Snapshot {
    slots: Vec<SliceSlot>,
}

impl Snapshot {
    pub fn empty() -> Rc<Snapshot> {
        Rc::new(Snapshot::default())
    }

    pub(crate) fn from_slots(slots: Vec<SliceSlot>) -> Self {
        Self { slots }
    }

    pub(crate) fn slots(&self) -> &[SliceSlot] {
        &self.slots
    }

    /// Typed access keyed by a [`StateHolder`](crate::StateHolder).
    pub fn of<H: crate::StateHolder>(&self) -> Option<Rc<H::State>> {
        self.slice::<H::State>(H::NAME)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|s| &*s.name)
    }

    /// Borrow a slice's state. `None` if the slice is missing or not a `T`.
    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        self.slot(name)?.value.as_any().downcast_ref::<T>()
    }

    /// Shared handle to a slice's state; keeps the allocation's identity, so
    /// `Rc::ptr_eq` on two results tells whether the slice was replaced.
    pub fn slice<T: 'static>(&self, name: &str) -> Option<Rc<T>> {
        let value = self.raw(name)?.clone();
        value.into_any_rc().downcast::<T>().ok()
    }

    pub fn raw(&self, name: &str) -> Option<&Rc<dyn SliceState>> {
        self.slot(name).map(|s| &s.value)
    }

    fn slot(&self, name: &str) -> Option<&SliceSlot> {
        self.slots.iter().find(|s| &*s.name == name)
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.slots.len() == other.slots.len()
            && self.slots.iter().zip(&other.slots).all(|(a, b)| {
                a.name == b.name && (same_rc(&a.value, &b.value) || a.value.dyn_eq(&*b.value))
            })
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|s| (&*s.name, &s.value)))
            .finish()
    }
}
