use std::any::Any;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

/// A value that can sit in a [`DependencySet`].
///
/// Implemented for every `PartialEq + Debug + 'static` type. Handle types
/// ([`crate::StateCell`], [`Callback`]) implement `PartialEq` as identity, so
/// they compare the way a reference would.
pub trait DepValue: Any + fmt::Debug {
    fn dep_eq(&self, other: &dyn DepValue) -> bool;
    fn as_any(&self) -> &dyn Any;
}

impl<T: PartialEq + fmt::Debug + 'static> DepValue for T {
    fn dep_eq(&self, other: &dyn DepValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Ordered values captured when an effect (or memo) last ran. Two sets are
/// equal when they have the same length and every member is shallowly equal
/// to the member at the same position.
#[derive(Clone, Default)]
pub struct DependencySet(SmallVec<[Rc<dyn DepValue>; 4]>);

impl DependencySet {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    pub fn with(mut self, value: impl DepValue) -> Self {
        self.push(value);
        self
    }

    pub fn push(&mut self, value: impl DepValue) {
        self.0.push(Rc::new(value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` on first mount (`previous` is `None`) or when any member differs.
    pub fn changed_from(&self, previous: Option<&DependencySet>) -> bool {
        previous.is_none_or(|prev| prev != self)
    }
}

impl PartialEq for DependencySet {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| (**a).dep_eq(&**b))
    }
}

impl fmt::Debug for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Builds a [`DependencySet`]: `deps![]`, `deps![query.clone(), is_open]`.
#[macro_export]
macro_rules! deps {
    () => {
        $crate::deps::DependencySet::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::deps::DependencySet::new()$(.with($value))+
    };
}

/// Shared handler with identity equality, so a handler kept stable by
/// `use_callback` does not invalidate dependency sets or memoized props.
pub struct Callback<A: 'static, R: 'static = ()>(Rc<dyn Fn(A) -> R>);

impl<A: 'static, R: 'static> Callback<A, R> {
    pub fn new(f: impl Fn(A) -> R + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, arg: A) -> R {
        (self.0)(arg)
    }
}

impl<A: 'static, R: 'static> Clone for Callback<A, R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: 'static, R: 'static> PartialEq for Callback<A, R> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<A: 'static, R: 'static> fmt::Debug for Callback<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}
