//! Application state seen by the tree.
//!
//! The tree never owns or mutates state: each frame it receives a shared
//! reference to one immutable snapshot, and templates narrow it with a
//! [`Selector`] before binding.

/// Marker for types usable as a tree's state snapshot.
pub trait StateModel: 'static {}

impl StateModel for () {}

/// Pure narrowing of a state snapshot to what one template needs.
///
/// Implemented for every `Fn(&S) -> T`, so plain functions and non-capturing
/// closures are selectors.
pub trait Selector<S: ?Sized, T> {
    fn select(&self, state: &S) -> T;
}

impl<S: ?Sized, T, F> Selector<S, T> for F
where
    F: Fn(&S) -> T,
{
    #[inline]
    fn select(&self, state: &S) -> T {
        self(state)
    }
}
