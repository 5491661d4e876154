//! Dispatch abstraction between bound action creators and a store.

use crate::Action;

/// Something that accepts built actions, typically a store's dispatch loop.
///
/// Implemented for every `Fn(Action) -> R`, so a closure over the store works
/// wherever a dispatcher is expected.
pub trait Dispatcher {
    type Output;

    /// Dispatch an action and return whatever the store reports.
    fn dispatch(&self, action: Action) -> Self::Output;
}

impl<F, R> Dispatcher for F
where
    F: Fn(Action) -> R,
{
    type Output = R;

    fn dispatch(&self, action: Action) -> R {
        self(action)
    }
}
