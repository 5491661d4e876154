//! Binding action creators to a dispatcher.
//!
//! [`bind`] yields functions that build and dispatch in one call.
//! [`bind_deferred`] yields functions that only capture their arguments and
//! hand back a [`Thunk`]; nothing reaches the dispatcher until the thunk is
//! run, which makes them suitable as ready-made event callbacks.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use casegen_types::{Action, Dispatcher, Tree};

use crate::creator::ActionCreator;

/// An action creator that dispatches what it builds.
pub struct Bound<D> {
    creator: ActionCreator,
    dispatcher: Arc<D>,
}

impl<D: Dispatcher> Bound<D> {
    /// Build the action and dispatch it, returning the dispatcher's result.
    pub fn call(&self, args: Vec<Value>) -> D::Output {
        self.dispatcher.dispatch(self.creator.call(args))
    }
}

impl<D> Bound<D> {
    pub fn arity(&self) -> usize {
        self.creator.arity()
    }

    pub fn action_type(&self) -> &str {
        self.creator.action_type()
    }
}

impl<D> Clone for Bound<D> {
    fn clone(&self) -> Self {
        Self {
            creator: self.creator.clone(),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<D> fmt::Debug for Bound<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Bound").field(&self.creator).finish()
    }
}

/// An action creator that defers dispatch behind a [`Thunk`].
pub struct BoundThunk<D> {
    creator: ActionCreator,
    dispatcher: Arc<D>,
}

impl<D> BoundThunk<D> {
    /// Capture `args` without building or dispatching anything.
    pub fn call(&self, args: Vec<Value>) -> Thunk<D> {
        Thunk {
            creator: self.creator.clone(),
            args,
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }

    pub fn arity(&self) -> usize {
        self.creator.arity()
    }

    pub fn action_type(&self) -> &str {
        self.creator.action_type()
    }
}

impl<D> Clone for BoundThunk<D> {
    fn clone(&self) -> Self {
        Self {
            creator: self.creator.clone(),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<D> fmt::Debug for BoundThunk<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoundThunk").field(&self.creator).finish()
    }
}

/// A dispatch waiting to happen.
pub struct Thunk<D> {
    creator: ActionCreator,
    args: Vec<Value>,
    dispatcher: Arc<D>,
}

impl<D: Dispatcher> Thunk<D> {
    /// Build the action from the captured arguments and dispatch it. Every
    /// run dispatches once more.
    pub fn run(&self) -> D::Output {
        self.dispatcher.dispatch(self.action())
    }
}

impl<D> Thunk<D> {
    /// The action a run would dispatch.
    pub fn action(&self) -> Action {
        self.creator.call(self.args.clone())
    }
}

impl<D> fmt::Debug for Thunk<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thunk")
            .field("creator", &self.creator)
            .field("args", &self.args)
            .finish()
    }
}

/// Same-shaped tree of creators that dispatch immediately.
pub fn bind<D: Dispatcher>(actions: &Tree<ActionCreator>, dispatcher: D) -> Tree<Bound<D>> {
    let dispatcher = Arc::new(dispatcher);
    actions.map_leaves(|creator, _| Bound {
        creator: creator.clone(),
        dispatcher: Arc::clone(&dispatcher),
    })
}

/// Same-shaped tree of creators that return thunks.
pub fn bind_deferred<D: Dispatcher>(
    actions: &Tree<ActionCreator>,
    dispatcher: D,
) -> Tree<BoundThunk<D>> {
    let dispatcher = Arc::new(dispatcher);
    actions.map_leaves(|creator, _| BoundThunk {
        creator: creator.clone(),
        dispatcher: Arc::clone(&dispatcher),
    })
}
