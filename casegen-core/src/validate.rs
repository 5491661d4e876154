//! Action creators guarded by a check against the current state.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;

use casegen_types::Dispatcher;

use crate::creator::ActionCreator;

type Check<S> = Arc<dyn Fn(&S, &[Value]) -> bool + Send + Sync>;

/// An action creator that only dispatches when its check accepts.
pub struct Validated<S> {
    creator: ActionCreator,
    check: Check<S>,
}

/// Guard `creator` with `check`, which sees the current state and the call
/// arguments.
pub fn validate<S, C>(creator: ActionCreator, check: C) -> Validated<S>
where
    C: Fn(&S, &[Value]) -> bool + Send + Sync + 'static,
{
    Validated {
        creator,
        check: Arc::new(check),
    }
}

impl<S> Validated<S> {
    /// Capture `args`; the check runs later against whatever state the
    /// caller supplies.
    pub fn call(&self, args: Vec<Value>) -> ValidatedThunk<S> {
        ValidatedThunk {
            creator: self.creator.clone(),
            args,
            check: Arc::clone(&self.check),
        }
    }

    pub fn action_type(&self) -> &str {
        self.creator.action_type()
    }
}

impl<S> Clone for Validated<S> {
    fn clone(&self) -> Self {
        Self {
            creator: self.creator.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

pub struct ValidatedThunk<S> {
    creator: ActionCreator,
    args: Vec<Value>,
    check: Check<S>,
}

impl<S> ValidatedThunk<S> {
    /// Run the check against `state`. On acceptance build the action and
    /// dispatch it. Returns whether it was dispatched; a panicking check
    /// counts as a rejection.
    pub fn run<D: Dispatcher>(&self, state: &S, dispatcher: &D) -> bool {
        let accepted = panic::catch_unwind(AssertUnwindSafe(|| (self.check)(state, &self.args)))
            .unwrap_or_else(|_| {
                log::warn!(target: "casegen::validate", "check for {} panicked", self.creator);
                false
            });
        if accepted {
            dispatcher.dispatch(self.creator.call(self.args.clone()));
        } else {
            log::debug!(target: "casegen::validate", "{} rejected", self.creator);
        }
        accepted
    }
}
