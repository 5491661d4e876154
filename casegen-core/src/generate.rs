//! Action creators and a reducer derived from one handler map.
//!
//! [`generate`] normalizes every leaf, flattens the result into a
//! [`DispatchTable`] keyed by action type path, and maps the same tree into
//! [`ActionCreator`]s. The table is built once and shared read-only by every
//! clone of the [`Reducer`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use casegen_types::{join_path, Action, Tree};

use crate::config::GenerateOptions;
use crate::creator::ActionCreator;
use crate::error::GenerateError;
use crate::handler::{normalize, CaseReducer, HandlerMap, TupleHandler};

/// Flattened mapping from action type path to case reducer.
pub struct DispatchTable<S> {
    reducers: BTreeMap<String, CaseReducer<S>>,
}

impl<S> DispatchTable<S> {
    pub fn get(&self, action_type: &str) -> Option<&CaseReducer<S>> {
        self.reducers.get(action_type)
    }

    pub fn contains(&self, action_type: &str) -> bool {
        self.reducers.contains_key(action_type)
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }

    /// Action types in lexical order.
    pub fn action_types(&self) -> impl Iterator<Item = &str> {
        self.reducers.keys().map(String::as_str)
    }
}

impl<S> fmt::Debug for DispatchTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.reducers.keys()).finish()
    }
}

/// `(state, action) -> state` over a whole handler map.
pub struct Reducer<S> {
    table: Arc<DispatchTable<S>>,
    initial_state: Option<S>,
}

impl<S> Reducer<S> {
    /// Apply the case reducer registered for `action`'s type. Unknown types
    /// hand `state` straight back.
    pub fn reduce(&self, state: S, action: &Action) -> S {
        match self.table.get(action.action_type()) {
            Some(case_reducer) => case_reducer(action)(state),
            None => state,
        }
    }

    /// Like [`Reducer::reduce`], substituting the initial state for `None`.
    ///
    /// Without an initial state a `None` stays `None`; there is nothing for a
    /// case reducer to run on.
    pub fn reduce_or_init(&self, state: Option<S>, action: &Action) -> Option<S>
    where
        S: Clone,
    {
        match state.or_else(|| self.initial_state.clone()) {
            Some(state) => Some(self.reduce(state, action)),
            None => {
                log::debug!(target: "casegen::generate", "no state to reduce {}", action.action_type());
                None
            }
        }
    }

    pub fn initial_state(&self) -> Option<&S> {
        self.initial_state.as_ref()
    }

    /// Whether some case reducer is registered for `action_type`.
    pub fn handles(&self, action_type: &str) -> bool {
        self.table.contains(action_type)
    }

    pub fn action_types(&self) -> impl Iterator<Item = &str> {
        self.table.action_types()
    }

    pub fn table(&self) -> &DispatchTable<S> {
        &self.table
    }
}

impl<S: Clone> Clone for Reducer<S> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            initial_state: self.initial_state.clone(),
        }
    }
}

impl<S> fmt::Debug for Reducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("table", &self.table)
            .field("has_initial_state", &self.initial_state.is_some())
            .finish()
    }
}

/// The result of [`generate`].
#[derive(Debug)]
pub struct Generated<S> {
    /// Same shape as the handler map, one creator per leaf.
    pub actions: Tree<ActionCreator>,
    pub reducer: Reducer<S>,
}

/// Derive action creators and a reducer from `map`.
///
/// Fails only when two leaves flatten to the same action type and
/// `options` asks for [`Collision::Reject`](casegen_types::Collision::Reject).
pub fn generate<S: 'static>(
    map: HandlerMap<S>,
    options: GenerateOptions<S>,
) -> Result<Generated<S>, GenerateError> {
    let GenerateOptions {
        prefix,
        initial_state,
        on_duplicate,
    } = options;

    let normalized: Tree<TupleHandler<S>> = map.map_leaves(|handler, _| normalize(handler.clone()));

    let reducers = normalized
        .flatten(prefix.as_deref(), on_duplicate)?
        .into_iter()
        .map(|(action_type, tuple)| (action_type, Arc::clone(&tuple.reducer)))
        .collect();
    let table = DispatchTable { reducers };

    let root: Vec<String> = prefix.into_iter().collect();
    let actions = normalized.map_leaves_from(root, |tuple, path| {
        tuple.creator.create(join_path(None, path))
    });

    log::debug!(target: "casegen::generate", "generated {} case reducers", table.len());

    Ok(Generated {
        actions,
        reducer: Reducer {
            table: Arc::new(table),
            initial_state,
        },
    })
}
