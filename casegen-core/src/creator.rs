//! Action creators: functions that build well-formed actions for one case.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use casegen_types::Action;

type BuildAction = Arc<dyn Fn(&str, Vec<Value>) -> Action + Send + Sync>;

/// Build the argument list for [`ActionCreator::call`] from serializable values.
///
/// ```rust,ignore
/// let action = actions.leaf("setNameA").unwrap().call(args!["John", "Doe"]);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$(::serde_json::json!($arg)),*]
    };
}

/// The creator half of a tuple handler: given a type path, yields the
/// [`ActionCreator`] for that path.
#[derive(Clone)]
pub struct CreatorFactory {
    arity: usize,
    build: BuildAction,
}

impl CreatorFactory {
    /// `build` receives the type path and the call arguments.
    pub fn new<F>(arity: usize, build: F) -> Self
    where
        F: Fn(&str, Vec<Value>) -> Action + Send + Sync + 'static,
    {
        Self {
            arity,
            build: Arc::new(build),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn create(&self, action_type: impl Into<String>) -> ActionCreator {
        let action_type: String = action_type.into();
        ActionCreator {
            action_type: Arc::from(action_type),
            arity: self.arity,
            build: Arc::clone(&self.build),
        }
    }
}

impl fmt::Debug for CreatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorFactory")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Builds actions whose `type` is fixed to one action type path.
///
/// Displays (and serializes) as that path, so it can stand in for the type
/// string when matching on incoming actions.
#[derive(Clone)]
pub struct ActionCreator {
    action_type: Arc<str>,
    arity: usize,
    build: BuildAction,
}

impl ActionCreator {
    /// Build the action. How `args` become a payload depends on the handler
    /// this creator was derived from.
    pub fn call(&self, args: Vec<Value>) -> Action {
        (self.build)(self.action_type(), args)
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Number of arguments the creator expects.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn matches(&self, action: &Action) -> bool {
        action.action_type() == &*self.action_type
    }
}

impl fmt::Display for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.action_type)
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("action_type", &self.action_type)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl Serialize for ActionCreator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.action_type)
    }
}
