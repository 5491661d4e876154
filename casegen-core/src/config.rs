//! Generation options: code-first through the builder, or loaded from TOML.
//!
//! ```toml
//! prefix = "user"
//! on_duplicate = "last-wins"
//! ```

use serde::Deserialize;

use casegen_types::Collision;

use crate::error::GenerateError;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    prefix: Option<String>,
    #[serde(default)]
    on_duplicate: Collision,
}

/// Options for [`generate`](crate::generate::generate).
#[derive(Debug, Clone)]
pub struct GenerateOptions<S> {
    pub(crate) prefix: Option<String>,
    pub(crate) initial_state: Option<S>,
    pub(crate) on_duplicate: Collision,
}

impl<S> GenerateOptions<S> {
    pub fn new() -> Self {
        Self {
            prefix: None,
            initial_state: None,
            on_duplicate: Collision::Reject,
        }
    }

    /// Load the state-independent options from a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, GenerateError> {
        let file: OptionsFile = toml::from_str(source)?;
        Ok(Self {
            prefix: file.prefix.filter(|p| !p.is_empty()),
            initial_state: None,
            on_duplicate: file.on_duplicate,
        })
    }

    /// Prepend `prefix/` to every action type. An empty prefix is ignored.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into()).filter(|p| !p.is_empty());
        self
    }

    /// State substituted when the reducer is handed no state.
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn on_duplicate(mut self, policy: Collision) -> Self {
        self.on_duplicate = policy;
        self
    }

    pub fn prefix_str(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl<S> Default for GenerateOptions<S> {
    fn default() -> Self {
        Self::new()
    }
}
