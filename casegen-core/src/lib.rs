//! # casegen-core
//!
//! Derives action creators and a reducer from a declarative map of case
//! handlers, for Redux-style state containers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use casegen_core::{args, generate, GenerateOptions, Handler, HandlerMap};
//! use casegen_types::Tree;
//!
//! let map: HandlerMap<Person> = Tree::new()
//!     .with_leaf("setName", Handler::unary(|name: String| move |p: Person| Person { name, ..p }));
//!
//! let generated = generate(map, GenerateOptions::new())?;
//! let set_name = generated.actions.leaf("setName").unwrap();
//! let next = generated.reducer.reduce(person, &set_name.call(args!["Alice"]));
//! ```
//!
//! ## Module Overview
//!
//! - [`handler`]: `Handler` forms, `Arity`, and `normalize` into creator/reducer pairs
//! - [`creator`]: `ActionCreator`, `CreatorFactory`, and the `args!` macro
//! - [`generate`]: `generate()`, the `DispatchTable` and `Reducer` it produces
//! - [`scope`]: mounting a handler map on one field of a larger state
//! - [`bind`]: binding creators to a dispatcher, immediately or through thunks
//! - [`validate`]: creators that dispatch only when a state check accepts
//! - [`config`]: `GenerateOptions`, including TOML loading
//! - [`error`]: `GenerateError` and `PayloadError`

pub mod bind;
pub mod config;
pub mod creator;
pub mod error;
pub mod generate;
pub mod handler;
pub mod scope;
pub mod validate;

pub use bind::{bind, bind_deferred, Bound, BoundThunk, Thunk};
pub use config::GenerateOptions;
pub use creator::{ActionCreator, CreatorFactory};
pub use error::{GenerateError, PayloadError};
pub use generate::{generate, DispatchTable, Generated, Reducer};
pub use handler::{normalize, Arity, CaseReducer, Handler, HandlerMap, SimpleHandler, Transform, TupleHandler};
pub use scope::{scope, scope_key, Lens};
pub use validate::{validate, Validated, ValidatedThunk};
