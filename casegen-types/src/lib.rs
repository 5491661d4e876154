//! # casegen-types
//!
//! Plain data shared across the casegen workspace: the [`Action`] record that
//! stores and devtools key off, the nested [`Tree`] every handler map and
//! action-creator map is built on, and the [`Dispatcher`] seam to a store.

pub mod action;
pub mod dispatch;
pub mod tree;

pub use action::Action;
pub use dispatch::Dispatcher;
pub use tree::{join_path, Collision, DuplicatePath, Node, Tree, PATH_SEPARATOR};
