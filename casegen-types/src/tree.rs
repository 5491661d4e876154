//! Nested string-keyed trees and the walks over them.
//!
//! A handler map, the action-creator tree derived from it, and the bound
//! tree derived from that all share this one shape. Leaves and branches are
//! told apart by the [`Node`] variant, never by inspecting the leaf value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between path segments in an action type.
pub const PATH_SEPARATOR: &str = "/";

/// One entry of a [`Tree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node<L> {
    Leaf(L),
    Branch(Tree<L>),
}

impl<L> Node<L> {
    pub fn as_leaf(&self) -> Option<&L> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Tree<L>> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(tree) => Some(tree),
        }
    }
}

/// An ordered mapping from key to leaf or nested tree.
///
/// Keys iterate in lexical order; consumers address entries by name, so
/// declaration order is not kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tree<L> {
    entries: BTreeMap<String, Node<L>>,
}

/// What [`Tree::flatten`] does when two paths join to the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collision {
    /// Fail with [`DuplicatePath`].
    #[default]
    Reject,
    /// Keep the leaf visited later (depth-first, key order) and log a warning.
    LastWins,
}

/// Two distinct leaves flattened to the same joined path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePath(pub String);

impl fmt::Display for DuplicatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate action type path: {}", self.0)
    }
}

impl std::error::Error for DuplicatePath {}

/// Join `segments` with [`PATH_SEPARATOR`], behind `prefix` when one is given.
/// An empty prefix counts as none.
pub fn join_path<S: AsRef<str>>(prefix: Option<&str>, segments: &[S]) -> String {
    let mut joined = String::new();
    if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
        joined.push_str(prefix);
    }
    for segment in segments {
        if !joined.is_empty() {
            joined.push_str(PATH_SEPARATOR);
        }
        joined.push_str(segment.as_ref());
    }
    joined
}

impl<L> Tree<L> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with_leaf(mut self, key: impl Into<String>, leaf: L) -> Self {
        self.insert(key, Node::Leaf(leaf));
        self
    }

    pub fn with_branch(mut self, key: impl Into<String>, branch: Tree<L>) -> Self {
        self.insert(key, Node::Branch(branch));
        self
    }

    /// Insert or replace the entry at `key`, returning the old one.
    pub fn insert(&mut self, key: impl Into<String>, node: Node<L>) -> Option<Node<L>> {
        self.entries.insert(key.into(), node)
    }

    pub fn get(&self, key: &str) -> Option<&Node<L>> {
        self.entries.get(key)
    }

    /// Follow `path` through branches and return the leaf at its end.
    pub fn leaf_at(&self, path: &[&str]) -> Option<&L> {
        let (last, parents) = path.split_last()?;
        let mut tree = self;
        for key in parents {
            tree = tree.get(key)?.as_branch()?;
        }
        tree.get(last)?.as_leaf()
    }

    /// Shorthand for `leaf_at` with a `/`-joined path.
    pub fn leaf(&self, path: &str) -> Option<&L> {
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        self.leaf_at(&segments)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node<L>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of leaves at any depth.
    pub fn len_leaves(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                Node::Leaf(_) => 1,
                Node::Branch(tree) => tree.len_leaves(),
            })
            .sum()
    }

    /// Build a same-shaped tree with every leaf replaced by
    /// `f(leaf, path_from_root)`.
    pub fn map_leaves<M, F>(&self, f: F) -> Tree<M>
    where
        F: FnMut(&L, &[String]) -> M,
    {
        self.map_leaves_from(Vec::new(), f)
    }

    /// Like [`Tree::map_leaves`], with `root` seeding every path.
    pub fn map_leaves_from<M, F>(&self, root: Vec<String>, mut f: F) -> Tree<M>
    where
        F: FnMut(&L, &[String]) -> M,
    {
        let mut path = root;
        self.map_inner(&mut path, &mut f)
    }

    fn map_inner<M, F>(&self, path: &mut Vec<String>, f: &mut F) -> Tree<M>
    where
        F: FnMut(&L, &[String]) -> M,
    {
        let mut mapped = Tree::new();
        for (key, node) in &self.entries {
            path.push(key.clone());
            let node = match node {
                Node::Leaf(leaf) => Node::Leaf(f(leaf, path.as_slice())),
                Node::Branch(tree) => Node::Branch(tree.map_inner(path, f)),
            };
            path.pop();
            mapped.entries.insert(key.clone(), node);
        }
        mapped
    }

    /// Flatten to one entry per leaf keyed by its joined path.
    pub fn flatten(
        &self,
        prefix: Option<&str>,
        on_duplicate: Collision,
    ) -> Result<BTreeMap<String, &L>, DuplicatePath> {
        let mut flat = BTreeMap::new();
        let mut path = Vec::new();
        self.flatten_inner(prefix, on_duplicate, &mut path, &mut flat)?;
        Ok(flat)
    }

    fn flatten_inner<'a>(
        &'a self,
        prefix: Option<&str>,
        on_duplicate: Collision,
        path: &mut Vec<&'a str>,
        flat: &mut BTreeMap<String, &'a L>,
    ) -> Result<(), DuplicatePath> {
        for (key, node) in &self.entries {
            path.push(key.as_str());
            match node {
                Node::Leaf(leaf) => {
                    let joined = join_path(prefix, path.as_slice());
                    if flat.contains_key(&joined) {
                        match on_duplicate {
                            Collision::Reject => return Err(DuplicatePath(joined)),
                            Collision::LastWins => {
                                log::warn!(target: "casegen::tree", "{} declared twice, keeping the later leaf", joined);
                            }
                        }
                    }
                    flat.insert(joined, leaf);
                }
                Node::Branch(tree) => tree.flatten_inner(prefix, on_duplicate, path, flat)?,
            }
            path.pop();
        }
        Ok(())
    }
}

impl<L> Default for Tree<L> {
    fn default() -> Self {
        Self::new()
    }
}
