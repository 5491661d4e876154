//! Shared fixtures: a `Person` handler map and a minimal store.

#![allow(dead_code)]

use std::cell::RefCell;

use casegen_core::{scope, Handler, HandlerMap, Lens, Reducer};
use casegen_types::{Action, Tree};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

pub fn initial_state() -> Person {
    Person {
        name: "Joe Schmoe".into(),
        age: 37,
    }
}

pub fn person(name: &str, age: u32) -> Person {
    Person {
        name: name.into(),
        age,
    }
}

fn set_name() -> Handler<Person> {
    Handler::unary(|name: String| move |p: Person| Person { name, ..p })
}

fn age_handlers() -> HandlerMap<u32> {
    Tree::new()
        .with_leaf("set", Handler::unary(|age: u32| move |_: u32| age))
        .with_leaf("inc", Handler::nullary(|| |age: u32| age + 1))
        .with_branch(
            "nested",
            Tree::new().with_leaf("set", Handler::unary(|age: u32| move |_: u32| age)),
        )
}

/// Every handler form, nested maps, and a scoped sub-map.
pub fn person_handlers() -> HandlerMap<Person> {
    Tree::new()
        .with_leaf("setName", set_name())
        .with_leaf(
            "setNameA",
            Handler::binary(|first: String, last: String| {
                move |p: Person| Person {
                    name: format!("{} {}", first, last),
                    ..p
                }
            }),
        )
        .with_leaf(
            "setNameB",
            Handler::custom_payload(
                2,
                |args: Vec<Value>| {
                    args.iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(" ")
                },
                |name: String| move |p: Person| Person { name, ..p },
            ),
        )
        .with_leaf(
            "setNameC",
            Handler::custom_action(
                2,
                |action_type, args| {
                    let first = args.first().and_then(Value::as_str).unwrap_or_default();
                    let last = args.get(1).and_then(Value::as_str).unwrap_or_default();
                    Action::new(action_type)
                        .with_payload(Value::String(format!("{} {}", first, last)))
                        .with_field("parts", Value::from(args.len()))
                },
                |action: &Action| {
                    let name = action
                        .payload()
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    move |p: Person| Person { name, ..p }
                },
            ),
        )
        .with_branch(
            "nested",
            Tree::new()
                .with_leaf(
                    "incrementAge",
                    Handler::nullary(|| |p: Person| Person { age: p.age + 1, ..p }),
                )
                .with_branch("deeper", Tree::new().with_leaf("setName", set_name())),
        )
        .with_branch(
            "age",
            scope(Lens::new("age", |p: &mut Person| &mut p.age), age_handlers()),
        )
}

/// A store that records every dispatched action.
pub struct Store<S> {
    state: RefCell<Option<S>>,
    reducer: Reducer<S>,
    history: RefCell<Vec<Action>>,
}

impl<S: Clone> Store<S> {
    pub fn new(reducer: Reducer<S>, state: Option<S>) -> Self {
        Self {
            state: RefCell::new(state),
            reducer,
            history: RefCell::new(Vec::new()),
        }
    }

    /// Reduce `action` into the held state; returns the number of actions seen.
    pub fn dispatch(&self, action: Action) -> usize {
        let current = self.state.borrow_mut().take();
        let next = self.reducer.reduce_or_init(current, &action);
        *self.state.borrow_mut() = next;
        self.history.borrow_mut().push(action);
        self.history.borrow().len()
    }

    pub fn state(&self) -> Option<S> {
        self.state.borrow().clone()
    }

    pub fn history(&self) -> Vec<Action> {
        self.history.borrow().clone()
    }
}
