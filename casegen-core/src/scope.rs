//! Lifting a handler map onto one field of a larger state.
//!
//! Scoping rewrites only the reducer half of each leaf. Action creators keep
//! building the same actions, so call sites of an inner map do not change
//! when it is mounted inside an outer one.

use std::sync::Arc;

use serde_json::{Map, Value};

use casegen_types::Action;

use crate::handler::{normalize, Handler, HandlerMap, Transform, TupleHandler};

type Focus<O, I> = Arc<dyn Fn(&mut O) -> &mut I + Send + Sync>;

/// A named accessor to one field of an outer state.
pub struct Lens<O, I> {
    key: String,
    focus: Focus<O, I>,
}

impl<O, I> Lens<O, I> {
    /// ```rust,ignore
    /// let user = Lens::new("user", |state: &mut AppState| &mut state.user);
    /// ```
    pub fn new<F>(key: impl Into<String>, focus: F) -> Self
    where
        F: Fn(&mut O) -> &mut I + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            focus: Arc::new(focus),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<O, I> Clone for Lens<O, I> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            focus: Arc::clone(&self.focus),
        }
    }
}

/// Rewrite every case reducer of `map` through `lift`.
fn lift_reducers<I, O, F>(map: &HandlerMap<I>, lift: F) -> HandlerMap<O>
where
    I: 'static,
    O: 'static,
    F: Fn(Transform<I>) -> Transform<O> + Send + Sync + 'static,
{
    let lift = Arc::new(lift);
    map.map_leaves(|handler, _| {
        let TupleHandler { creator, reducer } = normalize(handler.clone());
        let lift = Arc::clone(&lift);
        Handler::tuple(creator, move |action: &Action| lift(reducer(action)))
    })
}

/// Make `map` operate on the field `lens` focuses; the rest of the outer
/// state is carried through untouched.
pub fn scope<O, I>(lens: Lens<O, I>, map: HandlerMap<I>) -> HandlerMap<O>
where
    O: 'static,
    I: Clone + 'static,
{
    let focus = lens.focus;
    lift_reducers(&map, move |inner: Transform<I>| -> Transform<O> {
        let focus = Arc::clone(&focus);
        Box::new(move |mut outer: O| {
            let slot = focus(&mut outer);
            let old = slot.clone();
            *slot = inner(old);
            outer
        })
    })
}

/// [`scope`] for dynamic JSON states: `{...state, [key]: reduce(state[key])}`.
///
/// A missing field reads as `null`; a state that is not an object is
/// replaced by `{key: value}`.
pub fn scope_key(key: impl Into<String>, map: HandlerMap<Value>) -> HandlerMap<Value> {
    let key: String = key.into();
    lift_reducers(&map, move |inner: Transform<Value>| -> Transform<Value> {
        let key = key.clone();
        Box::new(move |outer: Value| {
            let mut fields = match outer {
                Value::Object(fields) => fields,
                _ => Map::new(),
            };
            let old = fields.remove(&key).unwrap_or(Value::Null);
            fields.insert(key, inner(old));
            Value::Object(fields)
        })
    })
}
