//! Case handlers and their normalization into creator/reducer pairs.
//!
//! A handler comes in one of two forms:
//!
//! - **Simple**: a declared [`Arity`] and a body that turns the call
//!   arguments into a state transform. The arity decides how the derived
//!   action creator packs its arguments into a payload.
//! - **Tuple**: an explicit [`CreatorFactory`] plus [`CaseReducer`], for
//!   callers that want full control over the action shape.
//!
//! [`normalize`] turns either form into a [`TupleHandler`].

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use casegen_types::{Action, Tree};

use crate::creator::CreatorFactory;
use crate::error::PayloadError;

/// A state transition produced for one action.
pub type Transform<S> = Box<dyn FnOnce(S) -> S>;

/// `action -> state -> state` for one case.
pub type CaseReducer<S> = Arc<dyn Fn(&Action) -> Transform<S> + Send + Sync>;

/// A nested map of handlers, keyed by action name.
pub type HandlerMap<S> = Tree<Handler<S>>;

type Body<S> = Arc<dyn Fn(Vec<Value>) -> Result<Transform<S>, PayloadError> + Send + Sync>;

/// Declared parameter count of a simple handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No payload.
    Nullary,
    /// The payload is the single argument.
    Unary,
    /// The payload is an array of up to `n` arguments (`n >= 2`).
    Variadic(usize),
}

impl Arity {
    pub fn count(self) -> usize {
        match self {
            Arity::Nullary => 0,
            Arity::Unary => 1,
            Arity::Variadic(n) => n,
        }
    }
}

impl From<usize> for Arity {
    fn from(n: usize) -> Self {
        match n {
            0 => Arity::Nullary,
            1 => Arity::Unary,
            n => Arity::Variadic(n),
        }
    }
}

pub(crate) fn identity<S: 'static>() -> Transform<S> {
    Box::new(|state| state)
}

fn boxed<S, T>(transform: T) -> Transform<S>
where
    T: FnOnce(S) -> S + 'static,
{
    Box::new(transform)
}

/// Decode positional argument `index`, reading a missing one as `null`.
fn arg<A: DeserializeOwned>(args: &[Value], index: usize) -> Result<A, PayloadError> {
    let value = args.get(index).cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|source| PayloadError::Decode { index, source })
}

/// A handler of declared arity whose body maps call arguments to a transform.
pub struct SimpleHandler<S> {
    arity: Arity,
    body: Body<S>,
}

impl<S: 'static> SimpleHandler<S> {
    /// Wrap a fallible body. A body error leaves the state unchanged.
    pub fn new<F>(arity: Arity, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Transform<S>, PayloadError> + Send + Sync + 'static,
    {
        Self {
            arity,
            body: Arc::new(body),
        }
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    fn into_tuple(self) -> TupleHandler<S> {
        let SimpleHandler { arity, body } = self;
        let creator = match arity {
            Arity::Nullary => CreatorFactory::new(0, |action_type, _| Action::new(action_type)),
            Arity::Unary => CreatorFactory::new(1, |action_type, args| {
                let payload = args.into_iter().next().unwrap_or(Value::Null);
                Action::new(action_type).with_payload(payload)
            }),
            Arity::Variadic(n) => CreatorFactory::new(n, move |action_type, mut args| {
                args.truncate(n);
                Action::new(action_type).with_payload(Value::Array(args))
            }),
        };
        let reducer: CaseReducer<S> = Arc::new(move |action: &Action| {
            match spread(arity, action).and_then(|args| body(args)) {
                Ok(transform) => transform,
                Err(e) => {
                    log::warn!(target: "casegen::handler", "ignoring {}: {}", action.action_type(), e);
                    identity()
                }
            }
        });
        TupleHandler { creator, reducer }
    }
}

/// Unpack a payload into the positional arguments of a handler.
fn spread(arity: Arity, action: &Action) -> Result<Vec<Value>, PayloadError> {
    match arity {
        Arity::Nullary => Ok(Vec::new()),
        Arity::Unary => Ok(vec![action.payload().cloned().unwrap_or(Value::Null)]),
        Arity::Variadic(n) => match action.payload() {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(_) => Err(PayloadError::NotASequence { arity: n }),
        },
    }
}

impl<S> Clone for SimpleHandler<S> {
    fn clone(&self) -> Self {
        Self {
            arity: self.arity,
            body: Arc::clone(&self.body),
        }
    }
}

/// A handler already split into creator factory and case reducer.
pub struct TupleHandler<S> {
    pub creator: CreatorFactory,
    pub reducer: CaseReducer<S>,
}

impl<S> Clone for TupleHandler<S> {
    fn clone(&self) -> Self {
        Self {
            creator: self.creator.clone(),
            reducer: Arc::clone(&self.reducer),
        }
    }
}

/// One case of a handler map.
pub enum Handler<S> {
    Simple(SimpleHandler<S>),
    Tuple(TupleHandler<S>),
}

impl<S> Clone for Handler<S> {
    fn clone(&self) -> Self {
        match self {
            Handler::Simple(h) => Handler::Simple(h.clone()),
            Handler::Tuple(h) => Handler::Tuple(h.clone()),
        }
    }
}

impl<S> fmt::Debug for Handler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Simple(h) => f.debug_tuple("Simple").field(&h.arity).finish(),
            Handler::Tuple(h) => f.debug_tuple("Tuple").field(&h.creator).finish(),
        }
    }
}

impl<S: 'static> Handler<S> {
    /// A handler whose action carries no payload.
    pub fn nullary<F, T>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: FnOnce(S) -> S + 'static,
    {
        Handler::Simple(SimpleHandler::new(Arity::Nullary, move |_| Ok(boxed(f()))))
    }

    /// A handler whose payload is its single argument.
    pub fn unary<A, F, T>(f: F) -> Self
    where
        A: DeserializeOwned,
        F: Fn(A) -> T + Send + Sync + 'static,
        T: FnOnce(S) -> S + 'static,
    {
        Handler::Simple(SimpleHandler::new(Arity::Unary, move |args| {
            Ok(boxed(f(arg(&args, 0)?)))
        }))
    }

    pub fn binary<A, B, F, T>(f: F) -> Self
    where
        A: DeserializeOwned,
        B: DeserializeOwned,
        F: Fn(A, B) -> T + Send + Sync + 'static,
        T: FnOnce(S) -> S + 'static,
    {
        Handler::Simple(SimpleHandler::new(Arity::Variadic(2), move |args| {
            Ok(boxed(f(arg(&args, 0)?, arg(&args, 1)?)))
        }))
    }

    pub fn ternary<A, B, C, F, T>(f: F) -> Self
    where
        A: DeserializeOwned,
        B: DeserializeOwned,
        C: DeserializeOwned,
        F: Fn(A, B, C) -> T + Send + Sync + 'static,
        T: FnOnce(S) -> S + 'static,
    {
        Handler::Simple(SimpleHandler::new(Arity::Variadic(3), move |args| {
            Ok(boxed(f(arg(&args, 0)?, arg(&args, 1)?, arg(&args, 2)?)))
        }))
    }

    /// A handler over raw arguments. `f` sees exactly what the payload held,
    /// which may be fewer than `arity` values.
    pub fn variadic<F, T>(arity: usize, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> T + Send + Sync + 'static,
        T: FnOnce(S) -> S + 'static,
    {
        Handler::Simple(SimpleHandler::new(Arity::from(arity), move |args| {
            Ok(boxed(f(args)))
        }))
    }

    /// An explicit creator factory and case reducer.
    pub fn tuple<R, T>(creator: CreatorFactory, reducer: R) -> Self
    where
        R: Fn(&Action) -> T + Send + Sync + 'static,
        T: FnOnce(S) -> S + 'static,
    {
        Handler::Tuple(TupleHandler {
            creator,
            reducer: Arc::new(move |action: &Action| boxed(reducer(action))),
        })
    }

    /// The creator computes the payload from its `arity` arguments; the
    /// handler receives that payload decoded back into `P`.
    pub fn custom_payload<P, C, H, T>(arity: usize, payload: C, handler: H) -> Self
    where
        P: Serialize + DeserializeOwned,
        C: Fn(Vec<Value>) -> P + Send + Sync + 'static,
        H: Fn(P) -> T + Send + Sync + 'static,
        T: FnOnce(S) -> S + 'static,
    {
        let creator = CreatorFactory::new(arity, move |action_type, args| {
            let payload = serde_json::to_value(payload(args)).unwrap_or_else(|e| {
                log::warn!(target: "casegen::handler", "{} payload did not serialize: {}", action_type, e);
                Value::Null
            });
            Action::new(action_type).with_payload(payload)
        });
        Handler::Tuple(TupleHandler {
            creator,
            reducer: Arc::new(move |action: &Action| {
                let value = action.payload().cloned().unwrap_or(Value::Null);
                match serde_json::from_value(value) {
                    Ok(decoded) => boxed(handler(decoded)),
                    Err(e) => {
                        log::warn!(target: "casegen::handler", "ignoring {}: {}", action.action_type(), e);
                        identity()
                    }
                }
            }),
        })
    }

    /// The creator builds the whole action, ad-hoc fields included; the
    /// handler receives the whole action back.
    pub fn custom_action<B, R, T>(arity: usize, build: B, reducer: R) -> Self
    where
        B: Fn(&str, Vec<Value>) -> Action + Send + Sync + 'static,
        R: Fn(&Action) -> T + Send + Sync + 'static,
        T: FnOnce(S) -> S + 'static,
    {
        Handler::tuple(CreatorFactory::new(arity, build), reducer)
    }
}

/// Bring any handler into tuple form. Tuple handlers pass through untouched.
pub fn normalize<S: 'static>(handler: Handler<S>) -> TupleHandler<S> {
    match handler {
        Handler::Tuple(tuple) => tuple,
        Handler::Simple(simple) => simple.into_tuple(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use serde_json::json;

    fn apply<S: 'static>(tuple: &TupleHandler<S>, action: &Action, state: S) -> S {
        (tuple.reducer)(action)(state)
    }

    #[test]
    fn nullary_creator_drops_arguments() {
        let tuple = normalize(Handler::nullary(|| |n: u32| n + 1));
        let creator = tuple.creator.create("inc");
        let action = creator.call(args!["a", "b", "c"]);
        assert_eq!(action, Action::new("inc"));
        assert!(!action.has_payload());
        assert_eq!(creator.arity(), 0);
        assert_eq!(apply(&tuple, &action, 1), 2);
    }

    #[test]
    fn unary_creator_keeps_first_argument() {
        let tuple = normalize(Handler::unary(|n: u32| move |_: u32| n));
        let creator = tuple.creator.create("set");
        assert_eq!(creator.call(args![5, 6, 7]).payload(), Some(&json!(5)));
        let missing = creator.call(vec![]);
        assert_eq!(missing.payload(), Some(&Value::Null));
        assert_eq!(creator.arity(), 1);
        assert_eq!(apply(&tuple, &creator.call(args![9]), 0), 9);
    }

    #[test]
    fn variadic_creator_truncates_to_arity() {
        let tuple = normalize(Handler::binary(|a: String, b: String| {
            move |_: String| format!("{} {}", a, b)
        }));
        let creator = tuple.creator.create("setNameA");
        assert_eq!(creator.arity(), 2);
        assert_eq!(creator.call(args!["a", "b", "c"]).payload(), Some(&json!(["a", "b"])));
        assert_eq!(creator.call(args!["a"]).payload(), Some(&json!(["a"])));
        assert_eq!(creator.call(vec![]).payload(), Some(&json!([])));

        let action = creator.call(args!["John", "Doe"]);
        assert_eq!(apply(&tuple, &action, String::new()), "John Doe");
    }

    #[test]
    fn typed_handlers_read_missing_arguments_as_null() {
        let tuple = normalize(Handler::binary(|a: u32, b: Option<u32>| {
            move |_: u32| a + b.unwrap_or(100)
        }));
        let action = tuple.creator.create("add").call(args![1]);
        assert_eq!(apply(&tuple, &action, 0), 101);
    }

    #[test]
    fn ternary_spreads_three_arguments() {
        let tuple = normalize(Handler::ternary(|a: u32, b: u32, c: u32| {
            move |s: u32| s + a * 100 + b * 10 + c
        }));
        let action = tuple.creator.create("abc").call(args![1, 2, 3, 4]);
        assert_eq!(action.payload(), Some(&json!([1, 2, 3])));
        assert_eq!(apply(&tuple, &action, 1000), 1123);
    }

    #[test]
    fn raw_variadic_sees_supplied_arguments_only() {
        let tuple = normalize(Handler::variadic(3, |args: Vec<Value>| {
            move |_: usize| args.len()
        }));
        let creator = tuple.creator.create("count");
        assert_eq!(creator.arity(), 3);
        assert_eq!(apply(&tuple, &creator.call(args![1, 2]), 0), 2);
        assert_eq!(apply(&tuple, &creator.call(args![1, 2, 3, 4, 5]), 0), 3);
    }

    #[test]
    fn variadic_arity_below_two_collapses() {
        assert_eq!(Arity::from(0), Arity::Nullary);
        assert_eq!(Arity::from(1), Arity::Unary);
        assert_eq!(Arity::from(4), Arity::Variadic(4));
        assert_eq!(Arity::Variadic(4).count(), 4);
    }

    #[test]
    fn undecodable_payload_leaves_state_unchanged() {
        let tuple = normalize(Handler::unary(|n: u32| move |_: u32| n));
        let bad = Action::new("set").with_payload(json!("not a number"));
        assert_eq!(apply(&tuple, &bad, 7), 7);

        let pair = normalize(Handler::binary(|a: u32, b: u32| move |_: u32| a + b));
        let not_array = Action::new("add").with_payload(json!(3));
        assert_eq!(apply(&pair, &not_array, 7), 7);
    }

    #[test]
    fn normalizing_a_tuple_is_identity() {
        let tuple = match Handler::custom_action(
            1,
            |action_type, args| Action::new(action_type).with_field("value", args[0].clone()),
            |_: &Action| |s: u32| s,
        ) {
            Handler::Tuple(tuple) => tuple,
            Handler::Simple(_) => unreachable!(),
        };
        let reducer = Arc::clone(&tuple.reducer);
        let normalized = normalize(Handler::Tuple(tuple));
        assert!(Arc::ptr_eq(&reducer, &normalized.reducer));
    }

    #[test]
    fn custom_payload_pipes_creator_into_handler() {
        let tuple = normalize(Handler::custom_payload(
            2,
            |args: Vec<Value>| {
                args.iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" ")
            },
            |name: String| move |_: String| name,
        ));
        let creator = tuple.creator.create("setNameB");
        assert_eq!(creator.arity(), 2);
        let action = creator.call(args!["John", "Doe"]);
        assert_eq!(action.payload(), Some(&json!("John Doe")));
        assert_eq!(apply(&tuple, &action, String::new()), "John Doe");
    }

    #[test]
    fn custom_action_keeps_ad_hoc_fields() {
        let tuple = normalize(Handler::custom_action(
            1,
            |action_type, args| {
                Action::new(action_type).with_field("by", args.into_iter().next().unwrap_or(Value::Null))
            },
            |action: &Action| {
                let by = action.field("by").and_then(Value::as_u64).unwrap_or(0);
                move |s: u64| s + by
            },
        ));
        let action = tuple.creator.create("bump").call(args![5]);
        assert_eq!(serde_json::to_value(&action).unwrap(), json!({ "type": "bump", "by": 5 }));
        assert_eq!(apply(&tuple, &action, 1), 6);
    }
}
