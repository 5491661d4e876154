//! The action record that flows from action creators into reducers.
//!
//! Serialized shape is `{"type": ..., "payload"?: ..., ..extra}`: the `type`
//! discriminant is mandatory, `payload` is omitted entirely when absent, and
//! any ad-hoc fields of custom actions sit next to them in the same object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record describing an intended state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Action {
    /// An action with only a `type` and no payload key.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
            extra: Map::new(),
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attach an ad-hoc field. `type` and `payload` are reserved and go
    /// through their own setters instead.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        match name.as_str() {
            "type" => {
                if let Value::String(s) = value {
                    self.action_type = s;
                }
            }
            "payload" => self.payload = Some(value),
            _ => {
                self.extra.insert(name, value);
            }
        }
        self
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn into_payload(self) -> Option<Value> {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_action_has_no_payload_key() {
        let action = Action::new("nested/incrementAge");
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value, json!({ "type": "nested/incrementAge" }));
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn null_payload_keeps_the_key() {
        let action = Action::new("setName").with_payload(Value::Null);
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 2);
        assert_eq!(value["payload"], Value::Null);
    }

    #[test]
    fn extra_fields_are_flattened() {
        let action = Action::new("setNameC")
            .with_payload(json!("John Doe"))
            .with_field("meta", json!({ "source": "test" }));
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({ "type": "setNameC", "payload": "John Doe", "meta": { "source": "test" } })
        );
    }

    #[test]
    fn reserved_field_names_route_to_their_slots() {
        let action = Action::new("a")
            .with_field("type", json!("b"))
            .with_field("payload", json!(3));
        assert_eq!(action.action_type(), "b");
        assert_eq!(action.payload(), Some(&json!(3)));
        assert!(action.extra().is_empty());
    }

    #[test]
    fn deserializes_store_shaped_json() {
        let action: Action =
            serde_json::from_str(r#"{"type":"age/set","payload":1,"meta":true}"#).unwrap();
        assert_eq!(action.action_type(), "age/set");
        assert_eq!(action.payload(), Some(&json!(1)));
        assert_eq!(action.field("meta"), Some(&json!(true)));
    }

    #[test]
    fn deserializes_without_payload() {
        let action: Action = serde_json::from_str(r#"{"type":"@@INIT"}"#).unwrap();
        assert!(!action.has_payload());
    }
}
