//! # Runtime Value Kinds
//!
//! Classifies untyped JSON values by their runtime shape. Used by the
//! validation engine to report the kind actually observed when a field
//! does not match its declaration.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The runtime kind of an untyped JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// The lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            (-1.0e9f64..1.0e9).prop_map(Value::from),
            "[a-z0-9 ]{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    #[test]
    fn classifies_every_json_shape() {
        assert_eq!(ValueKind::of(&Value::Null), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(0.82)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!(12)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!(-3)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("82")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1, 2])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Object);
    }

    #[test]
    fn numeric_string_is_a_string() {
        assert_eq!(ValueKind::of(&json!("0.82")), ValueKind::String);
    }

    #[test]
    fn display_matches_serde_name() {
        for kind in [
            ValueKind::Null,
            ValueKind::Boolean,
            ValueKind::Number,
            ValueKind::String,
            ValueKind::Array,
            ValueKind::Object,
        ] {
            let serialized = serde_json::to_value(kind).unwrap();
            assert_eq!(serialized, json!(kind.to_string()));
        }
    }

    proptest! {
        /// Exactly one `is_*` predicate holds, and it agrees with the kind.
        #[test]
        fn kind_agrees_with_value_predicates(value in arb_json()) {
            let expected = match &value {
                v if v.is_null() => ValueKind::Null,
                v if v.is_boolean() => ValueKind::Boolean,
                v if v.is_number() => ValueKind::Number,
                v if v.is_string() => ValueKind::String,
                v if v.is_array() => ValueKind::Array,
                _ => ValueKind::Object,
            };
            prop_assert_eq!(ValueKind::of(&value), expected);
        }
    }
}
