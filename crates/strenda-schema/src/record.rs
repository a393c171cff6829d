//! # Decoded Records
//!
//! The output of a successful validation: exactly the declared fields of the
//! schema, each holding a value of its declared kind, plus whichever envelope
//! tags were present. Undeclared input keys are not carried over.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};
use strenda_core::{JsonLd, CONTEXT_KEY, ID_KEY, TYPE_KEY};

/// A field value of a validated record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A JSON number, kept in its original representation.
    Number(Number),
    Text(String),
    /// A nested record of a referenced schema.
    Record(Record),
}

impl FieldValue {
    /// Build a number value. Returns `None` for NaN and infinities.
    pub fn number(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self::Number)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Value equality with numbers compared numerically, so `12` matches `12.0`.
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.as_f64() == b.as_f64(),
            _ => self == other,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(s) => Value::String(s.clone()),
            Self::Record(r) => r.to_value(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

/// A record that conforms to its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: String,
    envelope: JsonLd,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub(crate) fn new(
        schema: impl Into<String>,
        envelope: JsonLd,
        fields: BTreeMap<String, FieldValue>,
    ) -> Self {
        Self {
            schema: schema.into(),
            envelope,
            fields,
        }
    }

    /// Name of the schema the record was validated against.
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    pub fn envelope(&self) -> &JsonLd {
        &self.envelope
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_f64)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    /// Declared fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render back to a JSON object, envelope tags included when present.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(ctx) = &self.envelope.context {
            obj.insert(CONTEXT_KEY.to_string(), Value::Object(ctx.clone()));
        }
        if let Some(id) = &self.envelope.id {
            obj.insert(ID_KEY.to_string(), Value::String(id.clone()));
        }
        if let Some(t) = &self.envelope.ld_type {
            obj.insert(TYPE_KEY.to_string(), Value::String(t.clone()));
        }
        for (name, value) in &self.fields {
            obj.insert(name.clone(), value.to_value());
        }
        Value::Object(obj)
    }
}
