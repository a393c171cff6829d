//! # Validation Engine
//!
//! A single structural pass of an untyped `serde_json::Value` against a
//! schema. Every missing field and type mismatch is collected; the caller
//! gets either a [`Record`] or one [`ValidationError::Invalid`] listing all
//! violations with their full dotted path from the record root.
//!
//! ## Rules
//!
//! - The input must be an object, otherwise [`ValidationError::NotAnObject`]
//!   is returned immediately.
//! - `@context`, `@id` and `@type` are optional on every record. When present
//!   they must be a mapping, a string and a string respectively.
//! - Every declared field is required. `number` accepts JSON numbers only,
//!   `text` accepts JSON strings only; nothing is coerced.
//! - Nested-schema fields recurse with the field name prefixed to the path.
//! - Undeclared keys are ignored and do not appear in the output.
//!
//! Validation is pure. Recursion depth is bounded by the depth of the input
//! value, so self-referential schemas terminate on finite data.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use strenda_core::{JsonLd, ValueKind, CONTEXT_KEY, ID_KEY, TYPE_KEY};
use thiserror::Error;

use crate::record::{FieldValue, Record};
use crate::registry::{FieldKind, SchemaDeclarationError, SchemaHandle, SchemaRegistry};

/// Dotted path from the record root to a field, e.g. `inner.value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0.join("."))
        }
    }
}

impl From<&str> for FieldPath {
    fn from(dotted: &str) -> Self {
        Self(dotted.split('.').map(str::to_string).collect())
    }
}

/// What a field was expected to hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Kind(ValueKind),
    /// An object conforming to the named schema.
    Record(String),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Record(schema) => write!(f, "object ({schema})"),
        }
    }
}

/// The nature of a single field-level problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field has no key in the input.
    Missing,
    /// The field is present but holds the wrong kind of value.
    TypeMismatch { expected: Expected, actual: ValueKind },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("required field missing"),
            Self::TypeMismatch { expected, actual } => {
                write!(f, "expected {expected}, got {actual}")
            }
        }
    }
}

/// A single violation with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: FieldPath,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn missing(path: FieldPath) -> Self {
        Self {
            path,
            kind: ViolationKind::Missing,
        }
    }

    pub fn mismatch(path: FieldPath, expected: Expected, actual: &Value) -> Self {
        Self {
            path,
            kind: ViolationKind::TypeMismatch {
                expected,
                actual: ValueKind::of(actual),
            },
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.path, self.kind)
    }
}

/// All violations found in one validation pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// The violation recorded at `path`, if any.
    pub fn at(&self, path: &str) -> Option<&Violation> {
        self.0.iter().find(|v| v.path.to_string() == path)
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }

    fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Errors returned by validation and typed decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The top-level input is not an object.
    #[error("expected an object for schema '{schema}', got {actual}")]
    NotAnObject {
        /// Schema that was validated against.
        schema: String,
        /// Runtime kind of the input.
        actual: ValueKind,
    },

    /// One or more fields are missing or mistyped.
    #[error("record does not conform to schema '{schema}' ({} violation(s)):\n{violations}", violations.len())]
    Invalid {
        /// Schema that was validated against.
        schema: String,
        /// Every violation found in the pass.
        violations: Violations,
    },

    /// No schema is registered under this name.
    #[error("schema not found: {0}")]
    UnknownSchema(String),

    /// The schema's field set failed to resolve.
    #[error("schema declaration error: {0}")]
    Declaration(#[from] SchemaDeclarationError),

    /// The validated record could not be projected into its Rust type.
    #[error("failed to decode '{schema}' record: {reason}")]
    Decode {
        /// Target schema.
        schema: String,
        /// Deserializer message.
        reason: String,
    },
}

impl ValidationError {
    /// The collected violations, if this is an aggregated failure.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Invalid { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

impl SchemaRegistry {
    /// Validate `value` against `schema`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NotAnObject`] if `value` is not a JSON object.
    /// - [`ValidationError::Invalid`] with every missing or mistyped field.
    /// - [`ValidationError::UnknownSchema`] / [`ValidationError::Declaration`]
    ///   if the schema graph is broken; [`SchemaRegistry::verify`] rules these
    ///   out at start-up.
    pub fn validate(&self, schema: &SchemaHandle, value: &Value) -> Result<Record, ValidationError> {
        let obj = value.as_object().ok_or_else(|| ValidationError::NotAnObject {
            schema: schema.name().to_string(),
            actual: ValueKind::of(value),
        })?;

        let mut violations = Violations::default();
        let record = self.walk(schema, obj, &FieldPath::root(), &mut violations)?;

        if violations.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError::Invalid {
                schema: schema.name().to_string(),
                violations,
            })
        }
    }

    /// Validate `value` against the schema registered as `name`.
    ///
    /// # Errors
    ///
    /// As [`Self::validate`], plus [`ValidationError::UnknownSchema`].
    pub fn validate_named(&self, name: &str, value: &Value) -> Result<Record, ValidationError> {
        let handle = self
            .get(name)
            .ok_or_else(|| ValidationError::UnknownSchema(name.to_string()))?;
        self.validate(handle, value)
    }

    fn walk(
        &self,
        schema: &SchemaHandle,
        obj: &Map<String, Value>,
        path: &FieldPath,
        violations: &mut Violations,
    ) -> Result<Record, ValidationError> {
        let fields = schema.fields()?;
        let envelope = check_envelope(obj, path, violations);
        let mut out = BTreeMap::new();

        for def in fields.iter() {
            let at = path.child(def.name());
            let Some(raw) = obj.get(def.name()) else {
                violations.push(Violation::missing(at));
                continue;
            };

            let value = match (def.kind(), raw) {
                (FieldKind::Number, Value::Number(n)) => FieldValue::Number(n.clone()),
                (FieldKind::Text, Value::String(s)) => FieldValue::Text(s.clone()),
                (FieldKind::Schema(target), Value::Object(inner)) => {
                    let nested = self
                        .get(target)
                        .ok_or_else(|| ValidationError::UnknownSchema(target.clone()))?;
                    FieldValue::Record(self.walk(nested, inner, &at, violations)?)
                }
                (kind, other) => {
                    violations.push(Violation::mismatch(at, kind.expected(), other));
                    continue;
                }
            };
            out.insert(def.name().to_string(), value);
        }

        Ok(Record::new(schema.name(), envelope, out))
    }
}

/// Collect the optional envelope tags, recording a mismatch for any present
/// with the wrong kind.
fn check_envelope(obj: &Map<String, Value>, path: &FieldPath, violations: &mut Violations) -> JsonLd {
    let mut envelope = JsonLd::default();

    match obj.get(CONTEXT_KEY) {
        None => {}
        Some(Value::Object(ctx)) => envelope.context = Some(ctx.clone()),
        Some(other) => violations.push(Violation::mismatch(
            path.child(CONTEXT_KEY),
            Expected::Kind(ValueKind::Object),
            other,
        )),
    }
    envelope.id = envelope_string(obj, ID_KEY, path, violations);
    envelope.ld_type = envelope_string(obj, TYPE_KEY, path, violations);

    envelope
}

fn envelope_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
    violations: &mut Violations,
) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        other => {
            violations.push(Violation::mismatch(
                path.child(key),
                Expected::Kind(ValueKind::String),
                other,
            ));
            None
        }
    }
}
