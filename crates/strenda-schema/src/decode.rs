//! # Typed Decoding
//!
//! Binds a Rust struct to a schema through [`RecordSchema`] and decodes
//! untyped values into it: validate first, then project the validated record
//! (declared fields plus envelope) into the struct with `serde`.
//!
//! Decoding returns a `Result`. Whether an invalid record aborts the program
//! or is skipped and reported is the caller's decision.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use strenda_core::{JsonLd, JsonLdError, Namespace};

use crate::registry::{FieldSet, SchemaDeclarationError, SchemaHandle, SchemaRegistry};
use crate::results::results_registry;
use crate::validate::ValidationError;

/// A typed record kind backed by a registered schema.
pub trait RecordSchema: Serialize + DeserializeOwned + 'static {
    /// Name the schema is registered under.
    const SCHEMA_NAME: &'static str;

    /// The required payload fields of this record kind.
    fn fields() -> FieldSet;

    fn json_ld(&self) -> &JsonLd;

    fn json_ld_mut(&mut self) -> &mut JsonLd;

    /// Declare this record kind's schema lazily in `registry`.
    fn declare(registry: &mut SchemaRegistry) -> Result<SchemaHandle, SchemaDeclarationError> {
        registry.declare_lazy(Self::SCHEMA_NAME, Self::fields)
    }

    /// A fresh envelope in the default `stbc` namespace.
    fn new_envelope() -> JsonLd {
        JsonLd::for_kind(Self::SCHEMA_NAME, &Namespace::default())
    }

    /// Map a declared attribute to a JSON-LD term in this record's `@context`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonLdError::UnknownAttribute`] if `attr` is not a declared
    /// field, or the term errors of [`JsonLd::set_term`].
    fn set_attr_term(
        &mut self,
        attr: &str,
        term: Value,
        namespace: Option<&Namespace>,
    ) -> Result<(), JsonLdError> {
        if !Self::fields().contains(attr) {
            return Err(JsonLdError::UnknownAttribute {
                attr: attr.to_string(),
                record: Self::SCHEMA_NAME.to_string(),
            });
        }
        self.json_ld_mut().set_term(attr, term, namespace)
    }
}

impl SchemaRegistry {
    /// Validate `value` against `T`'s schema and decode it into `T`.
    ///
    /// # Errors
    ///
    /// Any [`ValidationError`] from [`SchemaRegistry::validate_named`], or
    /// [`ValidationError::Decode`] if the record's shape and `T` disagree.
    pub fn decode<T: RecordSchema>(&self, value: &Value) -> Result<T, ValidationError> {
        let record = self.validate_named(T::SCHEMA_NAME, value)?;
        serde_json::from_value(record.to_value()).map_err(|e| ValidationError::Decode {
            schema: T::SCHEMA_NAME.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Decode `value` into `T` using the process-wide results registry.
///
/// # Errors
///
/// As [`SchemaRegistry::decode`], plus [`ValidationError::Declaration`] if the
/// results registry failed to initialize.
pub fn decode<T: RecordSchema>(value: &Value) -> Result<T, ValidationError> {
    results_registry()?.decode(value)
}
