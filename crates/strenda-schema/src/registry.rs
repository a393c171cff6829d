//! # Schema Registry
//!
//! Named, immutable record schemas. A schema is a flat list of required
//! fields, each declared as `number`, `text`, or a reference to another
//! schema by name.
//!
//! ## Lazy declaration
//!
//! A field set may be supplied as a closure instead of a value. The closure
//! is evaluated on first use and the result is cached in a `OnceLock`, so
//! repeated resolution returns the identical field set. References are by
//! name and looked up in the registry at validation time, which lets a
//! schema refer to itself or to a sibling declared later in source order.
//!
//! ## Declaration errors
//!
//! Name collisions, duplicate fields, fields shadowing the JSON-LD envelope,
//! and dangling references are configuration defects. They surface at
//! declaration time ([`SchemaRegistry::declare`]) or, for lazy schemas, at
//! [`SchemaRegistry::verify`], which is meant to run once during
//! initialization before any validation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use strenda_core::{ValueKind, ENVELOPE_KEYS};
use thiserror::Error;

use crate::validate::Expected;

/// Errors raised while populating the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDeclarationError {
    /// A schema with this name is already registered.
    #[error("schema '{name}' is already declared")]
    DuplicateSchema {
        /// The colliding schema name.
        name: String,
    },

    /// A field name appears twice in one schema.
    #[error("schema '{schema}' declares field '{field}' more than once")]
    DuplicateField {
        /// The schema being declared.
        schema: String,
        /// The repeated field name.
        field: String,
    },

    /// A field uses one of the implicit envelope keys (`@context`, `@id`, `@type`).
    #[error("schema '{schema}' declares reserved envelope field '{field}'")]
    ReservedField {
        /// The schema being declared.
        schema: String,
        /// The reserved key.
        field: String,
    },

    /// A nested-schema field names a schema that was never declared.
    #[error("field '{field}' of schema '{schema}' references undeclared schema '{target}'")]
    UnknownReference {
        /// The schema holding the reference.
        schema: String,
        /// The referencing field.
        field: String,
        /// The missing target schema.
        target: String,
    },
}

/// The declared kind of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Must be a JSON number.
    Number,
    /// Must be a JSON string.
    Text,
    /// Must be an object conforming to the named schema.
    Schema(String),
}

impl FieldKind {
    /// The expectation reported when a value does not match this kind.
    pub fn expected(&self) -> Expected {
        match self {
            Self::Number => Expected::Kind(ValueKind::Number),
            Self::Text => Expected::Kind(ValueKind::String),
            Self::Schema(name) => Expected::Record(name.clone()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => f.write_str("number"),
            Self::Text => f.write_str("text"),
            Self::Schema(name) => write!(f, "{name}"),
        }
    }
}

/// A named field and its declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    name: String,
    kind: FieldKind,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// An ordered set of field declarations.
///
/// Order is kept for documentation and listing only; matching is by name.
/// Built with the chaining helpers:
///
/// ```
/// use strenda_schema::FieldSet;
///
/// let fields = FieldSet::new()
///     .number("conversion")
///     .text("conversion_unit");
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<FieldDef>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `number` field.
    pub fn number(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Number)
    }

    /// Append a `text` field.
    pub fn text(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Text)
    }

    /// Append a field holding a record of schema `target`.
    pub fn schema(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.field(name, FieldKind::Schema(target.into()))
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDef::new(name, kind));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reject duplicate and reserved field names.
    fn checked(self, schema: &str) -> Result<Self, SchemaDeclarationError> {
        for (i, def) in self.fields.iter().enumerate() {
            if ENVELOPE_KEYS.contains(&def.name.as_str()) {
                return Err(SchemaDeclarationError::ReservedField {
                    schema: schema.to_string(),
                    field: def.name.clone(),
                });
            }
            if self.fields[..i].iter().any(|prev| prev.name == def.name) {
                return Err(SchemaDeclarationError::DuplicateField {
                    schema: schema.to_string(),
                    field: def.name.clone(),
                });
            }
        }
        Ok(self)
    }
}

type FieldThunk = Box<dyn Fn() -> FieldSet + Send + Sync>;

/// A declared schema. Field resolution is memoized.
struct Schema {
    name: String,
    thunk: Option<FieldThunk>,
    fields: OnceLock<Result<FieldSet, SchemaDeclarationError>>,
}

impl Schema {
    fn resolve(&self) -> &Result<FieldSet, SchemaDeclarationError> {
        self.fields.get_or_init(|| {
            let set = self.thunk.as_ref().map(|f| f()).unwrap_or_default();
            tracing::debug!(schema = %self.name, fields = set.len(), "resolved lazy schema");
            set.checked(&self.name)
        })
    }
}

/// Shared, cheaply clonable reference to a declared schema.
#[derive(Clone)]
pub struct SchemaHandle(Arc<Schema>);

impl SchemaHandle {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Resolve the field set, evaluating a lazy declaration on first call.
    ///
    /// # Errors
    ///
    /// Returns the declaration error found when the field set was first
    /// resolved. The error is memoized along with successful results.
    pub fn fields(&self) -> Result<&FieldSet, SchemaDeclarationError> {
        self.0.resolve().as_ref().map_err(Clone::clone)
    }

    /// Whether the field set has been resolved yet.
    pub fn is_resolved(&self) -> bool {
        self.0.fields.get().is_some()
    }

    /// True if both handles point at the same declaration.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SchemaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaHandle")
            .field("name", &self.0.name)
            .field("lazy", &self.0.thunk.is_some())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// The set of schemas known to a process.
///
/// Populated once at start-up, then shared read-only. `SchemaRegistry` is
/// `Send + Sync`; concurrent validations against a populated registry are
/// independent.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, SchemaHandle>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a schema with an eagerly supplied field set.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaDeclarationError::DuplicateSchema`] if `name` is taken,
    /// or a field error if the set repeats a name or uses an envelope key.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        fields: FieldSet,
    ) -> Result<SchemaHandle, SchemaDeclarationError> {
        let name = name.into();
        self.ensure_free(&name)?;
        let fields = fields.checked(&name)?;
        Ok(self.insert(Schema {
            name,
            thunk: None,
            fields: OnceLock::from(Ok(fields)),
        }))
    }

    /// Declare a schema whose field set is computed on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaDeclarationError::DuplicateSchema`] if `name` is taken.
    /// Field errors surface on first resolution; see [`Self::verify`].
    pub fn declare_lazy<F>(
        &mut self,
        name: impl Into<String>,
        fields: F,
    ) -> Result<SchemaHandle, SchemaDeclarationError>
    where
        F: Fn() -> FieldSet + Send + Sync + 'static,
    {
        let name = name.into();
        self.ensure_free(&name)?;
        Ok(self.insert(Schema {
            name,
            thunk: Some(Box::new(fields)),
            fields: OnceLock::new(),
        }))
    }

    /// Look up a schema by name.
    pub fn get(&self, name: &str) -> Option<&SchemaHandle> {
        self.schemas.get(name)
    }

    /// Schema names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Resolve every schema and check that all references point at declared
    /// schemas.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error found, in schema-name order.
    pub fn verify(&self) -> Result<(), SchemaDeclarationError> {
        for handle in self.schemas.values() {
            for def in handle.fields()?.iter() {
                if let FieldKind::Schema(target) = def.kind() {
                    if !self.schemas.contains_key(target) {
                        return Err(SchemaDeclarationError::UnknownReference {
                            schema: handle.name().to_string(),
                            field: def.name().to_string(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn ensure_free(&self, name: &str) -> Result<(), SchemaDeclarationError> {
        if self.schemas.contains_key(name) {
            return Err(SchemaDeclarationError::DuplicateSchema {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn insert(&mut self, schema: Schema) -> SchemaHandle {
        tracing::debug!(schema = %schema.name, lazy = schema.thunk.is_some(), "declared schema");
        let handle = SchemaHandle(Arc::new(schema));
        self.schemas
            .insert(handle.name().to_string(), handle.clone());
        handle
    }
}
