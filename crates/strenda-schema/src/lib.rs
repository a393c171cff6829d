//! # strenda-schema — Schema Registry & Validation Engine
//!
//! Turns untyped records (parsed JSON-LD documents describing biocatalysis
//! experiment results) into validated, typed values, or fails with one
//! aggregated, path-annotated report.
//!
//! ## Schema Registry (`registry`)
//!
//! [`SchemaRegistry`] holds named schemas. Each schema maps field names to
//! `number`, `text`, or a reference to another schema by name. Field sets
//! may be supplied lazily ([`SchemaRegistry::declare_lazy`]); the closure
//! runs on first use and its result is memoized, so schemas can refer to
//! themselves or to siblings declared later.
//!
//! ## Validation Engine (`validate`)
//!
//! [`SchemaRegistry::validate`] walks a `serde_json::Value` against a schema
//! in a single pass and collects every missing field and type mismatch into
//! one [`ValidationError::Invalid`]. Unknown keys are ignored. No coercion:
//! `"0.82"` is not a number.
//!
//! ## Results Records (`results`)
//!
//! The five results record kinds (kinetics, yield/conversion, activity,
//! selectivity, thermodynamics) are typed structs implementing
//! [`RecordSchema`], declared in the process-wide [`results_registry`].
//!
//! ## Crate Policy
//!
//! - Depends only on `strenda-core` internally.
//! - Validation is pure: no I/O, no logging, no mutation of the registry or
//!   of the input.
//! - Domain ranges (percentages, non-negative constants) are not checked.

pub mod decode;
pub mod filter;
pub mod record;
pub mod registry;
pub mod results;
pub mod validate;

pub use decode::{decode, RecordSchema};
pub use filter::{filter_records, FilterError};
pub use record::{FieldValue, Record};
pub use registry::{
    FieldDef, FieldKind, FieldSet, SchemaDeclarationError, SchemaHandle, SchemaRegistry,
};
pub use results::{
    build_results_registry, results_registry, ActivityAndInitialReactionRate,
    KineticParameters, ResultKind, SelectivityAndSpecificity, ThermodynamicParameters,
    YieldAndConversion,
};
pub use validate::{Expected, FieldPath, ValidationError, Violation, ViolationKind, Violations};
