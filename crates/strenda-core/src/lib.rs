//! # strenda-core — Foundational Types for StrENDA Biocat Records
//!
//! Leaf crate of the workspace. Defines the vocabulary shared by the schema
//! registry, the validation engine, and the CLI:
//!
//! 1. **Runtime value kinds.** [`ValueKind`] names the shape of an untyped
//!    `serde_json::Value` so diagnostics can say "expected number, got string".
//!
//! 2. **JSON-LD envelope.** [`JsonLd`] carries the optional `@context`, `@id`
//!    and `@type` tags attached to every record kind. They are passed through
//!    opaquely; no linked-data resolution happens here.
//!
//! 3. **Envelope errors.** [`JsonLdError`] covers namespace and term misuse.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `strenda-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod jsonld;
pub mod kind;

pub use error::JsonLdError;
pub use jsonld::{validate_prefix, JsonLd, Namespace, CONTEXT_KEY, ENVELOPE_KEYS, ID_KEY, TYPE_KEY};
pub use kind::ValueKind;
