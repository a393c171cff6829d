//! # Envelope Errors
//!
//! Schema declaration and validation errors live in `strenda-schema` next to
//! the code that raises them. This module holds the errors of the JSON-LD
//! envelope helpers, which every crate in the workspace can raise.

use thiserror::Error;

/// Errors raised while editing a record's JSON-LD envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonLdError {
    /// A namespace prefix must be non-empty.
    #[error("JSON-LD namespace prefix must be non-empty")]
    EmptyPrefix,

    /// The term does not start with `<prefix>:`.
    #[error("term {term} is not prefixed with {prefix}")]
    TermNotPrefixed {
        /// The offending term, rendered as JSON.
        term: String,
        /// The prefix the term was expected to carry.
        prefix: String,
    },

    /// The term is neither a string nor an object with a string `@id`.
    #[error("malformed JSON-LD term {0}: expected a string or an object with an \"@id\" string")]
    MalformedTerm(String),

    /// The attribute is not a declared field of the record.
    #[error("attribute {attr} not found in {record}")]
    UnknownAttribute {
        /// The attribute that was looked up.
        attr: String,
        /// The record kind it was looked up on.
        record: String,
    },
}
