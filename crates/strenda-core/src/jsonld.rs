//! # JSON-LD Envelope
//!
//! Every record kind may carry three linked-data tags: `@context`, `@id` and
//! `@type`. They are always optional and are passed through opaquely. The
//! only structural expectations are that `@context` is a mapping and that
//! `@id` / `@type` are strings.
//!
//! The helpers here mint default envelopes (`<prefix>:<Kind>/<uuid>`) and
//! edit the context map (namespace registration, attribute terms). None of
//! them resolve IRIs or interpret linked-data semantics.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::JsonLdError;

/// Key of the linked-data context mapping.
pub const CONTEXT_KEY: &str = "@context";
/// Key of the record identifier.
pub const ID_KEY: &str = "@id";
/// Key of the record type tag.
pub const TYPE_KEY: &str = "@type";
/// The three envelope keys, in the order they are checked.
pub const ENVELOPE_KEYS: [&str; 3] = [CONTEXT_KEY, ID_KEY, TYPE_KEY];

/// Default namespace prefix for StrENDA Biocat terms.
pub const DEFAULT_PREFIX: &str = "stbc";
/// Default IRI bound to [`DEFAULT_PREFIX`].
pub const DEFAULT_IRI: &str = "https://www.github.com/my/repo/";

/// A prefix bound to an IRI, e.g. `schema` → `https://schema.org/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    prefix: String,
    iri: String,
}

impl Namespace {
    /// Bind `prefix` to `iri`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonLdError::EmptyPrefix`] if `prefix` is empty.
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Result<Self, JsonLdError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(JsonLdError::EmptyPrefix);
        }
        Ok(Self {
            prefix,
            iri: iri.into(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            iri: DEFAULT_IRI.to_string(),
        }
    }
}

/// The optional JSON-LD envelope attached to every record.
///
/// Flattened into record structs with `#[serde(flatten)]`; absent tags are
/// skipped on serialization so a bare record round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonLd {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,

    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub ld_type: Option<String>,
}

impl JsonLd {
    /// Mint a fresh envelope for a record kind.
    ///
    /// Produces `@id = "<prefix>:<kind>/<uuid-v4>"`, `@type = "<prefix>:<kind>"`
    /// and a context binding the namespace prefix to its IRI.
    pub fn for_kind(kind: &str, namespace: &Namespace) -> Self {
        let mut context = Map::new();
        context.insert(
            namespace.prefix().to_string(),
            Value::String(namespace.iri().to_string()),
        );
        Self {
            context: Some(context),
            id: Some(format!("{}:{kind}/{}", namespace.prefix(), Uuid::new_v4())),
            ld_type: Some(format!("{}:{kind}", namespace.prefix())),
        }
    }

    /// True when none of the three tags is present.
    pub fn is_empty(&self) -> bool {
        self.context.is_none() && self.id.is_none() && self.ld_type.is_none()
    }

    /// Register `prefix → iri` in `@context`, creating the mapping if needed.
    pub fn add_namespace(&mut self, namespace: &Namespace) {
        self.context_mut().insert(
            namespace.prefix().to_string(),
            Value::String(namespace.iri().to_string()),
        );
    }

    /// Map an attribute to a term in `@context`.
    ///
    /// When a namespace is supplied the term must carry its prefix, and the
    /// namespace is registered alongside the term. Checking that `attr` is a
    /// declared field is the caller's job; records do it through
    /// `RecordSchema::set_attr_term`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonLdError::MalformedTerm`] or [`JsonLdError::TermNotPrefixed`].
    pub fn set_term(
        &mut self,
        attr: &str,
        term: Value,
        namespace: Option<&Namespace>,
    ) -> Result<(), JsonLdError> {
        term_id(&term)?;
        if let Some(ns) = namespace {
            validate_prefix(&term, ns.prefix())?;
            self.add_namespace(ns);
        }
        self.context_mut().insert(attr.to_string(), term);
        Ok(())
    }

    fn context_mut(&mut self) -> &mut Map<String, Value> {
        self.context.get_or_insert_with(Map::new)
    }
}

/// Check that a term is prefixed with `<prefix>:`.
///
/// A term is either a compact IRI string (`"schema:givenName"`) or an
/// expanded term definition object whose `@id` is such a string.
///
/// # Errors
///
/// Returns [`JsonLdError::MalformedTerm`] if the term has neither shape and
/// [`JsonLdError::TermNotPrefixed`] if its identifier lacks the prefix.
pub fn validate_prefix(term: &Value, prefix: &str) -> Result<(), JsonLdError> {
    let id = term_id(term)?;
    if id.starts_with(&format!("{prefix}:")) {
        Ok(())
    } else {
        Err(JsonLdError::TermNotPrefixed {
            term: term.to_string(),
            prefix: prefix.to_string(),
        })
    }
}

fn term_id(term: &Value) -> Result<&str, JsonLdError> {
    match term {
        Value::String(s) => Ok(s),
        Value::Object(obj) => obj
            .get(ID_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| JsonLdError::MalformedTerm(term.to_string())),
        other => Err(JsonLdError::MalformedTerm(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn schema_org() -> Namespace {
        Namespace::new("schema", "https://schema.org/").unwrap()
    }

    #[test]
    fn namespace_rejects_empty_prefix() {
        assert_eq!(
            Namespace::new("", "https://schema.org/"),
            Err(JsonLdError::EmptyPrefix)
        );
    }

    #[test]
    fn default_namespace_is_stbc() {
        let ns = Namespace::default();
        assert_eq!(ns.prefix(), "stbc");
        assert_eq!(ns.iri(), DEFAULT_IRI);
    }

    #[test]
    fn for_kind_mints_prefixed_id_and_type() {
        let ld = JsonLd::for_kind("KineticParameters", &Namespace::default());
        let id = ld.id.as_deref().unwrap();
        assert!(id.starts_with("stbc:KineticParameters/"));
        let uuid_part = id.rsplit('/').next().unwrap();
        assert!(Uuid::parse_str(uuid_part).is_ok());
        assert_eq!(ld.ld_type.as_deref(), Some("stbc:KineticParameters"));
        assert_eq!(ld.context.unwrap()["stbc"], json!(DEFAULT_IRI));
    }

    #[test]
    fn for_kind_ids_are_unique() {
        let a = JsonLd::for_kind("Vial", &Namespace::default());
        let b = JsonLd::for_kind("Vial", &Namespace::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn empty_envelope_serializes_to_nothing() {
        let ld = JsonLd::default();
        assert!(ld.is_empty());
        assert_eq!(serde_json::to_value(&ld).unwrap(), json!({}));
    }

    #[test]
    fn envelope_uses_at_keys() {
        let ld = JsonLd {
            context: None,
            id: Some("stbc:x/1".into()),
            ld_type: Some("stbc:x".into()),
        };
        let v = serde_json::to_value(&ld).unwrap();
        assert_eq!(v, json!({"@id": "stbc:x/1", "@type": "stbc:x"}));
        let back: JsonLd = serde_json::from_value(v).unwrap();
        assert_eq!(back, ld);
    }

    #[test]
    fn add_namespace_creates_context() {
        let mut ld = JsonLd::default();
        ld.add_namespace(&schema_org());
        assert_eq!(ld.context.unwrap()["schema"], json!("https://schema.org/"));
    }

    #[test]
    fn set_term_with_plain_iri() {
        let mut ld = JsonLd::default();
        ld.set_term("name", json!("http://schema.org/givenName"), None)
            .unwrap();
        assert_eq!(
            ld.context.unwrap()["name"],
            json!("http://schema.org/givenName")
        );
    }

    #[test]
    fn set_term_with_prefix_registers_namespace() {
        let mut ld = JsonLd::default();
        ld.set_term("name", json!("schema:givenName"), Some(&schema_org()))
            .unwrap();
        let ctx = ld.context.unwrap();
        assert_eq!(ctx["name"], json!("schema:givenName"));
        assert_eq!(ctx["schema"], json!("https://schema.org/"));
    }

    #[test]
    fn set_term_rejects_unprefixed_term() {
        let mut ld = JsonLd::default();
        let err = ld
            .set_term("name", json!("foaf:givenName"), Some(&schema_org()))
            .unwrap_err();
        assert!(matches!(err, JsonLdError::TermNotPrefixed { .. }));
        assert!(ld.context.is_none());
    }

    #[test]
    fn validate_prefix_accepts_expanded_term() {
        let term = json!({"@id": "schema:givenName", "@type": "@id"});
        assert!(validate_prefix(&term, "schema").is_ok());
        assert!(validate_prefix(&term, "foaf").is_err());
    }

    #[test]
    fn validate_prefix_requires_colon() {
        assert!(validate_prefix(&json!("schemaX"), "schema").is_err());
    }

    #[test]
    fn malformed_terms_are_rejected() {
        assert!(matches!(
            validate_prefix(&json!(42), "schema"),
            Err(JsonLdError::MalformedTerm(_))
        ));
        assert!(matches!(
            validate_prefix(&json!({"@type": "@id"}), "schema"),
            Err(JsonLdError::MalformedTerm(_))
        ));
    }

    proptest! {
        #[test]
        fn prefixed_terms_pass_in_both_forms(prefix in "[a-z]{1,8}", local in "[A-Za-z_]{1,12}") {
            let compact = format!("{prefix}:{local}");
            prop_assert!(validate_prefix(&json!(compact), &prefix).is_ok());
            let expanded = json!({"@id": compact});
            prop_assert!(validate_prefix(&expanded, &prefix).is_ok());
        }

        /// `schema:x` must not pass for the prefix `schem`.
        #[test]
        fn prefix_match_requires_the_colon(prefix in "[a-z]{2,8}", local in "[a-z]{1,8}") {
            let shorter = &prefix[..prefix.len() - 1];
            let term = json!(format!("{prefix}:{local}"));
            prop_assert!(
                matches!(
                    validate_prefix(&term, shorter),
                    Err(JsonLdError::TermNotPrefixed { .. })
                ),
                "term {} accepted for prefix {}", term, shorter
            );
        }
    }
}
