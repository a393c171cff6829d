//! # Document Loading
//!
//! Reads a results document from disk into the untyped JSON value model the
//! validator works on. `.yaml` / `.yml` files are parsed as YAML and
//! converted; everything else is parsed as JSON.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

/// Load a JSON or YAML document.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file cannot be read and
/// [`DocumentError::Parse`] if its content is not valid JSON/YAML.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_err = |reason: String| DocumentError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| parse_err(format!("invalid YAML: {e}")))?;
            yaml_to_json_value(&yaml).map_err(|e| parse_err(format!("YAML node unusable as JSON {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| parse_err(format!("invalid JSON: {e}"))),
    }
}

/// A YAML node with no JSON counterpart, located by its dotted key path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("at {}: {reason}", if path.is_empty() { "(root)" } else { path.as_str() })]
struct YamlNodeError {
    path: String,
    reason: String,
}

/// Convert a YAML tree into the JSON value model the validator walks.
///
/// Scalar keys are stringified so `1: x` and `"1": x` collide the same way
/// they would in JSON. Sequence items are addressed by index in the path.
/// Tags are dropped. Non-finite floats and composite keys are rejected.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, YamlNodeError> {
    let mut path = Vec::new();
    convert_node(yaml, &mut path)
}

fn convert_node(node: &serde_yaml::Value, path: &mut Vec<String>) -> Result<Value, YamlNodeError> {
    use serde_yaml::Value as Yaml;

    let fail = |path: &[String], reason: String| YamlNodeError {
        path: path.join("."),
        reason,
    };

    Ok(match node {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| fail(path.as_slice(), format!("{n} has no JSON representation")))?
            }
        }
        Yaml::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push(i.to_string());
                let converted = convert_node(item, path);
                path.pop();
                out.push(converted?);
            }
            Value::Array(out)
        }
        Yaml::Mapping(map) => {
            let mut obj = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                let key = match key {
                    Yaml::String(s) => s.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Null => "null".to_string(),
                    _ => return Err(fail(path.as_slice(), "mapping keys must be scalars".to_string())),
                };
                path.push(key);
                let converted = convert_node(item, path);
                let key = path.pop().unwrap_or_default();
                obj.insert(key, converted?);
            }
            Value::Object(obj)
        }
        Yaml::Tagged(tagged) => convert_node(&tagged.value, path)?,
    })
}
