//! # Template Subcommand
//!
//! Prints a skeleton document for a record kind: a freshly minted envelope in
//! the configured namespace, `0` for every number and `""` for every text
//! field. The skeleton validates as-is.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value};

use strenda_core::{JsonLd, Namespace};
use strenda_schema::{FieldKind, ResultKind};

use crate::{parse_kind, EXIT_OK};

/// Arguments for the `strenda template` subcommand.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Record kind to emit (schema name or kebab-case slug).
    #[arg(long, value_parser = parse_kind)]
    pub kind: ResultKind,
}

/// Build the skeleton document for `kind`.
pub fn skeleton(kind: ResultKind, namespace: &Namespace) -> Result<Value> {
    let mut doc = match serde_json::to_value(JsonLd::for_kind(kind.schema_name(), namespace))? {
        Value::Object(obj) => obj,
        _ => Map::new(),
    };
    for def in kind.fields().iter() {
        let placeholder = match def.kind() {
            FieldKind::Number => Value::from(0),
            FieldKind::Text => Value::String(String::new()),
            FieldKind::Schema(_) => Value::Object(Map::new()),
        };
        doc.insert(def.name().to_string(), placeholder);
    }
    Ok(Value::Object(doc))
}

/// Execute the template subcommand.
pub fn run_template(args: &TemplateArgs, namespace: &Namespace, out: &mut dyn Write) -> Result<u8> {
    let doc = skeleton(args.kind, namespace)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
    Ok(EXIT_OK)
}
