//! # Validate Subcommand
//!
//! Validates results documents against the schema of one record kind and
//! prints one line per document, followed by the aggregated report for
//! documents that fail.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use strenda_schema::{results_registry, ResultKind};

use crate::document::load_document;
use crate::{parse_kind, EXIT_ERROR, EXIT_INVALID, EXIT_OK};

/// Arguments for the `strenda validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Record kind to validate against (schema name or kebab-case slug).
    #[arg(long, value_parser = parse_kind)]
    pub kind: ResultKind,

    /// Print each valid record, as decoded, in JSON.
    #[arg(long)]
    pub print: bool,

    /// JSON or YAML documents to validate.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns the exit code: 0 when every document is valid, 1 when at least
/// one is invalid, 2 when at least one could not be loaded.
pub fn run_validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<u8> {
    let registry = results_registry().context("failed to build the results schema registry")?;
    let schema = args.kind.schema_name();

    let mut invalid = 0usize;
    let mut unreadable = 0usize;

    for path in &args.paths {
        let value = match load_document(path) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load document");
                writeln!(out, "ERROR: {e}")?;
                unreadable += 1;
                continue;
            }
        };

        match registry.validate_named(schema, &value) {
            Ok(record) => {
                tracing::info!(path = %path.display(), schema, "document valid");
                writeln!(out, "OK: {}", path.display())?;
                if args.print {
                    writeln!(out, "{}", serde_json::to_string_pretty(&record.to_value())?)?;
                }
            }
            Err(e) => {
                tracing::info!(path = %path.display(), schema, "document invalid");
                writeln!(out, "FAIL: {}", path.display())?;
                writeln!(out, "{e}")?;
                invalid += 1;
            }
        }
    }

    let total = args.paths.len();
    writeln!(
        out,
        "{schema}: {}/{total} valid",
        total - invalid - unreadable
    )?;

    Ok(if unreadable > 0 {
        EXIT_ERROR
    } else if invalid > 0 {
        EXIT_INVALID
    } else {
        EXIT_OK
    })
}
