//! # Schemas Subcommand
//!
//! Lists the declared results schemas and their fields.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use strenda_schema::{results_registry, SchemaHandle};

use crate::{EXIT_INVALID, EXIT_OK};

/// Arguments for the `strenda schemas` subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    /// Show only this schema.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

/// Execute the schemas subcommand.
pub fn run_schemas(args: &SchemasArgs, out: &mut dyn Write) -> Result<u8> {
    let registry = results_registry().context("failed to build the results schema registry")?;

    let handles: Vec<&SchemaHandle> = match &args.name {
        Some(name) => match registry.get(name) {
            Some(handle) => vec![handle],
            None => {
                writeln!(out, "ERROR: unknown schema '{name}'")?;
                writeln!(out, "known schemas: {}", registry.names().collect::<Vec<_>>().join(", "))?;
                return Ok(EXIT_INVALID);
            }
        },
        None => registry.names().filter_map(|n| registry.get(n)).collect(),
    };

    for handle in handles {
        let fields = handle.fields()?;
        writeln!(out, "{} ({} fields)", handle.name(), fields.len())?;
        for def in fields.iter() {
            writeln!(out, "  {:<32} {}", def.name(), def.kind())?;
        }
    }
    Ok(EXIT_OK)
}
