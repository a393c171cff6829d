//! # strenda-cli — CLI Tool for StrENDA Biocat Records
//!
//! Provides the `strenda` command-line interface over the schema registry.
//!
//! ## Subcommands
//!
//! - `strenda validate --kind <kind> <PATH>...` — Validate JSON/YAML documents.
//! - `strenda schemas [NAME]` — List declared schemas and their fields.
//! - `strenda template --kind <kind>` — Print a skeleton document.
//!
//! ```bash
//! strenda validate --kind yield-and-conversion results/yield.json
//! strenda -v validate --kind kinetic-parameters --print kinetics.yaml
//! ```
//!
//! ## Exit codes
//!
//! `0` every document valid, `1` at least one document invalid, `2`
//! operational failure (unreadable input, bad configuration).
//!
//! Handlers write to a caller-supplied writer so they can be tested without
//! capturing stdout. Configuration is only read by subcommands that mint
//! envelopes; `validate` and `schemas` run regardless of its state.

pub mod config;
pub mod document;
pub mod schemas;
pub mod template;
pub mod validate;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use strenda_schema::ResultKind;

use crate::config::CliConfig;
use crate::schemas::{run_schemas, SchemasArgs};
use crate::template::{run_template, TemplateArgs};
use crate::validate::{run_validate, ValidateArgs};

/// Exit code: all documents valid.
pub const EXIT_OK: u8 = 0;
/// Exit code: at least one document failed validation.
pub const EXIT_INVALID: u8 = 1;
/// Exit code: operational error.
pub const EXIT_ERROR: u8 = 2;

/// clap value parser for `--kind`.
pub fn parse_kind(s: &str) -> Result<ResultKind, String> {
    s.parse()
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate results documents against a record schema.
    Validate(ValidateArgs),

    /// List declared schemas and their fields.
    Schemas(SchemasArgs),

    /// Print a skeleton document for a record kind.
    Template(TemplateArgs),
}

/// Dispatch `command`, writing its output to `out`.
///
/// `config_path` and the environment are consulted only for `template`.
///
/// # Errors
///
/// Operational failures: bad configuration for `template`, a registry that
/// failed to build, or output that could not be written or flushed.
pub fn run(command: &Command, config_path: Option<&Path>, out: &mut dyn Write) -> Result<u8> {
    let code = match command {
        Command::Validate(args) => run_validate(args, out)?,
        Command::Schemas(args) => run_schemas(args, out)?,
        Command::Template(args) => {
            let namespace = CliConfig::load(config_path)
                .and_then(|config| config.namespace())
                .context("cannot mint a template envelope")?;
            run_template(args, &namespace, out)?
        }
    };
    out.flush().context("failed to flush output")?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn missing_config() -> PathBuf {
        PathBuf::from("/nonexistent/strenda/config.yaml")
    }

    #[test]
    fn validate_ignores_unusable_config() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("thermo.json");
        std::fs::write(
            &doc,
            r#"{"gibbs_free_energy_change": "-12.3 kJ/mol", "enthalpy_change": "+4.1 kJ/mol", "special_treatment": "none"}"#,
        )
        .unwrap();
        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "ld_prefix: [unterminated\n").unwrap();

        for config in [missing_config(), bad] {
            let command = Command::Validate(ValidateArgs {
                kind: ResultKind::ThermodynamicParameters,
                print: false,
                paths: vec![doc.clone()],
            });
            let mut out = Vec::new();
            assert_eq!(run(&command, Some(config.as_path()), &mut out).unwrap(), EXIT_OK);
            assert!(String::from_utf8(out).unwrap().contains("OK: "));
        }
    }

    #[test]
    fn schemas_ignores_unusable_config() {
        let command = Command::Schemas(SchemasArgs { name: None });
        let mut out = Vec::new();
        assert_eq!(run(&command, Some(missing_config().as_path()), &mut out).unwrap(), EXIT_OK);
    }

    #[test]
    fn template_reports_unusable_config() {
        let command = Command::Template(TemplateArgs {
            kind: ResultKind::YieldAndConversion,
        });
        let mut out = Vec::new();
        let err = run(&command, Some(missing_config().as_path()), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("cannot read config file"));
        assert!(out.is_empty());
    }

    struct FailingFlush(Vec<u8>);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn flush_failure_is_an_error() {
        let command = Command::Schemas(SchemasArgs {
            name: Some("YieldAndConversion".to_string()),
        });
        let mut out = FailingFlush(Vec::new());
        let err = run(&command, None, &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("failed to flush output"));
    }
}
