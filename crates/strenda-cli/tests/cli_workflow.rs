//! End-to-end handler tests: documents produced by `template` pass `validate`,
//! and configuration flows into minted envelopes.

use serde_json::Value;
use strenda_cli::config::CliConfig;
use strenda_cli::template::{run_template, TemplateArgs};
use strenda_cli::validate::{run_validate, ValidateArgs};
use strenda_cli::{parse_kind, EXIT_INVALID, EXIT_OK};
use strenda_schema::ResultKind;

fn template_for(kind: ResultKind, config: &CliConfig) -> Value {
    let mut out = Vec::new();
    let code = run_template(&TemplateArgs { kind }, &config.namespace().unwrap(), &mut out).unwrap();
    assert_eq!(code, EXIT_OK);
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn templates_pass_validation_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = CliConfig::default();
    let paths: Vec<_> = ResultKind::ALL
        .iter()
        .map(|kind| {
            let path = dir.path().join(format!("{}.json", kind.slug()));
            let doc = template_for(*kind, &config);
            std::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
            (*kind, path)
        })
        .collect();

    for (kind, path) in paths {
        let mut out = Vec::new();
        let args = ValidateArgs {
            kind,
            print: false,
            paths: vec![path],
        };
        assert_eq!(run_validate(&args, &mut out).unwrap(), EXIT_OK, "{kind}");
    }
}

#[test]
fn template_validated_as_wrong_kind_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thermo.json");
    let doc = template_for(ResultKind::ThermodynamicParameters, &CliConfig::default());
    std::fs::write(&path, doc.to_string()).unwrap();

    let mut out = Vec::new();
    let args = ValidateArgs {
        kind: ResultKind::YieldAndConversion,
        print: false,
        paths: vec![path],
    };
    assert_eq!(run_validate(&args, &mut out).unwrap(), EXIT_INVALID);
    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("c_yield: required field missing"));
}

#[test]
fn config_file_prefix_reaches_template() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("strenda.yaml");
    std::fs::write(&cfg_path, "ld_prefix: lab\nld_iri: https://lab.example/terms/\n").unwrap();
    let config = CliConfig::from_file(&cfg_path).unwrap();

    let doc = template_for(ResultKind::KineticParameters, &config);
    assert_eq!(doc["@type"], "lab:KineticParameters");
    assert_eq!(doc["@context"]["lab"], "https://lab.example/terms/");
}

#[test]
fn kind_parser_accepts_names_and_slugs() {
    assert_eq!(parse_kind("kinetic-parameters"), Ok(ResultKind::KineticParameters));
    assert_eq!(
        parse_kind("SelectivityAndSpecificity"),
        Ok(ResultKind::SelectivityAndSpecificity)
    );
    assert!(parse_kind("vial").is_err());
}
