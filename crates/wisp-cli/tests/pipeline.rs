//! Integration tests for the full pipeline: load → build → validate →
//! render → write, plus the validation/technical failure split.

use std::fs;
use std::path::PathBuf;

use serde_json::json;

use wisp_cli::pipeline::{
    LoadedInputs, PipelineOptions, build_and_validate, load_inputs, run_pipeline,
};
use wisp_map::Period;
use wisp_validate::ValidationError;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn options(output: Option<PathBuf>) -> PipelineOptions {
    PipelineOptions {
        export: fixture("export_wispro.json"),
        contract_base: fixture("contrato_base.json"),
        rules: fixture("validaciones.json"),
        mode_config: fixture("contrato_reglas.yaml"),
        template: Some(fixture("plantilla.md")),
        output,
        dry_run: false,
    }
}

fn temp_output(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wisp-reporter-test-{}-{name}", std::process::id()))
}

#[test]
fn full_pipeline_writes_the_report() {
    let output = temp_output("informe.md");
    let result = run_pipeline(&options(Some(output.clone()))).expect("pipeline run");

    assert_eq!(result.report_path.as_deref(), Some(output.as_path()));
    // Export has two installations; only the one with a CPE serial survives
    // the contractual filter.
    assert_eq!(
        result.document["instalaciones"]["total_instaladas"],
        json!(1)
    );

    let report = fs::read_to_string(&output).expect("read report");
    fs::remove_file(&output).ok();

    assert!(report.contains("Municipio: Inírida, Guainía"));
    assert!(report.contains("se registran 3 usuarios"));
    assert!(report.contains("Serial CPE: SN-4411"));
    assert!(!report.contains("U-002"));
    // The template's {{observaciones}} has no section; the sweep replaces it.
    assert!(report.contains(wisp_report::FALLBACK_TEXT));
    assert!(!report.contains("{{"));
}

#[test]
fn dry_run_renders_but_writes_nothing() {
    let output = temp_output("informe-dry.md");
    let mut options = options(Some(output.clone()));
    options.dry_run = true;

    let result = run_pipeline(&options).expect("pipeline run");
    assert!(result.report_path.is_none());
    assert!(!output.exists());
}

#[test]
fn validation_failure_blocks_rendering() {
    let mut inputs = load_inputs(&options(None)).expect("load inputs");
    // Boilerplate in the contract base must block the run.
    inputs.contract_base["identificacion_proyecto"]["contrato"] = json!("POR DEFINIR");

    let error = build_and_validate(
        &inputs,
        Period {
            year: 2026,
            month: 8,
        },
    )
    .expect_err("boilerplate contract id");
    assert!(error.downcast_ref::<ValidationError>().is_some());
}

#[test]
fn schema_drift_surfaces_as_validation_error() {
    let options = options(None);
    let loaded = load_inputs(&options).expect("load inputs");
    let inputs = LoadedInputs {
        export: loaded.export,
        // A base missing the project identification section drifts from the
        // schema, which expects its paths in the document.
        contract_base: json!({}),
        rule_set: loaded.rule_set,
    };

    let error = build_and_validate(
        &inputs,
        Period {
            year: 2026,
            month: 8,
        },
    )
    .expect_err("drifted base");
    assert!(error.downcast_ref::<ValidationError>().is_some());
    assert!(error.to_string().contains("identificacion_proyecto"));
}

#[test]
fn missing_input_is_a_technical_error() {
    let mut options = options(None);
    options.export = fixture("no-such-export.json");

    let error = run_pipeline(&options).expect_err("missing export");
    assert!(error.downcast_ref::<ValidationError>().is_none());
}
