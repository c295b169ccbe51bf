//! Report generation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: read the operations export, the contract base skeleton, the
//!    rule tree and the mode configuration
//! 2. **Build**: map the export onto the contract model
//! 3. **Validate**: run the contract validation engine (blocking)
//! 4. **Render**: substitute the report template
//! 5. **Write**: persist the rendered report
//!
//! The renderer never runs unless validation fully passes, and no report is
//! written on any failure.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use wisp_map::{Period, build_contract};
use wisp_model::RuleSet;
use wisp_report::render;
use wisp_validate::validate_with;

/// Input locations for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Operations export (JSON).
    pub export: PathBuf,
    /// Target-shaped contract base document (JSON).
    pub contract_base: PathBuf,
    /// Rule tree with the denylist block (JSON).
    pub rules: PathBuf,
    /// Validation-mode configuration (YAML).
    pub mode_config: PathBuf,
    /// Report template. `None` validates without rendering.
    pub template: Option<PathBuf>,
    /// Where to write the rendered report.
    pub output: Option<PathBuf>,
    /// Render but skip the final write.
    pub dry_run: bool,
}

/// Outcome of a successful pipeline run.
#[derive(Debug)]
pub struct PipelineResult {
    /// The validated contract model.
    pub document: Value,
    /// Path of the written report, when one was produced.
    pub report_path: Option<PathBuf>,
}

/// Everything the in-memory stages need, decoupled from the filesystem.
#[derive(Debug)]
pub struct LoadedInputs {
    pub export: Value,
    pub contract_base: Value,
    pub rule_set: RuleSet,
}

/// Stage 1: read and parse the four input documents.
pub fn load_inputs(options: &PipelineOptions) -> Result<LoadedInputs> {
    let export = load_json(&options.export).context("load operations export")?;
    let contract_base = load_json(&options.contract_base).context("load contract base")?;
    let rules = load_json(&options.rules).context("load rule tree")?;
    let mode_config = load_yaml(&options.mode_config).context("load mode configuration")?;
    let rule_set = RuleSet::from_values(&rules, &mode_config).context("parse rule schema")?;
    Ok(LoadedInputs {
        export,
        contract_base,
        rule_set,
    })
}

/// Stages 2-3: build the contract model and run the blocking validation.
pub fn build_and_validate(inputs: &LoadedInputs, period: Period) -> Result<Value> {
    let document = build_contract(&inputs.export, &inputs.contract_base, period)
        .context("map export onto contract model")?;
    info!("contract model built");

    validate_with(&document, &inputs.rule_set)?;
    info!("contract model validated");

    Ok(document)
}

/// Run the full pipeline.
pub fn run_pipeline(options: &PipelineOptions) -> Result<PipelineResult> {
    let inputs = load_inputs(options)?;
    let document = build_and_validate(&inputs, Period::current())?;

    let Some(template_path) = &options.template else {
        return Ok(PipelineResult {
            document,
            report_path: None,
        });
    };

    let template = fs::read_to_string(template_path)
        .with_context(|| format!("read template {}", template_path.display()))?;
    let report = render(&document, &template);
    info!("report rendered");

    let report_path = match (&options.output, options.dry_run) {
        (Some(output), false) => {
            write_report(output, &report)?;
            info!(path = %output.display(), "report written");
            Some(output.clone())
        }
        _ => None,
    };

    Ok(PipelineResult {
        document,
        report_path,
    })
}

fn write_report(path: &Path, report: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    fs::write(path, report).with_context(|| format!("write report {}", path.display()))
}

fn load_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse JSON {}", path.display()))
}

fn load_yaml(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parse YAML {}", path.display()))
}
