//! Command entry points wiring CLI arguments to the pipeline.

use anyhow::Result;
use serde_json::Value;

use wisp_cli::pipeline::{PipelineOptions, PipelineResult, run_pipeline};

use crate::cli::{CheckArgs, RunArgs};

pub fn run_report(args: &RunArgs) -> Result<PipelineResult> {
    let options = PipelineOptions {
        export: args.export.clone(),
        contract_base: args.contract_base.clone(),
        rules: args.rules.clone(),
        mode_config: args.mode_config.clone(),
        template: Some(args.template.clone()),
        output: Some(args.output.clone()),
        dry_run: args.dry_run,
    };
    run_pipeline(&options)
}

pub fn run_check(args: &CheckArgs) -> Result<Value> {
    let options = PipelineOptions {
        export: args.export.clone(),
        contract_base: args.contract_base.clone(),
        rules: args.rules.clone(),
        mode_config: args.mode_config.clone(),
        template: None,
        output: None,
        dry_run: false,
    };
    run_pipeline(&options).map(|result| result.document)
}
