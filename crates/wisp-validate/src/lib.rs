//! Contract validation engine.
//!
//! Co-traverses a contract document (`serde_json::Value`) and a parsed rule
//! tree, enforcing five checks in strict, blocking order:
//!
//! 1. Structural consistency between schema-declared paths and document
//!    paths (catches schema/document drift before any rule can no-op).
//! 2. Strict-mode gate on the deployment configuration.
//! 3. Required-field recursive walk with dotted/indexed path diagnostics.
//! 4. Global denylist of forbidden boilerplate strings.
//! 5. Conditional cross-field business rules.
//!
//! A later check never runs if an earlier one failed: the walk assumes the
//! structural pass established well-formedness, and the conditional rules
//! assume the walk validated their inputs. The engine is fail-fast (one
//! structured failure, no accumulation), read-only on its inputs, and free
//! of shared state, so a rule set may be shared across concurrent
//! validations of independent documents.

mod conditional;
mod error;
mod paths;
mod required;
mod text;

use serde_json::Value;
use tracing::debug;

use wisp_model::{ContractRules, RuleSet, STRICT_MODE, ValidationConfig};

pub use error::{BusinessRuleError, Result, StructuralError, ValidationError};

/// Validate a contract document against the rule schema and mode config.
///
/// Completes silently on success; the first violation aborts the run with a
/// diagnostic that locates the offending field without re-running the walk.
pub fn validate(
    document: &Value,
    rules: &ContractRules,
    config: &ValidationConfig,
) -> Result<()> {
    debug!("checking structural consistency");
    paths::check_structure(document, rules)?;

    debug!("checking validation mode");
    check_mode(config)?;

    debug!("checking required fields");
    required::check_required(document, rules)?;

    debug!(denylist_len = rules.forbidden_text.len(), "checking forbidden text");
    text::check_forbidden_text(document, &rules.forbidden_text)?;

    debug!("checking conditional rules");
    conditional::check_conditional_rules(document)?;

    Ok(())
}

/// [`validate`] against a combined [`RuleSet`].
pub fn validate_with(document: &Value, rule_set: &RuleSet) -> Result<()> {
    validate(document, &rule_set.rules, &rule_set.config)
}

fn check_mode(config: &ValidationConfig) -> Result<()> {
    if config.is_strict() {
        return Ok(());
    }
    Err(StructuralError::ModeNotStrict {
        found: config.mode.clone(),
        expected: STRICT_MODE.to_string(),
    }
    .into())
}
