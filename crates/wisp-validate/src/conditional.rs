//! Conditional (cross-field) business rules.
//!
//! Evaluated last, once structural validity is established. Each rule reads
//! two or more already-validated fields and fails with a descriptive,
//! path-free message. New invariants are added to [`CONDITIONAL_RULES`].

use serde_json::Value;

use crate::error::BusinessRuleError;

type ConditionalRule = fn(&Value) -> Result<(), BusinessRuleError>;

const CONDITIONAL_RULES: &[ConditionalRule] = &[quality_indicators_require_active_users];

pub(crate) fn check_conditional_rules(document: &Value) -> Result<(), BusinessRuleError> {
    for rule in CONDITIONAL_RULES {
        rule(document)?;
    }
    Ok(())
}

/// Quality indicators only apply to periods with active users. Rules do not
/// assume structures the schema never declared, so absent fields skip the
/// check.
fn quality_indicators_require_active_users(document: &Value) -> Result<(), BusinessRuleError> {
    let active_users = document.pointer("/usuarios/activos").and_then(Value::as_i64);
    let indicators_apply = document
        .pointer("/indicadores_calidad/aplican")
        .and_then(Value::as_bool);

    if active_users == Some(0) && indicators_apply == Some(true) {
        return Err(BusinessRuleError::QualityIndicatorsWithoutUsers);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indicators_cannot_apply_without_active_users() {
        let document = json!({
            "usuarios": { "activos": 0 },
            "indicadores_calidad": { "aplican": true }
        });
        assert_eq!(
            check_conditional_rules(&document),
            Err(BusinessRuleError::QualityIndicatorsWithoutUsers)
        );
    }

    #[test]
    fn indicators_may_apply_with_active_users() {
        let document = json!({
            "usuarios": { "activos": 12 },
            "indicadores_calidad": { "aplican": true }
        });
        assert!(check_conditional_rules(&document).is_ok());
    }

    #[test]
    fn non_applying_indicators_pass_with_zero_users() {
        let document = json!({
            "usuarios": { "activos": 0 },
            "indicadores_calidad": { "aplican": false }
        });
        assert!(check_conditional_rules(&document).is_ok());
    }

    #[test]
    fn absent_fields_skip_the_rule() {
        assert!(check_conditional_rules(&json!({})).is_ok());
    }
}
