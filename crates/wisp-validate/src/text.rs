//! Forbidden generic text check.
//!
//! Walks every string leaf in the document, normalizes it (trim +
//! uppercase) and fails on an exact denylist match. There is no field
//! scoping: boilerplate placeholders are forbidden anywhere in the
//! contract model.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::BusinessRuleError;
use crate::paths::join;

pub(crate) fn check_forbidden_text(
    document: &Value,
    forbidden: &BTreeSet<String>,
) -> Result<(), BusinessRuleError> {
    if forbidden.is_empty() {
        return Ok(());
    }
    scan(document, forbidden, "")
}

fn scan(value: &Value, forbidden: &BTreeSet<String>, path: &str) -> Result<(), BusinessRuleError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                scan(child, forbidden, &join(path, key))?;
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                scan(item, forbidden, &format!("{path}[{index}]"))?;
            }
        }
        Value::String(text) => {
            if forbidden.contains(&text.trim().to_uppercase()) {
                return Err(BusinessRuleError::ForbiddenText {
                    path: path.to_string(),
                    text: text.clone(),
                });
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn denylist() -> BTreeSet<String> {
        ["POR DEFINIR", "PENDIENTE"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn detects_forbidden_text_case_insensitively() {
        let document = json!({ "servicio": { "estado": "  por definir " } });
        let error =
            check_forbidden_text(&document, &denylist()).expect_err("boilerplate detected");
        assert_eq!(
            error,
            BusinessRuleError::ForbiddenText {
                path: "servicio.estado".to_string(),
                text: "  por definir ".to_string(),
            }
        );
    }

    #[test]
    fn reports_indexed_path_inside_lists() {
        let document = json!({ "pqrs": { "detalle": [ { "asunto": "ok" }, { "asunto": "PENDIENTE" } ] } });
        let error = check_forbidden_text(&document, &denylist()).expect_err("boilerplate in list");
        assert_eq!(
            error,
            BusinessRuleError::ForbiddenText {
                path: "pqrs.detalle[1].asunto".to_string(),
                text: "PENDIENTE".to_string(),
            }
        );
    }

    #[test]
    fn substrings_are_not_matches() {
        let document = json!({ "nota": "el cronograma queda por definir en comite" });
        assert!(check_forbidden_text(&document, &denylist()).is_ok());
    }

    #[test]
    fn empty_denylist_always_passes() {
        let document = json!({ "nota": "POR DEFINIR" });
        assert!(check_forbidden_text(&document, &BTreeSet::new()).is_ok());
    }
}
