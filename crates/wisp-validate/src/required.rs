//! Required-field recursive walk.
//!
//! Co-traverses the document and the rule tree, accumulating a
//! dotted/indexed path for diagnostics. Dispatch is on the rule variant:
//! list-typed rules enforce list-of-objects shape and recurse per item,
//! object rules recurse field by field (objects are transparent to the
//! path; only list items append an `[index]`), leaf rules check the
//! required flag against the value. A `detalle` sub-rule additionally
//! recurses into the value's content, after the shape checks for the same
//! key. Failures propagate immediately, so the first one encountered in
//! traversal order wins.

use std::collections::BTreeMap;

use serde_json::Value;

use wisp_model::{ContractRules, RuleKind, RuleNode};

use crate::error::{BusinessRuleError, Result, StructuralError};
use crate::paths::join;

pub(crate) fn check_required(document: &Value, rules: &ContractRules) -> Result<()> {
    match document.as_object() {
        Some(root) => walk_fields(root, &rules.fields, ""),
        // A non-object document has no fields to check; the structural
        // consistency pass has already rejected it when the schema declares
        // any path.
        None => Ok(()),
    }
}

fn walk_fields(
    data: &serde_json::Map<String, Value>,
    fields: &BTreeMap<String, RuleNode>,
    path: &str,
) -> Result<()> {
    for (name, rule) in fields {
        let field_path = join(path, name);
        let Some(value) = data.get(name) else {
            if rule.required {
                return Err(BusinessRuleError::MissingRequiredField { path: field_path }.into());
            }
            continue;
        };
        walk_value(value, rule, &field_path)?;
    }
    Ok(())
}

fn walk_value(value: &Value, rule: &RuleNode, path: &str) -> Result<()> {
    match &rule.kind {
        RuleKind::List(item_rule) => {
            let Value::Array(items) = value else {
                return Err(StructuralError::ExpectedList {
                    path: path.to_string(),
                }
                .into());
            };
            // An empty list is a legitimate business outcome (zero instances
            // in the period); its per-item rules are not evaluated.
            for (index, entry) in items.iter().enumerate() {
                let Value::Object(item) = entry else {
                    return Err(StructuralError::ExpectedObjectItem {
                        path: path.to_string(),
                        index,
                    }
                    .into());
                };
                if let RuleKind::Object(item_fields) = &item_rule.kind {
                    walk_fields(item, item_fields, &format!("{path}[{index}]"))?;
                }
            }
        }
        RuleKind::Object(fields) => {
            if let Value::Object(map) = value {
                walk_fields(map, fields, path)?;
            } else if rule.required && is_empty_value(value) {
                return Err(BusinessRuleError::InvalidRequiredField {
                    path: path.to_string(),
                }
                .into());
            }
        }
        RuleKind::Leaf => {
            if !value.is_object() && rule.required && is_empty_value(value) {
                return Err(BusinessRuleError::InvalidRequiredField {
                    path: path.to_string(),
                }
                .into());
            }
        }
    }

    // `detalle` rules fire on top of the shape checks above, never instead
    // of them. Empty lists skip interior validation entirely.
    if let Some(detail) = &rule.detail
        && let RuleKind::Object(detail_fields) = &detail.kind
    {
        match value {
            Value::Array(items) => {
                for (index, entry) in items.iter().enumerate() {
                    if let Value::Object(item) = entry {
                        walk_fields(item, detail_fields, &format!("{path}[{index}]"))?;
                    }
                }
            }
            Value::Object(map) => {
                walk_fields(map, detail_fields, path)?;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Invalid under strict validation: null, blank string, empty list.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
