//! Structural consistency: schema-declared paths vs. document paths.
//!
//! Catches schema/document drift (a renamed field, a dropped section) before
//! any field-level rule can silently no-op. A list's shape is represented
//! once through its first element, since list items are assumed
//! schema-homogeneous; list-typed rule nodes contribute no child paths
//! because their per-item rules describe item shape, not document paths.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde_json::Value;

use wisp_model::{ContractRules, RuleKind, RuleNode};

use crate::error::StructuralError;

pub(crate) fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Fail if any schema-declared path is absent from the document.
pub(crate) fn check_structure(
    document: &Value,
    rules: &ContractRules,
) -> Result<(), StructuralError> {
    let declared = schema_paths(&rules.fields);
    let present = document_paths(document);
    let missing: Vec<String> = declared.difference(&present).cloned().collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StructuralError::SchemaDrift { paths: missing })
    }
}

pub(crate) fn schema_paths(fields: &BTreeMap<String, RuleNode>) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    collect_schema_paths(fields, "", &mut paths);
    paths
}

fn collect_schema_paths(
    fields: &BTreeMap<String, RuleNode>,
    prefix: &str,
    paths: &mut BTreeSet<String>,
) {
    for (name, node) in fields {
        let path = join(prefix, name);
        paths.insert(path.clone());
        if let RuleKind::Object(children) = &node.kind {
            collect_schema_paths(children, &path, paths);
        }
    }
}

pub(crate) fn document_paths(document: &Value) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    collect_document_paths(document, "", &mut paths);
    paths
}

fn collect_document_paths(value: &Value, prefix: &str, paths: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = join(prefix, key);
                paths.insert(path.clone());
                collect_document_paths(child, &path, paths);
            }
        }
        // The first element stands in for the whole list, under the same path.
        Value::Array(items) => {
            if let Some(first) = items.first() {
                collect_document_paths(first, prefix, paths);
            }
        }
        _ => {}
    }
}
