//! Declarative contract rule tree.
//!
//! The rule schema is authored as a JSON document whose keys are contract
//! field names and whose values are nested rule mappings. A handful of
//! reserved keys control how a field is validated:
//!
//! - `obligatorio`: the field must be present and non-empty.
//! - `_tipo: "lista"`: the field is a list of objects; per-item rules live
//!   under `campos`.
//! - `detalle`: rules applied to the field's nested content (list items or
//!   a nested object), on top of whatever other checks the field carries.
//!
//! Parsing turns that duck-typed tree into a tagged [`RuleNode`] so the
//! validator dispatches on an explicit variant instead of re-inspecting raw
//! JSON shapes at every step.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::config::ValidationConfig;
use crate::error::{ModelError, Result};

/// Reserved rule key: field must be present and non-empty.
pub const KEY_REQUIRED: &str = "obligatorio";
/// Reserved rule key: declares the shape of the field (`"lista"`).
pub const KEY_TYPE: &str = "_tipo";
/// Reserved rule key: per-item rules for a list-typed field.
pub const KEY_ITEM_FIELDS: &str = "campos";
/// Rule key applied to a field's nested content. Unlike the keys above it is
/// also an ordinary field name in the contract model, so it is walked both
/// ways.
pub const KEY_DETAIL: &str = "detalle";
/// `_tipo` value marking a schema-typed list.
pub const TYPE_LIST: &str = "lista";

/// Schema-wide configuration block: validation mode marker.
pub const BLOCK_MODE: &str = "modo_validacion";
/// Schema-wide configuration block: general (non-structural) rules.
pub const BLOCK_GENERAL: &str = "reglas_generales";
/// Denylist of boilerplate strings under [`BLOCK_GENERAL`].
pub const KEY_FORBIDDEN_TEXT: &str = "texto_generico_prohibido";

/// A single parsed rule attached to one contract field.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleNode {
    /// The field must exist and hold a non-empty value.
    pub required: bool,
    /// Shape-specific rules for the field's value.
    pub kind: RuleKind,
    /// Rules applied to the field's nested content (list items or nested
    /// object), evaluated in addition to `kind`.
    pub detail: Option<Box<RuleNode>>,
}

/// Shape of the value a [`RuleNode`] describes.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Scalar field; only the `required` flag applies.
    Leaf,
    /// List of objects; every item is validated against the inner rules.
    List(Box<RuleNode>),
    /// Nested object; each named field is validated against its own rule.
    Object(BTreeMap<String, RuleNode>),
}

impl RuleNode {
    fn from_map(map: &serde_json::Map<String, Value>) -> Result<Self> {
        let required = map
            .get(KEY_REQUIRED)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let detail = match map.get(KEY_DETAIL) {
            Some(Value::Object(sub)) => Some(Box::new(Self::from_map(sub)?)),
            _ => None,
        };

        let is_list = map.get(KEY_TYPE).and_then(Value::as_str) == Some(TYPE_LIST);
        let kind = if is_list {
            let item = match map.get(KEY_ITEM_FIELDS) {
                Some(Value::Object(sub)) => Self::from_map(sub)?,
                Some(_) => return Err(ModelError::ItemRulesNotMapping),
                None => Self {
                    required: false,
                    kind: RuleKind::Object(BTreeMap::new()),
                    detail: None,
                },
            };
            RuleKind::List(Box::new(item))
        } else {
            let mut fields = BTreeMap::new();
            for (key, value) in map {
                if matches!(key.as_str(), KEY_REQUIRED | KEY_TYPE | KEY_ITEM_FIELDS) {
                    continue;
                }
                // Non-mapping entries are annotations, not structural rules.
                if let Value::Object(sub) = value {
                    fields.insert(key.clone(), Self::from_map(sub)?);
                }
            }
            if fields.is_empty() {
                RuleKind::Leaf
            } else {
                RuleKind::Object(fields)
            }
        };

        Ok(Self {
            required,
            kind,
            detail,
        })
    }
}

/// Parsed rule schema: per-field rule tree plus the global denylist.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContractRules {
    /// Top-level contract fields and their rules.
    pub fields: BTreeMap<String, RuleNode>,
    /// Boilerplate strings forbidden anywhere in the document, stored
    /// trimmed and uppercased.
    pub forbidden_text: BTreeSet<String>,
}

impl ContractRules {
    /// Parse the rule schema document. The reserved `modo_validacion` and
    /// `reglas_generales` blocks are configuration, not field rules, and are
    /// excluded from the field map.
    pub fn from_value(document: &Value) -> Result<Self> {
        let map = document.as_object().ok_or(ModelError::SchemaNotMapping)?;

        let mut fields = BTreeMap::new();
        for (key, value) in map {
            if key == BLOCK_MODE || key == BLOCK_GENERAL {
                continue;
            }
            if let Value::Object(sub) = value {
                fields.insert(key.clone(), RuleNode::from_map(sub)?);
            }
        }

        let forbidden_text = match map.get(BLOCK_GENERAL).and_then(|b| b.get(KEY_FORBIDDEN_TEXT)) {
            Some(Value::Array(entries)) => {
                let mut denylist = BTreeSet::new();
                for entry in entries {
                    let text = entry
                        .as_str()
                        .ok_or(ModelError::ForbiddenTextEntryNotString)?;
                    denylist.insert(text.trim().to_uppercase());
                }
                denylist
            }
            Some(_) => return Err(ModelError::ForbiddenTextNotList),
            None => BTreeSet::new(),
        };

        Ok(Self {
            fields,
            forbidden_text,
        })
    }
}

/// The full in-memory rule structure: rule tree + mode configuration, loaded
/// from two separate source documents.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub rules: ContractRules,
    pub config: ValidationConfig,
}

impl RuleSet {
    /// Combine the rule-tree document and the mode-config document.
    pub fn from_values(rules_document: &Value, config_document: &Value) -> Result<Self> {
        Ok(Self {
            rules: ContractRules::from_value(rules_document)?,
            config: ValidationConfig::from_value(config_document),
        })
    }
}
