use thiserror::Error;

use crate::rules::{KEY_FORBIDDEN_TEXT, KEY_ITEM_FIELDS};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("rule schema root must be a mapping")]
    SchemaNotMapping,
    #[error("'{KEY_ITEM_FIELDS}' must be a mapping of per-item rules")]
    ItemRulesNotMapping,
    #[error("'{KEY_FORBIDDEN_TEXT}' must be a list")]
    ForbiddenTextNotList,
    #[error("'{KEY_FORBIDDEN_TEXT}' entries must be strings")]
    ForbiddenTextEntryNotString,
}

pub type Result<T> = std::result::Result<T, ModelError>;
