//! Shared data model for the WISP compliance reporter.
//!
//! The contract document itself is a dynamically-shaped `serde_json::Value`
//! tree; its structure is discovered at traversal time by the validator.
//! This crate holds the typed pieces that surround it: the parsed rule tree,
//! the validation-mode configuration, and the loader that combines both.

pub mod config;
pub mod error;
pub mod rules;

pub use config::{STRICT_MODE, ValidationConfig};
pub use error::{ModelError, Result};
pub use rules::{ContractRules, RuleKind, RuleNode, RuleSet};
