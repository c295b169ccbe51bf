//! Error taxonomy for contract validation.
//!
//! Two kinds, distinguished for diagnostics only: structural errors mean the
//! document and schema disagree about shape (or the deployment is not in
//! strict mode), business-rule errors mean a well-formed document violates a
//! contract rule. Both are fatal to the run and both abort before rendering.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    BusinessRule(#[from] BusinessRuleError),
}

/// Schema/document shape mismatch or a mis-configured deployment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The rule schema references paths the document does not declare.
    #[error("rule schema references paths missing from the document: {}", paths.join(", "))]
    SchemaDrift { paths: Vec<String> },
    /// A field declared `_tipo: lista` does not hold a list.
    #[error("{path} must be a list")]
    ExpectedList { path: String },
    /// A list-typed field holds an item that is not an object.
    #[error("{path}[{index}] must be an object")]
    ExpectedObjectItem { path: String, index: usize },
    /// The configured validation mode is not the strict sentinel.
    #[error("validation mode is '{found}', expected '{expected}'")]
    ModeNotStrict { found: String, expected: String },
}

/// A well-formed document that violates a contract rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusinessRuleError {
    #[error("missing required field: {path}")]
    MissingRequiredField { path: String },
    #[error("required field is empty or invalid: {path}")]
    InvalidRequiredField { path: String },
    #[error("forbidden boilerplate text at {path}: '{text}'")]
    ForbiddenText { path: String, text: String },
    /// Cross-field invariant: quality indicators cannot apply to a period
    /// with no active users.
    #[error("quality indicators cannot apply when there are no active users")]
    QualityIndicatorsWithoutUsers,
}

pub type Result<T> = std::result::Result<T, ValidationError>;
