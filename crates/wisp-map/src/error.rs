use thiserror::Error;

/// Errors from mapping the operations export onto the contract model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The operations export must be a JSON object.
    #[error("operations export must be an object")]
    ExportNotObject,
    /// The contract base skeleton must be a JSON object.
    #[error("contract base must be an object")]
    BaseNotObject,
    /// A top-level export section that must be a list is not one.
    #[error("export field '{field}' must be a list")]
    ExpectedList { field: String },
}

pub type Result<T> = std::result::Result<T, MapError>;
