//! Validation-mode configuration.
//!
//! Loaded from a small config document (YAML in production) that is kept
//! separate from the rule tree so operations can flip the mode without
//! touching the schema. The engine refuses to run unless the mode equals
//! the strict sentinel; this is a deployment safety gate, not a field rule.

use serde_json::Value;

/// The only mode the engine accepts.
pub const STRICT_MODE: &str = "estricto";

/// Parsed mode configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Raw mode string from `modo.validacion`.
    pub mode: String,
}

impl ValidationConfig {
    /// Read `modo.validacion` from the config document. A missing or
    /// non-string mode parses as empty and fails the strict gate later.
    pub fn from_value(document: &Value) -> Self {
        let mode = document
            .pointer("/modo/validacion")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self { mode }
    }

    /// Strict-mode configuration, for tests and embedded callers.
    pub fn strict() -> Self {
        Self {
            mode: STRICT_MODE.to_string(),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == STRICT_MODE
    }
}
