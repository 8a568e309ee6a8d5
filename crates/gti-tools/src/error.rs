//! Error types for the gti-tools crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Graph(#[from] gti_graph::GraphError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ToolError>;

/// Reject blank identifiers before any session is opened.
///
/// The value is returned as given; identifiers are never normalized locally.
pub(crate) fn require<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidArguments(format!("`{field}` must not be empty")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_keeps_value_and_rejects_blank() {
        assert_eq!(require("url", "http://example.com/ ").unwrap(), "http://example.com/ ");
        let err = require("hash", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Invalid arguments: `hash` must not be empty");
    }

    #[test]
    fn test_graph_errors_pass_through_unchanged() {
        let err: ToolError = gti_graph::GraphError::NotFound {
            entity_type: "domains".to_string(),
            id: "nope.invalid".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "domains not found: nope.invalid");
    }
}
