//! Error taxonomy of the graph access layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error(
        "Relationship {relationship} does not exist. Available relationships are: {}",
        .allowed.join(",")
    )]
    UnknownRelationship {
        relationship: String,
        allowed: Vec<String>,
    },

    #[error("Upstream error{}: {body}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Upstream { status: Option<u16>, body: String },

    #[error("Unexpected object type: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Session error: {0}")]
    Session(#[from] gti_core::GtiError),
}

impl GraphError {
    /// Upstream failure that never produced an HTTP status.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Upstream {
            status: None,
            body: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_relationship_lists_allowed_names() {
        let err = GraphError::UnknownRelationship {
            relationship: "bogus".to_string(),
            allowed: vec!["comments".to_string(), "votes".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Relationship bogus does not exist. Available relationships are: comments,votes"
        );
    }

    #[test]
    fn upstream_message_includes_status_when_known() {
        let with_status = GraphError::Upstream {
            status: Some(503),
            body: "unavailable".to_string(),
        };
        assert_eq!(with_status.to_string(), "Upstream error (HTTP 503): unavailable");

        let transport = GraphError::transport("connection reset");
        assert_eq!(transport.to_string(), "Upstream error: connection reset");
    }
}
