//! The `Session` capability and its scoped lifetime.
//!
//! A session performs authenticated GETs against the graph API. One session
//! serves exactly one tool invocation: it is opened through a
//! [`SessionFactory`], wrapped in a [`SessionScope`], and released when the
//! scope is dropped, whichever way the invocation exits.

use std::ops::Deref;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{GraphError, Result};

/// Status and decoded body of one GET.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Map a non-success status to the access-layer taxonomy.
    ///
    /// `404` becomes [`GraphError::NotFound`] for the given entity; any other
    /// non-2xx status becomes [`GraphError::Upstream`] carrying the body.
    pub fn into_success(self, entity_type: &str, id: &str) -> Result<Value> {
        if self.status == 404 {
            return Err(GraphError::NotFound {
                entity_type: entity_type.to_string(),
                id: id.to_string(),
            });
        }
        if !self.is_success() {
            return Err(GraphError::Upstream {
                status: Some(self.status),
                body: body_text(&self.body),
            });
        }
        Ok(self.body)
    }
}

/// Render a response body for diagnostics without double-quoting plain text.
pub(crate) fn body_text(body: &Value) -> String {
    match body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Authenticated access to the graph API for a single invocation.
#[async_trait]
pub trait Session: Send + Sync {
    /// GET `path` (relative, starting with the collection name) with query `params`.
    ///
    /// Transport failures are reported as [`GraphError::Upstream`] without a status.
    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<ApiResponse>;

    /// Release pooled connections. Called exactly once, by [`SessionScope`].
    fn close(&self);
}

/// Opens sessions on demand.
pub trait SessionFactory: Send + Sync {
    fn open(&self) -> Result<Box<dyn Session>>;

    /// Open a session bound to the returned scope.
    fn scope(&self) -> Result<SessionScope> {
        Ok(SessionScope::new(self.open()?))
    }
}

/// Owns a session for the duration of one invocation and closes it on drop.
pub struct SessionScope {
    session: Box<dyn Session>,
}

impl SessionScope {
    pub fn new(session: Box<dyn Session>) -> Self {
        Self { session }
    }
}

impl Deref for SessionScope {
    type Target = dyn Session;

    fn deref(&self) -> &Self::Target {
        self.session.as_ref()
    }
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        self.session.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSessionFactory;

    #[test]
    fn test_status_mapping() {
        let missing = ApiResponse::new(404, serde_json::json!({"error": {"code": "NotFoundError"}}));
        assert!(matches!(
            missing.into_success("files", "abc"),
            Err(GraphError::NotFound { ref entity_type, ref id }) if entity_type == "files" && id == "abc"
        ));

        let quota = ApiResponse::new(429, Value::String("QuotaExceeded".to_string()));
        match quota.into_success("files", "abc") {
            Err(GraphError::Upstream { status, body }) => {
                assert_eq!(status, Some(429));
                assert_eq!(body, "QuotaExceeded");
            }
            other => panic!("unexpected: {other:?}"),
        }

        let ok = ApiResponse::ok(serde_json::json!({"data": []}));
        assert!(ok.into_success("files", "abc").is_ok());
    }

    #[test]
    fn test_scope_releases_on_drop() {
        let factory = MockSessionFactory::new();
        {
            let _scope = factory.scope().unwrap();
            assert_eq!(factory.opened(), 1);
            assert_eq!(factory.closed(), 0);
        }
        assert_eq!(factory.closed(), 1);
    }
}
