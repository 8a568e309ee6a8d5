//! Single-object reads.

use serde_json::Value;

use gti_core::{EntityId, EntityType};

use crate::error::{GraphError, Result};
use crate::sanitize::sanitize;
use crate::session::Session;

/// Description of a single-object fetch.
#[derive(Debug, Clone)]
pub struct ObjectRequest {
    pub entity_type: EntityType,
    pub id: EntityId,
    /// Relationships the API should embed inline (server-side expansion).
    pub embed: Vec<String>,
    /// Extra query parameters, passed through verbatim.
    pub params: Vec<(String, String)>,
    /// When set, the returned object's `type` must equal this value.
    pub expected_type: Option<String>,
}

impl ObjectRequest {
    pub fn new(entity_type: EntityType, id: impl Into<EntityId>) -> Self {
        Self {
            entity_type,
            id: id.into(),
            embed: Vec::new(),
            params: Vec::new(),
            expected_type: None,
        }
    }

    pub fn embed<S: AsRef<str>>(mut self, relationships: &[S]) -> Self {
        self.embed
            .extend(relationships.iter().map(|r| r.as_ref().to_string()));
        self
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn expect_type(mut self, kind: &str) -> Self {
        self.expected_type = Some(kind.to_string());
        self
    }

    fn path(&self) -> String {
        format!("/{}/{}", self.entity_type, self.id)
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = self.params.clone();
        if !self.embed.is_empty() {
            query.push(("relationships".to_string(), self.embed.join(",")));
        }
        query
    }
}

/// Fetch one entity, with its embedded relationships, in a single round trip.
///
/// Returns the sanitized `data` member of the response.
pub async fn fetch_object(session: &dyn Session, request: &ObjectRequest) -> Result<Value> {
    let path = request.path();
    let response = session.get(&path, &request.query()).await?;
    let status = response.status;
    let body = response.into_success(request.entity_type.as_str(), request.id.as_str())?;
    let data = take_data(body, &path)?;

    if let Some(expected) = &request.expected_type {
        let actual = data.get("type").and_then(Value::as_str).unwrap_or_default();
        if actual != expected {
            return Err(GraphError::TypeMismatch {
                expected: expected.clone(),
                actual: actual.to_string(),
            });
        }
    }

    tracing::debug!(
        entity_type = %request.entity_type,
        id = %request.id,
        embedded = request.embed.len(),
        status,
        "Fetched object"
    );
    Ok(sanitize(data))
}

/// GET an arbitrary sub-resource and return its sanitized `data` member.
///
/// Used for endpoints that are neither plain objects nor lists, such as a
/// file's behaviour summary. A 404 reports the path itself as the missing id.
pub async fn fetch_data(
    session: &dyn Session,
    path: &str,
    params: &[(String, String)],
) -> Result<Value> {
    let response = session.get(path, params).await?;
    let body = response.into_success("resource", path)?;
    let data = take_data(body, path)?;
    Ok(sanitize(data))
}

pub(crate) fn take_data(body: Value, path: &str) -> Result<Value> {
    match body {
        Value::Object(mut map) => map.remove("data").ok_or_else(|| GraphError::Upstream {
            status: None,
            body: format!("response for {path} has no data member"),
        }),
        other => Err(GraphError::Upstream {
            status: None,
            body: format!("response for {path} is not an object: {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSessionFactory;
    use crate::session::{ApiResponse, SessionFactory};
    use serde_json::json;

    fn file_body() -> Value {
        json!({
            "data": {
                "type": "file",
                "id": "abc",
                "links": {"self": "https://example.invalid/files/abc"},
                "attributes": {"size": 10, "last_analysis_results": {"E": {}}}
            }
        })
    }

    #[tokio::test]
    async fn test_builds_path_and_query() {
        let factory = MockSessionFactory::new();
        factory.respond_ok("/files/abc", file_body());
        let session = factory.scope().unwrap();

        let request = ObjectRequest::new(EntityType::FILES, "abc")
            .embed(&["contacted_domains", "contacted_ips"])
            .param("exclude_attributes", "last_analysis_results")
            .expect_type("file");
        let object = fetch_object(&*session, &request).await.unwrap();

        assert_eq!(object["id"], "abc");
        assert!(object.get("links").is_none());
        assert!(object["attributes"].get("last_analysis_results").is_none());

        let requests = factory.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/files/abc");
        assert_eq!(
            requests[0].param("relationships"),
            Some("contacted_domains,contacted_ips")
        );
        assert_eq!(
            requests[0].param("exclude_attributes"),
            Some("last_analysis_results")
        );
    }

    #[tokio::test]
    async fn test_no_relationships_param_without_embeds() {
        let factory = MockSessionFactory::new();
        factory.respond_ok("/intelligence/hunting_rulesets/r1", json!({"data": {"type": "hunting_ruleset", "id": "r1"}}));
        let session = factory.scope().unwrap();

        let request = ObjectRequest::new(EntityType::HUNTING_RULESETS, "r1");
        fetch_object(&*session, &request).await.unwrap();
        assert!(factory.requests()[0].params.is_empty());
    }

    #[tokio::test]
    async fn test_type_mismatch() {
        let factory = MockSessionFactory::new();
        factory.respond_ok("/files/abc", json!({"data": {"type": "url", "id": "abc"}}));
        let session = factory.scope().unwrap();

        let request = ObjectRequest::new(EntityType::FILES, "abc").expect_type("file");
        let err = fetch_object(&*session, &request).await.unwrap_err();
        assert!(matches!(err, GraphError::TypeMismatch { ref actual, .. } if actual == "url"));
    }

    #[tokio::test]
    async fn test_status_errors() {
        let factory = MockSessionFactory::new();
        factory.respond("/files/missing", ApiResponse::new(404, json!({"error": {}})));
        factory.respond("/files/boom", ApiResponse::new(500, json!({"error": {"code": "Internal"}})));
        let session = factory.scope().unwrap();

        let missing = fetch_object(&*session, &ObjectRequest::new(EntityType::FILES, "missing"))
            .await
            .unwrap_err();
        assert!(matches!(missing, GraphError::NotFound { ref id, .. } if id == "missing"));

        let boom = fetch_object(&*session, &ObjectRequest::new(EntityType::FILES, "boom"))
            .await
            .unwrap_err();
        assert!(matches!(boom, GraphError::Upstream { status: Some(500), .. }));
    }

    #[tokio::test]
    async fn test_missing_data_member_is_upstream_error() {
        let factory = MockSessionFactory::new();
        factory.respond_ok("/files/abc", json!({"meta": {}}));
        let session = factory.scope().unwrap();

        let err = fetch_object(&*session, &ObjectRequest::new(EntityType::FILES, "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Upstream { status: None, .. }));
    }

    #[tokio::test]
    async fn test_fetch_data_sub_resource() {
        let factory = MockSessionFactory::new();
        factory.respond_ok(
            "/files/abc/behaviour_summary",
            json!({"data": {"tags": ["DETECT_DEBUG_ENVIRONMENT"], "verdicts": []}}),
        );
        let session = factory.scope().unwrap();

        let summary = fetch_data(&*session, "/files/abc/behaviour_summary", &[])
            .await
            .unwrap();
        assert_eq!(summary, json!({"tags": ["DETECT_DEBUG_ENVIRONMENT"]}));
    }
}
