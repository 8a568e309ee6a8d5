//! Tool adapters: one function per tool, each a thin call into gti-graph.
//!
//! Every adapter opens one scoped session for the whole invocation, so the
//! session is released on success, on error, and on early return alike.

pub mod domains;
pub mod files;
pub mod intelligence;
pub mod ip_addresses;
pub mod urls;

use serde_json::{json, Value};

use gti_core::{EntityId, EntityType, FetchLimit, RelationshipView};
use gti_graph::{
    fetch_object, fetch_relationship, validate, Collection, GraphError, ObjectRequest,
    RelationshipRequest,
};

use crate::error::Result;
use crate::ToolContext;

/// Single-object request for `entity_type`, embedding its key relationships.
pub(crate) fn report_request(
    ctx: &ToolContext,
    entity_type: EntityType,
    id: impl Into<EntityId>,
    expected_type: &str,
) -> ObjectRequest {
    let embed = ctx.registry().key_relationships(&entity_type);
    ObjectRequest::new(entity_type, id)
        .embed(embed)
        .expect_type(expected_type)
}

pub(crate) async fn report(ctx: &ToolContext, request: &ObjectRequest) -> Result<Value> {
    let session = ctx.sessions().scope()?;
    Ok(fetch_object(&*session, request).await?)
}

/// Walk one relationship of an entity.
///
/// An unknown relationship name is returned as `{"error": ..}` data so the
/// caller can retry with a name from the echoed list. The name is checked
/// before a session is opened.
pub(crate) async fn related(
    ctx: &ToolContext,
    entity_type: EntityType,
    id: impl Into<EntityId>,
    relationship: &str,
    view: RelationshipView,
    limit: FetchLimit,
) -> Result<Value> {
    let allowed = ctx.registry().allowed(&entity_type);
    if let Err(err) = validate(relationship, allowed) {
        return Ok(error_value(&err));
    }

    let request = RelationshipRequest::new(entity_type, id, relationship)
        .view(view)
        .limit(limit);

    let session = ctx.sessions().scope()?;
    let collection = fetch_relationship(&*session, &request, allowed).await?;
    Ok(into_items(collection, relationship))
}

/// Items of a walk as a JSON array.
///
/// A truncated walk is not a failure: its items come back as
/// `{"items": [..], "note": ".."}` so the caller can tell them apart from a
/// complete result.
pub(crate) fn into_items(collection: Collection, source: &str) -> Value {
    match collection.diagnostic() {
        Some(note) => {
            tracing::warn!(source, items = collection.len(), "{note}");
            json!({ "items": collection.items, "note": note })
        }
        None => Value::Array(collection.items),
    }
}

pub(crate) fn error_value(err: &GraphError) -> Value {
    match err {
        GraphError::UnknownRelationship { allowed, .. } => json!({
            "error": err.to_string(),
            "available_relationships": allowed,
        }),
        other => json!({ "error": other.to_string() }),
    }
}
