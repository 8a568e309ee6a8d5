//! URL tools. URLs are addressed by their derived identifier.

use serde_json::Value;

use gti_core::EntityType;
use gti_graph::url_id;

use super::{related, report, report_request};
use crate::error::{require, Result};
use crate::types::{UrlArgs, UrlRelationshipArgs};
use crate::ToolContext;

pub async fn get_url_report(ctx: &ToolContext, args: UrlArgs) -> Result<Value> {
    let url = require("url", &args.url)?;
    let request = report_request(ctx, EntityType::URLS, url_id(url), "url")
        .param("exclude_attributes", "last_analysis_results");
    report(ctx, &request).await
}

pub async fn get_entities_related_to_a_url(
    ctx: &ToolContext,
    args: UrlRelationshipArgs,
) -> Result<Value> {
    let url = require("url", &args.url)?;
    let rel = &args.relationship;
    related(
        ctx,
        EntityType::URLS,
        url_id(url),
        &rel.relationship_name,
        rel.view(),
        rel.limit,
    )
    .await
}
