//! File tools: reports, relationships and sandbox behaviour.

use serde_json::Value;

use gti_core::EntityType;
use gti_graph::fetch_data;

use super::{related, report, report_request};
use crate::error::{require, Result};
use crate::types::{FileBehaviourArgs, FileRelationshipArgs, HashArgs};
use crate::ToolContext;

/// Report for a file identified by MD5, SHA-1 or SHA-256.
pub async fn get_file_report(ctx: &ToolContext, args: HashArgs) -> Result<Value> {
    let hash = require("hash", &args.hash)?;
    let request = report_request(ctx, EntityType::FILES, hash, "file")
        .param("exclude_attributes", "last_analysis_results");
    report(ctx, &request).await
}

pub async fn get_entities_related_to_a_file(
    ctx: &ToolContext,
    args: FileRelationshipArgs,
) -> Result<Value> {
    let hash = require("hash", &args.hash)?;
    let rel = &args.relationship;
    related(
        ctx,
        EntityType::FILES,
        hash,
        &rel.relationship_name,
        rel.view(),
        rel.limit,
    )
    .await
}

/// One sandbox report; ids look like `{sha256}_{sandbox name}`.
pub async fn get_file_behavior_report(ctx: &ToolContext, args: FileBehaviourArgs) -> Result<Value> {
    let id = require("file_behaviour_id", &args.file_behaviour_id)?;
    let request = report_request(ctx, EntityType::FILE_BEHAVIOURS, id, "file_behaviour");
    report(ctx, &request).await
}

/// Summary merged across every sandbox that ran the file.
pub async fn get_file_behavior_summary(ctx: &ToolContext, args: HashArgs) -> Result<Value> {
    let hash = require("hash", &args.hash)?;
    let path = format!("/{}/{hash}/behaviour_summary", EntityType::FILES);
    let session = ctx.sessions().scope()?;
    Ok(fetch_data(&*session, &path, &[]).await?)
}
