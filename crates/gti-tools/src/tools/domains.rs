//! Domain tools.

use serde_json::Value;

use gti_core::EntityType;

use super::{related, report, report_request};
use crate::error::{require, Result};
use crate::types::{DomainArgs, DomainRelationshipArgs};
use crate::ToolContext;

pub async fn get_domain_report(ctx: &ToolContext, args: DomainArgs) -> Result<Value> {
    let domain = require("domain", &args.domain)?;
    let request = report_request(ctx, EntityType::DOMAINS, domain, "domain")
        .param("exclude_attributes", "last_analysis_results");
    report(ctx, &request).await
}

pub async fn get_entities_related_to_a_domain(
    ctx: &ToolContext,
    args: DomainRelationshipArgs,
) -> Result<Value> {
    let domain = require("domain", &args.domain)?;
    let rel = &args.relationship;
    related(
        ctx,
        EntityType::DOMAINS,
        domain,
        &rel.relationship_name,
        rel.view(),
        rel.limit,
    )
    .await
}
