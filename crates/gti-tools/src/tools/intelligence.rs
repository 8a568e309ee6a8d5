//! Intelligence tools: search, WHOIS history and hunting rulesets.

use serde_json::Value;

use gti_core::{EntityType, RelationshipView};
use gti_graph::consume_search;

use super::{into_items, related, report, report_request};
use crate::error::{require, Result};
use crate::types::{HuntingRulesetArgs, HuntingRulesetRelationshipArgs, SearchArgs, WhoisArgs};
use crate::ToolContext;

const SEARCH_PATH: &str = "/intelligence/search";
const WHOIS_PATH: &str = "/intelligence/whois_search";

/// Intelligence search. Results mix files, URLs, domains and IPs.
pub async fn search(ctx: &ToolContext, args: SearchArgs) -> Result<Value> {
    let query = require("query", &args.query)?;
    let params = vec![
        ("query".to_string(), query.to_string()),
        ("order".to_string(), args.order_by.clone()),
    ];
    let session = ctx.sessions().scope()?;
    let collection = consume_search(&*session, SEARCH_PATH, &params, args.limit).await?;
    Ok(into_items(collection, SEARCH_PATH))
}

pub async fn get_whois(ctx: &ToolContext, args: WhoisArgs) -> Result<Value> {
    let query = require("query", &args.query)?;
    let params = vec![("query".to_string(), query.to_string())];
    let session = ctx.sessions().scope()?;
    let collection = consume_search(&*session, WHOIS_PATH, &params, args.limit).await?;
    Ok(into_items(collection, WHOIS_PATH))
}

pub async fn get_hunting_ruleset(ctx: &ToolContext, args: HuntingRulesetArgs) -> Result<Value> {
    let id = require("ruleset_id", &args.ruleset_id)?;
    let request = report_request(ctx, EntityType::HUNTING_RULESETS, id, "hunting_ruleset");
    report(ctx, &request).await
}

pub async fn get_entities_related_to_a_hunting_ruleset(
    ctx: &ToolContext,
    args: HuntingRulesetRelationshipArgs,
) -> Result<Value> {
    let id = require("ruleset_id", &args.ruleset_id)?;
    related(
        ctx,
        EntityType::HUNTING_RULESETS,
        id,
        &args.relationship_name,
        RelationshipView::Descriptors,
        args.limit,
    )
    .await
}
