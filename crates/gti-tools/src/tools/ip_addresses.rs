//! IP address tools.

use serde_json::Value;

use gti_core::EntityType;

use super::{related, report, report_request};
use crate::error::{require, Result};
use crate::types::{IpAddressArgs, IpAddressRelationshipArgs};
use crate::ToolContext;

pub async fn get_ip_address_report(ctx: &ToolContext, args: IpAddressArgs) -> Result<Value> {
    let ip = require("ip_address", &args.ip_address)?;
    let request = report_request(ctx, EntityType::IP_ADDRESSES, ip, "ip_address")
        .param("exclude_attributes", "last_analysis_results");
    report(ctx, &request).await
}

pub async fn get_entities_related_to_an_ip_address(
    ctx: &ToolContext,
    args: IpAddressRelationshipArgs,
) -> Result<Value> {
    let ip = require("ip_address", &args.ip_address)?;
    let rel = &args.relationship;
    related(
        ctx,
        EntityType::IP_ADDRESSES,
        ip,
        &rel.relationship_name,
        rel.view(),
        rel.limit,
    )
    .await
}
