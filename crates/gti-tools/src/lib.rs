//! gti-tools: Threat-intelligence graph tools for calling agents.
//!
//! Each tool takes JSON arguments, reaches the graph through gti-graph over a
//! scoped session, and returns sanitized JSON. Tool invocations are
//! independent: nothing is shared between them except the session factory
//! and the static relationship registry.

pub mod error;
pub mod tools;
pub mod types;

pub use error::ToolError;
pub use types::{ToolCall, ToolSpec, CATALOGUE};

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use gti_core::RelationshipRegistry;
use gti_graph::SessionFactory;

/// Everything a tool needs to run.
#[derive(Clone)]
pub struct ToolContext {
    sessions: Arc<dyn SessionFactory>,
    registry: RelationshipRegistry,
}

impl ToolContext {
    /// Create a context over the built-in relationship registry.
    pub fn new(sessions: impl SessionFactory + 'static) -> Self {
        Self {
            sessions: Arc::new(sessions),
            registry: RelationshipRegistry::builtin(),
        }
    }

    /// Replace the relationship registry.
    pub fn with_registry(mut self, registry: RelationshipRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn sessions(&self) -> &dyn SessionFactory {
        self.sessions.as_ref()
    }

    pub fn registry(&self) -> &RelationshipRegistry {
        &self.registry
    }

    /// Run one tool invocation.
    pub async fn call(&self, call: ToolCall) -> error::Result<Value> {
        let name = call.name();
        let invocation_id = Uuid::new_v4();
        let span = tracing::info_span!("tool", tool = name, %invocation_id);

        async move {
            let start = std::time::Instant::now();
            let result = self.dispatch(call).await;
            match &result {
                Ok(_) => tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "Tool finished"),
                Err(e) => tracing::warn!(error = %e, "Tool failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, call: ToolCall) -> error::Result<Value> {
        use tools::{domains, files, intelligence, ip_addresses, urls};

        match call {
            ToolCall::GetFileReport(args) => files::get_file_report(self, args).await,
            ToolCall::GetEntitiesRelatedToAFile(args) => {
                files::get_entities_related_to_a_file(self, args).await
            }
            ToolCall::GetFileBehaviorReport(args) => {
                files::get_file_behavior_report(self, args).await
            }
            ToolCall::GetFileBehaviorSummary(args) => {
                files::get_file_behavior_summary(self, args).await
            }
            ToolCall::GetUrlReport(args) => urls::get_url_report(self, args).await,
            ToolCall::GetEntitiesRelatedToAUrl(args) => {
                urls::get_entities_related_to_a_url(self, args).await
            }
            ToolCall::GetDomainReport(args) => domains::get_domain_report(self, args).await,
            ToolCall::GetEntitiesRelatedToADomain(args) => {
                domains::get_entities_related_to_a_domain(self, args).await
            }
            ToolCall::GetIpAddressReport(args) => {
                ip_addresses::get_ip_address_report(self, args).await
            }
            ToolCall::GetEntitiesRelatedToAnIpAddress(args) => {
                ip_addresses::get_entities_related_to_an_ip_address(self, args).await
            }
            ToolCall::Search(args) => intelligence::search(self, args).await,
            ToolCall::GetWhois(args) => intelligence::get_whois(self, args).await,
            ToolCall::GetHuntingRuleset(args) => {
                intelligence::get_hunting_ruleset(self, args).await
            }
            ToolCall::GetEntitiesRelatedToAHuntingRuleset(args) => {
                intelligence::get_entities_related_to_a_hunting_ruleset(self, args).await
            }
        }
    }
}
