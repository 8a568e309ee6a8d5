//! Tool invocations and their arguments.

use serde::{Deserialize, Serialize};

use gti_core::{FetchLimit, RelationshipView};

fn default_order() -> String {
    "relevance-".to_string()
}

/// Arguments shared by every "entities related to X" tool.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipArgs {
    pub relationship_name: String,
    /// Only return `{type, id}` descriptors instead of full objects.
    ///
    /// Defaults to `false` when omitted, which asks for full objects.
    #[serde(default)]
    pub descriptors_only: bool,
    #[serde(default)]
    pub limit: FetchLimit,
}

impl RelationshipArgs {
    pub fn view(&self) -> RelationshipView {
        RelationshipView::from_descriptors_only(self.descriptors_only)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashArgs {
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileRelationshipArgs {
    pub hash: String,
    #[serde(flatten)]
    pub relationship: RelationshipArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileBehaviourArgs {
    pub file_behaviour_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlArgs {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlRelationshipArgs {
    pub url: String,
    #[serde(flatten)]
    pub relationship: RelationshipArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainArgs {
    pub domain: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainRelationshipArgs {
    pub domain: String,
    #[serde(flatten)]
    pub relationship: RelationshipArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpAddressArgs {
    pub ip_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpAddressRelationshipArgs {
    pub ip_address: String,
    #[serde(flatten)]
    pub relationship: RelationshipArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default)]
    pub limit: FetchLimit,
    /// Sort order; a trailing `-` means descending.
    #[serde(default = "default_order")]
    pub order_by: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhoisArgs {
    pub query: String,
    #[serde(default)]
    pub limit: FetchLimit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HuntingRulesetArgs {
    pub ruleset_id: String,
}

/// Hunting ruleset relationships are always read as descriptors.
#[derive(Debug, Clone, Deserialize)]
pub struct HuntingRulesetRelationshipArgs {
    pub ruleset_id: String,
    pub relationship_name: String,
    #[serde(default)]
    pub limit: FetchLimit,
}

/// One tool invocation as read from the caller: `{"tool": .., "arguments": {..}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "tool", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    GetFileReport(HashArgs),
    GetEntitiesRelatedToAFile(FileRelationshipArgs),
    GetFileBehaviorReport(FileBehaviourArgs),
    GetFileBehaviorSummary(HashArgs),
    GetUrlReport(UrlArgs),
    GetEntitiesRelatedToAUrl(UrlRelationshipArgs),
    GetDomainReport(DomainArgs),
    GetEntitiesRelatedToADomain(DomainRelationshipArgs),
    GetIpAddressReport(IpAddressArgs),
    GetEntitiesRelatedToAnIpAddress(IpAddressRelationshipArgs),
    Search(SearchArgs),
    GetWhois(WhoisArgs),
    GetHuntingRuleset(HuntingRulesetArgs),
    GetEntitiesRelatedToAHuntingRuleset(HuntingRulesetRelationshipArgs),
}

impl ToolCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetFileReport(_) => "get_file_report",
            Self::GetEntitiesRelatedToAFile(_) => "get_entities_related_to_a_file",
            Self::GetFileBehaviorReport(_) => "get_file_behavior_report",
            Self::GetFileBehaviorSummary(_) => "get_file_behavior_summary",
            Self::GetUrlReport(_) => "get_url_report",
            Self::GetEntitiesRelatedToAUrl(_) => "get_entities_related_to_a_url",
            Self::GetDomainReport(_) => "get_domain_report",
            Self::GetEntitiesRelatedToADomain(_) => "get_entities_related_to_a_domain",
            Self::GetIpAddressReport(_) => "get_ip_address_report",
            Self::GetEntitiesRelatedToAnIpAddress(_) => "get_entities_related_to_an_ip_address",
            Self::Search(_) => "search",
            Self::GetWhois(_) => "get_whois",
            Self::GetHuntingRuleset(_) => "get_hunting_ruleset",
            Self::GetEntitiesRelatedToAHuntingRuleset(_) => {
                "get_entities_related_to_a_hunting_ruleset"
            }
        }
    }
}

/// Catalogue entry printed by `gti-tools list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub arguments: &'static [&'static str],
    pub summary: &'static str,
}

pub const CATALOGUE: &[ToolSpec] = &[
    ToolSpec {
        name: "get_file_report",
        arguments: &["hash"],
        summary: "File analysis report with contacted domains, IPs and URLs embedded",
    },
    ToolSpec {
        name: "get_entities_related_to_a_file",
        arguments: &["hash", "relationship_name", "descriptors_only", "limit"],
        summary: "Entities linked to a file through one relationship",
    },
    ToolSpec {
        name: "get_file_behavior_report",
        arguments: &["file_behaviour_id"],
        summary: "One sandbox behaviour report with its network and dropped-file relationships",
    },
    ToolSpec {
        name: "get_file_behavior_summary",
        arguments: &["hash"],
        summary: "Summary of all sandbox behaviour reports for a file",
    },
    ToolSpec {
        name: "get_url_report",
        arguments: &["url"],
        summary: "URL analysis report with serving IP and network location embedded",
    },
    ToolSpec {
        name: "get_entities_related_to_a_url",
        arguments: &["url", "relationship_name", "descriptors_only", "limit"],
        summary: "Entities linked to a URL through one relationship",
    },
    ToolSpec {
        name: "get_domain_report",
        arguments: &["domain"],
        summary: "Domain report with threat associations embedded",
    },
    ToolSpec {
        name: "get_entities_related_to_a_domain",
        arguments: &["domain", "relationship_name", "descriptors_only", "limit"],
        summary: "Entities linked to a domain through one relationship",
    },
    ToolSpec {
        name: "get_ip_address_report",
        arguments: &["ip_address"],
        summary: "IP address report with threat associations embedded",
    },
    ToolSpec {
        name: "get_entities_related_to_an_ip_address",
        arguments: &["ip_address", "relationship_name", "descriptors_only", "limit"],
        summary: "Entities linked to an IP address through one relationship",
    },
    ToolSpec {
        name: "search",
        arguments: &["query", "limit", "order_by"],
        summary: "Intelligence search over files, URLs, domains and IPs",
    },
    ToolSpec {
        name: "get_whois",
        arguments: &["query", "limit"],
        summary: "Historical WHOIS records matching a query",
    },
    ToolSpec {
        name: "get_hunting_ruleset",
        arguments: &["ruleset_id"],
        summary: "A hunting ruleset and its YARA rules",
    },
    ToolSpec {
        name: "get_entities_related_to_a_hunting_ruleset",
        arguments: &["ruleset_id", "relationship_name", "limit"],
        summary: "Entities linked to a hunting ruleset, as descriptors",
    },
];
