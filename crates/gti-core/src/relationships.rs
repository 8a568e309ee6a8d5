//! Static relationship schema of the threat-intelligence graph.
//!
//! Every entity type owns a fixed allow-list of outgoing relationship names,
//! plus a small set of "key" relationships embedded inline when a full report
//! is fetched. This registry is the single place those lists live.

use std::collections::HashMap;

use crate::types::EntityType;

/// Relationship names known for one entity type.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipSet {
    /// Every relationship name the API accepts for this type, in catalogue order.
    pub allowed: &'static [&'static str],
    /// Relationships embedded in a report fetch.
    pub key: &'static [&'static str],
}

const FILE_RELATIONSHIPS: &[&str] = &[
    "bundled_files",
    "carbonblack_children",
    "carbonblack_parents",
    "cloned_files",
    "collections",
    "comments",
    "compressed_parents",
    "contacted_domains",
    "contacted_ips",
    "contacted_urls",
    "dropped_files",
    "email_parents",
    "embedded_domains",
    "embedded_ips",
    "embedded_urls",
    "execution_parents",
    "graphs",
    "historical_ssl_certificates",
    "historical_whois",
    "itw_domains",
    "itw_ips",
    "itw_urls",
    "memory_pattern_domains",
    "memory_pattern_ips",
    "memory_pattern_urls",
    "overlay_parents",
    "pcap_parents",
    "pe_resource_children",
    "pe_resource_parents",
    "related_comments",
    "related_reports",
    "related_threat_actors",
    "reports",
    "similar_files",
    "submissions",
    "screenshots",
    "software_toolkits",
    "target_domains",
    "target_ips",
    "target_urls",
    "urls",
    "user_votes",
    "votes",
    "vulnerabilities",
];

const FILE_KEY_RELATIONSHIPS: &[&str] = &["contacted_domains", "contacted_ips", "contacted_urls"];

const URL_RELATIONSHIPS: &[&str] = &[
    "analyses",
    "associations",
    "campaigns",
    "collections",
    "comments",
    "communicating_files",
    "contacted_domains",
    "contacted_ips",
    "downloaded_files",
    "embedded_js_files",
    "graphs",
    "http_response_contents",
    "last_serving_ip_address",
    "malware_families",
    "memory_pattern_parents",
    "network_location",
    "redirecting_urls",
    "referrer_files",
    "related_comments",
    "related_reports",
    "related_threat_actors",
    "reports",
    "submissions",
    "screenshots",
    "software_toolkits",
    "user_votes",
    "votes",
];

const URL_KEY_RELATIONSHIPS: &[&str] = &["last_serving_ip_address", "network_location"];

const DOMAIN_RELATIONSHIPS: &[&str] = &[
    "associations",
    "caa_records",
    "cname_records",
    "collections",
    "comments",
    "communicating_files",
    "downloaded_files",
    "graphs",
    "historical_ssl_certificates",
    "historical_whois",
    "immediate_parent",
    "mx_records",
    "ns_records",
    "parent",
    "referrer_files",
    "related_comments",
    "related_reports",
    "related_threat_actors",
    "reports",
    "resolutions",
    "siblings",
    "soa_records",
    "software_toolkits",
    "subdomains",
    "urls",
    "user_votes",
    "votes",
    "vulnerabilities",
];

const IP_ADDRESS_RELATIONSHIPS: &[&str] = &[
    "associations",
    "collections",
    "comments",
    "communicating_files",
    "downloaded_files",
    "graphs",
    "historical_ssl_certificates",
    "historical_whois",
    "referrer_files",
    "related_comments",
    "related_reports",
    "related_threat_actors",
    "reports",
    "resolutions",
    "urls",
    "user_votes",
    "votes",
    "vulnerabilities",
];

const ASSOCIATIONS_ONLY: &[&str] = &["associations"];

const FILE_BEHAVIOUR_RELATIONSHIPS: &[&str] = &[
    "associations",
    "attack_techniques",
    "contacted_domains",
    "contacted_ips",
    "contacted_urls",
    "dropped_files",
    "embedded_domains",
    "embedded_ips",
    "embedded_urls",
    "file",
];

const FILE_BEHAVIOUR_KEY_RELATIONSHIPS: &[&str] = &[
    "contacted_domains",
    "contacted_ips",
    "contacted_urls",
    "dropped_files",
    "embedded_domains",
    "embedded_ips",
    "embedded_urls",
    "associations",
];

const HUNTING_RULESET_RELATIONSHIPS: &[&str] = &["hunting_notification_files"];

/// Mapping from entity type to its relationship schema.
#[derive(Debug, Clone)]
pub struct RelationshipRegistry {
    sets: HashMap<EntityType, RelationshipSet>,
}

impl RelationshipRegistry {
    /// The registry describing the graph API's published relationships.
    pub fn builtin() -> Self {
        let mut sets = HashMap::new();
        sets.insert(
            EntityType::FILES,
            RelationshipSet {
                allowed: FILE_RELATIONSHIPS,
                key: FILE_KEY_RELATIONSHIPS,
            },
        );
        sets.insert(
            EntityType::URLS,
            RelationshipSet {
                allowed: URL_RELATIONSHIPS,
                key: URL_KEY_RELATIONSHIPS,
            },
        );
        sets.insert(
            EntityType::DOMAINS,
            RelationshipSet {
                allowed: DOMAIN_RELATIONSHIPS,
                key: ASSOCIATIONS_ONLY,
            },
        );
        sets.insert(
            EntityType::IP_ADDRESSES,
            RelationshipSet {
                allowed: IP_ADDRESS_RELATIONSHIPS,
                key: ASSOCIATIONS_ONLY,
            },
        );
        sets.insert(
            EntityType::FILE_BEHAVIOURS,
            RelationshipSet {
                allowed: FILE_BEHAVIOUR_RELATIONSHIPS,
                key: FILE_BEHAVIOUR_KEY_RELATIONSHIPS,
            },
        );
        sets.insert(
            EntityType::HUNTING_RULESETS,
            RelationshipSet {
                allowed: HUNTING_RULESET_RELATIONSHIPS,
                key: &[],
            },
        );
        Self { sets }
    }

    /// Relationship names valid for `entity_type`. Unknown types have none.
    pub fn allowed(&self, entity_type: &EntityType) -> &'static [&'static str] {
        self.sets.get(entity_type).map(|s| s.allowed).unwrap_or(&[])
    }

    /// Relationships embedded inline when fetching a full report.
    pub fn key_relationships(&self, entity_type: &EntityType) -> &'static [&'static str] {
        self.sets.get(entity_type).map(|s| s.key).unwrap_or(&[])
    }

    /// Whether the registry has a schema for `entity_type`.
    pub fn contains(&self, entity_type: &EntityType) -> bool {
        self.sets.contains_key(entity_type)
    }
}

impl Default for RelationshipRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_relationships_are_allowed() {
        let registry = RelationshipRegistry::builtin();
        for entity_type in [
            EntityType::FILES,
            EntityType::URLS,
            EntityType::DOMAINS,
            EntityType::IP_ADDRESSES,
            EntityType::FILE_BEHAVIOURS,
            EntityType::HUNTING_RULESETS,
        ] {
            let allowed = registry.allowed(&entity_type);
            for key in registry.key_relationships(&entity_type) {
                assert!(
                    allowed.contains(key),
                    "{key} is embedded for {entity_type} but not allowed"
                );
            }
        }
    }

    #[test]
    fn unknown_type_has_empty_schema() {
        let registry = RelationshipRegistry::builtin();
        let graphs = EntityType::new("graphs");
        assert!(!registry.contains(&graphs));
        assert!(registry.allowed(&graphs).is_empty());
        assert!(registry.key_relationships(&graphs).is_empty());
    }

    #[test]
    fn owned_and_borrowed_types_resolve_alike() {
        let registry = RelationshipRegistry::builtin();
        let owned = EntityType::new("files");
        assert_eq!(registry.allowed(&owned).len(), FILE_RELATIONSHIPS.len());
        assert_eq!(
            registry.allowed(&EntityType::HUNTING_RULESETS),
            &["hunting_notification_files"]
        );
    }
}
