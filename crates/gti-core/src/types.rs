//! Core vocabulary for the threat-intelligence graph.
//!
//! Entity types, identifiers and limits are deliberately string-based: the
//! access layer operates generically over whatever collection names the
//! adapters hand it and never enumerates the valid set itself.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Entity Types ──────────────────────────────────────────────────

/// A graph node kind, spelled as the API collection path segment
/// (e.g. `files`, `intelligence/hunting_rulesets`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityType(pub Cow<'static, str>);

impl EntityType {
    pub const FILES: EntityType = EntityType(Cow::Borrowed("files"));
    pub const URLS: EntityType = EntityType(Cow::Borrowed("urls"));
    pub const DOMAINS: EntityType = EntityType(Cow::Borrowed("domains"));
    pub const IP_ADDRESSES: EntityType = EntityType(Cow::Borrowed("ip_addresses"));
    pub const FILE_BEHAVIOURS: EntityType = EntityType(Cow::Borrowed("file_behaviours"));
    pub const HUNTING_RULESETS: EntityType =
        EntityType(Cow::Borrowed("intelligence/hunting_rulesets"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Entity Identifiers ────────────────────────────────────────────

/// Identifier of one entity inside its [`EntityType`] namespace.
///
/// Opaque: two ids are only comparable when they belong to the same type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ── Limits and Views ──────────────────────────────────────────────

/// Maximum number of items a paginated read may return.
///
/// Bounds the total work of a walk, not the size of individual pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FetchLimit(pub usize);

impl FetchLimit {
    pub const DEFAULT: FetchLimit = FetchLimit(10);

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for FetchLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<usize> for FetchLimit {
    fn from(n: usize) -> Self {
        Self(n)
    }
}

/// How related entities are requested from a relationship endpoint.
///
/// This is a hint passed to the API; nothing is expanded or collapsed locally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipView {
    /// Identity-only descriptors (`type`, `id`, context attributes).
    #[default]
    Descriptors,
    /// Fully hydrated objects.
    Objects,
}

impl RelationshipView {
    pub fn from_descriptors_only(descriptors_only: bool) -> Self {
        if descriptors_only {
            Self::Descriptors
        } else {
            Self::Objects
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_serializes_as_plain_string() {
        let json = serde_json::to_string(&EntityType::HUNTING_RULESETS).unwrap();
        assert_eq!(json, "\"intelligence/hunting_rulesets\"");

        let back: EntityType = serde_json::from_str("\"files\"").unwrap();
        assert_eq!(back, EntityType::FILES);
    }

    #[test]
    fn fetch_limit_defaults_to_ten() {
        assert_eq!(FetchLimit::default().get(), 10);
        let limit: FetchLimit = serde_json::from_str("25").unwrap();
        assert_eq!(limit, FetchLimit(25));
    }

    #[test]
    fn descriptors_only_maps_to_view() {
        assert_eq!(
            RelationshipView::from_descriptors_only(true),
            RelationshipView::Descriptors
        );
        assert_eq!(
            RelationshipView::from_descriptors_only(false),
            RelationshipView::Objects
        );
    }
}
