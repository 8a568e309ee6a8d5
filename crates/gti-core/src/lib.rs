//! gti-core: Shared vocabulary for the threat-intelligence graph tools.
//!
//! This crate provides the foundational types used across all GTI components:
//! - Entity types and identifiers for graph nodes
//! - The static relationship registry (allow-lists per entity type)
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod relationships;
pub mod types;

pub use error::GtiError;
pub use relationships::RelationshipRegistry;
pub use types::{EntityId, EntityType, FetchLimit, RelationshipView};
