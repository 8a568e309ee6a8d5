//! GTI Graph — access layer for the threat-intelligence graph API.
//!
//! Every adapter reaches the graph through this crate: single-object
//! fetches with embedded relationships, cursor-driven relationship and
//! search walks bounded by a caller limit, relationship-name validation,
//! URL identifier derivation, and payload sanitization. All network I/O
//! goes through the [`Session`] capability so the layer itself holds no
//! connection state.

pub mod encode;
pub mod error;
pub mod fetch;
pub mod http;
#[cfg(any(test, feature = "testing"))]
pub mod mock;
pub mod paginate;
pub mod sanitize;
pub mod search;
pub mod session;
pub mod validate;

pub use encode::url_id;
pub use error::{GraphError, Result};
pub use fetch::{fetch_data, fetch_object, ObjectRequest};
pub use http::{HttpSession, HttpSessionFactory};
pub use paginate::{fetch_relationship, Collection, Page, PageWalk, RelationshipRequest, Termination};
pub use sanitize::{sanitize, Sanitizer};
pub use search::consume_search;
pub use session::{ApiResponse, Session, SessionFactory, SessionScope};
pub use validate::validate;
