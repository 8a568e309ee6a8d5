//! Flat search endpoints sharing the relationship walk's cursor/limit contract.

use gti_core::FetchLimit;

use crate::error::Result;
use crate::paginate::{walk, Collection};
use crate::session::Session;

/// Collect up to `limit` results from a search endpoint such as
/// `/intelligence/search`.
///
/// `params` (query string, sort order, ...) are sent unmodified on every page.
pub async fn consume_search(
    session: &dyn Session,
    path: &str,
    params: &[(String, String)],
    limit: FetchLimit,
) -> Result<Collection> {
    tracing::debug!(path, limit = limit.get(), "Consuming search");
    walk(session, path, params, limit, ("search", path)).await
}
