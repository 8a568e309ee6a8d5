//! Cursor-driven page walks bounded by a caller limit.
//!
//! A walk is a two-state machine. It starts in `HasCursor(None)` (first page,
//! no cursor yet), moves to `HasCursor(Some(c))` while the API keeps handing
//! out cursors, and ends in `Exhausted` when a page comes back without one.
//! Independently of the state, the walk stops as soon as `limit` items have
//! been collected. Pages are requested strictly one after another.

use serde_json::Value;

use gti_core::{EntityId, EntityType, FetchLimit, RelationshipView};

use crate::error::{GraphError, Result};
use crate::fetch::take_data;
use crate::sanitize::sanitize;
use crate::session::Session;
use crate::validate::validate;

/// Largest page the walk asks the API for.
pub const MAX_PAGE_SIZE: usize = 40;

// ── Pages ────────────────────────────────────────────────────────

/// One list response: items in server order plus the continuation cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub cursor: Option<String>,
}

impl Page {
    /// Decode a list body (`data` array, optional `meta.cursor`).
    ///
    /// An empty cursor string counts as no cursor. To-one relationships
    /// answer with a single object or `null` instead of an array; these are
    /// read as a final page of one or zero items.
    pub fn from_body(body: Value, path: &str) -> Result<Self> {
        let cursor = body
            .pointer("/meta/cursor")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        match take_data(body, path)? {
            Value::Array(items) => Ok(Self { items, cursor }),
            Value::Null => Ok(Self {
                items: Vec::new(),
                cursor: None,
            }),
            object @ Value::Object(_) => Ok(Self {
                items: vec![object],
                cursor: None,
            }),
            other => Err(GraphError::Upstream {
                status: None,
                body: format!("list response for {path} has non-list data: {other}"),
            }),
        }
    }
}

// ── Walk State Machine ───────────────────────────────────────────

/// Position of a walk in the cursor protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkState {
    /// More pages may follow; `None` before the first page.
    HasCursor(Option<String>),
    /// The API reported no further pages.
    Exhausted,
}

/// Why a walk stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// `limit` items were collected.
    LimitReached,
    /// The API ran out of pages first.
    Exhausted,
    /// A page after the first failed; the items collected so far are kept.
    Interrupted { pages: usize, reason: String },
}

/// Items collected by a walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub items: Vec<Value>,
    pub termination: Termination,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the walk ended early because of a failed page.
    pub fn is_partial(&self) -> bool {
        matches!(self.termination, Termination::Interrupted { .. })
    }

    /// Human-readable note for an interrupted walk.
    pub fn diagnostic(&self) -> Option<String> {
        match &self.termination {
            Termination::Interrupted { pages, reason } => Some(format!(
                "results truncated after {pages} page(s): {reason}"
            )),
            _ => None,
        }
    }
}

/// Accumulator driving one walk.
#[derive(Debug)]
pub struct PageWalk {
    limit: usize,
    items: Vec<Value>,
    state: WalkState,
    pages: usize,
}

impl PageWalk {
    pub fn new(limit: FetchLimit) -> Self {
        Self {
            limit: limit.get(),
            items: Vec::new(),
            state: WalkState::HasCursor(None),
            pages: 0,
        }
    }

    pub fn state(&self) -> &WalkState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.items.len() >= self.limit || self.state == WalkState::Exhausted
    }

    /// Paging parameters for the next request, or `None` when the walk is over.
    pub fn next_request(&self) -> Option<Vec<(String, String)>> {
        if self.is_done() {
            return None;
        }
        let WalkState::HasCursor(cursor) = &self.state else {
            return None;
        };

        let remaining = self.limit - self.items.len();
        let mut params = vec![(
            "limit".to_string(),
            remaining.min(MAX_PAGE_SIZE).to_string(),
        )];
        if let Some(c) = cursor {
            params.push(("cursor".to_string(), c.clone()));
        }
        Some(params)
    }

    /// Take in a fetched page: sanitize and keep items up to the limit, then
    /// advance the state from the page's cursor.
    ///
    /// A page with no items ends the walk even if it carries a cursor, so a
    /// misbehaving endpoint cannot keep the walk spinning.
    pub fn absorb(&mut self, page: Page) {
        self.pages += 1;
        let room = self.limit.saturating_sub(self.items.len());
        let empty = page.items.is_empty();
        self.items
            .extend(page.items.into_iter().take(room).map(sanitize));

        self.state = match page.cursor {
            Some(cursor) if !empty => WalkState::HasCursor(Some(cursor)),
            _ => WalkState::Exhausted,
        };
    }

    /// End the walk after a failed request.
    ///
    /// A failure on the first page is returned as is; later failures keep
    /// the items already collected.
    pub fn fail(self, err: GraphError) -> Result<Collection> {
        if self.pages == 0 {
            return Err(err);
        }
        tracing::warn!(
            pages = self.pages,
            items = self.items.len(),
            error = %err,
            "Page walk interrupted, returning partial results"
        );
        Ok(Collection {
            items: self.items,
            termination: Termination::Interrupted {
                pages: self.pages,
                reason: err.to_string(),
            },
        })
    }

    pub fn finish(self) -> Collection {
        let termination = if self.items.len() >= self.limit {
            Termination::LimitReached
        } else {
            Termination::Exhausted
        };
        Collection {
            items: self.items,
            termination,
        }
    }
}

/// Run a walk against `path`, merging paging parameters into `params`.
///
/// `owner` names the entity reported by a 404 (type, id).
pub(crate) async fn walk(
    session: &dyn Session,
    path: &str,
    params: &[(String, String)],
    limit: FetchLimit,
    owner: (&str, &str),
) -> Result<Collection> {
    let mut pager = PageWalk::new(limit);

    while let Some(paging) = pager.next_request() {
        let mut query = params.to_vec();
        query.extend(paging);

        let page = match fetch_page(session, path, &query, owner).await {
            Ok(page) => page,
            Err(e) => return pager.fail(e),
        };
        pager.absorb(page);
    }

    let collection = pager.finish();
    tracing::debug!(
        path,
        items = collection.len(),
        termination = ?collection.termination,
        "Page walk finished"
    );
    Ok(collection)
}

async fn fetch_page(
    session: &dyn Session,
    path: &str,
    query: &[(String, String)],
    owner: (&str, &str),
) -> Result<Page> {
    let body = session
        .get(path, query)
        .await?
        .into_success(owner.0, owner.1)?;
    Page::from_body(body, path)
}

// ── Relationships ────────────────────────────────────────────────

/// Description of a relationship read.
#[derive(Debug, Clone)]
pub struct RelationshipRequest {
    pub entity_type: EntityType,
    pub id: EntityId,
    pub relationship: String,
    pub view: RelationshipView,
    pub limit: FetchLimit,
}

impl RelationshipRequest {
    pub fn new(entity_type: EntityType, id: impl Into<EntityId>, relationship: &str) -> Self {
        Self {
            entity_type,
            id: id.into(),
            relationship: relationship.to_string(),
            view: RelationshipView::default(),
            limit: FetchLimit::default(),
        }
    }

    pub fn view(mut self, view: RelationshipView) -> Self {
        self.view = view;
        self
    }

    pub fn limit(mut self, limit: impl Into<FetchLimit>) -> Self {
        self.limit = limit.into();
        self
    }

    fn path(&self) -> String {
        match self.view {
            RelationshipView::Descriptors => format!(
                "/{}/{}/relationships/{}",
                self.entity_type, self.id, self.relationship
            ),
            RelationshipView::Objects => {
                format!("/{}/{}/{}", self.entity_type, self.id, self.relationship)
            }
        }
    }
}

/// Collect up to `request.limit` entities linked to the subject.
///
/// The relationship name is checked against `allowed` before any I/O.
pub async fn fetch_relationship<S: AsRef<str>>(
    session: &dyn Session,
    request: &RelationshipRequest,
    allowed: &[S],
) -> Result<Collection> {
    validate(&request.relationship, allowed)?;

    tracing::debug!(
        entity_type = %request.entity_type,
        relationship = %request.relationship,
        view = ?request.view,
        limit = request.limit.get(),
        "Fetching relationship"
    );

    walk(
        session,
        &request.path(),
        &[],
        request.limit,
        (request.entity_type.as_str(), request.id.as_str()),
    )
    .await
}
