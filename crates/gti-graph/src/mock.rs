//! Scripted in-memory sessions for tests.
//!
//! Responses are queued per path and served in order, so successive pages of
//! one walk are scripted by pushing several replies for the same path. Every
//! request is recorded, and the factory counts opened and released sessions.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{GraphError, Result};
use crate::session::{ApiResponse, Session, SessionFactory};

/// One request observed by a mock session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of the first query parameter named `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

enum Reply {
    Response(ApiResponse),
    TransportFailure(String),
}

#[derive(Default)]
struct MockState {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Factory handing out sessions that share one script.
#[derive(Clone, Default)]
pub struct MockSessionFactory {
    state: Arc<MockState>,
}

impl MockSessionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next GET of `path`.
    pub fn respond(&self, path: &str, response: ApiResponse) -> &Self {
        lock(&self.state.replies)
            .entry(path.to_string())
            .or_default()
            .push_back(Reply::Response(response));
        self
    }

    /// Queue a `200` response with the given JSON body.
    pub fn respond_ok(&self, path: &str, body: Value) -> &Self {
        self.respond(path, ApiResponse::ok(body))
    }

    /// Queue a transport failure (no HTTP status) for the next GET of `path`.
    pub fn fail(&self, path: &str, message: &str) -> &Self {
        lock(&self.state.replies)
            .entry(path.to_string())
            .or_default()
            .push_back(Reply::TransportFailure(message.to_string()));
        self
    }

    /// Every request made so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    pub fn opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }
}

impl SessionFactory for MockSessionFactory {
    fn open(&self) -> Result<Box<dyn Session>> {
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            state: self.state.clone(),
        }))
    }
}

/// A session answering from the factory's script.
pub struct MockSession {
    state: Arc<MockState>,
}

#[async_trait]
impl Session for MockSession {
    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<ApiResponse> {
        lock(&self.state.requests).push(RecordedRequest {
            path: path.to_string(),
            params: params.to_vec(),
        });

        let reply = lock(&self.state.replies)
            .get_mut(path)
            .and_then(|queue| queue.pop_front());

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::TransportFailure(message)) => Err(GraphError::transport(message)),
            None => Err(GraphError::transport(format!("no scripted reply for {path}"))),
        }
    }

    fn close(&self) {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// A list-endpoint body: `data` items plus an optional `meta.cursor`.
pub fn page_body(items: Vec<Value>, cursor: Option<&str>) -> Value {
    match cursor {
        Some(c) => json!({ "data": items, "meta": { "cursor": c } }),
        None => json!({ "data": items, "meta": {} }),
    }
}

/// A descriptor-shaped item.
pub fn descriptor(kind: &str, id: &str) -> Value {
    json!({ "type": kind, "id": id })
}
