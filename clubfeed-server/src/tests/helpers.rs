//! Fixtures shared by the router, config and behaviour tests.

use std::collections::BTreeSet;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use camino::Utf8PathBuf;
use clubfeed_core::test_support::{MemoryStore, club_item, event_item, post_item, profile};
use clubfeed_core::{
    BrowsableItem, CatalogueStore, InterestProfile, ItemId, ItemKind, ItemRecord, StoreError,
    UserId, ViewerStore,
};
use rusqlite::Connection;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::VIEWER_HEADER;

/// Viewer who likes Music and Tech and belongs to club 1.
pub(super) const MEMBER: u64 = 7;

/// Clubs A, B and C, one event each for A and B, and a post from C.
pub(super) fn sample_store() -> MemoryStore {
    MemoryStore::default()
        .with_item(club_item(1, "A", &["Music", "Tech", "Art"]))
        .with_item(club_item(2, "B", &["Music"]))
        .with_item(club_item(3, "C", &["Art", "Business"]))
        .with_item(event_item(10, 1, "Jam night", &["Music", "Tech", "Art"]))
        .with_item(event_item(11, 2, "Open mic", &["Music"]))
        .with_item(post_item(20, 3, "Gallery trip", &["Art", "Business"]))
        .with_interests(UserId(MEMBER), profile(&["Music", "Tech"]))
        .with_membership(UserId(MEMBER), ItemId(1))
}

/// Store whose every read fails.
#[derive(Debug, Clone, Copy)]
pub(super) struct FailingStore;

fn backend_failure(operation: &'static str) -> StoreError {
    StoreError::Backend {
        operation,
        source: "disk on fire".into(),
    }
}

impl CatalogueStore for FailingStore {
    fn items(&self, _kind: ItemKind) -> Result<Vec<BrowsableItem<ItemRecord>>, StoreError> {
        Err(backend_failure("list items"))
    }
}

impl ViewerStore for FailingStore {
    fn interests(&self, _user: UserId) -> Result<InterestProfile, StoreError> {
        Err(backend_failure("load interests"))
    }

    fn joined_items(&self, _user: UserId, _kind: ItemKind) -> Result<BTreeSet<ItemId>, StoreError> {
        Err(backend_failure("load memberships"))
    }
}

/// Build a `POST` browse request for `kind`.
pub(super) fn browse_request(kind: ItemKind, viewer: Option<u64>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/{}/browse", kind.plural()))
        .header("content-type", "application/json");
    if let Some(viewer) = viewer {
        builder = builder.header(VIEWER_HEADER, viewer.to_string());
    }
    builder
        .body(Body::from(body.to_owned()))
        .expect("valid request")
}

/// Drive `router` with one request and decode the JSON response.
pub(super) fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime");
    runtime.block_on(async move {
        let response = router.oneshot(request).await.expect("infallible router");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = serde_json::from_slice(&bytes).expect("JSON response body");
        (status, value)
    })
}

/// Ids of the items under `key`, in response order.
pub(super) fn ids(body: &Value, key: &str) -> Vec<u64> {
    body[key]
        .as_array()
        .expect("item array")
        .iter()
        .map(|item| item["id"].as_u64().expect("numeric id"))
        .collect()
}

/// Temporary directory with a UTF-8 path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Insert the sample clubs, memberships and interests into a schema'd database.
pub(super) fn seed_sqlite(path: &Utf8PathBuf) {
    let connection = Connection::open(path.as_std_path()).expect("open database");
    connection
        .execute_batch(
            "INSERT INTO clubs (id, name, description) VALUES
                 (1, 'A', ''), (2, 'B', ''), (3, 'C', '');
             INSERT INTO club_interests (club_id, interest) VALUES
                 (1, 'Music'), (1, 'Tech'), (1, 'Art'),
                 (2, 'Music'),
                 (3, 'Art'), (3, 'Business');
             INSERT INTO events (id, club_id, title, description, starts_at) VALUES
                 (10, 1, 'Jam night', '', '2026-11-01T19:00:00Z');
             INSERT INTO memberships (user_id, club_id) VALUES (7, 1);
             INSERT INTO user_interests (user_id, interest) VALUES (7, 'Music'), (7, 'Tech');",
        )
        .expect("seed database");
}
