//! HTTP surface: one browse endpoint per item kind plus a health probe.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use clubfeed_core::{
    AnnotatedItem, BrowsableItem, ItemKind, ItemRecord, StoreError, UserId, ViewerContext,
};
use clubfeed_ranker::{BrowseOptions, RandomShuffler};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};

use crate::{ApiError, AppState, viewer};

/// Build the router serving every endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/clubs/browse", post(browse_clubs))
        .route("/events/browse", post(browse_events))
        .route("/posts/browse", post(browse_posts))
        .with_state(state)
}

/// Body of a browse request. Every field is optional and an empty body is
/// accepted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseRequest {
    /// Maximum number of items; `0` means unlimited, absent means the
    /// server default.
    pub limit: Option<i64>,
    /// Whether joined items lead the list.
    pub include_joined: bool,
    /// Seed for a reproducible shuffle of the joined and other tiers.
    pub seed: Option<u64>,
}

impl BrowseRequest {
    /// Decode a request body; whitespace-only bodies mean "all defaults".
    ///
    /// # Errors
    /// Returns [`ApiError::MalformedBody`] when the body is not a JSON
    /// object of the expected shape, including a non-integer `limit`.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(ApiError::MalformedBody)
    }

    /// Resolve ranking options, falling back to `default_limit`.
    ///
    /// # Errors
    /// Returns [`ApiError::NegativeLimit`] for a negative `limit`.
    pub fn options(&self, default_limit: usize) -> Result<BrowseOptions, ApiError> {
        let limit = match self.limit {
            None => default_limit,
            Some(raw) => usize::try_from(raw).map_err(|_| ApiError::NegativeLimit(raw))?,
        };
        Ok(BrowseOptions::default()
            .with_limit(limit)
            .including_joined(self.include_joined))
    }
}

/// Response body: `{ "<kind>s": [...], "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowsePage {
    /// Kind of every item on the page; names the collection key.
    pub kind: ItemKind,
    /// Ranked items.
    pub items: Vec<AnnotatedItem<ItemRecord>>,
}

impl BrowsePage {
    /// Human-readable summary sent alongside the items.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Retrieved {} {}", self.items.len(), self.kind.plural())
    }
}

impl Serialize for BrowsePage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.kind.plural(), &self.items)?;
        map.serialize_entry("message", &self.message())?;
        map.end()
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn browse_clubs(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<BrowsePage>, ApiError> {
    browse(ItemKind::Club, &state, &headers, &body).await
}

async fn browse_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<BrowsePage>, ApiError> {
    browse(ItemKind::Event, &state, &headers, &body).await
}

async fn browse_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<BrowsePage>, ApiError> {
    browse(ItemKind::Post, &state, &headers, &body).await
}

async fn browse(
    kind: ItemKind,
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Json<BrowsePage>, ApiError> {
    let request = BrowseRequest::from_body(body)?;
    let options = request.options(state.default_limit())?;
    let user = viewer::viewer_id(headers);
    let (items, viewer) = load_inputs(state, kind, user).await?;

    let ranked = match request.seed {
        Some(seed) => {
            let mut shuffler = RandomShuffler::seeded(seed);
            state.pipeline().browse(items, &viewer, &options, &mut shuffler)
        }
        None => {
            let mut shuffler = RandomShuffler::from_entropy();
            state.pipeline().browse(items, &viewer, &options, &mut shuffler)
        }
    };
    tracing::info!(
        %kind,
        viewer = ?user,
        limit = options.limit,
        include_joined = options.include_joined,
        returned = ranked.len(),
        "browse served"
    );
    Ok(Json(BrowsePage {
        kind,
        items: ranked,
    }))
}

/// Gather the candidate batch and viewer context.
///
/// The three reads are independent and run concurrently on the blocking
/// pool; the first failure aborts the request before ranking starts.
async fn load_inputs(
    state: &AppState,
    kind: ItemKind,
    user: Option<UserId>,
) -> Result<(Vec<BrowsableItem<ItemRecord>>, ViewerContext), ApiError> {
    let catalogue = state.catalogue();
    let items = read(move || catalogue.items(kind));
    let Some(user) = user else {
        return Ok((items.await?, ViewerContext::Anonymous));
    };

    let interest_store = state.viewers();
    let membership_store = state.viewers();
    let (items, interests, joined) = tokio::try_join!(
        items,
        read(move || interest_store.interests(user)),
        read(move || membership_store.joined_items(user, kind)),
    )?;
    Ok((items, ViewerContext::identified(joined, interests)))
}

async fn read<T, F>(query: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(query)
        .await
        .map_err(ApiError::Task)?
        .map_err(ApiError::Store)
}
