//! Viewer identity as asserted by the upstream auth layer.

use axum::http::HeaderMap;
use clubfeed_core::UserId;

/// Header carrying the authenticated viewer's numeric id.
///
/// Session handling lives in front of this service; a request without the
/// header, or with a value that is not a `u64`, is browsed anonymously.
pub const VIEWER_HEADER: &str = "x-viewer-id";

pub(crate) fn viewer_id(headers: &HeaderMap) -> Option<UserId> {
    let raw = headers.get(VIEWER_HEADER)?;
    match raw.to_str().ok().and_then(|value| value.trim().parse().ok()) {
        Some(id) => Some(UserId(id)),
        None => {
            tracing::debug!(value = ?raw, "ignoring unparseable viewer header");
            None
        }
    }
}
