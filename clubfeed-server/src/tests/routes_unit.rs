//! Router tests driving the browse endpoints through `tower::ServiceExt`.

use super::helpers::{
    FailingStore, MEMBER, browse_request, call, ids, sample_store, seed_sqlite, utf8_tempdir,
};
use super::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use clubfeed_core::ItemKind;
use rstest::rstest;
use serde_json::json;

fn sample_router(default_limit: usize) -> axum::Router {
    router(AppState::from_store(sample_store(), default_limit))
}

#[rstest]
fn health_reports_ok() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request");
    let (status, body) = call(sample_router(0), request);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[rstest]
fn member_sees_joined_recommended_other() {
    let request = browse_request(ItemKind::Club, Some(MEMBER), r#"{"includeJoined":true}"#);
    let (status, body) = call(sample_router(0), request);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body, "clubs"), vec![1, 2, 3]);
    assert_eq!(body["message"], "Retrieved 3 clubs");

    let clubs = body["clubs"].as_array().expect("clubs");
    assert_eq!(clubs[0]["isJoined"], true);
    assert_eq!(clubs[0]["percentMatch"], 66);
    assert_eq!(clubs[0]["name"], "A");
    assert_eq!(clubs[1]["isJoined"], false);
    assert_eq!(clubs[1]["percentMatch"], 100);
    assert_eq!(clubs[2]["percentMatch"], 0);
    assert_eq!(clubs[2]["interests"], json!(["Art", "Business"]));
}

#[rstest]
#[case::no_header(None)]
#[case::unknown_viewer(Some(99))]
fn viewers_without_data_get_unjoined_zero_matches(#[case] viewer: Option<u64>) {
    let request = browse_request(ItemKind::Club, viewer, r#"{"includeJoined":true}"#);
    let (status, body) = call(sample_router(0), request);

    assert_eq!(status, StatusCode::OK);
    let clubs = body["clubs"].as_array().expect("clubs");
    assert_eq!(clubs.len(), 3);
    assert!(
        clubs
            .iter()
            .all(|club| club["isJoined"] == false && club["percentMatch"] == 0)
    );
}

#[rstest]
fn events_inherit_club_membership_and_interests() {
    let request = browse_request(ItemKind::Event, Some(MEMBER), "{}");
    let (status, body) = call(sample_router(0), request);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body, "events"), vec![11]);
    let event = &body["events"][0];
    assert_eq!(event["clubId"], 2);
    assert_eq!(event["title"], "Open mic");
    assert_eq!(event["percentMatch"], 100);
    assert_eq!(body["message"], "Retrieved 1 events");
}

#[rstest]
fn posts_endpoint_uses_posts_key() {
    let request = browse_request(ItemKind::Post, None, "");
    let (status, body) = call(sample_router(0), request);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body, "posts"), vec![20]);
    assert!(body.get("clubs").is_none());
}

#[rstest]
#[case::default_applies(3, r#"{"includeJoined":true}"#, 3)]
#[case::default_caps(1, r#"{"includeJoined":true}"#, 1)]
#[case::explicit_zero_is_unlimited(1, r#"{"includeJoined":true,"limit":0}"#, 3)]
#[case::explicit_limit(0, r#"{"includeJoined":true,"limit":2}"#, 2)]
#[case::limit_above_len(0, r#"{"includeJoined":true,"limit":50}"#, 3)]
#[case::null_limit(2, r#"{"includeJoined":true,"limit":null}"#, 2)]
#[case::joined_left_out(0, "{}", 2)]
fn limit_resolution(#[case] default_limit: usize, #[case] body: &str, #[case] expected: usize) {
    let request = browse_request(ItemKind::Club, Some(MEMBER), body);
    let (status, response) = call(sample_router(default_limit), request);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&response, "clubs").len(), expected);
}

#[rstest]
#[case::negative(r#"{"limit":-1}"#, "limit must be a non-negative integer, got -1")]
#[case::fractional(r#"{"limit":2.5}"#, "malformed request body")]
#[case::string(r#"{"limit":"10"}"#, "malformed request body")]
#[case::not_json("limit=10", "malformed request body")]
#[case::wrong_flag_type(r#"{"includeJoined":"yes"}"#, "malformed request body")]
fn invalid_requests_are_rejected(#[case] body: &str, #[case] message: &str) {
    let request = browse_request(ItemKind::Club, Some(MEMBER), body);
    let (status, response) = call(sample_router(0), request);

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let text = response["message"].as_str().expect("message");
    assert!(text.starts_with(message), "unexpected message {text:?}");
}

#[rstest]
#[case::anonymous(None)]
#[case::identified(Some(MEMBER))]
fn store_failures_surface_as_server_errors(#[case] viewer: Option<u64>) {
    let app = router(AppState::from_store(FailingStore, 0));
    let (status, body) = call(app, browse_request(ItemKind::Club, viewer, "{}"));

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "failed to load browse inputs");
}

#[rstest]
fn seeded_requests_are_reproducible() {
    let store = sample_store()
        .with_item(clubfeed_core::test_support::club_item(4, "D", &[]))
        .with_item(clubfeed_core::test_support::club_item(5, "E", &[]))
        .with_item(clubfeed_core::test_support::club_item(6, "F", &[]));
    let state = AppState::from_store(store, 0);
    let body = r#"{"includeJoined":true,"seed":99}"#;

    let (_, first) = call(
        router(state.clone()),
        browse_request(ItemKind::Club, None, body),
    );
    let (_, second) = call(router(state), browse_request(ItemKind::Club, None, body));

    assert_eq!(ids(&first, "clubs"), ids(&second, "clubs"));
}

#[rstest]
fn sqlite_store_serves_browse_end_to_end() {
    let (_tmp, root) = utf8_tempdir();
    let database = root.join("data/clubfeed.db");
    run_init(InitArgs {
        database: Some(database.clone()),
    })
    .expect("initialise schema");
    seed_sqlite(&database);

    let store = clubfeed_core::SqliteStore::open(database.as_std_path()).expect("open store");
    let app = router(AppState::from_store(store, 0));

    let (status, clubs) = call(
        app.clone(),
        browse_request(ItemKind::Club, Some(MEMBER), r#"{"includeJoined":true}"#),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&clubs, "clubs"), vec![1, 2, 3]);

    let (status, events) = call(
        app,
        browse_request(ItemKind::Event, Some(MEMBER), r#"{"includeJoined":true}"#),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events["events"][0]["isJoined"], true);
    assert_eq!(events["events"][0]["percentMatch"], 66);
}
