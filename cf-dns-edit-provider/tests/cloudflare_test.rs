#![allow(clippy::unwrap_used, clippy::panic)]
//! Cloudflare store tests against a mock API, plus live tests gated on
//! `CLOUDFLARE_API_TOKEN` and `TEST_ZONE` (run with `--ignored`).

mod common;

use cf_dns_edit_provider::{
    ProviderError, RecordPayload, RecordStore, RecordType, Ttl, ZoneStatus,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{
    LiveContext, ZONE_ID, envelope, failure, generate_test_record_name, mock_store, paged,
    record_json, zone_json,
};

fn records_path() -> String {
    format!("/zones/{ZONE_ID}/dns_records")
}

async fn mount_zone(server: &wiremock::MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/zones/{ZONE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(zone_json())))
        .expect(1)
        .mount(server)
        .await;
}

fn a_payload(name: &str, content: &str) -> RecordPayload {
    RecordPayload {
        name: name.to_string(),
        record_type: RecordType::A,
        content: content.to_string(),
        ttl: Ttl::Seconds(300),
        proxied: true,
        priority: None,
        comment: None,
    }
}

// ── Token / zones ───────────────────────────────────────────────────

#[tokio::test]
async fn verify_token_reports_active_token() {
    let (server, store) = mock_store().await;

    Mock::given(method("GET"))
        .and(path("/user/tokens/verify"))
        .and(header("authorization", format!("Bearer {}", common::TOKEN)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "id": "tok", "status": "active" }))),
        )
        .mount(&server)
        .await;

    assert!(require_ok!(store.verify_token().await));
}

#[tokio::test]
async fn verify_token_rejected_token_is_false() {
    let (server, store) = mock_store().await;

    Mock::given(method("GET"))
        .and(path("/user/tokens/verify"))
        .respond_with(ResponseTemplate::new(401).set_body_json(failure(1000, "Invalid API Token")))
        .mount(&server)
        .await;

    assert!(!require_ok!(store.verify_token().await));
}

#[tokio::test]
async fn list_zones_walks_every_page() {
    let (server, store) = mock_store().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged(
            json!([zone_json()]),
            1,
            2,
            2,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged(
            json!([{ "id": "z2", "name": "example.org", "status": "pending" }]),
            2,
            2,
            2,
        )))
        .mount(&server)
        .await;

    let zones = require_ok!(store.list_zones().await);
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].name, "example.com");
    assert_eq!(zones[0].status, ZoneStatus::Active);
    assert_eq!(zones[1].status, ZoneStatus::Pending);
}

// ── Records ─────────────────────────────────────────────────────────

#[tokio::test]
async fn list_records_pages_and_skips_unsupported_types() {
    let (server, store) = mock_store().await;
    mount_zone(&server).await;

    Mock::given(method("GET"))
        .and(path(records_path()))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged(
            json!([
                record_json("r1", "A", "example.com", "192.0.2.1"),
                record_json("r2", "LOC", "geo.example.com", "51 30 12.748 N 0 7 39.611 W 0.00m"),
            ]),
            1,
            2,
            3,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(records_path()))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged(
            json!([record_json("r3", "CNAME", "www.example.com", "example.com")]),
            2,
            2,
            3,
        )))
        .mount(&server)
        .await;

    let records = require_ok!(store.list_records(ZONE_ID).await);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r3"]);
    assert_eq!(records[0].name, "@");
    assert_eq!(records[0].ttl, Ttl::Auto);
    assert_eq!(records[1].name, "www");
    assert_eq!(records[1].zone_id, ZONE_ID);

    // zone name is looked up once (`expect(1)` above)
    let again = require_ok!(store.list_records(ZONE_ID).await);
    assert_eq!(again, records);
}

#[tokio::test]
async fn create_record_sends_full_name() {
    let (server, store) = mock_store().await;
    mount_zone(&server).await;

    Mock::given(method("POST"))
        .and(path(records_path()))
        .and(body_partial_json(json!({
            "type": "A",
            "name": "api.example.com",
            "content": "192.0.2.10",
            "ttl": 300,
            "proxied": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(record_json(
            "new-1",
            "A",
            "api.example.com",
            "192.0.2.10",
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let record = require_ok!(
        store
            .create_record(ZONE_ID, &a_payload("api", "192.0.2.10"))
            .await
    );
    assert_eq!(record.id, "new-1");
    assert_eq!(record.name, "api");
}

#[tokio::test]
async fn update_record_uses_patch() {
    let (server, store) = mock_store().await;
    mount_zone(&server).await;

    Mock::given(method("PATCH"))
        .and(path(format!("{}/r1", records_path())))
        .and(body_partial_json(json!({ "name": "example.com", "content": "192.0.2.99" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(record_json(
            "r1",
            "A",
            "example.com",
            "192.0.2.99",
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let record = require_ok!(
        store
            .update_record(ZONE_ID, "r1", &a_payload("@", "192.0.2.99"))
            .await
    );
    assert_eq!(record.content, "192.0.2.99");
}

#[tokio::test]
async fn delete_record_succeeds() {
    let (server, store) = mock_store().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/r1", records_path())))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "id": "r1" }))))
        .expect(1)
        .mount(&server)
        .await;

    require_ok!(store.delete_record(ZONE_ID, "r1").await);
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_record_maps_to_record_exists() {
    let (server, store) = mock_store().await;
    mount_zone(&server).await;

    Mock::given(method("POST"))
        .and(path(records_path()))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(failure(81057, "The record already exists.")),
        )
        .mount(&server)
        .await;

    let result = store
        .create_record(ZONE_ID, &a_payload("www", "192.0.2.1"))
        .await;
    assert!(
        matches!(&result, Err(ProviderError::RecordExists { record_name, .. }) if record_name == "www"),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn missing_record_maps_to_record_not_found() {
    let (server, store) = mock_store().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/gone", records_path())))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(failure(81044, "Record does not exist.")),
        )
        .mount(&server)
        .await;

    let result = store.delete_record(ZONE_ID, "gone").await;
    assert!(
        matches!(&result, Err(ProviderError::RecordNotFound { record_id, .. }) if record_id == "gone"),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn unknown_zone_maps_to_zone_not_found() {
    let (server, store) = mock_store().await;

    Mock::given(method("GET"))
        .and(path("/zones/nope"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(failure(7003, "Could not route to /zones/nope")),
        )
        .mount(&server)
        .await;

    let result = store.list_records("nope").await;
    assert!(
        matches!(&result, Err(ProviderError::ZoneNotFound { zone, .. }) if zone == "nope"),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_reported_once_without_retry() {
    let (server, store) = mock_store().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/r1", records_path())))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "30")
                .set_body_string("slow down"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = store.delete_record(ZONE_ID, "r1").await;
    assert!(
        matches!(&result, Err(ProviderError::RateLimited { retry_after: Some(30), .. })),
        "unexpected result: {result:?}"
    );
    assert!(result.unwrap_err().is_transient());
}

#[tokio::test]
async fn forbidden_html_maps_to_permission_denied() {
    let (server, store) = mock_store().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/r1", records_path())))
        .respond_with(ResponseTemplate::new(403).set_body_string("<html>Forbidden</html>"))
        .mount(&server)
        .await;

    let result = store.delete_record(ZONE_ID, "r1").await;
    assert!(
        matches!(&result, Err(ProviderError::PermissionDenied { .. })),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn gateway_error_is_network_error() {
    let (server, store) = mock_store().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = store.list_zones().await;
    assert!(
        matches!(&result, Err(ProviderError::NetworkError { .. })),
        "unexpected result: {result:?}"
    );
}

// ── Live API ────────────────────────────────────────────────────────

#[tokio::test]
#[ignore = "requires CLOUDFLARE_API_TOKEN and TEST_ZONE"]
async fn live_record_lifecycle() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_ZONE");
    let Some(ctx) = LiveContext::from_env() else {
        panic!("invalid live test configuration");
    };

    assert!(require_ok!(ctx.store.verify_token().await));
    let zone_id = require_ok!(ctx.find_zone_id().await.ok_or("test zone not visible"));

    let name = generate_test_record_name();
    let payload = RecordPayload {
        name: name.clone(),
        record_type: RecordType::Txt,
        content: "integration-test".to_string(),
        ttl: Ttl::Auto,
        proxied: false,
        priority: None,
        comment: Some("created by cf-dns-edit tests".to_string()),
    };

    let created = require_ok!(ctx.store.create_record(&zone_id, &payload).await);
    assert_eq!(created.name, name);

    let updated = require_ok!(
        ctx.store
            .update_record(
                &zone_id,
                &created.id,
                &RecordPayload {
                    content: "integration-test-updated".to_string(),
                    comment: None,
                    ..payload
                },
            )
            .await
    );
    assert_eq!(updated.comment, None);

    require_ok!(ctx.store.delete_record(&zone_id, &created.id).await);
    ctx.cleanup_test_records(&zone_id).await;
}
