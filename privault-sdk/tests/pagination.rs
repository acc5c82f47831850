use privault_core::{ApiTokenAuthenticator, AuthenticatorSet, DynAuthenticator};
use privault_sdk::{ClientConfig, PrivaultClient};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PrivaultClient {
    let authenticators: AuthenticatorSet = vec![
        Arc::new(ApiTokenAuthenticator::new("platform", "test-token")) as DynAuthenticator,
    ]
    .into();
    PrivaultClient::new(ClientConfig::new(server.uri()), authenticators)
}

fn safe(id: u32) -> serde_json::Value {
    json!({"safeId": format!("s{id}"), "safeName": format!("safe-{id}")})
}

#[tokio::test]
async fn three_cursor_chained_pages_arrive_in_order_and_terminate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/safes"))
        .and(query_param("limit", "2"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [safe(1), safe(2)],
            "nextLink": "/api/safes?offset=2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The cursor replaces the whole query: no `limit` on the follow-ups.
    Mock::given(method("GET"))
        .and(path("/api/safes"))
        .and(query_param("offset", "2"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [safe(3), safe(4)],
            "nextLink": "/api/safes?offset=4"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/safes"))
        .and(query_param("offset", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [safe(5)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let safes = client_for(&server).safes().unwrap();
    let mut pager = safes.list_safes_with_query(vec![("limit".into(), "2".into())]);

    let mut pages = Vec::new();
    while let Some(page) = pager.next_page().await {
        pages.push(page.unwrap());
    }

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].items[0].safe_name, "safe-1");
    assert_eq!(pages[1].items[0].safe_name, "safe-3");
    assert_eq!(pages[2].items[0].safe_name, "safe-5");
    // MockServer verifies each page was requested exactly once on drop.
}

#[tokio::test]
async fn mid_stream_failure_surfaces_as_terminal_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/safes"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [safe(1), safe(2)],
            "nextLink": "/api/safes?offset=2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/safes"))
        .and(query_param("offset", "2"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "storage offline"})),
        )
        .mount(&server)
        .await;

    let safes = client_for(&server).safes().unwrap();
    let mut pager = safes.list_safes();

    let first = pager.next_page().await.unwrap().unwrap();
    assert_eq!(first.items.len(), 2);

    let second = pager.next_page().await.unwrap();
    let err = second.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("storage offline"));

    // Terminal: the stream closes after the error item.
    assert!(pager.next_page().await.is_none());
}

#[tokio::test]
async fn undecodable_item_aborts_the_stream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/safes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"unexpected": true}]
        })))
        .mount(&server)
        .await;

    let safes = client_for(&server).safes().unwrap();
    let mut pager = safes.list_safes();

    assert!(pager.next_page().await.unwrap().is_err());
    assert!(pager.next_page().await.is_none());
}

#[tokio::test]
async fn nested_envelope_with_token_cursor_is_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/certificates"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "certificates": {
                "items": [{"id": "c1", "subject": "CN=alpha"}],
                "nextCursor": "tok-2"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/certificates"))
        .and(query_param("cursor", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "certificates": {
                "items": [{"id": "c2", "subject": "CN=beta"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let certificates = client_for(&server).certificates().unwrap();
    let all = certificates.list_certificates().try_collect().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].subject, "CN=alpha");
    assert_eq!(all[1].subject, "CN=beta");
}
