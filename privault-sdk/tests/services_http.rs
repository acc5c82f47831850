use privault_core::{
    ApiTokenAuthenticator, AuthenticatorSet, DynAuthenticator, PermissionTier, SafePermissions,
};
use privault_sdk::models::accounts::{AccountsFilter, AddAccountRequest, SecretType};
use privault_sdk::models::safes::{AddSafeMemberRequest, AddSafeRequest, MemberType};
use privault_sdk::{ClientConfig, PrivaultClient, SdkError};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PrivaultClient {
    let authenticators: AuthenticatorSet = vec![
        Arc::new(ApiTokenAuthenticator::new("platform", "test-token")) as DynAuthenticator,
        Arc::new(ApiTokenAuthenticator::new("gateway", "gw-token")) as DynAuthenticator,
    ]
    .into();
    PrivaultClient::new(ClientConfig::new(server.uri()), authenticators)
}

#[tokio::test]
async fn safe_create_get_delete_round_trip() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/safes"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({"safeName": "payments"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "safeId": "s1", "safeName": "payments", "description": "payment creds"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/safes/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "safeId": "s1", "safeName": "payments"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/safes/s1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let safes = client_for(&server).safes()?;

    let mut request = AddSafeRequest::new("payments");
    request.description = Some("payment creds".into());
    let created = safes.add_safe(&request).await?;
    assert_eq!(created.safe_id, "s1");

    let fetched = safes.safe("s1").await?;
    assert_eq!(fetched.safe_name, "payments");

    safes.delete_safe("s1").await?;
    Ok(())
}

#[tokio::test]
async fn member_grant_by_tier_sends_the_canonical_bit_set() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    // The canonical read_only set must be resolved client-side and sent
    // as an explicit grant.
    Mock::given(method("POST"))
        .and(path("/api/safes/s1/members"))
        .and(body_partial_json(json!({
            "memberName": "alice",
            "memberType": "user",
            "permissions": {
                "useAccounts": true,
                "retrieveAccounts": true,
                "listAccounts": true,
                "addAccounts": false
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "memberName": "alice",
            "memberType": "user",
            "permissions": {"useAccounts": true, "retrieveAccounts": true, "listAccounts": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let safes = client_for(&server).safes()?;
    let request = AddSafeMemberRequest::with_tier("alice", MemberType::User, "read_only");
    let member = safes.add_member("s1", &request).await?;

    assert_eq!(member.member_name, "alice");
    assert_eq!(
        privault_core::classify(&member.permissions),
        PermissionTier::ReadOnly
    );
    Ok(())
}

#[tokio::test]
async fn member_grant_with_unknown_tier_fails_before_any_request() {
    let server = MockServer::start().await;
    let safes = client_for(&server).safes().unwrap();

    let request = AddSafeMemberRequest::with_tier("bob", MemberType::User, "superuser");
    let err = safes.add_member("s1", &request).await.unwrap_err();

    assert!(matches!(err, SdkError::Core(_)));
    assert!(err.to_string().contains("superuser"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn member_grant_with_explicit_custom_set_is_sent_verbatim() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/safes/s1/members"))
        .and(body_partial_json(json!({
            "permissions": {"listAccounts": true, "viewAuditLog": true}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "memberName": "auditors",
            "memberType": "group",
            "permissions": {"listAccounts": true, "viewAuditLog": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let custom = SafePermissions {
        list_accounts: true,
        view_audit_log: true,
        ..SafePermissions::default()
    };
    let safes = client_for(&server).safes()?;
    let request =
        AddSafeMemberRequest::with_permissions("auditors", MemberType::Group, custom);
    let member = safes.add_member("s1", &request).await?;

    assert_eq!(privault_core::classify(&member.permissions), PermissionTier::Custom);
    Ok(())
}

#[tokio::test]
async fn account_create_and_filtered_listing() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/accounts"))
        .and(body_partial_json(json!({
            "safeName": "payments", "platformId": "UnixSSH", "secretType": "password"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "a1", "name": "root-prod", "safeName": "payments",
            "platformId": "UnixSSH", "secretType": "password"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/accounts"))
        .and(query_param("safeName", "payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "id": "a1", "name": "root-prod", "safeName": "payments",
                "platformId": "UnixSSH", "secretType": "password"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = client_for(&server).accounts()?;
    let created = accounts
        .add_account(&AddAccountRequest::new(
            "payments",
            "UnixSSH",
            SecretType::Password,
        ))
        .await?;
    assert_eq!(created.id, "a1");

    let listed = accounts
        .list_accounts(&AccountsFilter::for_safe("payments"))
        .try_collect()
        .await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "root-prod");
    Ok(())
}

#[tokio::test]
async fn safes_stats_fans_out_per_safe() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/safes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"safeId": "s1", "safeName": "payments"},
                {"safeId": "s2", "safeName": "billing"}
            ]
        })))
        .mount(&server)
        .await;

    for (id, members) in [("s1", 2), ("s2", 1)] {
        let grants: Vec<_> = (0..members)
            .map(|i| {
                json!({
                    "memberName": format!("user-{i}"),
                    "memberType": "user",
                    "permissions": {"useAccounts": true, "listAccounts": true}
                })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/safes/{id}/members")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": grants})))
            .mount(&server)
            .await;
    }

    for (name, count) in [("payments", 3), ("billing", 0)] {
        let items: Vec<_> = (0..count).map(|i| json!({"id": format!("a{i}")})).collect();
        Mock::given(method("GET"))
            .and(path("/api/accounts"))
            .and(query_param("safeName", name))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": items})))
            .mount(&server)
            .await;
    }

    let safes = client_for(&server).safes()?;
    let stats = safes.safes_stats(None).await?;

    assert_eq!(stats.len(), 2);
    assert_eq!(stats["payments"].members_count, 2);
    assert_eq!(stats["payments"].accounts_count, 3);
    assert_eq!(stats["billing"].members_count, 1);
    assert_eq!(stats["billing"].accounts_count, 0);
    Ok(())
}

#[tokio::test]
async fn safes_stats_returns_the_first_worker_error_and_no_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/safes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"safeId": "s1", "safeName": "payments"},
                {"safeId": "s2", "safeName": "billing"}
            ]
        })))
        .mount(&server)
        .await;

    // payments resolves fine; billing's member listing is forbidden.
    Mock::given(method("GET"))
        .and(path("/api/safes/s1/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/accounts"))
        .and(query_param("safeName", "payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/safes/s2/members"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "no audit grant"})),
        )
        .mount(&server)
        .await;

    let safes = client_for(&server).safes().unwrap();
    let err = safes.safes_stats(Some(2)).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("no audit grant"));
}

#[tokio::test]
async fn db_secret_rotation_uses_the_gateway_authenticator() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/db/targets/t1/secret/rotate"))
        .and(header("authorization", "Bearer gw-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secretId": "sec1", "secretName": "pg-admin",
            "secretType": "username_password", "isActive": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let db = client_for(&server).db_targets()?;
    let rotated = db.rotate_secret("t1").await?;
    assert_eq!(rotated.secret_id, "sec1");
    assert!(rotated.is_active);
    Ok(())
}
