#![allow(clippy::unwrap_used)]
// End-to-end tests for `Syncer` against a mocked CCP endpoint.

use std::time::Duration;

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dnssync_core::{
    CoreError, Credentials, SyncConfig, Syncer, TlsVerification, parse_layout,
};

const ENDPOINT_PATH: &str = "/run/webservice/servers/endpoint.php";

fn config(server: &MockServer) -> SyncConfig {
    SyncConfig {
        endpoint: Url::parse(&format!("{}{ENDPOINT_PATH}?JSON", server.uri())).unwrap(),
        credentials: Credentials::new("12345", "key".to_string(), "secret".to_string()),
        tls: TlsVerification::SystemDefaults,
        timeout: Duration::from_secs(5),
    }
}

fn success(responsedata: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "success",
        "statuscode": 2000,
        "longmessage": "ok",
        "responsedata": responsedata,
    }))
}

fn failure(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "error",
        "statuscode": code,
        "longmessage": message,
        "responsedata": "",
    }))
}

async fn on_action(server: &MockServer, body: Value, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(body_partial_json(body))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_session(server: &MockServer) {
    on_action(
        server,
        json!({ "action": "login" }),
        success(json!({ "apisessionid": "s1" })),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(body_partial_json(json!({ "action": "logout" })))
        .respond_with(success(json!("")))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_zone(server: &MockServer, domain: &str, ttl: &str, records: Value) {
    on_action(
        server,
        json!({ "action": "infoDnsZone", "param": { "domainname": domain } }),
        success(json!({
            "name": domain,
            "ttl": ttl,
            "serial": "2024061501",
            "refresh": "28800",
            "retry": "7200",
            "expire": "1209600",
            "dnssecstatus": false
        })),
    )
    .await;
    on_action(
        server,
        json!({ "action": "infoDnsRecords", "param": { "domainname": domain } }),
        success(json!({ "dnsrecords": records })),
    )
    .await;
}

fn example_records() -> Value {
    json!([
        { "id": "5", "hostname": "www", "type": "A", "priority": "0",
          "destination": "1.2.3.4", "deleterecord": false, "state": "yes" },
        { "id": "6", "hostname": "old", "type": "A", "priority": "0",
          "destination": "9.9.9.9", "deleterecord": false, "state": "yes" }
    ])
}

#[tokio::test]
async fn test_fetch_layout_keeps_requested_order() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_zone(&server, "b.example", "3600", json!([])).await;
    mount_zone(&server, "a.example", "86400", example_records()).await;

    let layout = Syncer::oneshot(&config(&server), |s| async move {
        s.fetch_layout(&["b.example", "a.example"]).await
    })
    .await
    .unwrap();

    assert_eq!(layout.domains().collect::<Vec<_>>(), ["b.example", "a.example"]);
    let a = layout.get("a.example").unwrap();
    assert_eq!(a.serial, Some(2_024_061_501));
    assert_eq!(a.entries.len(), 2);
    assert_eq!(layout.get("b.example").unwrap().settings.ttl, 3600);
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_zone(&server, "example.com", "86400", example_records()).await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(body_partial_json(json!({ "action": "updateDnsRecords" })))
        .respond_with(success(json!({ "dnsrecords": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let desired = parse_layout("example.com\n\tA\twww\t1.2.3.4\n\tA\tnew\t8.8.8.8\n").unwrap();
    let outcomes = Syncer::oneshot(&config(&server), |s| async move {
        Ok(s.push_layout(&desired, false).await)
    })
    .await
    .unwrap();

    assert_eq!(outcomes.len(), 1);
    let delta = outcomes[0].result.as_ref().unwrap();
    assert_eq!(delta.removed.len(), 1);
    assert_eq!(delta.removed[0].hostname(), "old");
    assert_eq!(delta.added.len(), 1);
    assert_eq!(delta.added[0].hostname(), "new");
}

#[tokio::test]
async fn test_commit_sends_one_batch_and_zone_update() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_zone(&server, "example.com", "86400", example_records()).await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(body_partial_json(json!({
            "action": "updateDnsZone",
            "param": { "domainname": "example.com", "dnszone": { "ttl": 300 } }
        })))
        .respond_with(success(json!({
            "name": "example.com", "ttl": "300", "serial": "2024061502",
            "refresh": "28800", "retry": "7200", "expire": "1209600",
            "dnssecstatus": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(body_partial_json(json!({
            "action": "updateDnsRecords",
            "param": {
                "domainname": "example.com",
                "dnsrecordset": { "dnsrecords": [
                    { "id": "6", "hostname": "old", "deleterecord": true },
                    { "id": null, "hostname": "new", "deleterecord": false }
                ] }
            }
        })))
        .respond_with(success(json!({ "dnsrecords": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let desired =
        parse_layout("example.com\n\t.ttl\t300\n\tA\twww\t1.2.3.4\n\tA\tnew\t8.8.8.8\n").unwrap();
    let outcomes = Syncer::oneshot(&config(&server), |s| async move {
        Ok(s.push_layout(&desired, true).await)
    })
    .await
    .unwrap();

    let delta = outcomes[0].result.as_ref().unwrap();
    let change = delta.settings.unwrap();
    assert_eq!((change.old.ttl, change.new.ttl), (86_400, 300));
}

#[tokio::test]
async fn test_up_to_date_zone_is_noop() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_zone(&server, "example.com", "86400", example_records()).await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(body_partial_json(json!({ "action": "updateDnsRecords" })))
        .respond_with(success(json!({ "dnsrecords": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let desired = parse_layout("example.com\n\tA\told\t9.9.9.9\n\tA\twww\t1.2.3.4\n").unwrap();
    let outcomes = Syncer::oneshot(&config(&server), |s| async move {
        Ok(s.push_layout(&desired, true).await)
    })
    .await
    .unwrap();
    assert!(outcomes[0].result.as_ref().unwrap().is_noop());
}

#[tokio::test]
async fn test_failing_domain_does_not_stop_batch() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    on_action(
        &server,
        json!({ "action": "infoDnsZone", "param": { "domainname": "missing.example" } }),
        failure(5029, "Domain not found."),
    )
    .await;
    mount_zone(&server, "example.com", "86400", example_records()).await;

    let desired = parse_layout("missing.example\nexample.com\n\tA\twww\t1.2.3.4\n").unwrap();
    let outcomes = Syncer::oneshot(&config(&server), |s| async move {
        Ok(s.push_layout(&desired, false).await)
    })
    .await
    .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].domain, "missing.example");
    match &outcomes[0].result {
        Err(CoreError::DomainNotFound { domain }) => assert_eq!(domain, "missing.example"),
        other => panic!("expected unknown domain, got {other:?}"),
    }
    let delta = outcomes[1].result.as_ref().unwrap();
    assert_eq!(delta.removed.len(), 1);
    assert!(delta.added.is_empty());
}

#[tokio::test]
async fn test_login_failure_is_auth_error() {
    let server = MockServer::start().await;
    on_action(
        &server,
        json!({ "action": "login" }),
        failure(4013, "Api key or password wrong."),
    )
    .await;

    let result = Syncer::oneshot(&config(&server), |s| async move {
        s.fetch_zone("example.com").await
    })
    .await;
    assert!(
        matches!(result, Err(CoreError::AuthenticationFailed { .. })),
        "{result:?}"
    );
}

#[tokio::test]
async fn test_fetch_layout_names_unknown_domain() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_zone(&server, "example.com", "86400", example_records()).await;
    on_action(
        &server,
        json!({ "action": "infoDnsZone", "param": { "domainname": "missing.example" } }),
        failure(5029, "Domain not found."),
    )
    .await;

    let result = Syncer::oneshot(&config(&server), |s| async move {
        s.fetch_layout(&["example.com", "missing.example"]).await
    })
    .await;
    match result {
        Err(CoreError::DomainNotFound { domain }) => assert_eq!(domain, "missing.example"),
        other => panic!("expected unknown domain, got {other:?}"),
    }
}
