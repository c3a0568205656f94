//! Rights sessions writing to a mocked HTTP authority.

use std::sync::Arc;

use exploration_rights::sync::{HttpTransport, SharedDocument};
use exploration_rights::{
    MemberRole, RightsError, RightsSession, RightsSnapshot, SessionConfig, Version,
};
use exploration_rights_testkit::RecordingAlerts;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_session(server: &MockServer) -> RightsSession {
    let mut config = SessionConfig::default();
    config.rights = config.rights.with_base_url(server.uri());
    let transport = HttpTransport::new(config.rights.clone()).unwrap();
    let document = Arc::new(SharedDocument::new("expl_7", Version(2)));

    let session = RightsSession::new(config, document, Arc::new(transport));
    session.load(RightsSnapshot::private_owned_by("alice"));
    session
}

#[tokio::test]
async fn role_change_over_http_reconciles_from_response() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/createhandler/rights/expl_7"))
        .and(body_json(json!({
            "version": 2,
            "new_member_role": "editor",
            "new_member_username": "bob"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rights": {
                "owner_names": ["alice"],
                "editor_names": ["bob"],
                "viewer_names": [],
                "status": "private",
                "cloned_from": "expl_1",
                "community_owned": false,
                "viewable_if_private": true
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let alerts = Arc::new(RecordingAlerts::default());
    let session = http_session(&server).with_alerts(alerts.clone());
    let rights = session.rights();

    rights.save_role_changes("bob", MemberRole::Editor).await.unwrap();

    assert_eq!(rights.editor_names(), vec!["bob".to_string()]);
    assert!(rights.is_cloned());
    assert!(rights.viewable_if_private());
    assert_eq!(alerts.cleared_count(), 1);
}

#[tokio::test]
async fn rejected_http_write_leaves_session_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/createhandler/rights/expl_7"))
        .respond_with(ResponseTemplate::new(409).set_body_string("version 2 is stale"))
        .mount(&server)
        .await;

    let alerts = Arc::new(RecordingAlerts::default());
    let session = http_session(&server).with_alerts(alerts.clone());
    let before = session.rights().snapshot();

    let err = session.rights().make_community_owned().await.unwrap_err();

    assert_eq!(err, RightsError::StaleVersion("version 2 is stale".into()));
    assert_eq!(session.rights().snapshot(), before);
    assert_eq!(alerts.cleared_count(), 0);
}

#[cfg(feature = "http")]
#[tokio::test]
async fn connect_publishes_to_status_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/createhandler/status/expl_7"))
        .and(body_json(json!({"make_public": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rights": {
                "owner_names": ["alice"],
                "editor_names": [],
                "viewer_names": [],
                "status": "public",
                "cloned_from": null,
                "community_owned": false,
                "viewable_if_private": false
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = SessionConfig::default();
    config.rights = config.rights.with_base_url(server.uri());
    let document = Arc::new(SharedDocument::new("expl_7", Version(2)));
    let session = RightsSession::connect(config, document).unwrap();
    session.load(RightsSnapshot::private_owned_by("alice"));

    session.rights().publish().await.unwrap();

    assert!(session.rights().is_public());
}
