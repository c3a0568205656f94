//! End-to-end write-then-reconcile behavior against the in-memory authority.

use std::sync::Arc;

use exploration_rights::sync::{Endpoint, MemoryAuthority, SharedDocument};
use exploration_rights::{
    ActivityStatus, ExplorationId, MemberRole, ModeratorAction, RightsError, RightsSession,
    RightsSnapshot, SessionConfig, Version,
};
use exploration_rights_testkit::{team_snapshot, RecordingAlerts, RightsFixture};
use serde_json::json;
use tokio::sync::mpsc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn make_community_owned_resolves_once_and_reconciles() {
    init_tracing();
    let fixture = RightsFixture::new(team_snapshot()).await;

    let pending = fixture.state.make_community_owned();
    pending.await.unwrap();

    assert!(fixture.state.is_community_owned());
    assert_eq!(fixture.alerts.cleared_count(), 1);
    assert_eq!(fixture.state.snapshot().as_deref(), fixture.authority_rights().await.as_ref());
}

#[tokio::test]
async fn every_operation_hits_its_endpoint_with_its_body() {
    let fixture = RightsFixture::new(team_snapshot()).await;
    let state = &fixture.state;

    state.make_community_owned().await.unwrap();
    state.set_viewability(true).await.unwrap();
    state.save_role_changes("dave", MemberRole::Viewer).await.unwrap();
    state.publish().await.unwrap();

    let requests = fixture.authority.requests().await;
    let bodies: Vec<_> = requests
        .iter()
        .map(|r| (r.endpoint, serde_json::to_value(&r.request).unwrap()))
        .collect();

    assert_eq!(
        bodies,
        vec![
            (Endpoint::Rights, json!({"version": 1, "make_community_owned": true})),
            (Endpoint::Rights, json!({"version": 1, "viewable_if_private": true})),
            (
                Endpoint::Rights,
                json!({"version": 1, "new_member_role": "viewer", "new_member_username": "dave"})
            ),
            (Endpoint::Status, json!({"make_public": true})),
        ]
    );
    assert_eq!(fixture.alerts.cleared_count(), 4);
}

#[tokio::test]
async fn role_change_replaces_whole_snapshot() {
    let fixture = RightsFixture::new(team_snapshot()).await;

    fixture
        .state
        .save_role_changes("carol", MemberRole::Editor)
        .await
        .unwrap();

    assert_eq!(fixture.state.editor_names(), vec!["bob", "carol"]);
    assert!(fixture.state.viewer_names().is_empty());
    assert_eq!(fixture.state.owner_names(), vec!["alice"]);
}

#[tokio::test]
async fn failed_write_leaves_accessors_unchanged() {
    let fixture = RightsFixture::new(team_snapshot().with_cloned_from("expl_42")).await;
    let state = &fixture.state;

    let before = (
        state.cloned_from(),
        state.is_private(),
        state.is_public(),
        state.is_cloned(),
        state.is_community_owned(),
        state.viewable_if_private(),
    );

    fixture
        .authority
        .fail_next(RightsError::Transport("connection refused".into()))
        .await;
    let err = state.set_viewability(true).await.unwrap_err();
    assert!(matches!(err, RightsError::Transport(_)));

    let after = (
        state.cloned_from(),
        state.is_private(),
        state.is_public(),
        state.is_cloned(),
        state.is_community_owned(),
        state.viewable_if_private(),
    );
    assert_eq!(before, after);
    assert_eq!(fixture.alerts.cleared_count(), 0);
}

#[tokio::test]
async fn unauthorized_and_stale_writes_are_distinguished() {
    let fixture = RightsFixture::new(team_snapshot()).await;

    fixture
        .authority
        .fail_next(RightsError::Unauthorized("viewer cannot publish".into()))
        .await;
    let err = fixture.state.publish().await.unwrap_err();
    assert!(matches!(err, RightsError::Unauthorized(_)));
    assert!(fixture.state.is_private());

    fixture.authority.bump_version(&fixture.exploration_id()).await;
    let err = fixture.state.make_community_owned().await.unwrap_err();
    assert!(matches!(err, RightsError::StaleVersion(_)));

    // Publishing carries no version, so it still goes through.
    fixture.state.publish().await.unwrap();
    assert!(fixture.state.is_public());
}

#[tokio::test]
async fn later_arriving_response_wins() {
    let fixture = RightsFixture::new(team_snapshot()).await;
    let state = &fixture.state;

    // The first write is applied by the authority at once but its response
    // is held back until after the second write has been reconciled.
    let release = fixture.authority.hold_next().await;
    let first = state.save_role_changes("dave", MemberRole::Editor);
    tokio::task::yield_now().await;
    while fixture.authority.requests().await.is_empty() {
        tokio::task::yield_now().await;
    }

    state.set_viewability(true).await.unwrap();
    assert!(state.viewable_if_private());
    assert_eq!(state.editor_names(), vec!["bob", "dave"]);

    release.release();
    first.await.unwrap();

    // The held response predates the viewability change and overwrites it.
    assert!(!state.viewable_if_private());
    assert_eq!(state.editor_names(), vec!["bob", "dave"]);
    assert!(fixture.authority_rights().await.unwrap().viewable_if_private);
}

#[tokio::test]
async fn moderator_change_is_observed_through_hooks() {
    let fixture = RightsFixture::new(team_snapshot().with_status(ActivityStatus::Public)).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    fixture
        .state
        .subscribe(Arc::new(move |snapshot: &RightsSnapshot| {
            let _ = tx.send(snapshot.status.clone());
        }));

    fixture
        .state
        .save_moderator_change(ModeratorAction::UnpublishExploration, "Please fix the title.");

    assert_eq!(rx.recv().await, Some(ActivityStatus::Private));
    assert!(fixture.state.is_private());
    assert_eq!(fixture.alerts.cleared_count(), 1);

    let requests = fixture.authority.requests().await;
    assert_eq!(requests[0].endpoint, Endpoint::ModeratorRights);
    assert_eq!(
        serde_json::to_value(&requests[0].request).unwrap(),
        json!({
            "action": "unpublish_exploration",
            "email_body": "Please fix the title.",
            "version": 1
        })
    );
}

#[tokio::test]
async fn session_wires_alerts_and_shares_state() {
    let authority = MemoryAuthority::new();
    let id = ExplorationId::new("expl_session");
    authority.host(id.clone(), team_snapshot(), Version(3)).await;

    let alerts = Arc::new(RecordingAlerts::default());
    let session = RightsSession::new(
        SessionConfig::default(),
        Arc::new(SharedDocument::new(id.clone(), Version(3))),
        authority.clone(),
    )
    .with_alerts(alerts.clone());
    session.load(team_snapshot());

    let handle = session.rights().clone();
    handle.make_community_owned().await.unwrap();

    assert!(session.rights().is_community_owned());
    assert_eq!(alerts.cleared_count(), 1);
}

#[tokio::test]
async fn session_without_alert_clearing() {
    let authority = MemoryAuthority::new();
    let id = ExplorationId::new("expl_quiet");
    authority.host(id.clone(), team_snapshot(), Version(1)).await;

    let config = SessionConfig {
        clear_warnings_on_reconcile: false,
        ..SessionConfig::default()
    };
    let alerts = Arc::new(RecordingAlerts::default());
    let session = RightsSession::new(
        config,
        Arc::new(SharedDocument::new(id, Version(1))),
        authority,
    )
    .with_alerts(alerts.clone());
    session.load(team_snapshot());

    session.rights().publish().await.unwrap();
    assert!(session.rights().is_public());
    assert_eq!(alerts.cleared_count(), 0);
}
