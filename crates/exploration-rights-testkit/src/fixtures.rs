//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use exploration_rights_core::{ActivityStatus, ExplorationId, RightsSnapshot, Version};
use exploration_rights_sync::{
    AlertSink, ClearWarnings, DocumentSource, MemoryAuthority, RightsState, SharedDocument,
};

/// Default exploration used by fixtures.
pub const FIXTURE_EXPLORATION: &str = "expl_fixture";

/// Alert surface that counts how often warnings were cleared.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    cleared: AtomicUsize,
}

impl RecordingAlerts {
    pub fn cleared_count(&self) -> usize {
        self.cleared.load(Ordering::SeqCst)
    }
}

impl AlertSink for RecordingAlerts {
    fn clear_warnings(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }
}

/// An authority hosting one exploration, and a rights state in sync with it.
pub struct RightsFixture {
    pub authority: Arc<MemoryAuthority>,
    pub document: Arc<SharedDocument>,
    pub alerts: Arc<RecordingAlerts>,
    pub state: RightsState,
}

impl RightsFixture {
    /// Host `initial` at version 1 and initialize the state from it.
    pub async fn new(initial: RightsSnapshot) -> Self {
        Self::with_id(FIXTURE_EXPLORATION, initial, Version::INITIAL).await
    }

    /// Host `initial` under a specific id and version.
    pub async fn with_id(id: &str, initial: RightsSnapshot, version: Version) -> Self {
        let authority = MemoryAuthority::new();
        authority
            .host(ExplorationId::new(id), initial.clone(), version)
            .await;

        let document = Arc::new(SharedDocument::new(id, version));
        let alerts = Arc::new(RecordingAlerts::default());

        let state = RightsState::new(document.clone(), authority.clone());
        state.subscribe(Arc::new(ClearWarnings::new(alerts.clone())));
        state.init_from(initial);

        Self {
            authority,
            document,
            alerts,
            state,
        }
    }

    pub fn exploration_id(&self) -> ExplorationId {
        self.document.exploration_id()
    }

    /// Rights the authority holds right now.
    pub async fn authority_rights(&self) -> Option<RightsSnapshot> {
        self.authority.rights_of(&self.exploration_id()).await
    }
}

/// A private exploration with one member in each role.
pub fn team_snapshot() -> RightsSnapshot {
    RightsSnapshot::new(
        vec!["alice".into()],
        vec!["bob".into()],
        vec!["carol".into()],
        ActivityStatus::Private,
        None,
        false,
        false,
    )
}

/// A published exploration cloned from another.
pub fn public_clone_snapshot(source: &str) -> RightsSnapshot {
    team_snapshot()
        .with_status(ActivityStatus::Public)
        .with_cloned_from(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_is_in_sync() {
        let fixture = RightsFixture::new(team_snapshot()).await;

        assert_eq!(
            fixture.authority_rights().await.as_ref(),
            fixture.state.snapshot().as_deref()
        );
        assert_eq!(fixture.exploration_id(), FIXTURE_EXPLORATION);
        assert_eq!(fixture.alerts.cleared_count(), 0);
    }

    #[tokio::test]
    async fn test_fixture_with_version() {
        let fixture = RightsFixture::with_id("expl_v", team_snapshot(), Version(7)).await;
        assert_eq!(
            fixture.authority.version_of(&fixture.exploration_id()).await,
            Some(Version(7))
        );
    }

    #[test]
    fn test_public_clone_snapshot() {
        let snapshot = public_clone_snapshot("expl_src");
        assert!(snapshot.is_public());
        assert!(snapshot.is_cloned());
    }
}
