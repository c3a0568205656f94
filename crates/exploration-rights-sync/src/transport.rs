//! Transport abstraction for rights writes.
//!
//! The transport delivers one request to the authority and returns its
//! decoded response. Implementations may use HTTP or an in-process
//! authority for tests.

use async_trait::async_trait;

use exploration_rights_core::ExplorationId;

use crate::error::Result;
use crate::messages::{RightsRequest, RightsResponse};

/// Transport trait for sending rights writes.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait RightsTransport: Send + Sync {
    /// Send one write for an exploration and wait for the authority's answer.
    ///
    /// A non-success answer is an error; no partial response is returned.
    async fn put(
        &self,
        exploration_id: &ExplorationId,
        request: RightsRequest,
    ) -> Result<RightsResponse>;
}

/// An in-process authority for tests.
///
/// Holds the rights and version of each hosted exploration and applies
/// writes the way the remote authority does.
pub mod memory {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Arc;
    use tokio::sync::{oneshot, Mutex};

    use exploration_rights_core::{
        ActivityStatus, MemberRole, ModeratorAction, RightsSnapshot, Version,
    };

    use crate::error::RightsError;
    use crate::messages::{Endpoint, RightsPayload};

    /// A write as the authority received it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedRequest {
        pub exploration_id: ExplorationId,
        pub endpoint: Endpoint,
        pub request: RightsRequest,
    }

    /// Releases a held response when dropped or released.
    #[derive(Debug)]
    pub struct Release(oneshot::Sender<()>);

    impl Release {
        /// Let the held response through.
        pub fn release(self) {
            let _ = self.0.send(());
        }
    }

    #[derive(Debug, Clone)]
    struct Hosted {
        rights: RightsSnapshot,
        version: Version,
    }

    #[derive(Default)]
    struct AuthorityState {
        explorations: HashMap<ExplorationId, Hosted>,
        requests: Vec<RecordedRequest>,
        failures: VecDeque<RightsError>,
        holds: VecDeque<oneshot::Receiver<()>>,
    }

    impl AuthorityState {
        fn apply(
            &mut self,
            exploration_id: &ExplorationId,
            request: &RightsRequest,
        ) -> Result<RightsSnapshot> {
            let hosted = self.explorations.get_mut(exploration_id).ok_or_else(|| {
                RightsError::Authority {
                    status: 404,
                    message: format!("exploration {} not found", exploration_id),
                }
            })?;

            if let Some(sent) = request.version() {
                if sent != hosted.version {
                    return Err(RightsError::StaleVersion(format!(
                        "sent version {} but exploration is at version {}",
                        sent, hosted.version
                    )));
                }
            }

            let mut next = hosted.rights.clone();
            match request {
                RightsRequest::MakeCommunityOwned { .. } => {
                    next.is_community_owned = true;
                    next.owner_names.clear();
                    next.editor_names.clear();
                    next.viewer_names.clear();
                }
                RightsRequest::SetViewability {
                    viewable_if_private,
                    ..
                } => {
                    next.viewable_if_private = *viewable_if_private;
                }
                RightsRequest::SaveRoleChanges {
                    new_member_role,
                    new_member_username,
                    ..
                } => {
                    for list in [
                        &mut next.owner_names,
                        &mut next.editor_names,
                        &mut next.viewer_names,
                    ] {
                        list.retain(|name| name != new_member_username);
                    }
                    let target = match new_member_role {
                        MemberRole::Owner => &mut next.owner_names,
                        MemberRole::Editor => &mut next.editor_names,
                        MemberRole::Viewer => &mut next.viewer_names,
                    };
                    target.push(new_member_username.clone());
                }
                RightsRequest::Publish { .. } => {
                    next.status = ActivityStatus::Public;
                }
                RightsRequest::ModeratorChange { action, .. } => {
                    if *action == ModeratorAction::UnpublishExploration {
                        next.status = ActivityStatus::Private;
                    }
                }
            }

            hosted.rights = next.clone();
            Ok(next)
        }
    }

    /// In-memory authority implementing [`RightsTransport`].
    pub struct MemoryAuthority {
        state: Mutex<AuthorityState>,
    }

    impl MemoryAuthority {
        /// Create a new authority hosting nothing.
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Host an exploration with the given rights and version.
        pub async fn host(
            &self,
            exploration_id: ExplorationId,
            rights: RightsSnapshot,
            version: Version,
        ) {
            self.state
                .lock()
                .await
                .explorations
                .insert(exploration_id, Hosted { rights, version });
        }

        /// Rights the authority currently holds for an exploration.
        pub async fn rights_of(&self, exploration_id: &ExplorationId) -> Option<RightsSnapshot> {
            self.state
                .lock()
                .await
                .explorations
                .get(exploration_id)
                .map(|h| h.rights.clone())
        }

        /// Version the authority currently holds for an exploration.
        pub async fn version_of(&self, exploration_id: &ExplorationId) -> Option<Version> {
            self.state
                .lock()
                .await
                .explorations
                .get(exploration_id)
                .map(|h| h.version)
        }

        /// Simulate a content save by someone else, invalidating older tokens.
        pub async fn bump_version(&self, exploration_id: &ExplorationId) -> Option<Version> {
            let mut state = self.state.lock().await;
            let hosted = state.explorations.get_mut(exploration_id)?;
            hosted.version = hosted.version.next();
            Some(hosted.version)
        }

        /// Fail the next write with `error` instead of applying it.
        pub async fn fail_next(&self, error: RightsError) {
            self.state.lock().await.failures.push_back(error);
        }

        /// Hold the response to the next write until the returned handle is
        /// released or dropped.
        ///
        /// The write is applied on arrival; only its response is delayed.
        pub async fn hold_next(&self) -> Release {
            let (tx, rx) = oneshot::channel();
            self.state.lock().await.holds.push_back(rx);
            Release(tx)
        }

        /// Every write received so far, in arrival order.
        pub async fn requests(&self) -> Vec<RecordedRequest> {
            self.state.lock().await.requests.clone()
        }
    }

    impl Default for MemoryAuthority {
        fn default() -> Self {
            Self {
                state: Mutex::new(AuthorityState::default()),
            }
        }
    }

    #[async_trait]
    impl RightsTransport for MemoryAuthority {
        async fn put(
            &self,
            exploration_id: &ExplorationId,
            request: RightsRequest,
        ) -> Result<RightsResponse> {
            let (outcome, hold) = {
                let mut state = self.state.lock().await;
                state.requests.push(RecordedRequest {
                    exploration_id: exploration_id.clone(),
                    endpoint: request.endpoint(),
                    request: request.clone(),
                });
                let hold = state.holds.pop_front();
                let outcome = match state.failures.pop_front() {
                    Some(error) => Err(error),
                    None => state.apply(exploration_id, &request),
                };
                (outcome, hold)
            };

            if let Some(hold) = hold {
                // A dropped Release also lets the response through.
                let _ = hold.await;
            }

            outcome.map(|rights| RightsResponse {
                rights: RightsPayload::from(&rights),
            })
        }
    }
}

/// HTTP transport backed by reqwest.
#[cfg(feature = "http")]
pub mod http {
    use super::*;

    use crate::config::RightsConfig;
    use crate::error::RightsError;

    /// Sends writes as JSON `PUT` requests.
    pub struct HttpTransport {
        client: reqwest::Client,
        config: RightsConfig,
    }

    impl HttpTransport {
        /// Build a client honoring the configured timeout.
        pub fn new(config: RightsConfig) -> Result<Self> {
            let client = reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .map_err(|e| RightsError::Transport(e.to_string()))?;
            Ok(Self { client, config })
        }

        /// Use an existing client.
        pub fn with_client(client: reqwest::Client, config: RightsConfig) -> Self {
            Self { client, config }
        }

        pub fn config(&self) -> &RightsConfig {
            &self.config
        }
    }

    #[async_trait]
    impl RightsTransport for HttpTransport {
        async fn put(
            &self,
            exploration_id: &ExplorationId,
            request: RightsRequest,
        ) -> Result<RightsResponse> {
            let url = self.config.endpoint_url(request.endpoint(), exploration_id);

            let response = self
                .client
                .put(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| RightsError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(RightsError::from_status(status.as_u16(), message));
            }

            response
                .json::<RightsResponse>()
                .await
                .map_err(|e| RightsError::MalformedResponse(e.to_string()))
        }
    }
}
