//! Endpoint and timeout configuration.

use std::time::Duration;

use exploration_rights_core::ExplorationId;

use crate::messages::Endpoint;

/// Where rights writes are sent and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightsConfig {
    /// Scheme and host of the authority, without a trailing slash.
    pub base_url: String,
    /// Path prefix of the rights endpoint.
    pub rights_path: String,
    /// Path prefix of the status endpoint.
    pub status_path: String,
    /// Path prefix of the moderator-rights endpoint.
    pub moderator_rights_path: String,
    /// Timeout for a single write.
    pub request_timeout: Duration,
}

impl Default for RightsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8181".into(),
            rights_path: "/createhandler/rights".into(),
            status_path: "/createhandler/status".into(),
            moderator_rights_path: "/createhandler/moderatorrights".into(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl RightsConfig {
    /// Point the configuration at a different authority.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Document-scoped path for an endpoint, e.g. `/createhandler/rights/abc`.
    pub fn endpoint_path(&self, endpoint: Endpoint, exploration_id: &ExplorationId) -> String {
        let prefix = match endpoint {
            Endpoint::Rights => &self.rights_path,
            Endpoint::Status => &self.status_path,
            Endpoint::ModeratorRights => &self.moderator_rights_path,
        };
        format!("{}/{}", prefix.trim_end_matches('/'), exploration_id)
    }

    /// Absolute URL for an endpoint.
    pub fn endpoint_url(&self, endpoint: Endpoint, exploration_id: &ExplorationId) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint_path(endpoint, exploration_id)
        )
    }
}
