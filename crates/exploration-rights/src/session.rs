//! The session: rights state scoped to one exploration-editing session.
//!
//! A session owns the [`RightsState`] for the exploration being edited and
//! wires the editor's alert surface in as a reconcile hook. Dropping the
//! session drops the state.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use exploration_rights_core::RightsSnapshot;
use exploration_rights_sync::{
    AlertSink, ClearWarnings, DocumentSource, RightsConfig, RightsPayload, RightsState,
    RightsTransport,
};

use crate::error::Result;

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Endpoint and transport configuration.
    pub rights: RightsConfig,
    /// Whether a successful write dismisses the editor's warnings.
    pub clear_warnings_on_reconcile: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rights: RightsConfig::default(),
            clear_warnings_on_reconcile: true,
        }
    }
}

/// Page data as delivered by the editor's initial fetch. Only the rights
/// object is read.
#[derive(Deserialize)]
struct PageData {
    rights: RightsPayload,
}

/// Rights state bound to one editing session.
pub struct RightsSession {
    rights: RightsState,
    config: SessionConfig,
}

impl RightsSession {
    /// Create a session writing through `transport`.
    pub fn new(
        config: SessionConfig,
        document: Arc<dyn DocumentSource>,
        transport: Arc<dyn RightsTransport>,
    ) -> Self {
        let rights = RightsState::new(document, transport);
        debug!(exploration = %rights.exploration_id(), "rights session opened");
        Self { rights, config }
    }

    /// Create a session writing over HTTP to the configured authority.
    #[cfg(feature = "http")]
    pub fn connect(config: SessionConfig, document: Arc<dyn DocumentSource>) -> Result<Self> {
        let transport = exploration_rights_sync::HttpTransport::new(config.rights.clone())?;
        Ok(Self::new(config, document, Arc::new(transport)))
    }

    /// Attach the editor's alert surface.
    ///
    /// Has no effect when `clear_warnings_on_reconcile` is off.
    pub fn with_alerts(self, sink: Arc<dyn AlertSink>) -> Self {
        if self.config.clear_warnings_on_reconcile {
            self.rights.subscribe(Arc::new(ClearWarnings::new(sink)));
        }
        self
    }

    /// Seed the snapshot from the authority's representation.
    pub fn load(&self, snapshot: RightsSnapshot) {
        self.rights.init_from(snapshot);
    }

    /// Seed the snapshot from the editor's page-data JSON, which carries a
    /// top-level `rights` object.
    pub fn load_page_data(&self, json: &str) -> Result<()> {
        let page: PageData = serde_json::from_str(json)?;
        self.load(RightsSnapshot::from(page.rights));
        Ok(())
    }

    /// The session's rights state. Clone it to hand to other controllers.
    pub fn rights(&self) -> &RightsState {
        &self.rights
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
