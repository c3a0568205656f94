//! Source of the exploration identity and its current version token.

use std::sync::atomic::{AtomicU64, Ordering};

use exploration_rights_core::{ExplorationId, Version};

/// Supplies the document a rights state belongs to.
///
/// The version is read at the moment each write is issued, so it must
/// reflect the editor's latest saved version.
pub trait DocumentSource: Send + Sync {
    /// The exploration whose rights are managed.
    fn exploration_id(&self) -> ExplorationId;

    /// Current optimistic-concurrency token.
    fn version(&self) -> Version;
}

/// A document handle whose version can be advanced by the editor.
#[derive(Debug)]
pub struct SharedDocument {
    id: ExplorationId,
    version: AtomicU64,
}

impl SharedDocument {
    pub fn new(id: impl Into<ExplorationId>, version: Version) -> Self {
        Self {
            id: id.into(),
            version: AtomicU64::new(version.get()),
        }
    }

    /// Record a newly saved version.
    pub fn set_version(&self, version: Version) {
        self.version.store(version.get(), Ordering::SeqCst);
    }
}

impl DocumentSource for SharedDocument {
    fn exploration_id(&self) -> ExplorationId {
        self.id.clone()
    }

    fn version(&self) -> Version {
        Version(self.version.load(Ordering::SeqCst))
    }
}
