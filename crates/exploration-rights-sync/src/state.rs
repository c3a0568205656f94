//! Client-side rights state and its write-then-reconcile cycle.
//!
//! [`RightsState`] caches the rights snapshot of one exploration. Each
//! mutating operation issues exactly one write to the authority; on success
//! the whole snapshot is replaced by the authority's answer and the
//! reconcile hooks run. On failure nothing changes locally.
//!
//! ## Ordering
//!
//! Writes are not serialized against each other. Responses are applied in
//! the order they arrive, so a slow response to an earlier write overwrites
//! the snapshot installed by a later one. The authority is the source of
//! truth and the last response to arrive wins.
//!
//! ## Asymmetries
//!
//! - [`RightsState::publish`] sends no version token.
//! - [`RightsState::save_moderator_change`] returns no completion handle;
//!   its outcome is visible only through hooks and logs.
//!
//! ## Runtime
//!
//! Writes are spawned onto the ambient tokio runtime. Called outside one,
//! an operation sends nothing and its handle resolves to
//! [`RightsError::NoRuntime`].

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use exploration_rights_core::{
    ActivityStatus, ExplorationId, MemberRole, ModeratorAction, RightsSnapshot,
};

use crate::document::DocumentSource;
use crate::error::{Result, RightsError};
use crate::hooks::ReconcileHook;
use crate::messages::RightsRequest;
use crate::transport::RightsTransport;

/// Handle to an in-flight write.
///
/// Resolves exactly once: `Ok(())` after the new snapshot is installed, or
/// the error that prevented it. Dropping the handle does not cancel the
/// write or its reconciliation.
#[must_use = "the write's outcome is only observed by awaiting the handle"]
#[derive(Debug)]
pub struct PendingWrite {
    rx: oneshot::Receiver<Result<()>>,
}

impl Future for PendingWrite {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or(Err(RightsError::Abandoned)))
    }
}

struct Inner {
    snapshot: RwLock<Option<Arc<RightsSnapshot>>>,
    hooks: RwLock<Vec<Arc<dyn ReconcileHook>>>,
    document: Arc<dyn DocumentSource>,
    transport: Arc<dyn RightsTransport>,
}

/// Rights of one exploration, kept in sync with the authority.
///
/// Cloning yields another handle to the same state.
#[derive(Clone)]
pub struct RightsState {
    inner: Arc<Inner>,
}

impl RightsState {
    /// Create an uninitialized state for the document.
    pub fn new(document: Arc<dyn DocumentSource>, transport: Arc<dyn RightsTransport>) -> Self {
        Self {
            inner: Arc::new(Inner {
                snapshot: RwLock::new(None),
                hooks: RwLock::new(Vec::new()),
                document,
                transport,
            }),
        }
    }

    /// Register a hook run after every successful reconciliation.
    pub fn subscribe(&self, hook: Arc<dyn ReconcileHook>) {
        self.inner
            .hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }

    /// The exploration this state belongs to.
    pub fn exploration_id(&self) -> ExplorationId {
        self.inner.document.exploration_id()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Initialization
    // ─────────────────────────────────────────────────────────────────────────

    /// Overwrite the whole snapshot. Inputs are trusted as-is.
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &self,
        owner_names: Vec<String>,
        editor_names: Vec<String>,
        viewer_names: Vec<String>,
        status: ActivityStatus,
        cloned_from: Option<ExplorationId>,
        is_community_owned: bool,
        viewable_if_private: bool,
    ) {
        self.init_from(RightsSnapshot::new(
            owner_names,
            editor_names,
            viewer_names,
            status,
            cloned_from,
            is_community_owned,
            viewable_if_private,
        ));
    }

    /// Overwrite the whole snapshot from an existing value.
    pub fn init_from(&self, snapshot: RightsSnapshot) {
        self.replace(Arc::new(snapshot));
    }

    fn replace(&self, snapshot: Arc<RightsSnapshot>) {
        *self
            .inner
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The live snapshot, or `None` before the first `init`.
    pub fn snapshot(&self) -> Option<Arc<RightsSnapshot>> {
        self.inner
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a snapshot has been installed by `init` or a write.
    pub fn is_initialized(&self) -> bool {
        self.snapshot().is_some()
    }

    fn read<T: Default>(&self, f: impl FnOnce(&RightsSnapshot) -> T) -> T {
        self.snapshot().map(|s| f(s.as_ref())).unwrap_or_default()
    }

    /// The exploration this one was cloned from.
    pub fn cloned_from(&self) -> Option<ExplorationId> {
        self.read(|s| s.cloned_from.clone())
    }

    /// Whether the status is `private`. False before `init`.
    pub fn is_private(&self) -> bool {
        self.read(RightsSnapshot::is_private)
    }

    /// Whether the status is `public`. False before `init`.
    pub fn is_public(&self) -> bool {
        self.read(RightsSnapshot::is_public)
    }

    /// Whether the exploration has a clone source.
    pub fn is_cloned(&self) -> bool {
        self.read(RightsSnapshot::is_cloned)
    }

    /// Whether ownership belongs to the community.
    pub fn is_community_owned(&self) -> bool {
        self.read(RightsSnapshot::is_community_owned)
    }

    /// Whether non-members may view the exploration while private.
    pub fn viewable_if_private(&self) -> bool {
        self.read(RightsSnapshot::viewable_if_private)
    }

    /// The publication status, or `None` before `init`.
    pub fn status(&self) -> Option<ActivityStatus> {
        self.snapshot().map(|s| s.status.clone())
    }

    /// Owners in the authority's order.
    pub fn owner_names(&self) -> Vec<String> {
        self.read(|s| s.owner_names.clone())
    }

    /// Editors in the authority's order.
    pub fn editor_names(&self) -> Vec<String> {
        self.read(|s| s.editor_names.clone())
    }

    /// Viewers in the authority's order.
    pub fn viewer_names(&self) -> Vec<String> {
        self.read(|s| s.viewer_names.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutating operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Relinquish ownership to the community.
    pub fn make_community_owned(&self) -> PendingWrite {
        let version = self.inner.document.version();
        self.dispatch(RightsRequest::make_community_owned(version))
    }

    /// Change whether non-members may view the exploration while private.
    pub fn set_viewability(&self, viewable_if_private: bool) -> PendingWrite {
        let version = self.inner.document.version();
        self.dispatch(RightsRequest::set_viewability(version, viewable_if_private))
    }

    /// Grant `new_member_username` the given role, moving them out of any
    /// role they held before.
    pub fn save_role_changes(
        &self,
        new_member_username: impl Into<String>,
        new_member_role: MemberRole,
    ) -> PendingWrite {
        let version = self.inner.document.version();
        self.dispatch(RightsRequest::save_role_changes(
            version,
            new_member_username,
            new_member_role,
        ))
    }

    /// Publish the exploration. Sends no version token.
    pub fn publish(&self) -> PendingWrite {
        self.dispatch(RightsRequest::publish())
    }

    /// Apply a moderator action with a justification email.
    ///
    /// Fire-and-forget: no completion handle is returned. Success is
    /// observable through reconcile hooks; failure is logged. Outside a
    /// tokio runtime nothing is sent.
    pub fn save_moderator_change(&self, action: ModeratorAction, email_body: impl Into<String>) {
        let version = self.inner.document.version();
        let request = RightsRequest::moderator_change(action, email_body, version);
        let exploration_id = self.inner.document.exploration_id();

        let Ok(handle) = Handle::try_current() else {
            warn!(
                exploration = %exploration_id,
                kind = request.kind(),
                error = %RightsError::NoRuntime,
                "rights write failed"
            );
            return;
        };

        let state = self.clone();
        handle.spawn(async move {
            // Already logged inside write_and_reconcile.
            let _ = state.write_and_reconcile(&exploration_id, request).await;
        });
    }

    /// Spawn the write and hand back its completion handle.
    fn dispatch(&self, request: RightsRequest) -> PendingWrite {
        let (tx, rx) = oneshot::channel();
        let exploration_id = self.inner.document.exploration_id();

        let Ok(handle) = Handle::try_current() else {
            warn!(
                exploration = %exploration_id,
                kind = request.kind(),
                error = %RightsError::NoRuntime,
                "rights write failed"
            );
            let _ = tx.send(Err(RightsError::NoRuntime));
            return PendingWrite { rx };
        };

        let state = self.clone();
        handle.spawn(async move {
            let outcome = state.write_and_reconcile(&exploration_id, request).await;
            let _ = tx.send(outcome);
        });

        PendingWrite { rx }
    }

    async fn write_and_reconcile(
        &self,
        exploration_id: &ExplorationId,
        request: RightsRequest,
    ) -> Result<()> {
        let kind = request.kind();
        debug!(
            exploration = %exploration_id,
            kind,
            version = ?request.version(),
            "issuing rights write"
        );

        match self.inner.transport.put(exploration_id, request).await {
            Ok(response) => {
                self.reconcile(RightsSnapshot::from(response.rights));
                debug!(exploration = %exploration_id, kind, "rights reconciled");
                Ok(())
            }
            Err(e) => {
                warn!(exploration = %exploration_id, kind, error = %e, "rights write failed");
                Err(e)
            }
        }
    }

    /// Install the authority's snapshot, then run hooks.
    ///
    /// A panicking hook is logged and skipped; the snapshot stays installed
    /// and the remaining hooks still run.
    fn reconcile(&self, snapshot: RightsSnapshot) {
        let snapshot = Arc::new(snapshot);
        self.replace(Arc::clone(&snapshot));

        let hooks = self
            .inner
            .hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for hook in hooks {
            let ran = panic::catch_unwind(AssertUnwindSafe(|| hook.on_reconciled(&snapshot)));
            if ran.is_err() {
                warn!("reconcile hook panicked");
            }
        }
    }
}

impl std::fmt::Debug for RightsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RightsState")
            .field("exploration_id", &self.exploration_id())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
