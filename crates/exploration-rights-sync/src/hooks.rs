//! Post-reconciliation hooks.
//!
//! Hooks run after every successful write, once the new snapshot is live.
//! Clearing the warning surface is wired in as one of them.

use std::sync::Arc;

use exploration_rights_core::RightsSnapshot;

/// Called with the freshly installed snapshot.
pub trait ReconcileHook: Send + Sync {
    fn on_reconciled(&self, snapshot: &RightsSnapshot);
}

impl<F> ReconcileHook for F
where
    F: Fn(&RightsSnapshot) + Send + Sync,
{
    fn on_reconciled(&self, snapshot: &RightsSnapshot) {
        self(snapshot)
    }
}

/// The warning/alert surface of the host editor.
pub trait AlertSink: Send + Sync {
    /// Dismiss every warning currently shown.
    fn clear_warnings(&self);
}

/// Hook that clears warnings on every successful reconciliation.
pub struct ClearWarnings {
    sink: Arc<dyn AlertSink>,
}

impl ClearWarnings {
    pub fn new(sink: Arc<dyn AlertSink>) -> Self {
        Self { sink }
    }
}

impl ReconcileHook for ClearWarnings {
    fn on_reconciled(&self, _snapshot: &RightsSnapshot) {
        self.sink.clear_warnings();
    }
}
