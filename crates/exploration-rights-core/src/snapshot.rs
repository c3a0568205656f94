//! The rights snapshot: the complete access-control record for one
//! exploration at a point in time.
//!
//! A snapshot is immutable once built. Holders replace it wholesale rather
//! than editing fields, so readers never observe a half-applied update.

use serde::{Deserialize, Serialize};

use crate::status::{ActivityStatus, MemberRole};
use crate::types::ExplorationId;

/// Access-control state of a single exploration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightsSnapshot {
    /// Owners, in the order the authority reports them.
    pub owner_names: Vec<String>,

    /// Users with edit access.
    pub editor_names: Vec<String>,

    /// Users with view-only access.
    pub viewer_names: Vec<String>,

    /// Publication status.
    pub status: ActivityStatus,

    /// Source exploration this one was cloned from, if any.
    pub cloned_from: Option<ExplorationId>,

    /// Whether ownership has been relinquished to the community.
    pub is_community_owned: bool,

    /// Whether non-members may view the exploration while it is private.
    pub viewable_if_private: bool,
}

impl RightsSnapshot {
    /// Build a snapshot from all seven fields.
    ///
    /// No validation is performed; the caller supplies the authority's
    /// canonical representation. An empty `cloned_from` id means the
    /// exploration is not a clone and is stored as `None`.
    pub fn new(
        owner_names: Vec<String>,
        editor_names: Vec<String>,
        viewer_names: Vec<String>,
        status: ActivityStatus,
        cloned_from: Option<ExplorationId>,
        is_community_owned: bool,
        viewable_if_private: bool,
    ) -> Self {
        Self {
            owner_names,
            editor_names,
            viewer_names,
            status,
            cloned_from: cloned_from.filter(|id| !id.as_str().is_empty()),
            is_community_owned,
            viewable_if_private,
        }
    }

    /// A private, uncloned exploration owned by a single user.
    pub fn private_owned_by(owner: impl Into<String>) -> Self {
        Self::new(
            vec![owner.into()],
            Vec::new(),
            Vec::new(),
            ActivityStatus::Private,
            None,
            false,
            false,
        )
    }

    /// Set the status.
    pub fn with_status(mut self, status: ActivityStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the clone source.
    pub fn with_cloned_from(mut self, source: impl Into<ExplorationId>) -> Self {
        self.cloned_from = Some(source.into()).filter(|id| !id.as_str().is_empty());
        self
    }

    /// Set the private-viewability flag.
    pub fn with_viewable_if_private(mut self, viewable: bool) -> Self {
        self.viewable_if_private = viewable;
        self
    }

    pub fn cloned_from(&self) -> Option<&ExplorationId> {
        self.cloned_from.as_ref()
    }

    pub fn is_private(&self) -> bool {
        self.status == ActivityStatus::Private
    }

    pub fn is_public(&self) -> bool {
        self.status == ActivityStatus::Public
    }

    pub fn is_cloned(&self) -> bool {
        self.cloned_from.is_some()
    }

    pub fn is_community_owned(&self) -> bool {
        self.is_community_owned
    }

    pub fn viewable_if_private(&self) -> bool {
        self.viewable_if_private
    }

    /// Member list for a role.
    pub fn members(&self, role: MemberRole) -> &[String] {
        match role {
            MemberRole::Owner => &self.owner_names,
            MemberRole::Editor => &self.editor_names,
            MemberRole::Viewer => &self.viewer_names,
        }
    }

    /// The role a user currently holds, checking owners first.
    pub fn role_of(&self, username: &str) -> Option<MemberRole> {
        [MemberRole::Owner, MemberRole::Editor, MemberRole::Viewer]
            .into_iter()
            .find(|role| self.members(*role).iter().any(|name| name == username))
    }
}
