//! Rights protocol message types.
//!
//! Requests are JSON bodies `PUT` against a document-scoped endpoint. Every
//! successful response embeds the authority's full rights object.

use serde::{Deserialize, Serialize};

use exploration_rights_core::{
    ActivityStatus, ExplorationId, MemberRole, ModeratorAction, RightsSnapshot, Version,
};

/// The endpoint family a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Membership, viewability and community ownership.
    Rights,
    /// Publication status.
    Status,
    /// Moderator-only actions.
    ModeratorRights,
}

/// A single mutating write.
///
/// Serializes to the bare request body; the variant itself is not encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RightsRequest {
    MakeCommunityOwned {
        version: Version,
        make_community_owned: bool,
    },
    SetViewability {
        version: Version,
        viewable_if_private: bool,
    },
    SaveRoleChanges {
        version: Version,
        new_member_role: MemberRole,
        new_member_username: String,
    },
    /// Carries no version token, unlike every other write.
    Publish { make_public: bool },
    ModeratorChange {
        action: ModeratorAction,
        email_body: String,
        version: Version,
    },
}

impl RightsRequest {
    pub fn make_community_owned(version: Version) -> Self {
        RightsRequest::MakeCommunityOwned {
            version,
            make_community_owned: true,
        }
    }

    pub fn set_viewability(version: Version, viewable_if_private: bool) -> Self {
        RightsRequest::SetViewability {
            version,
            viewable_if_private,
        }
    }

    pub fn save_role_changes(
        version: Version,
        new_member_username: impl Into<String>,
        new_member_role: MemberRole,
    ) -> Self {
        RightsRequest::SaveRoleChanges {
            version,
            new_member_role,
            new_member_username: new_member_username.into(),
        }
    }

    pub fn publish() -> Self {
        RightsRequest::Publish { make_public: true }
    }

    pub fn moderator_change(
        action: ModeratorAction,
        email_body: impl Into<String>,
        version: Version,
    ) -> Self {
        RightsRequest::ModeratorChange {
            action,
            email_body: email_body.into(),
            version,
        }
    }

    /// Which endpoint family handles this request.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            RightsRequest::MakeCommunityOwned { .. }
            | RightsRequest::SetViewability { .. }
            | RightsRequest::SaveRoleChanges { .. } => Endpoint::Rights,
            RightsRequest::Publish { .. } => Endpoint::Status,
            RightsRequest::ModeratorChange { .. } => Endpoint::ModeratorRights,
        }
    }

    /// The version token carried, if any.
    pub fn version(&self) -> Option<Version> {
        match self {
            RightsRequest::MakeCommunityOwned { version, .. }
            | RightsRequest::SetViewability { version, .. }
            | RightsRequest::SaveRoleChanges { version, .. }
            | RightsRequest::ModeratorChange { version, .. } => Some(*version),
            RightsRequest::Publish { .. } => None,
        }
    }

    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RightsRequest::MakeCommunityOwned { .. } => "make_community_owned",
            RightsRequest::SetViewability { .. } => "set_viewability",
            RightsRequest::SaveRoleChanges { .. } => "save_role_changes",
            RightsRequest::Publish { .. } => "publish",
            RightsRequest::ModeratorChange { .. } => "moderator_change",
        }
    }
}

/// The rights object as the authority encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightsPayload {
    pub owner_names: Vec<String>,
    pub editor_names: Vec<String>,
    pub viewer_names: Vec<String>,
    pub status: ActivityStatus,
    #[serde(default)]
    pub cloned_from: Option<ExplorationId>,
    pub community_owned: bool,
    pub viewable_if_private: bool,
}

impl From<RightsPayload> for RightsSnapshot {
    fn from(payload: RightsPayload) -> Self {
        RightsSnapshot::new(
            payload.owner_names,
            payload.editor_names,
            payload.viewer_names,
            payload.status,
            payload.cloned_from,
            payload.community_owned,
            payload.viewable_if_private,
        )
    }
}

impl From<&RightsSnapshot> for RightsPayload {
    fn from(snapshot: &RightsSnapshot) -> Self {
        Self {
            owner_names: snapshot.owner_names.clone(),
            editor_names: snapshot.editor_names.clone(),
            viewer_names: snapshot.viewer_names.clone(),
            status: snapshot.status.clone(),
            cloned_from: snapshot.cloned_from.clone(),
            community_owned: snapshot.is_community_owned,
            viewable_if_private: snapshot.viewable_if_private,
        }
    }
}

/// Successful response to any write. Other fields the authority sends are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightsResponse {
    pub rights: RightsPayload,
}
