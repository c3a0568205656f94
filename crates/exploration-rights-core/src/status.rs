//! Wire-level enumerations: activity status, member roles, moderator actions.
//!
//! All three serialize as plain lowercase strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Publication status of an exploration.
///
/// Statuses the authority defines beyond `private` and `public` are kept
/// verbatim in [`ActivityStatus::Other`] so a snapshot never loses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityStatus {
    /// Only members (and, if viewable, anyone with the link) can see it.
    Private,
    /// Published to the library.
    Public,
    /// A lifecycle state this client does not model.
    Other(String),
}

impl ActivityStatus {
    pub const PRIVATE: &'static str = "private";
    pub const PUBLIC: &'static str = "public";

    /// The wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            ActivityStatus::Private => Self::PRIVATE,
            ActivityStatus::Public => Self::PUBLIC,
            ActivityStatus::Other(s) => s,
        }
    }

    /// Whether this is one of the two statuses the client understands.
    pub fn is_known(&self) -> bool {
        !matches!(self, ActivityStatus::Other(_))
    }
}

impl From<String> for ActivityStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::PRIVATE => ActivityStatus::Private,
            Self::PUBLIC => ActivityStatus::Public,
            _ => ActivityStatus::Other(s),
        }
    }
}

impl From<&str> for ActivityStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<ActivityStatus> for String {
    fn from(status: ActivityStatus) -> Self {
        match status {
            ActivityStatus::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a collaborator can be granted on an exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Editor,
    Viewer,
}

impl MemberRole {
    /// The wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Editor => "editor",
            MemberRole::Viewer => "viewer",
        }
    }
}

impl FromStr for MemberRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(MemberRole::Owner),
            "editor" => Ok(MemberRole::Editor),
            "viewer" => Ok(MemberRole::Viewer),
            other => Err(CoreError::UnknownRole(other.to_owned())),
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A privileged, moderator-only change to an exploration's rights.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModeratorAction {
    /// Force a published exploration back to private.
    UnpublishExploration,
    /// Any other action the authority accepts, sent verbatim.
    Other(String),
}

impl ModeratorAction {
    pub const UNPUBLISH_EXPLORATION: &'static str = "unpublish_exploration";

    /// Parse an action name, rejecting the empty string.
    pub fn parse(s: &str) -> crate::error::Result<Self> {
        if s.is_empty() {
            return Err(CoreError::EmptyModeratorAction);
        }
        Ok(Self::from(s.to_owned()))
    }

    /// The wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            ModeratorAction::UnpublishExploration => Self::UNPUBLISH_EXPLORATION,
            ModeratorAction::Other(s) => s,
        }
    }
}

impl From<String> for ModeratorAction {
    fn from(s: String) -> Self {
        if s == Self::UNPUBLISH_EXPLORATION {
            ModeratorAction::UnpublishExploration
        } else {
            ModeratorAction::Other(s)
        }
    }
}

impl From<ModeratorAction> for String {
    fn from(action: ModeratorAction) -> Self {
        match action {
            ModeratorAction::UnpublishExploration => {
                ModeratorAction::UNPUBLISH_EXPLORATION.to_owned()
            }
            ModeratorAction::Other(s) => s,
        }
    }
}

impl fmt::Display for ModeratorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let private: ActivityStatus = serde_json::from_str("\"private\"").unwrap();
        let public: ActivityStatus = serde_json::from_str("\"public\"").unwrap();
        assert_eq!(private, ActivityStatus::Private);
        assert_eq!(public, ActivityStatus::Public);
        assert_eq!(serde_json::to_string(&ActivityStatus::Public).unwrap(), "\"public\"");
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: ActivityStatus = serde_json::from_str("\"publicized\"").unwrap();
        assert_eq!(status, ActivityStatus::Other("publicized".into()));
        assert!(!status.is_known());
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"publicized\"");
    }

    #[test]
    fn test_member_role_parse() {
        assert_eq!("editor".parse::<MemberRole>().unwrap(), MemberRole::Editor);
        assert_eq!(
            "admin".parse::<MemberRole>(),
            Err(CoreError::UnknownRole("admin".into()))
        );
        assert_eq!(serde_json::to_string(&MemberRole::Viewer).unwrap(), "\"viewer\"");
    }

    #[test]
    fn test_moderator_action() {
        let action = ModeratorAction::parse("unpublish_exploration").unwrap();
        assert_eq!(action, ModeratorAction::UnpublishExploration);
        assert_eq!(ModeratorAction::parse(""), Err(CoreError::EmptyModeratorAction));

        let other = ModeratorAction::parse("feature_exploration").unwrap();
        assert_eq!(
            serde_json::to_string(&other).unwrap(),
            "\"feature_exploration\""
        );
    }
}
