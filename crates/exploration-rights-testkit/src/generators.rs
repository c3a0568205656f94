//! Proptest generators for property-based testing.

use proptest::prelude::*;

use exploration_rights_core::{
    ActivityStatus, ExplorationId, MemberRole, RightsSnapshot, Version,
};

/// Generate a username.
pub fn username() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}".prop_map(String::from)
}

/// Generate a member list of up to `max_len` users.
pub fn usernames(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(username(), 0..=max_len)
}

/// Generate an ExplorationId.
pub fn exploration_id() -> impl Strategy<Value = ExplorationId> {
    "expl_[a-zA-Z0-9]{1,12}".prop_map(ExplorationId::new)
}

/// Generate a version token.
pub fn version() -> impl Strategy<Value = Version> {
    (1u64..=10_000).prop_map(Version)
}

/// Generate a status the client understands.
pub fn known_status() -> impl Strategy<Value = ActivityStatus> {
    prop_oneof![Just(ActivityStatus::Private), Just(ActivityStatus::Public)]
}

/// Generate any status, including authority-defined ones.
pub fn any_status() -> impl Strategy<Value = ActivityStatus> {
    prop_oneof![
        3 => known_status(),
        1 => "[a-z]{3,10}".prop_map(ActivityStatus::from),
    ]
}

/// Generate a MemberRole.
pub fn member_role() -> impl Strategy<Value = MemberRole> {
    prop_oneof![
        Just(MemberRole::Owner),
        Just(MemberRole::Editor),
        Just(MemberRole::Viewer),
    ]
}

/// Generate a snapshot with a known status.
pub fn rights_snapshot() -> impl Strategy<Value = RightsSnapshot> {
    snapshot_with_status(known_status())
}

/// Generate a snapshot whose status comes from `status`.
pub fn snapshot_with_status(
    status: impl Strategy<Value = ActivityStatus>,
) -> impl Strategy<Value = RightsSnapshot> {
    (
        usernames(3),
        usernames(5),
        usernames(5),
        status,
        proptest::option::of(exploration_id()),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(owners, editors, viewers, status, cloned_from, community_owned, viewable)| {
                RightsSnapshot::new(
                    owners,
                    editors,
                    viewers,
                    status,
                    cloned_from,
                    community_owned,
                    viewable,
                )
            },
        )
}
