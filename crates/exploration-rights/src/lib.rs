//! # Exploration Rights
//!
//! Client-side cache of an exploration's access-control state, kept in
//! sync with the remote authority.
//!
//! ## Overview
//!
//! - **Snapshot**: owners, editors, viewers, status, clone source, community
//!   ownership and private viewability, always replaced as a whole
//! - **Writes**: community ownership, viewability, role changes, publishing
//!   and moderator actions, one remote write each
//! - **Reconciliation**: the authority's answer becomes the new snapshot;
//!   the last response to arrive wins
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use exploration_rights::{RightsSession, SessionConfig};
//! use exploration_rights::core::{MemberRole, RightsSnapshot, Version};
//! use exploration_rights::sync::{MemoryAuthority, SharedDocument};
//!
//! async fn example() {
//!     let document = Arc::new(SharedDocument::new("expl_1", Version(1)));
//!     let authority = MemoryAuthority::new();
//!     let session = RightsSession::new(SessionConfig::default(), document, authority);
//!     session.load(RightsSnapshot::private_owned_by("alice"));
//!
//!     let rights = session.rights();
//!     rights.save_role_changes("bob", MemberRole::Editor).await.unwrap();
//!     rights.publish().await.unwrap();
//!     assert!(rights.is_public());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `exploration_rights::core` - Snapshot and wire primitives
//! - `exploration_rights::sync` - Rights state, transports, hooks

pub mod error;
pub mod session;

// Re-export component crates
pub use exploration_rights_core as core;
pub use exploration_rights_sync as sync;

pub use error::{Result, SessionError};
pub use session::{RightsSession, SessionConfig};

// Re-export commonly used types
pub use exploration_rights_core::{
    ActivityStatus, ExplorationId, MemberRole, ModeratorAction, RightsSnapshot, Version,
};
pub use exploration_rights_sync::{
    AlertSink, DocumentSource, PendingWrite, ReconcileHook, RightsError, RightsState,
    RightsTransport,
};
