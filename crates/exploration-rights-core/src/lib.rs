//! # Exploration Rights Core
//!
//! Pure primitives for exploration access control: identifiers, statuses,
//! roles, and the rights snapshot.
//!
//! This crate contains no I/O and no networking. Synchronizing a snapshot
//! with the remote authority lives in `exploration-rights-sync`.
//!
//! ## Key Types
//!
//! - [`RightsSnapshot`] - The complete access-control record for one exploration
//! - [`ExplorationId`] - Identifier of the exploration
//! - [`Version`] - Optimistic-concurrency token
//! - [`ActivityStatus`] - Private / public / authority-defined status

pub mod error;
pub mod snapshot;
pub mod status;
pub mod types;

pub use error::{CoreError, Result};
pub use snapshot::RightsSnapshot;
pub use status::{ActivityStatus, MemberRole, ModeratorAction};
pub use types::{ExplorationId, Version};
