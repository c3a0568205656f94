//! # Exploration Rights Testkit
//!
//! Testing utilities for exploration rights.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: an in-memory authority hosting one exploration, with a
//!   rights state already in sync with it
//! - **Generators**: Proptest strategies for snapshots, statuses and roles
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use exploration_rights_testkit::generators::rights_snapshot;
//!
//! proptest! {
//!     #[test]
//!     fn cloned_iff_source(snapshot in rights_snapshot()) {
//!         prop_assert_eq!(snapshot.is_cloned(), snapshot.cloned_from.is_some());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use exploration_rights_testkit::fixtures::{team_snapshot, RightsFixture};
//!
//! async fn example() {
//!     let fixture = RightsFixture::new(team_snapshot()).await;
//!     fixture.state.publish().await.unwrap();
//!     assert!(fixture.state.is_public());
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{public_clone_snapshot, team_snapshot, RecordingAlerts, RightsFixture};
pub use generators::{any_status, known_status, rights_snapshot, snapshot_with_status};
