//! # Exploration Rights Sync
//!
//! Keeps a client-side rights snapshot in step with the remote authority.
//!
//! ## Overview
//!
//! [`RightsState`] holds the current [`RightsSnapshot`] of one exploration.
//! Every mutating operation follows the same cycle:
//!
//! 1. Build a request body, attaching the document's version token
//! 2. Send exactly one write through a [`RightsTransport`]
//! 3. On success, replace the whole snapshot with the authority's answer
//! 4. Run the reconcile hooks (e.g. clear warnings) and resolve the handle
//!
//! A failed write changes nothing locally and resolves the handle to an
//! error.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use exploration_rights_core::{MemberRole, RightsSnapshot, Version};
//! use exploration_rights_sync::{MemoryAuthority, RightsState, SharedDocument};
//!
//! async fn example() {
//!     let authority = MemoryAuthority::new();
//!     let document = Arc::new(SharedDocument::new("expl_1", Version(1)));
//!
//!     let rights = RightsState::new(document, authority);
//!     rights.init_from(RightsSnapshot::private_owned_by("alice"));
//!
//!     rights.save_role_changes("bob", MemberRole::Editor).await.unwrap();
//! }
//! ```
//!
//! ## Message Flow
//!
//! ```text
//! RightsState                          Authority
//!   |-------- PUT {version, ...} ------->|
//!   |<------- {rights: {...}} -----------|
//!   |  replace snapshot, run hooks
//! ```
//!
//! [`RightsSnapshot`]: exploration_rights_core::RightsSnapshot

pub mod config;
pub mod document;
pub mod error;
pub mod hooks;
pub mod messages;
pub mod state;
pub mod transport;

pub use config::RightsConfig;
pub use document::{DocumentSource, SharedDocument};
pub use error::{Result, RightsError};
pub use hooks::{AlertSink, ClearWarnings, ReconcileHook};
pub use messages::{Endpoint, RightsPayload, RightsRequest, RightsResponse};
pub use state::{PendingWrite, RightsState};
#[cfg(feature = "http")]
pub use transport::http::HttpTransport;
pub use transport::{memory::MemoryAuthority, memory::RecordedRequest, RightsTransport};
