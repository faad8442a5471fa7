//! # Auxconfig Architecture
//!
//! Auxconfig is a **host-agnostic configuration store library**: IDE project
//! modules and build tools embed it to persist named, namespaced
//! configuration fragments per project, without caring where those fragments
//! physically live.
//!
//! ## The Two Tiers
//!
//! Every fragment is stored in one of two visibility tiers, chosen per call:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  AuxConfigStore (store/)                                    │
//! │  - get/put/remove by (local_name, namespace, tier)          │
//! │  - one read/write lock per store, held across the whole     │
//! │    read-modify-write sequence                               │
//! └─────────────────────────────────────────────────────────────┘
//!            │                                  │
//!            ▼                                  ▼
//! ┌──────────────────────────┐   ┌──────────────────────────────┐
//! │  Shared tier             │   │  Private tier                │
//! │  one XML document,       │   │  one directory attribute     │
//! │  .auxconfig.xml, sorted, │   │  per key, invisible outside  │
//! │  visible to every tool   │   │  the local environment       │
//! └──────────────────────────┘   └──────────────────────────────┘
//!            │                                  │
//!            └────────────────┬─────────────────┘
//!                             ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ProjectRoot (project/)                                     │
//! │  - relative-path file read/write/delete                     │
//! │  - string-keyed directory attributes                        │
//! │  - DirProjectRoot (production), MemoryProjectRoot (testing) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Availability Over Strictness
//!
//! The store backs an interactive session, so it degrades instead of failing:
//! a corrupt shared document reads as empty, I/O faults on write are logged
//! and swallowed. The two deliberate exceptions are a fragment without a
//! namespace (caller misuse) and a write over an unparseable shared document
//! (rewriting it blindly would destroy the fragments it still holds).
//!
//! ## Module Overview
//!
//! - [`store`]: the store itself — tiers, locking, degradation policy
//! - [`fragment`]: the `Fragment` value type
//! - [`codec`]: fragment <-> XML text conversion
//! - [`project`]: the project-root collaborator the store is bound to
//! - [`error`]: error types
//! - [`logging`]: optional logger bootstrap for hosts without one
//!
//! ## Example
//!
//! ```no_run
//! use auxconfig::{AuxConfigStore, Fragment, Tier};
//!
//! let store = AuxConfigStore::open("/path/to/project");
//! let target = Fragment::new("target", "urn:example:build").with_text("API-30");
//! store.put_fragment(&target, Tier::Shared)?;
//!
//! let read = store.get_fragment("target", "urn:example:build", Tier::Shared);
//! assert_eq!(read.map(|f| f.text()), Some("API-30".to_string()));
//! # Ok::<(), auxconfig::AuxConfigError>(())
//! ```

pub mod codec;
pub mod error;
pub mod fragment;
pub mod logging;
pub mod project;
pub mod store;

pub use error::{AuxConfigError, Result};
pub use fragment::{Fragment, Node};
pub use project::fs::DirProjectRoot;
pub use project::memory::MemoryProjectRoot;
pub use project::ProjectRoot;
pub use store::{AuxConfigStore, Tier, SHARED_CONFIG_FILENAME};
