//! # Store Layer
//!
//! Two storage tiers sit behind one interface. The [`Tier`] flag on every
//! operation selects which one handles it:
//!
//! - [`shared::SharedStore`]: one XML document at a fixed project-relative
//!   path, visible to every collaborator and tool reading the project. Its
//!   top-level fragments are kept in canonical sorted order so the file diffs
//!   cleanly under version control.
//! - [`private::PrivateStore`]: one directory attribute per fragment key,
//!   invisible outside the local environment.
//!
//! [`AuxConfigStore`] is the orchestrator the rest of the world talks to. It
//! owns the per-store read/write lock and the degradation policy: reads never
//! fail, writes only surface errors the caller can act on.
//!
//! The store is stateless between calls. Every read re-parses the backing
//! representation, because edits may originate outside the store entirely
//! (a collaborator pulling a new `.auxconfig.xml`, for instance).

use log::{info, warn};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::{AuxConfigError, Result};
use crate::fragment::Fragment;
use crate::project::fs::DirProjectRoot;
use crate::project::ProjectRoot;

pub mod private;
pub mod shared;

use private::PrivateStore;
use shared::SharedStore;

/// Name of the shared configuration document, relative to the project root.
pub const SHARED_CONFIG_FILENAME: &str = ".auxconfig.xml";

/// Root element of the shared document.
pub const DOC_ROOT_NAME: &str = "auxiliary-configuration";

/// Namespace of the shared document's root element.
pub const DOC_ROOT_NS: &str = "urn:auxconfig:1";

/// Prefix of every private-tier attribute key.
pub const ATTR_KEY_PREFIX: &str = "auxconfig";

/// Visibility tier of a stored fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Persisted in the shared document, readable by any collaborator.
    Shared,
    /// Persisted as a directory attribute, local to this environment.
    Private,
}

/// One tier's read/write/remove strategy. Implementations assume the caller
/// already holds the appropriate lock.
pub(crate) trait TierStore {
    fn get(&self, local_name: &str, namespace: &str) -> Result<Option<Fragment>>;
    fn put(&self, fragment: &Fragment) -> Result<()>;
    fn remove(&self, local_name: &str, namespace: &str) -> Result<bool>;
}

/// The auxiliary configuration store for one project.
///
/// All three operations run synchronously on the caller's thread under the
/// store's read/write lock: readers may overlap each other, a writer excludes
/// everyone. The write lock is held across the entire
/// read-parse-merge-serialize-write sequence — releasing it in the middle
/// would let two concurrent writers each re-add their own fragment over a
/// stale document and erase the other's.
pub struct AuxConfigStore {
    lock: RwLock<()>,
    shared: SharedStore,
    private: PrivateStore,
}

impl AuxConfigStore {
    pub fn new(root: Arc<dyn ProjectRoot>) -> Self {
        Self {
            lock: RwLock::new(()),
            shared: SharedStore::new(Arc::clone(&root)),
            private: PrivateStore::new(root),
        }
    }

    /// Opens a store over a real project directory with the default private
    /// attribute location.
    pub fn open(root_dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(DirProjectRoot::new(root_dir)))
    }

    /// Retrieves the fragment stored under `(local_name, namespace)` in the
    /// given tier.
    ///
    /// Absence is an expected outcome, not an error: a missing document, a
    /// missing entry, a malformed shared document, and an I/O fault all yield
    /// `None` (faults are logged, the session stays usable).
    pub fn get_fragment(
        &self,
        local_name: &str,
        namespace: &str,
        tier: Tier,
    ) -> Option<Fragment> {
        let _guard = self.lock.read();
        match self.tier(tier).get(local_name, namespace) {
            Ok(found) => found,
            Err(err) => {
                info!("cannot read fragment `{local_name}` ({namespace}): {err}");
                None
            }
        }
    }

    /// Stores `fragment` in the given tier, replacing any previous value with
    /// the same `(local_name, namespace)`.
    ///
    /// # Errors
    ///
    /// - [`AuxConfigError::MissingNamespace`] when the fragment carries no
    ///   namespace.
    /// - [`AuxConfigError::MalformedDocument`] when the existing shared
    ///   document cannot be parsed: rewriting it blindly would destroy the
    ///   other fragments it may still hold, so the write is aborted.
    ///
    /// I/O and serialization faults are logged and the call returns `Ok(())`;
    /// the store favors a usable session over hard failure propagation, at
    /// the documented cost that callers cannot distinguish "written" from
    /// "write silently failed".
    pub fn put_fragment(&self, fragment: &Fragment, tier: Tier) -> Result<()> {
        let _guard = self.lock.write();
        if fragment.namespace.is_empty() {
            return Err(AuxConfigError::MissingNamespace(fragment.local_name.clone()));
        }
        match self.tier(tier).put(fragment) {
            Ok(()) => Ok(()),
            Err(err @ AuxConfigError::MalformedDocument { .. }) => Err(err),
            Err(err) => {
                warn!(
                    "cannot save fragment `{}` ({}): {err}",
                    fragment.local_name, fragment.namespace
                );
                Ok(())
            }
        }
    }

    /// Removes the fragment stored under `(local_name, namespace)` in the
    /// given tier. Returns `true` iff a fragment was present and removed.
    ///
    /// Faults are logged and count as "nothing removed".
    pub fn remove_fragment(&self, local_name: &str, namespace: &str, tier: Tier) -> bool {
        let _guard = self.lock.write();
        let mut removed = false;
        // Accumulate with |= so any future fallback strategy still runs after
        // a success instead of being short-circuited away.
        removed |= match self.tier(tier).remove(local_name, namespace) {
            Ok(result) => result,
            Err(err) => {
                warn!("cannot remove fragment `{local_name}` ({namespace}): {err}");
                false
            }
        };
        removed
    }

    fn tier(&self, tier: Tier) -> &dyn TierStore {
        match tier {
            Tier::Shared => &self.shared,
            Tier::Private => &self.private,
        }
    }
}
