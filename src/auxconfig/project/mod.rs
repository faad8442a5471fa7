//! # Project Root Abstraction
//!
//! The store never touches the filesystem directly; it goes through the
//! [`ProjectRoot`] trait, which models the two physical facilities a project
//! directory offers:
//!
//! - **files** addressed by a path relative to the project root (the shared
//!   configuration document lives here, visible to every collaborator), and
//! - **directory attributes**, a string-keyed map of opaque values that never
//!   appears inside the project tree (the private tier lives here).
//!
//! ## Implementations
//!
//! - [`fs::DirProjectRoot`]: production root over a real directory. Attributes
//!   are persisted in a per-project sidecar under the user data directory, so
//!   private configuration stays out of version control.
//! - [`memory::MemoryProjectRoot`]: in-memory root for testing. No
//!   persistence, fast, isolated.
//!
//! File creation is implicit: `write_file` creates the file when it does not
//! exist yet. Deleting or reading an absent file is not an error.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// The directory a store is bound to: relative-path file access plus a
/// string-keyed attribute map.
pub trait ProjectRoot: Send + Sync {
    /// Reads a file relative to the project root. `None` if it does not exist.
    fn read_file(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Writes a file relative to the project root, creating it if needed.
    fn write_file(&self, name: &str, contents: &[u8]) -> Result<()>;

    /// Deletes a file relative to the project root. Deleting an absent file
    /// is a no-op.
    fn delete_file(&self, name: &str) -> Result<()>;

    /// Fetches a directory attribute. `None` if the key is unset.
    fn get_attribute(&self, key: &str) -> Result<Option<String>>;

    /// Sets a directory attribute; `None` clears it.
    fn set_attribute(&self, key: &str, value: Option<&str>) -> Result<()>;
}
