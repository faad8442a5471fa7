use super::ProjectRoot;
use crate::error::Result;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Production [`ProjectRoot`] over a real directory.
///
/// Files live directly under the root. The attribute map is persisted as a
/// JSON file in a per-project bucket under the user data directory, keyed by
/// a hash of the canonical root path, so private configuration never shows up
/// inside the project tree.
pub struct DirProjectRoot {
    root: PathBuf,
    attribute_file: PathBuf,
}

impl DirProjectRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let attribute_file = default_attribute_file(&root);
        Self {
            root,
            attribute_file,
        }
    }

    /// Overrides where the attribute map is persisted (used by tests and by
    /// hosts that manage their own data directory).
    pub fn with_attribute_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.attribute_file = path.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_attributes(&self) -> Result<HashMap<String, String>> {
        match fs::read_to_string(&self.attribute_file) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save_attributes(&self, attributes: &HashMap<String, String>) -> Result<()> {
        if attributes.is_empty() {
            return remove_if_present(&self.attribute_file);
        }
        if let Some(parent) = self.attribute_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(attributes)?;
        fs::write(&self.attribute_file, content)?;
        Ok(())
    }
}

impl ProjectRoot for DirProjectRoot {
    fn read_file(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.root.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_file(&self, name: &str, contents: &[u8]) -> Result<()> {
        fs::write(self.root.join(name), contents)?;
        Ok(())
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        remove_if_present(&self.root.join(name))
    }

    fn get_attribute(&self, key: &str) -> Result<Option<String>> {
        let mut attributes = self.load_attributes()?;
        Ok(attributes.remove(key))
    }

    fn set_attribute(&self, key: &str, value: Option<&str>) -> Result<()> {
        let mut attributes = self.load_attributes()?;
        match value {
            Some(value) => {
                attributes.insert(key.to_string(), value.to_string());
            }
            None => {
                attributes.remove(key);
            }
        }
        self.save_attributes(&attributes)
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn default_attribute_file(root: &Path) -> PathBuf {
    // Canonicalization can fail for not-yet-created roots; fall back to the
    // path as given so the bucket is still stable per spelling.
    let canonical = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
    let bucket: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    let base = ProjectDirs::from("", "", "auxconfig")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("auxconfig"));
    base.join("attributes").join(format!("{bucket}.json"))
}
