use super::ProjectRoot;
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory [`ProjectRoot`] for tests: no persistence, no filesystem.
#[derive(Default)]
pub struct MemoryProjectRoot {
    files: Mutex<HashMap<String, Vec<u8>>>,
    attributes: Mutex<HashMap<String, String>>,
}

impl MemoryProjectRoot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectRoot for MemoryProjectRoot {
    fn read_file(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.files.lock().get(name).cloned())
    }

    fn write_file(&self, name: &str, contents: &[u8]) -> Result<()> {
        self.files.lock().insert(name.to_string(), contents.to_vec());
        Ok(())
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        self.files.lock().remove(name);
        Ok(())
    }

    fn get_attribute(&self, key: &str) -> Result<Option<String>> {
        Ok(self.attributes.lock().get(key).cloned())
    }

    fn set_attribute(&self, key: &str, value: Option<&str>) -> Result<()> {
        let mut attributes = self.attributes.lock();
        match value {
            Some(value) => {
                attributes.insert(key.to_string(), value.to_string());
            }
            None => {
                attributes.remove(key);
            }
        }
        Ok(())
    }
}
