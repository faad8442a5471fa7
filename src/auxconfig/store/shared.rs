use std::cmp::Ordering;
use std::sync::Arc;

use crate::codec;
use crate::error::Result;
use crate::fragment::{Fragment, Node};
use crate::project::ProjectRoot;

use super::{TierStore, DOC_ROOT_NAME, DOC_ROOT_NS, SHARED_CONFIG_FILENAME};

/// Shared-tier strategy: all fragments live in one XML document at
/// [`SHARED_CONFIG_FILENAME`] under the project root.
///
/// The document is created lazily on the first write and deleted again when
/// its last fragment is removed. Its top-level children are kept strictly
/// sorted by `(local_name, namespace)` regardless of insertion history, so
/// the file stays diff-stable under external version control.
pub(crate) struct SharedStore {
    root: Arc<dyn ProjectRoot>,
}

impl SharedStore {
    pub(crate) fn new(root: Arc<dyn ProjectRoot>) -> Self {
        Self { root }
    }

    /// Parses the shared document. `None` when the file does not exist;
    /// a parse failure propagates so each caller can apply its own policy.
    fn load_document(&self) -> Result<Option<Fragment>> {
        let Some(bytes) = self.root.read_file(SHARED_CONFIG_FILENAME)? else {
            return Ok(None);
        };
        codec::parse(&bytes, SHARED_CONFIG_FILENAME).map(Some)
    }

    fn write_document(&self, document: &Fragment) -> Result<()> {
        let text = codec::serialize(document, true)?;
        self.root.write_file(SHARED_CONFIG_FILENAME, text.as_bytes())
    }
}

impl TierStore for SharedStore {
    fn get(&self, local_name: &str, namespace: &str) -> Result<Option<Fragment>> {
        match self.load_document()? {
            Some(document) => Ok(document.find_child(local_name, namespace).cloned()),
            None => Ok(None),
        }
    }

    fn put(&self, fragment: &Fragment) -> Result<()> {
        let mut document = self
            .load_document()?
            .unwrap_or_else(|| Fragment::new(DOC_ROOT_NAME, DOC_ROOT_NS));

        // Replace semantics: an existing fragment with the same key goes
        // away before the new one is inserted.
        document.children.retain(|node| match node {
            Node::Element(child) => {
                child.key_cmp(&fragment.local_name, &fragment.namespace) != Ordering::Equal
            }
            _ => true,
        });

        let at = insertion_point(&document, fragment);
        document.children.insert(at, Node::Element(fragment.clone()));
        self.write_document(&document)
    }

    fn remove(&self, local_name: &str, namespace: &str) -> Result<bool> {
        let Some(mut document) = self.load_document()? else {
            return Ok(false);
        };

        let before = document.children.len();
        document.children.retain(|node| match node {
            Node::Element(child) => child.key_cmp(local_name, namespace) != Ordering::Equal,
            _ => true,
        });
        if document.children.len() == before {
            return Ok(false);
        }

        if document.child_elements().next().is_none() {
            // Last fragment gone: drop the file rather than leaving an
            // empty-root document behind.
            self.root.delete_file(SHARED_CONFIG_FILENAME)?;
        } else {
            self.write_document(&document)?;
        }
        Ok(true)
    }
}

/// Index of the first child whose `(local_name, namespace)` sorts after the
/// new fragment; the end of the child list if none does.
fn insertion_point(document: &Fragment, fragment: &Fragment) -> usize {
    for (index, node) in document.children.iter().enumerate() {
        if let Node::Element(child) = node {
            if child.key_cmp(&fragment.local_name, &fragment.namespace) == Ordering::Greater {
                return index;
            }
        }
    }
    document.children.len()
}
