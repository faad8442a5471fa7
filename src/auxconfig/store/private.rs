use std::sync::Arc;

use log::warn;

use crate::codec;
use crate::error::Result;
use crate::fragment::Fragment;
use crate::project::ProjectRoot;

use super::{TierStore, ATTR_KEY_PREFIX};

/// Private-tier strategy: one directory attribute per fragment key, value is
/// the serialized fragment. One attribute per key is already exclusive, so no
/// merge logic is needed.
pub(crate) struct PrivateStore {
    root: Arc<dyn ProjectRoot>,
}

impl PrivateStore {
    pub(crate) fn new(root: Arc<dyn ProjectRoot>) -> Self {
        Self { root }
    }
}

fn attribute_key(namespace: &str, local_name: &str) -> String {
    format!("{ATTR_KEY_PREFIX}.{namespace}#{local_name}")
}

impl TierStore for PrivateStore {
    fn get(&self, local_name: &str, namespace: &str) -> Result<Option<Fragment>> {
        let key = attribute_key(namespace, local_name);
        let Some(value) = self.root.get_attribute(&key)? else {
            return Ok(None);
        };
        match codec::parse(value.as_bytes(), &key) {
            Ok(fragment)
                if fragment.local_name == local_name && fragment.namespace == namespace =>
            {
                Ok(Some(fragment))
            }
            Ok(fragment) => {
                // Attribute corruption or a key collision: the stored value
                // does not answer to the requested identity.
                warn!(
                    "attribute `{key}` holds `{}` ({}), expected `{local_name}` ({namespace}); \
                     treating as absent",
                    fragment.local_name, fragment.namespace
                );
                Ok(None)
            }
            Err(err) => {
                warn!("cannot parse value of attribute `{key}`: {err}");
                Ok(None)
            }
        }
    }

    fn put(&self, fragment: &Fragment) -> Result<()> {
        let key = attribute_key(&fragment.namespace, &fragment.local_name);
        let value = codec::serialize(fragment, false)?;
        self.root.set_attribute(&key, Some(&value))
    }

    fn remove(&self, local_name: &str, namespace: &str) -> Result<bool> {
        let key = attribute_key(namespace, local_name);
        if self.root.get_attribute(&key)?.is_none() {
            return Ok(false);
        }
        self.root.set_attribute(&key, None)?;
        Ok(true)
    }
}
