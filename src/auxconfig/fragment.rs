use std::cmp::Ordering;

/// A named, namespaced structured configuration value.
///
/// Fragments are identified by `(local_name, namespace)` and carry ordered
/// attributes and ordered child content. The store hands out fresh copies on
/// every read, so callers may mutate what they receive without affecting
/// stored state until they write it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub local_name: String,
    pub namespace: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Child content of a [`Fragment`]: nested elements or text runs, in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Fragment),
    Text(String),
}

impl Fragment {
    pub fn new(local_name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            namespace: namespace.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Fragment) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Concatenated direct text content, ignoring nested elements.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Direct element children, skipping text runs.
    pub fn child_elements(&self) -> impl Iterator<Item = &Fragment> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(child) => Some(child),
            Node::Text(_) => None,
        })
    }

    /// Finds the direct child matching both `local_name` and `namespace`.
    ///
    /// The namespace match is exact, never wildcarded; only direct children
    /// are considered.
    pub fn find_child(&self, local_name: &str, namespace: &str) -> Option<&Fragment> {
        self.child_elements()
            .find(|child| child.local_name == local_name && child.namespace == namespace)
    }

    /// Canonical ordering of stored fragments: local name first, then
    /// namespace, both lexicographic.
    pub fn key_cmp(&self, local_name: &str, namespace: &str) -> Ordering {
        self.local_name
            .as_str()
            .cmp(local_name)
            .then_with(|| self.namespace.as_str().cmp(namespace))
    }
}
