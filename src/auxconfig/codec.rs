//! Fragment <-> XML text conversion.
//!
//! The codec is the only place that touches `xmltree`. Everything above it
//! works in terms of [`Fragment`] values, so the two storage tiers never see
//! DOM types. Serialization is deterministic for a given fragment: attributes
//! keep insertion order (`attribute-order` feature) and namespace bindings are
//! emitted only where the namespace actually changes.

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{AuxConfigError, Result};
use crate::fragment::{Fragment, Node};

/// Parses one XML element (with children) into a [`Fragment`].
///
/// A leading XML declaration is tolerated and ignored. `origin` names the
/// file or attribute key the bytes came from and only feeds error messages.
///
/// Whitespace-only text sitting beside element children is treated as
/// indentation and dropped; everywhere else text comes back verbatim. The
/// serializer writes whitespace-only content as CDATA, so fragments written
/// by this codec survive the trip back intact.
pub fn parse(bytes: &[u8], origin: &str) -> Result<Fragment> {
    let element = Element::parse(bytes).map_err(|err| AuxConfigError::MalformedDocument {
        origin: origin.to_string(),
        detail: err.to_string(),
    })?;
    Ok(from_element(&element))
}

/// Serializes a [`Fragment`] to XML text without a document declaration.
///
/// `pretty` controls indentation: the shared document is written indented so
/// external diffs stay readable, private attribute values are written
/// compact.
pub fn serialize(fragment: &Fragment, pretty: bool) -> Result<String> {
    let element = to_element(fragment, "");
    let config = EmitterConfig::new()
        .write_document_declaration(false)
        .perform_indent(pretty);
    let mut out = Vec::new();
    element.write_with_config(&mut out, config)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn to_element(fragment: &Fragment, parent_namespace: &str) -> Element {
    let mut element = Element::new(&fragment.local_name);
    // Namespacing is written as explicit xmlns attributes instead of going
    // through the emitter's binding machinery: a declaration appears exactly
    // where the effective namespace changes, including the xmlns=""
    // unbinding for an unnamespaced child under a namespaced parent.
    if fragment.namespace != parent_namespace {
        element
            .attributes
            .insert("xmlns".to_string(), fragment.namespace.clone());
    }
    for (name, value) in &fragment.attributes {
        element.attributes.insert(name.clone(), value.clone());
    }
    for node in &fragment.children {
        match node {
            Node::Element(child) => element
                .children
                .push(XMLNode::Element(to_element(child, &fragment.namespace))),
            Node::Text(text) => {
                // Bare whitespace would be indistinguishable from layout on
                // the way back in; CDATA marks it as content.
                if !text.is_empty() && text.trim().is_empty() {
                    element.children.push(XMLNode::CData(text.clone()));
                } else {
                    element.children.push(XMLNode::Text(text.clone()));
                }
            }
        }
    }
    element
}

fn from_element(element: &Element) -> Fragment {
    let mut fragment = Fragment::new(
        element.name.clone(),
        element.namespace.clone().unwrap_or_default(),
    );
    for (name, value) in &element.attributes {
        fragment.attributes.push((name.clone(), value.clone()));
    }
    let has_element_children = element
        .children
        .iter()
        .any(|node| matches!(node, XMLNode::Element(_)));
    for node in &element.children {
        match node {
            XMLNode::Element(child) => fragment.children.push(Node::Element(from_element(child))),
            XMLNode::Text(text) => {
                // Whitespace-only runs between element children are
                // indentation; standalone whitespace is content.
                if !text.trim().is_empty() || !has_element_children {
                    fragment.children.push(Node::Text(text.clone()));
                }
            }
            XMLNode::CData(text) => fragment.children.push(Node::Text(text.clone())),
            _ => {}
        }
    }
    fragment
}
