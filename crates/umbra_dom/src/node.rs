//! Node arena types

use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Stable identity of a node within one document arena.
    ///
    /// Keys never keep their node alive; a key for a reclaimed node simply
    /// stops resolving.
    pub struct NodeId;
}

/// A named attribute on an element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

/// Element payload: tag name plus attribute list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementData {
    pub tag_name: String,
    pub attrs: SmallVec<[Attr; 4]>,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: SmallVec::new(),
        }
    }

    /// Look up an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Custom types carry a dash in their tag name
    pub fn is_custom_type(&self) -> bool {
        self.tag_name.contains('-')
    }
}

/// What a node is
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    /// The document root
    Document,
    Element(ElementData),
    /// Root of an encapsulation boundary; `host` links back to the owning
    /// element. Boundary roots have no parent — connectedness hops through
    /// the host instead.
    BoundaryRoot { host: NodeId },
    Text(String),
}

/// One node in the arena
#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Boundary content root, present only on hosts
    pub boundary: Option<NodeId>,
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            boundary: None,
            data,
        }
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn is_boundary_root(&self) -> bool {
        matches!(self.data, NodeData::BoundaryRoot { .. })
    }
}
