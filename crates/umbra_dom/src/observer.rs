//! Mutation observation
//!
//! Observers are registered against a scope root and accumulate records in a
//! queue until the owner drains them with [`Document::take_records`]. One
//! drained queue is one delivered batch. A disconnected observer drops its
//! queue and never receives another record.
//!
//! [`Document::take_records`]: crate::Document::take_records

use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::node::NodeId;

new_key_type! {
    /// Identity of a registered observer.
    pub struct ObserverId;
}

/// What an observer wants to see
#[derive(Clone, Debug, Default)]
pub struct ObserveOptions {
    /// Observe the whole scope rooted at the target, not just its children
    pub subtree: bool,
    /// Report structural (insert/remove) mutations
    pub child_list: bool,
    /// Report attribute mutations
    pub attributes: bool,
    /// When set, only these attribute names are reported
    pub attribute_filter: Option<SmallVec<[String; 2]>>,
}

impl ObserveOptions {
    /// Recursive structural + attribute observation, unfiltered
    pub fn tree() -> Self {
        Self {
            subtree: true,
            child_list: true,
            attributes: true,
            attribute_filter: None,
        }
    }

    /// Recursive structural + attribute observation filtered to `names`
    pub fn tree_filtered(names: &[&str]) -> Self {
        Self {
            subtree: true,
            child_list: true,
            attributes: true,
            attribute_filter: Some(names.iter().map(|n| n.to_string()).collect()),
        }
    }
}

/// Kind of a raw mutation record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    ChildList,
    Attributes,
}

/// One raw, ephemeral mutation record
#[derive(Clone, Debug)]
pub struct MutationRecord {
    pub kind: RecordKind,
    /// The parent for structural records, the mutated element for attribute
    /// records
    pub target: NodeId,
    pub added: SmallVec<[NodeId; 2]>,
    pub removed: SmallVec<[NodeId; 2]>,
    pub attribute_name: Option<String>,
}

impl MutationRecord {
    pub(crate) fn child_list(
        target: NodeId,
        added: SmallVec<[NodeId; 2]>,
        removed: SmallVec<[NodeId; 2]>,
    ) -> Self {
        Self {
            kind: RecordKind::ChildList,
            target,
            added,
            removed,
            attribute_name: None,
        }
    }

    pub(crate) fn attribute(target: NodeId, name: &str) -> Self {
        Self {
            kind: RecordKind::Attributes,
            target,
            added: SmallVec::new(),
            removed: SmallVec::new(),
            attribute_name: Some(name.to_string()),
        }
    }
}

/// A registered observer and its pending queue
#[derive(Debug)]
pub(crate) struct Observer {
    pub(crate) root: NodeId,
    pub(crate) options: ObserveOptions,
    pub(crate) queue: Vec<MutationRecord>,
}

impl Observer {
    pub(crate) fn new(root: NodeId, options: ObserveOptions) -> Self {
        Self {
            root,
            options,
            queue: Vec::new(),
        }
    }

    /// Whether an attribute mutation with this name passes the filter
    pub(crate) fn wants_attribute(&self, name: &str) -> bool {
        if !self.options.attributes {
            return false;
        }
        match &self.options.attribute_filter {
            Some(filter) => filter.iter().any(|f| f == name),
            None => true,
        }
    }
}
