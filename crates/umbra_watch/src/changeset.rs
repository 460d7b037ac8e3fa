//! Classified change reporting types

use umbra_dom::{Document, NodeId};

/// How a style resource contributes its rules
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleKind {
    /// Rules embedded in the element itself
    Inline,
    /// Rules referenced from elsewhere
    Linked,
}

/// One tracked style resource, identified by node identity.
///
/// `connected` is a snapshot taken when the change set was built; a resource
/// delivered by a late type resolution may already be disconnected, and
/// downstream consumers filter on this flag if they care.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleResource {
    pub node: NodeId,
    pub kind: StyleKind,
    pub connected: bool,
}

impl StyleResource {
    /// Snapshot a resource from the current document state
    pub fn of(doc: &Document, node: NodeId) -> Self {
        let kind = match doc.tag(node) {
            Some("link") => StyleKind::Linked,
            _ => StyleKind::Inline,
        };
        Self {
            node,
            kind,
            connected: doc.is_connected(node),
        }
    }
}

/// One reported batch of classified changes. The four sets are disjoint.
#[derive(Clone, Debug, Default)]
pub struct ChangeSet {
    pub created: Vec<StyleResource>,
    pub updated: Vec<StyleResource>,
    pub removed: Vec<StyleResource>,
    pub moved: Vec<StyleResource>,
}

impl ChangeSet {
    /// Emission gate: moved entries ride along but never trigger delivery
    /// on their own.
    pub fn should_emit(&self) -> bool {
        !self.created.is_empty() || !self.updated.is_empty() || !self.removed.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.updated.is_empty()
            && self.removed.is_empty()
            && self.moved.is_empty()
    }

}
