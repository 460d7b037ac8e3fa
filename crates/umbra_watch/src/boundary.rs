//! Boundary-scoped observer management
//!
//! Observation does not cross encapsulation boundaries, so every boundary
//! host gets its own watcher. The association is an explicit map from host
//! identity to observer identity; arena keys never extend a host's lifetime,
//! so a removed host is reclaimed by the document without map cleanup.

use rustc_hash::FxHashMap;
use umbra_dom::{Document, NodeId, ObserveOptions, ObserverId};

/// Attributes that matter to style resources
pub(crate) const STYLE_ATTRIBUTES: [&str; 2] = ["rel", "disabled"];

/// One watcher per currently-armed boundary host
#[derive(Debug, Default)]
pub struct BoundaryObservers {
    observers: FxHashMap<NodeId, ObserverId>,
}

impl BoundaryObservers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a watcher for `host`. Idempotent: does nothing when the host has
    /// no boundary or is already armed. Returns whether a watcher was
    /// created.
    pub fn arm(&mut self, doc: &mut Document, host: NodeId) -> bool {
        let Some(boundary) = doc.boundary_of(host) else {
            return false;
        };
        if self.observers.contains_key(&host) {
            return false;
        }
        let id = doc.observe(boundary, ObserveOptions::tree_filtered(&STYLE_ATTRIBUTES));
        self.observers.insert(host, id);
        tracing::debug!(?host, "armed boundary watcher");
        true
    }

    /// Arm watchers for every boundary host at or below `root`, including
    /// hosts nested inside other boundaries
    pub fn arm_within(&mut self, doc: &mut Document, root: NodeId) {
        for node in doc.composed_subtree(root) {
            self.arm(doc, node);
        }
    }

    /// Disconnect every armed watcher and clear the association. Idempotent;
    /// used only on full session stop.
    pub fn disarm_all(&mut self, doc: &mut Document) {
        for (_, id) in self.observers.drain() {
            doc.disconnect(id);
        }
    }

    /// Observer ids of all armed watchers
    pub fn observer_ids(&self) -> Vec<ObserverId> {
        self.observers.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_requires_a_boundary() {
        let mut doc = Document::new();
        let plain = doc.create_element("div");
        let mut observers = BoundaryObservers::new();
        assert!(!observers.arm(&mut doc, plain));
        assert!(observers.is_empty());
    }

    #[test]
    fn arm_is_idempotent() {
        let mut doc = Document::new();
        let host = doc.create_element("x-host");
        doc.attach_boundary(host);

        let mut observers = BoundaryObservers::new();
        assert!(observers.arm(&mut doc, host));
        assert!(!observers.arm(&mut doc, host));
        assert_eq!(observers.len(), 1);
        assert_eq!(doc.active_observers(), 1);
    }

    #[test]
    fn arm_within_discovers_nested_hosts() {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body);

        let outer = doc.create_element("x-outer");
        let outer_boundary = doc.attach_boundary(outer);
        let inner = doc.create_element("x-inner");
        doc.attach_boundary(inner);
        doc.append_child(outer_boundary, inner);
        doc.append_child(body, outer);

        let mut observers = BoundaryObservers::new();
        let root = doc.root();
        observers.arm_within(&mut doc, root);
        assert_eq!(observers.len(), 2);
    }

    #[test]
    fn disarm_all_is_idempotent() {
        let mut doc = Document::new();
        let host = doc.create_element("x-host");
        doc.attach_boundary(host);

        let mut observers = BoundaryObservers::new();
        observers.arm(&mut doc, host);
        observers.disarm_all(&mut doc);
        observers.disarm_all(&mut doc);
        assert!(observers.is_empty());
        assert_eq!(doc.active_observers(), 0);
    }
}
