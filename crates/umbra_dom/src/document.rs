//! The document: tree mutation, queries, observer routing
//!
//! The [`Document`] owns the node arena, the observer registry and the type
//! registry. Every mutation routes a record into the queue of each observer
//! whose scope covers the target; scope walks follow parent links only, so
//! observation never crosses an encapsulation boundary (boundary roots have
//! no parent).

use slotmap::SlotMap;
use smallvec::smallvec;

use crate::node::{Attr, ElementData, Node, NodeData, NodeId};
use crate::observer::{MutationRecord, ObserveOptions, Observer, ObserverId, RecordKind};
use crate::registry::{HostCapabilities, RegistryError, TypeRegistry};

/// A mutable, hierarchically-encapsulated document tree
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    observers: SlotMap<ObserverId, Observer>,
    registry: TypeRegistry,
    capabilities: HostCapabilities,
}

impl Document {
    /// Create a document with full host capabilities
    pub fn new() -> Self {
        Self::with_capabilities(HostCapabilities::default())
    }

    /// Create a document for a degraded host
    pub fn with_capabilities(capabilities: HostCapabilities) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(NodeData::Document));
        Self {
            nodes,
            root,
            observers: SlotMap::with_key(),
            registry: TypeRegistry::new(),
            capabilities,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    // ========== Node creation ==========

    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.nodes
            .insert(Node::new(NodeData::Element(ElementData::new(tag_name))))
    }

    pub fn create_element_with(&mut self, tag_name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut data = ElementData::new(tag_name);
        data.attrs.extend(attrs.iter().map(|(name, value)| Attr {
            name: name.to_string(),
            value: value.to_string(),
        }));
        self.nodes.insert(Node::new(NodeData::Element(data)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.nodes
            .insert(Node::new(NodeData::Text(text.to_string())))
    }

    /// Attach an encapsulation boundary to `host` and return its content
    /// root. Idempotent: a host has at most one boundary.
    pub fn attach_boundary(&mut self, host: NodeId) -> NodeId {
        if let Some(existing) = self.boundary_of(host) {
            return existing;
        }
        let boundary = self.nodes.insert(Node::new(NodeData::BoundaryRoot { host }));
        if let Some(node) = self.nodes.get_mut(host) {
            node.boundary = Some(boundary);
        }
        boundary
    }

    // ========== Tree mutation ==========

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is first detached from it, which
    /// generates a removal record against the old parent - exactly the
    /// record pair a relocation is recognized by.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.is_inclusive_ancestor(child, parent) {
            tracing::warn!(?parent, ?child, "refusing to create a cycle");
            return;
        }
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        if self.nodes[child].parent.is_some() {
            self.detach_with_record(child);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        self.route_record(MutationRecord::child_list(
            parent,
            smallvec![child],
            smallvec![],
        ));
    }

    /// Remove `child` from `parent`. No-op when `child` is not a child of
    /// `parent`. The removed node stays valid as a detached root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let belongs = self
            .nodes
            .get(child)
            .map(|n| n.parent == Some(parent))
            .unwrap_or(false);
        if !belongs {
            return;
        }
        self.detach_with_record(child);
    }

    /// Set (or add) an attribute on an element
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(data) = self.nodes.get_mut(node).and_then(|n| n.as_element_mut()) else {
            return;
        };
        match data.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => data.attrs.push(Attr {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
        self.route_record(MutationRecord::attribute(node, name));
    }

    /// Detach `node` from its parent and record the removal
    fn detach_with_record(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&c| c != node);
        }
        self.nodes[node].parent = None;
        self.route_record(MutationRecord::child_list(
            parent,
            smallvec![],
            smallvec![node],
        ));
    }

    // ========== Queries ==========

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(node)
            .and_then(|n| n.as_element())
            .map(|e| e.tag_name.as_str())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(node)
            .and_then(|n| n.as_element())
            .and_then(|e| e.attribute(name))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn boundary_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.boundary)
    }

    /// Whether `node` is attached to the document root, hopping from
    /// boundary roots to their hosts
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut cursor = node;
        loop {
            if cursor == self.root {
                return true;
            }
            let Some(n) = self.nodes.get(cursor) else {
                return false;
            };
            cursor = match (n.parent, &n.data) {
                (Some(parent), _) => parent,
                (None, NodeData::BoundaryRoot { host }) => *host,
                (None, _) => return false,
            };
        }
    }

    /// Whether `ancestor` is `node` itself or one of its ancestors within
    /// the same tree scope (boundary roots are not crossed)
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Pre-order descendants of `node` within its tree scope, not including
    /// `node` itself and not descending into boundaries
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Pre-order walk of `node` and everything below it, descending into
    /// boundary content as well
    pub fn composed_subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if !self.nodes.contains_key(id) {
                continue;
            }
            out.push(id);
            if let Some(boundary) = self.boundary_of(id) {
                stack.push(boundary);
            }
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Composed-tree descendant search by predicate (inclusive of `scope`)
    pub fn find_descendants(
        &self,
        scope: NodeId,
        predicate: impl Fn(&Node) -> bool,
    ) -> Vec<NodeId> {
        self.composed_subtree(scope)
            .into_iter()
            .filter(|&id| self.nodes.get(id).is_some_and(&predicate))
            .collect()
    }

    // ========== Custom types ==========

    pub fn define_type(&mut self, name: &str) -> Result<(), RegistryError> {
        self.registry.define(name)
    }

    pub fn is_type_defined(&self, name: &str) -> bool {
        self.registry.is_defined(name)
    }

    pub fn subscribe_type(&mut self, name: &str) {
        self.registry.subscribe(name);
    }

    pub fn take_resolved_types(&mut self) -> Vec<String> {
        self.registry.take_resolved()
    }

    /// Whether `node` is an element of a not-yet-defined custom type
    pub fn is_unresolved(&self, node: NodeId) -> bool {
        self.nodes
            .get(node)
            .and_then(|n| n.as_element())
            .is_some_and(|e| e.is_custom_type() && !self.registry.is_defined(&e.tag_name))
    }

    /// Elements of not-yet-defined types in the composed subtree of `scope`
    pub fn undefined_elements(&self, scope: NodeId) -> Vec<NodeId> {
        self.find_descendants(scope, |n| {
            n.as_element()
                .is_some_and(|e| e.is_custom_type() && !self.registry.is_defined(&e.tag_name))
        })
    }

    // ========== Observation ==========

    /// Register an observer scoped to `root`
    pub fn observe(&mut self, root: NodeId, options: ObserveOptions) -> ObserverId {
        self.observers.insert(Observer::new(root, options))
    }

    /// Disconnect an observer: pending records are dropped and no further
    /// records are delivered. Unknown ids are ignored.
    pub fn disconnect(&mut self, id: ObserverId) {
        self.observers.remove(id);
    }

    /// Drain the pending queue of an observer. One drained queue is one
    /// delivered batch.
    pub fn take_records(&mut self, id: ObserverId) -> Vec<MutationRecord> {
        self.observers
            .get_mut(id)
            .map(|obs| std::mem::take(&mut obs.queue))
            .unwrap_or_default()
    }

    /// Number of currently-registered observers
    pub fn active_observers(&self) -> usize {
        self.observers.len()
    }

    fn route_record(&mut self, record: MutationRecord) {
        let matching: Vec<ObserverId> = self
            .observers
            .iter()
            .filter(|&(_, obs)| self.record_matches(obs, &record))
            .map(|(id, _)| id)
            .collect();
        for id in matching {
            if let Some(obs) = self.observers.get_mut(id) {
                obs.queue.push(record.clone());
            }
        }
    }

    fn record_matches(&self, observer: &Observer, record: &MutationRecord) -> bool {
        let wants = match record.kind {
            RecordKind::ChildList => observer.options.child_list,
            RecordKind::Attributes => record
                .attribute_name
                .as_deref()
                .is_some_and(|name| observer.wants_attribute(name)),
        };
        if !wants {
            return false;
        }
        record.target == observer.root
            || (observer.options.subtree && self.is_inclusive_ancestor(observer.root, record.target))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body);
        (doc, body)
    }

    #[test]
    fn append_and_remove_update_links() {
        let (mut doc, body) = page();
        let div = doc.create_element("div");
        let text = doc.create_text("hello");
        doc.append_child(body, div);
        doc.append_child(div, text);
        assert_eq!(doc.children(body), &[div]);
        assert!(doc.is_connected(div));
        assert!(doc.is_connected(text));

        doc.remove_child(body, div);
        assert!(doc.children(body).is_empty());
        assert!(!doc.is_connected(div));
        // The detached node is still addressable.
        assert!(doc.contains(div));
        assert_eq!(doc.tag(div), Some("div"));
    }

    #[test]
    fn append_moves_between_parents() {
        let (mut doc, body) = page();
        let a = doc.create_element("section");
        let b = doc.create_element("section");
        let child = doc.create_element("style");
        doc.append_child(body, a);
        doc.append_child(body, b);
        doc.append_child(a, child);

        doc.append_child(b, child);
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[child]);
    }

    #[test]
    fn cycles_are_refused() {
        let (mut doc, body) = page();
        let div = doc.create_element("div");
        doc.append_child(body, div);
        doc.append_child(div, body);
        assert_eq!(doc.children(div), &[] as &[NodeId]);
        assert!(doc.is_connected(body));
    }

    #[test]
    fn connectedness_crosses_boundaries() {
        let (mut doc, body) = page();
        let host = doc.create_element("x-host");
        let boundary = doc.attach_boundary(host);
        let inner = doc.create_element("style");
        doc.append_child(boundary, inner);
        assert!(doc.node(boundary).unwrap().is_boundary_root());

        // Host is detached: the boundary content is disconnected too.
        assert!(!doc.is_connected(inner));
        doc.append_child(body, host);
        assert!(doc.is_connected(inner));
    }

    #[test]
    fn attach_boundary_is_idempotent() {
        let (mut doc, _) = page();
        let host = doc.create_element("x-host");
        let first = doc.attach_boundary(host);
        assert_eq!(doc.attach_boundary(host), first);
    }

    #[test]
    fn observer_sees_structural_records_in_scope() {
        let (mut doc, body) = page();
        let observer = doc.observe(doc.root(), ObserveOptions::tree());
        let style = doc.create_element("style");
        doc.append_child(body, style);

        let batch = doc.take_records(observer);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].kind, RecordKind::ChildList);
        assert_eq!(batch[0].added.as_slice(), &[style]);
        // Drained: the next take is empty.
        assert!(doc.take_records(observer).is_empty());
    }

    #[test]
    fn observation_does_not_cross_boundaries() {
        let (mut doc, body) = page();
        let host = doc.create_element("x-host");
        let boundary = doc.attach_boundary(host);
        doc.append_child(body, host);

        let outer = doc.observe(doc.root(), ObserveOptions::tree());
        let inner = doc.observe(boundary, ObserveOptions::tree());
        doc.take_records(outer);

        let style = doc.create_element("style");
        doc.append_child(boundary, style);

        assert!(doc.take_records(outer).is_empty());
        assert_eq!(doc.take_records(inner).len(), 1);
    }

    #[test]
    fn attribute_filter_limits_records() {
        let (mut doc, body) = page();
        let link = doc.create_element_with("link", &[("rel", "stylesheet")]);
        doc.append_child(body, link);

        let observer = doc.observe(doc.root(), ObserveOptions::tree_filtered(&["rel", "disabled"]));
        doc.set_attribute(link, "media", "print");
        doc.set_attribute(link, "disabled", "");

        let batch = doc.take_records(observer);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].attribute_name.as_deref(), Some("disabled"));
    }

    #[test]
    fn disconnect_stops_delivery() {
        let (mut doc, body) = page();
        let observer = doc.observe(doc.root(), ObserveOptions::tree());
        doc.disconnect(observer);

        let style = doc.create_element("style");
        doc.append_child(body, style);
        assert!(doc.take_records(observer).is_empty());
        assert_eq!(doc.active_observers(), 0);
    }

    #[test]
    fn composed_subtree_descends_into_boundaries() {
        let (mut doc, body) = page();
        let host = doc.create_element("x-host");
        let boundary = doc.attach_boundary(host);
        let inner = doc.create_element("style");
        doc.append_child(boundary, inner);
        doc.append_child(body, host);

        let composed = doc.composed_subtree(body);
        assert!(composed.contains(&inner));
        // The plain scope walk must not see through the boundary.
        assert!(!doc.descendants(body).contains(&inner));
    }

    #[test]
    fn undefined_elements_respects_definitions() {
        let (mut doc, body) = page();
        let widget = doc.create_element("fancy-widget");
        doc.append_child(body, widget);

        assert_eq!(doc.undefined_elements(doc.root()), vec![widget]);
        assert!(doc.is_unresolved(widget));

        doc.define_type("fancy-widget").unwrap();
        assert!(doc.is_type_defined("fancy-widget"));
        assert!(!doc.is_unresolved(widget));
        assert!(doc.undefined_elements(doc.root()).is_empty());
    }
}
