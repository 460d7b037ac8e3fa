//! Late-bound type resolution
//!
//! Elements whose type is declared after insertion are grouped by type name
//! and held until the type becomes defined. Each group resolves exactly
//! once, delivering every accumulated member together. Hosts without a
//! native "now defined" signal are handled by a cooperative polling
//! fallback: one definedness check per group per tick, against a
//! representative member.

use rustc_hash::FxHashMap;
use umbra_dom::{Document, NodeId};

/// One resolved group: every accumulated element of a freshly-defined type
#[derive(Clone, Debug)]
pub struct ResolvedGroup {
    pub type_name: String,
    pub elements: Vec<NodeId>,
}

/// Pending resolutions, keyed by type name.
///
/// A key exists iff exactly one outstanding resolution is open for it;
/// concurrent insertions of the same unresolved type share that resolution.
#[derive(Debug, Default)]
pub struct TypeResolver {
    groups: FxHashMap<String, Vec<NodeId>>,
}

impl TypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `root` and its composed subtree for unresolved elements and fold
    /// them into pending groups. Opens one subscription per new type name on
    /// hosts with the native signal. Skips entirely when the host cannot
    /// enumerate unresolved elements.
    pub fn collect(&mut self, doc: &mut Document, root: NodeId) {
        if !doc.capabilities().undefined_query {
            tracing::debug!("host cannot enumerate unresolved elements; skipping collection");
            return;
        }
        for node in doc.undefined_elements(root) {
            let Some(name) = doc.tag(node).map(str::to_string) else {
                continue;
            };
            match self.groups.get_mut(&name) {
                Some(members) => {
                    if !members.contains(&node) {
                        members.push(node);
                    }
                }
                None => {
                    self.groups.insert(name.clone(), vec![node]);
                    if doc.capabilities().when_defined {
                        doc.subscribe_type(&name);
                    }
                    tracing::debug!(%name, "pending type resolution opened");
                }
            }
        }
    }

    /// One scheduling tick: drain native signals, run at most one poll round,
    /// and hand back every group that resolved. A resolved group is removed
    /// atomically, so it is delivered exactly once; a native signal for an
    /// already-cleared name drains to a no-op.
    pub fn poll(&mut self, doc: &mut Document) -> Vec<ResolvedGroup> {
        let mut resolved = Vec::new();
        if doc.capabilities().when_defined {
            for name in doc.take_resolved_types() {
                if let Some(elements) = self.groups.remove(&name) {
                    resolved.push(ResolvedGroup {
                        type_name: name,
                        elements,
                    });
                }
            }
        } else {
            let ready: Vec<String> = self
                .groups
                .iter()
                .filter(|(_, members)| {
                    members
                        .first()
                        .is_some_and(|&representative| !doc.is_unresolved(representative))
                })
                .map(|(name, _)| name.clone())
                .collect();
            for name in ready {
                if let Some(elements) = self.groups.remove(&name) {
                    resolved.push(ResolvedGroup {
                        type_name: name,
                        elements,
                    });
                }
            }
        }
        resolved
    }

    /// Drop all pending groups. Outstanding native signals become no-ops.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Number of type names with an open resolution
    pub fn pending(&self) -> usize {
        self.groups.len()
    }
}
