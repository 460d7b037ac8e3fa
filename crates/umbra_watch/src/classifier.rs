//! Mutation classification
//!
//! One raw batch in, one disjoint classification out. Order of events inside
//! a batch is irrelevant: classification works on set membership, so
//! "removed then added" and "added then removed" both resolve by where the
//! node ends up. The precedence ladder is moved > removed > updated >
//! created; in particular, removal dominates an attribute update in the
//! same batch.

use rustc_hash::FxHashSet;
use umbra_dom::{Document, MutationRecord, NodeId, RecordKind};

use crate::changeset::{ChangeSet, StyleResource};

/// The capability predicate selecting style-resource elements
pub type ShouldManageStyle = fn(&Document, NodeId) -> bool;

/// Outcome of classifying one batch
#[derive(Debug, Default)]
pub struct Classification {
    pub created: Vec<NodeId>,
    pub updated: Vec<NodeId>,
    pub removed: Vec<NodeId>,
    pub moved: Vec<NodeId>,
    /// Raw structurally-added nodes, for post-classification side effects
    /// (arming new boundaries, collecting unresolved types)
    pub added_roots: Vec<NodeId>,
}

impl Classification {
    /// Snapshot the classified node ids into a reportable change set
    pub fn into_change_set(self, doc: &Document) -> ChangeSet {
        let snapshot = |nodes: Vec<NodeId>| -> Vec<StyleResource> {
            nodes.into_iter().map(|n| StyleResource::of(doc, n)).collect()
        };
        ChangeSet {
            created: snapshot(self.created),
            updated: snapshot(self.updated),
            removed: snapshot(self.removed),
            moved: snapshot(self.moved),
        }
    }
}

/// Classify one delivered batch of raw records
pub fn classify(
    doc: &Document,
    records: &[MutationRecord],
    should_manage: ShouldManageStyle,
) -> Classification {
    let mut added_roots: Vec<NodeId> = Vec::new();
    let mut removed_roots: Vec<NodeId> = Vec::new();
    let mut attr_targets: Vec<NodeId> = Vec::new();
    let mut seen_added = FxHashSet::default();
    let mut seen_removed = FxHashSet::default();
    let mut seen_attrs = FxHashSet::default();

    for record in records {
        match record.kind {
            RecordKind::ChildList => {
                added_roots.extend(record.added.iter().filter(|&&n| seen_added.insert(n)));
                removed_roots.extend(record.removed.iter().filter(|&&n| seen_removed.insert(n)));
            }
            RecordKind::Attributes => {
                if should_manage(doc, record.target) && seen_attrs.insert(record.target) {
                    attr_targets.push(record.target);
                }
            }
        }
    }

    // Expansion: a single structural change can reveal or hide whole nested
    // sub-trees, so every root is widened to the style resources at or below
    // it, through any boundary.
    let expanded_added = expand(doc, &added_roots, should_manage);
    let expanded_removed = expand(doc, &removed_roots, should_manage);
    let added_set: FxHashSet<NodeId> = expanded_added.iter().copied().collect();

    let mut classification = Classification {
        added_roots,
        ..Default::default()
    };
    let mut settled = FxHashSet::default();

    for node in expanded_removed {
        if added_set.contains(&node) && doc.is_connected(node) {
            classification.moved.push(node);
        } else {
            classification.removed.push(node);
        }
        settled.insert(node);
    }
    for node in attr_targets {
        if settled.insert(node) {
            classification.updated.push(node);
        }
    }
    for node in expanded_added {
        if settled.insert(node) {
            classification.created.push(node);
        }
    }

    tracing::trace!(
        created = classification.created.len(),
        updated = classification.updated.len(),
        removed = classification.removed.len(),
        moved = classification.moved.len(),
        "classified batch"
    );
    classification
}

/// Style resources at or below each root, descending through boundaries,
/// deduplicated across roots
fn expand(doc: &Document, roots: &[NodeId], should_manage: ShouldManageStyle) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut seen = FxHashSet::default();
    for &root in roots {
        for node in doc.composed_subtree(root) {
            if should_manage(doc, node) && seen.insert(node) {
                out.push(node);
            }
        }
    }
    out
}
