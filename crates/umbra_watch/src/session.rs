//! The watch session controller
//!
//! One session object owns the root watcher, the boundary watchers and the
//! type resolver. Starting is re-entrant (a previous session is torn down
//! first), stopping is idempotent, and `pump` is the cooperative scheduling
//! tick that drains observer queues, classifies, emits and polls pending
//! type resolutions.

use rustc_hash::FxHashSet;
use umbra_dom::{Document, MutationRecord, ObserveOptions, ObserverId};

use crate::boundary::{BoundaryObservers, STYLE_ATTRIBUTES};
use crate::changeset::{ChangeSet, StyleResource};
use crate::classifier::{classify, ShouldManageStyle};
use crate::resolver::{ResolvedGroup, TypeResolver};

/// Capability predicates supplied by the downstream engine
#[derive(Clone, Copy)]
pub struct StyleHooks {
    /// Decides which elements constitute a style resource
    pub should_manage_style: ShouldManageStyle,
}

type ChangeCallback = Box<dyn FnMut(&ChangeSet)>;

/// A start/stop watch session over one document
pub struct WatchSession {
    hooks: StyleHooks,
    root_observer: Option<ObserverId>,
    boundaries: BoundaryObservers,
    resolver: TypeResolver,
    on_change: Option<ChangeCallback>,
}

impl WatchSession {
    pub fn new(hooks: StyleHooks) -> Self {
        Self {
            hooks,
            root_observer: None,
            boundaries: BoundaryObservers::new(),
            resolver: TypeResolver::new(),
            on_change: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.root_observer.is_some()
    }

    /// Number of currently-armed boundary watchers
    pub fn armed_boundaries(&self) -> usize {
        self.boundaries.len()
    }

    /// Start watching. Always yields exactly one clean active session: any
    /// previous session is fully torn down first.
    pub fn start_watching(
        &mut self,
        doc: &mut Document,
        on_change: impl FnMut(&ChangeSet) + 'static,
    ) {
        self.stop_watching(doc);

        let root = doc.root();
        self.root_observer = Some(doc.observe(root, ObserveOptions::tree_filtered(&STYLE_ATTRIBUTES)));
        self.boundaries.arm_within(doc, root);
        self.resolver.collect(doc, root);
        self.on_change = Some(Box::new(on_change));
        tracing::debug!(
            boundaries = self.boundaries.len(),
            pending_types = self.resolver.pending(),
            "watch session started"
        );
    }

    /// Stop watching. Idempotent; a stop before any start is a no-op.
    pub fn stop_watching(&mut self, doc: &mut Document) {
        if let Some(id) = self.root_observer.take() {
            doc.disconnect(id);
            tracing::debug!("watch session stopped");
        }
        self.boundaries.disarm_all(doc);
        self.resolver.clear();
        self.on_change = None;
    }

    /// One scheduling tick: drain each observer's accumulated batch
    /// independently (root first, boundary watchers in arbitrary order),
    /// then poll pending type resolutions.
    pub fn pump(&mut self, doc: &mut Document) {
        let Some(root_id) = self.root_observer else {
            return;
        };

        let batch = doc.take_records(root_id);
        if !batch.is_empty() {
            self.handle_batch(doc, &batch);
        }
        for id in self.boundaries.observer_ids() {
            let batch = doc.take_records(id);
            if !batch.is_empty() {
                self.handle_batch(doc, &batch);
            }
        }

        for group in self.resolver.poll(doc) {
            self.handle_resolved(doc, group);
        }
    }

    fn handle_batch(&mut self, doc: &mut Document, records: &[MutationRecord]) {
        let classification = classify(doc, records, self.hooks.should_manage_style);

        // Newly added, currently-connected nodes may carry boundaries to arm
        // and unresolved types to track.
        for &node in &classification.added_roots {
            if doc.is_connected(node) {
                self.boundaries.arm_within(doc, node);
                self.resolver.collect(doc, node);
            }
        }

        let change = classification.into_change_set(doc);
        self.emit(&change);
    }

    /// A freshly-resolved type reveals style resources that were invisible
    /// until now: report them all as created and start watching their
    /// boundaries. Resources are reported even if the host has since been
    /// disconnected; the connectedness snapshot lets consumers filter.
    fn handle_resolved(&mut self, doc: &mut Document, group: ResolvedGroup) {
        tracing::debug!(
            type_name = %group.type_name,
            members = group.elements.len(),
            "type resolved"
        );
        let mut seen = FxHashSet::default();
        let mut created = Vec::new();
        for &host in &group.elements {
            for node in doc.composed_subtree(host) {
                if (self.hooks.should_manage_style)(doc, node) && seen.insert(node) {
                    created.push(StyleResource::of(doc, node));
                }
            }
            self.boundaries.arm_within(doc, host);
        }

        let change = ChangeSet {
            created,
            ..Default::default()
        };
        self.emit(&change);
    }

    fn emit(&mut self, change: &ChangeSet) {
        if !change.should_emit() {
            return;
        }
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(change);
        }
    }
}
