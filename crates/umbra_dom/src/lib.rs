//! Umbra Host Document Model
//!
//! The mutable, hierarchically-encapsulated document tree that the watch
//! session observes:
//!
//! - **Node tree**: arena-backed nodes with stable, non-owning identity
//! - **Encapsulation boundaries**: isolated nested sub-trees anchored to a
//!   host element; observation never crosses a boundary
//! - **Mutation observers**: per-scope record queues drained in batches
//! - **Type registry**: asynchronously-declared element types with an
//!   optional native "now defined" signal
//!
//! # Example
//!
//! ```rust
//! use umbra_dom::{Document, ObserveOptions};
//!
//! let mut doc = Document::new();
//! let body = doc.create_element("body");
//! doc.append_child(doc.root(), body);
//!
//! let observer = doc.observe(doc.root(), ObserveOptions::tree());
//! let style = doc.create_element("style");
//! doc.append_child(body, style);
//!
//! let batch = doc.take_records(observer);
//! assert_eq!(batch.len(), 1);
//! ```

pub mod document;
pub mod node;
pub mod observer;
pub mod registry;

pub use document::Document;
pub use node::{Attr, ElementData, Node, NodeData, NodeId};
pub use observer::{MutationRecord, ObserveOptions, ObserverId, RecordKind};
pub use registry::{HostCapabilities, RegistryError, TypeRegistry};
