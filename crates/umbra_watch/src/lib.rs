//! Umbra Style-Resource Tracker
//!
//! Answers one question continuously: which style resources were created,
//! updated, removed, or merely relocated since the last check? The tracker
//! stays correct while the tree mutates in batches, while encapsulation
//! boundaries come and go, and while element types are declared long after
//! the elements were inserted.
//!
//! - **Mutation Classifier**: reconciles one raw batch into a disjoint
//!   created / updated / removed / moved [`ChangeSet`]
//! - **Boundary Observer Manager**: one watcher per encapsulation boundary
//!   host, armed lazily on discovery
//! - **Type Resolver**: groups elements of not-yet-defined types and
//!   delivers each group exactly once when the type becomes defined
//! - **Watch Session**: the owning start / stop / pump controller
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use umbra_dom::Document;
//! use umbra_watch::{StyleHooks, WatchSession};
//!
//! fn manages(doc: &Document, node: umbra_dom::NodeId) -> bool {
//!     doc.tag(node) == Some("style")
//! }
//!
//! let mut doc = Document::new();
//! let body = doc.create_element("body");
//! doc.append_child(doc.root(), body);
//!
//! let seen = Rc::new(RefCell::new(0usize));
//! let sink = seen.clone();
//!
//! let mut session = WatchSession::new(StyleHooks {
//!     should_manage_style: manages,
//! });
//! session.start_watching(&mut doc, move |change| {
//!     *sink.borrow_mut() += change.created.len();
//! });
//!
//! let style = doc.create_element("style");
//! doc.append_child(body, style);
//! session.pump(&mut doc);
//!
//! assert_eq!(*seen.borrow(), 1);
//! ```

pub mod boundary;
pub mod changeset;
pub mod classifier;
pub mod resolver;
pub mod session;

pub use boundary::BoundaryObservers;
pub use changeset::{ChangeSet, StyleKind, StyleResource};
pub use resolver::{ResolvedGroup, TypeResolver};
pub use session::{StyleHooks, WatchSession};
