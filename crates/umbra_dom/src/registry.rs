//! Custom-type registry
//!
//! Element types can be declared after elements of that type are already in
//! the tree. The registry records definitions, answers definedness queries,
//! and - on hosts that support it - delivers a single-shot "now defined"
//! signal per subscribed type name.

use rustc_hash::FxHashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("type `{0}` is already defined")]
    AlreadyDefined(String),
}

/// What the host platform can do.
///
/// Both capabilities default to available; degraded hosts flip them off and
/// the consumers fall back (polling) or skip (collection) instead of failing.
#[derive(Clone, Copy, Debug)]
pub struct HostCapabilities {
    /// Native single-shot "type now defined" signal
    pub when_defined: bool,
    /// Enumeration of not-yet-defined elements
    pub undefined_query: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            when_defined: true,
            undefined_query: true,
        }
    }
}

/// Registry of custom element types
#[derive(Debug, Default)]
pub struct TypeRegistry {
    defined: FxHashSet<String>,
    watched: FxHashSet<String>,
    resolved: Vec<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a type. A type can be defined exactly once.
    pub fn define(&mut self, name: &str) -> Result<(), RegistryError> {
        if !self.defined.insert(name.to_string()) {
            return Err(RegistryError::AlreadyDefined(name.to_string()));
        }
        if self.watched.remove(name) {
            self.resolved.push(name.to_string());
        }
        tracing::debug!(name, "type defined");
        Ok(())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }

    /// Subscribe to the native "now defined" signal for `name`. Single-shot:
    /// the signal fires once, at definition time. Subscribing to an
    /// already-defined name fires immediately.
    pub fn subscribe(&mut self, name: &str) {
        if self.is_defined(name) {
            self.resolved.push(name.to_string());
        } else {
            self.watched.insert(name.to_string());
        }
    }

    /// Drain type names that became defined while subscribed
    pub fn take_resolved(&mut self) -> Vec<String> {
        std::mem::take(&mut self.resolved)
    }
}
