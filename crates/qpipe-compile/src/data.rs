//! `PassData`, the context bag passes share.
//!
//! Two stores live side by side:
//! - a type-keyed map for typed results (one value per type), and
//! - a string-keyed JSON metadata map for loosely structured facts that are
//!   easy to log or print.
//!
//! ```
//! use qpipe_compile::PassData;
//!
//! #[derive(Debug, PartialEq)]
//! struct Budget(u32);
//!
//! let mut data = PassData::new();
//! data.insert(Budget(7));
//! data.set_metadata("target", "sv1");
//!
//! assert_eq!(data.get::<Budget>(), Some(&Budget(7)));
//! assert_eq!(data.metadata("target").and_then(|v| v.as_str()), Some("sv1"));
//! ```

use std::any::{Any, TypeId};
use std::fmt;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

/// Shared context passed through every pass of a pipeline.
#[derive(Default)]
pub struct PassData {
    typed: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
    metadata: Map<String, Value>,
}

impl PassData {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a typed value, replacing any previous value of that type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.typed.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a typed value.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.typed
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable typed value.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.typed
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a typed value.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.typed
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }

    /// Whether a value of type `T` is present.
    pub fn contains<T: Any>(&self) -> bool {
        self.typed.contains_key(&TypeId::of::<T>())
    }

    /// Set a metadata entry.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Get a metadata entry.
    pub fn metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// All metadata entries, in insertion order.
    pub fn metadata_map(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Whether both stores are empty.
    pub fn is_empty(&self) -> bool {
        self.typed.is_empty() && self.metadata.is_empty()
    }
}

impl fmt::Debug for PassData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassData")
            .field("typed_entries", &self.typed.len())
            .field("metadata", &self.metadata)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Stats {
        removed: usize,
    }

    #[test]
    fn test_typed_roundtrip() {
        let mut data = PassData::new();
        assert!(data.is_empty());

        data.insert(Stats { removed: 3 });
        assert!(data.contains::<Stats>());
        data.get_mut::<Stats>().unwrap().removed += 1;
        assert_eq!(data.remove::<Stats>(), Some(Stats { removed: 4 }));
        assert!(!data.contains::<Stats>());
    }

    #[test]
    fn test_insert_replaces_same_type() {
        let mut data = PassData::new();
        data.insert(1u32);
        data.insert(2u32);
        assert_eq!(data.get::<u32>(), Some(&2));
    }

    #[test]
    fn test_metadata_order() {
        let mut data = PassData::new();
        data.set_metadata("b", 1);
        data.set_metadata("a", 2);
        let keys: Vec<_> = data.metadata_map().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_debug_does_not_need_debug_values() {
        struct Opaque;
        let mut data = PassData::new();
        data.insert(Opaque);
        assert!(format!("{data:?}").contains("typed_entries: 1"));
    }
}
