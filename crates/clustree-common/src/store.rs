//! Storage contract consumed by the result projections.
//!
//! The storage engine itself is external; the projections only need
//! "look up the value of association `key` for item `id`". [`MemoryStore`]
//! is a plain in-memory backing used by algorithms that keep their per-item
//! results on the heap, and by tests.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use crate::ItemId;

/// Named, typed key of a per-item association (e.g. `"lof-score"` → `f64`).
pub struct AssociationKey<T> {
    name: Cow<'static, str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AssociationKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _marker: PhantomData,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for AssociationKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for AssociationKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssociationKey")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> PartialEq for AssociationKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for AssociationKey<T> {}

/// Read access to previously computed per-item associations.
pub trait AssociationStore {
    /// Value of `key` for `id`, or `None` when nothing was recorded.
    fn association<T: Clone + 'static>(&self, key: &AssociationKey<T>, id: ItemId) -> Option<T>;
}

impl<S: AssociationStore + ?Sized> AssociationStore for &S {
    fn association<T: Clone + 'static>(&self, key: &AssociationKey<T>, id: ItemId) -> Option<T> {
        (**self).association(key, id)
    }
}

type Slot = Box<dyn Any + Send + Sync>;

/// Heap-backed association table, keyed by association name then item.
#[derive(Default)]
pub struct MemoryStore {
    associations: FxHashMap<String, FxHashMap<ItemId, Slot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the value of `key` for `id`.
    pub fn set_association<T: Send + Sync + 'static>(
        &mut self,
        key: &AssociationKey<T>,
        id: ItemId,
        value: T,
    ) {
        self.associations
            .entry(key.name().to_owned())
            .or_default()
            .insert(id, Box::new(value));
    }

    /// Returns whether a value was present.
    pub fn remove_association<T>(&mut self, key: &AssociationKey<T>, id: ItemId) -> bool {
        self.associations
            .get_mut(key.name())
            .is_some_and(|slots| slots.remove(&id).is_some())
    }

    /// Items that have a value recorded for `key`, in no particular order.
    pub fn ids_for<T>(&self, key: &AssociationKey<T>) -> Vec<ItemId> {
        self.associations
            .get(key.name())
            .map(|slots| slots.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of recorded values across all associations.
    pub fn len(&self) -> usize {
        self.associations.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssociationStore for MemoryStore {
    /// A value stored under the same name but with a different type
    /// resolves to `None`.
    fn association<T: Clone + 'static>(&self, key: &AssociationKey<T>, id: ItemId) -> Option<T> {
        self.associations
            .get(key.name())?
            .get(&id)?
            .downcast_ref::<T>()
            .cloned()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.associations.keys().collect();
        names.sort();
        f.debug_struct("MemoryStore")
            .field("associations", &names)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORE: AssociationKey<f64> = AssociationKey::new("score");

    #[test]
    fn set_then_get() {
        let mut store = MemoryStore::new();
        store.set_association(&SCORE, ItemId(1), 0.75);
        assert_eq!(store.association(&SCORE, ItemId(1)), Some(0.75));
        assert_eq!(store.association(&SCORE, ItemId(2)), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn type_mismatch_resolves_to_none() {
        let mut store = MemoryStore::new();
        store.set_association(&SCORE, ItemId(1), 0.75);
        let as_text: AssociationKey<String> = AssociationKey::named("score");
        assert_eq!(store.association(&as_text, ItemId(1)), None);
    }

    #[test]
    fn replace_and_remove() {
        let mut store = MemoryStore::new();
        store.set_association(&SCORE, ItemId(4), 1.0);
        store.set_association(&SCORE, ItemId(4), 2.0);
        assert_eq!(store.association(&SCORE, ItemId(4)), Some(2.0));
        assert!(store.remove_association(&SCORE, ItemId(4)));
        assert!(!store.remove_association(&SCORE, ItemId(4)));
        assert!(store.is_empty());
    }

    #[test]
    fn reads_through_references() {
        let mut store = MemoryStore::new();
        store.set_association(&SCORE, ItemId(9), 3.0);
        let borrowed = &store;
        assert_eq!(borrowed.association(&SCORE, ItemId(9)), Some(3.0));
    }
}
