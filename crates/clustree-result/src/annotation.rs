//! Labeled per-item annotations resolved from a storage engine.
//!
//! An [`AnnotationsFromStore`] is a registry of `(label, lookup)` pairs.
//! Registration order is output order, labels need not be unique, and every
//! call goes back to the store.

use std::fmt;
use std::sync::Arc;

use clustree_common::{AssociationKey, AssociationStore, ItemId};

/// One labeled slot of an item's annotations. `value` is `None` when the
/// store has nothing recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation<T> {
    pub label: String,
    pub value: Option<T>,
}

/// `label=value`, or `label=` for a missing value.
impl<T: fmt::Display> fmt::Display for Annotation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={value}", self.label),
            None => write!(f, "{}=", self.label),
        }
    }
}

pub trait AnnotationResult<T> {
    fn annotations(&self, id: ItemId) -> Vec<Annotation<T>>;
}

type Lookup<S, T> = Box<dyn Fn(&S, ItemId) -> Option<T> + Send + Sync>;

pub struct AnnotationsFromStore<S, T> {
    store: Arc<S>,
    registrations: Vec<(String, Lookup<S, T>)>,
}

impl<S, T> AnnotationsFromStore<S, T>
where
    S: AssociationStore + 'static,
    T: 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            registrations: Vec::new(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Append a lookup of `key`. Labels are not checked for uniqueness.
    pub fn register(&mut self, label: impl Into<String>, key: AssociationKey<T>) -> &mut Self
    where
        T: Clone,
    {
        let lookup: Lookup<S, T> =
            Box::new(move |store: &S, id: ItemId| store.association(&key, id));
        self.registrations.push((label.into(), lookup));
        self
    }

    /// Append a lookup of a differently typed key, converting its values.
    ///
    /// Lets heterogeneous associations share one projection, typically
    /// with `T = AnnotationValue`.
    pub fn register_with<U>(&mut self, label: impl Into<String>, key: AssociationKey<U>) -> &mut Self
    where
        U: Clone + Into<T> + 'static,
    {
        let lookup: Lookup<S, T> =
            Box::new(move |store: &S, id: ItemId| store.association(&key, id).map(Into::into));
        self.registrations.push((label.into(), lookup));
        self
    }

    /// One annotation per registration, in registration order.
    pub fn annotations_for(&self, id: ItemId) -> Vec<Annotation<T>> {
        self.registrations
            .iter()
            .map(|(label, lookup)| Annotation {
                label: label.clone(),
                value: lookup(self.store.as_ref(), id),
            })
            .collect()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<S, T> AnnotationResult<T> for AnnotationsFromStore<S, T>
where
    S: AssociationStore + 'static,
    T: 'static,
{
    fn annotations(&self, id: ItemId) -> Vec<Annotation<T>> {
        self.annotations_for(id)
    }
}

impl<S: fmt::Debug, T> fmt::Debug for AnnotationsFromStore<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = self.registrations.iter().map(|(l, _)| l).collect();
        f.debug_struct("AnnotationsFromStore")
            .field("store", &self.store)
            .field("labels", &labels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clustree_common::{AnnotationValue, MemoryStore};

    const SCORE: AssociationKey<f64> = AssociationKey::new("score");
    const LABEL: AssociationKey<String> = AssociationKey::new("label");

    fn store() -> Arc<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set_association(&SCORE, ItemId(1), 0.9);
        store.set_association(&SCORE, ItemId(2), 0.1);
        store.set_association(&LABEL, ItemId(1), "outlier".to_string());
        Arc::new(store)
    }

    #[test]
    fn one_slot_per_registration_even_when_absent() {
        let mut annotations = AnnotationsFromStore::new(store());
        annotations.register("Score", SCORE).register("Again", SCORE);
        let for_two = annotations.annotations_for(ItemId(2));
        assert_eq!(
            for_two,
            vec![
                Annotation { label: "Score".into(), value: Some(0.1) },
                Annotation { label: "Again".into(), value: Some(0.1) },
            ]
        );
        let missing = annotations.annotations_for(ItemId(3));
        assert_eq!(missing.len(), 2);
        assert!(missing.iter().all(|a| a.value.is_none()));
    }

    #[test]
    fn heterogeneous_keys_share_a_value_type() {
        let mut annotations: AnnotationsFromStore<_, AnnotationValue> =
            AnnotationsFromStore::new(store());
        annotations
            .register_with("Score", SCORE)
            .register_with("Label", LABEL);
        assert_eq!(annotations.labels().collect::<Vec<_>>(), ["Score", "Label"]);

        let for_one = annotations.annotations_for(ItemId(1));
        assert_eq!(for_one[0].value, Some(AnnotationValue::Number(0.9)));
        assert_eq!(for_one[1].value, Some(AnnotationValue::Text("outlier".into())));

        let for_two = annotations.annotations(ItemId(2));
        assert_eq!(for_two[1].label, "Label");
        assert_eq!(for_two[1].value, None);
        assert_eq!(for_two[1].to_string(), "Label=");
        assert_eq!(for_two[0].to_string(), "Score=0.1");
    }

    #[test]
    fn empty_projection() {
        let annotations: AnnotationsFromStore<MemoryStore, f64> =
            AnnotationsFromStore::new(store());
        assert!(annotations.is_empty());
        assert!(annotations.annotations_for(ItemId(1)).is_empty());
    }
}
