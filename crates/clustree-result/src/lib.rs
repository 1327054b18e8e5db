//! Result projections over per-item analysis output.
//!
//! Algorithms store their per-item outputs (scores, labels, vectors) in an
//! [`AssociationStore`]. This crate turns those into two consumer-facing
//! views without copying the store: an [`OrderingResult`] ranks any subset
//! of items, and an [`AnnotationResult`] yields labeled values per item.

pub mod annotation;
pub mod ordering;

pub use annotation::{Annotation, AnnotationResult, AnnotationsFromStore};
pub use ordering::{KeyComparator, OrderingFromMap, OrderingResult, SortDirection};

pub use clustree_common::{AnnotationValue, AssociationKey, AssociationStore, ItemId, MemoryStore};
