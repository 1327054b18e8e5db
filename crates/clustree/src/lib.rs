//! Meta crate that re-exports the clustree building blocks. Depend on this
//! crate and opt into layers via feature flags; the underlying crates stay
//! reachable for deeper integration.

#[cfg(feature = "common")]
pub use clustree_common as common;

#[cfg(feature = "core")]
pub use clustree_core as clusters;

#[cfg(feature = "result")]
pub use clustree_result as result;

#[cfg(feature = "common")]
pub use clustree_common::{
    AnnotationValue, AssociationKey, AssociationStore, ClusterId, ItemId, Matrix, MemoryStore,
    RealVector, ReportError,
};

#[cfg(feature = "core")]
pub use clustree_core::{
    Cluster, Clustering, ClusteringError, GroupRef, Hierarchy, HierarchyRef, IdGroup, ItemGroup,
    Model, ReportSink, TextWriteable, TextWriterConfig, TextWriterStream,
};

#[cfg(feature = "result")]
pub use clustree_result::{
    Annotation, AnnotationResult, AnnotationsFromStore, OrderingFromMap, OrderingResult,
    SortDirection,
};
