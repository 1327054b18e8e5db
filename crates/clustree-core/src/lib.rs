//! Cluster hierarchy layer.
//!
//! Clusters reference externally owned item groups, optionally carry a
//! descriptive model, and optionally participate in a shared parent/child
//! hierarchy. A [`Clustering`] owns the clusters of one result.

pub mod cluster;
pub mod clustering;
pub mod group;
pub mod hierarchy;
pub mod model;
pub mod normalization;
pub mod report;

pub use cluster::{Cluster, ClusterNames, DEFAULT_CLUSTER_LABEL};
pub use clustering::{Clustering, ClusteringError};
pub use group::{GroupRef, IdGroup, ItemGroup};
pub use hierarchy::{Hierarchy, HierarchyRef};
pub use model::{BaseModel, EmModel, MeanModel, Model};
pub use normalization::{IdentityNormalization, MinMaxNormalization, Normalization};
pub use report::{ReportSink, TextWriteable, TextWriterConfig, TextWriterStream};

pub use clustree_common::{ClusterId, ItemId};
