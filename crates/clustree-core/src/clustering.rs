//! Owning result set of clusters.

use std::borrow::Cow;
use std::sync::Arc;

use clustree_common::{ClusterId, ReportError};
use thiserror::Error;

use crate::cluster::{Cluster, ClusterNames};
use crate::hierarchy::{Hierarchy, HierarchyRef};
use crate::report::ReportSink;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusteringError {
    #[error("clustering has no shared hierarchy")]
    NotHierarchical,
    #[error("no cluster {0} in this clustering")]
    UnknownCluster(ClusterId),
    #[error("cluster {0} does not share the clustering's hierarchy")]
    ForeignHierarchy(ClusterId),
}

/// Arena of clusters produced by one algorithm run.
///
/// Cluster `i` lives at `ClusterId(i)`. A hierarchical clustering owns one
/// shared [`Hierarchy`]; clusters added without a hierarchy of their own
/// are attached to it.
#[derive(Debug)]
pub struct Clustering {
    name: String,
    clusters: Vec<Cluster>,
    hierarchy: Option<HierarchyRef>,
}

impl Clustering {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clusters: Vec::new(),
            hierarchy: None,
        }
    }

    pub fn hierarchical(name: impl Into<String>) -> Self {
        Self {
            hierarchy: Some(Hierarchy::new().into_shared()),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hierarchy(&self) -> Option<&HierarchyRef> {
        self.hierarchy.as_ref()
    }

    /// Handle the next added cluster will receive.
    ///
    /// # Panics
    ///
    /// If the arena already holds `u32::MAX + 1` clusters.
    pub fn next_id(&self) -> ClusterId {
        let index = u32::try_from(self.clusters.len()).expect("cluster arena exceeds u32 ids");
        ClusterId::new(index)
    }

    /// Insert the cluster built by `build` for the offered handle.
    ///
    /// # Panics
    ///
    /// If the built cluster carries a different node handle.
    pub fn add_cluster(&mut self, build: impl FnOnce(ClusterId) -> Cluster) -> ClusterId {
        let id = self.next_id();
        let mut cluster = build(id);
        assert_eq!(
            cluster.node(),
            id,
            "cluster built for node {} cannot be stored at {}",
            cluster.node(),
            id
        );
        if let Some(shared) = &self.hierarchy {
            if !cluster.is_hierarchical() {
                cluster.set_hierarchy(shared.clone());
            }
        }
        self.clusters.push(cluster);
        id
    }

    /// Link two stored clusters in the shared hierarchy.
    ///
    /// Both clusters must hold the shared hierarchy; a cluster carrying a
    /// private relation snapshot is rejected.
    pub fn add_edge(&mut self, parent: ClusterId, child: ClusterId) -> Result<bool, ClusteringError> {
        let hierarchy = self
            .hierarchy
            .as_ref()
            .ok_or(ClusteringError::NotHierarchical)?;
        for id in [parent, child] {
            let cluster = self.get(id).ok_or(ClusteringError::UnknownCluster(id))?;
            if !cluster.hierarchy().is_some_and(|h| Arc::ptr_eq(h, hierarchy)) {
                return Err(ClusteringError::ForeignHierarchy(id));
            }
        }
        Ok(hierarchy.write().add_edge(parent, child))
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.as_index())
    }

    pub fn get_mut(&mut self, id: ClusterId) -> Option<&mut Cluster> {
        self.clusters.get_mut(id.as_index())
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Clusters without parents, in insertion order.
    pub fn top_level(&self) -> Vec<&Cluster> {
        self.clusters
            .iter()
            .filter(|c| c.num_parents() == 0)
            .collect()
    }

    /// Look up handles, skipping ones that belong to no stored cluster.
    pub fn resolve(&self, ids: &[ClusterId]) -> Vec<&Cluster> {
        ids.iter().filter_map(|&id| self.get(id)).collect()
    }

    pub fn write_report(&self, out: &mut dyn ReportSink) -> Result<(), ReportError> {
        out.comment_print_ln(&format!(
            "Clustering: {} ({} clusters)",
            self.name,
            self.clusters.len()
        ))?;
        for cluster in &self.clusters {
            cluster.write_report(self, out)?;
        }
        Ok(())
    }
}

impl ClusterNames for Clustering {
    fn display_name(&self, id: ClusterId) -> Option<Cow<'_, str>> {
        self.get(id).map(Cluster::name_or_label)
    }
}
