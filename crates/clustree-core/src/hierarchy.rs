//! Parent/child graph between clusters.
//!
//! The hierarchy is an arena keyed by [`ClusterId`]: each node stores its
//! parents and children in registration order. It is a general directed
//! graph (several parents, several children, cycles allowed), so every
//! transitive query tracks visited nodes while it walks.
//!
//! One `Hierarchy` is usually shared by all clusters of a result through a
//! [`HierarchyRef`]; an edge added through any handle is visible to every
//! cluster holding it. Mutation is expected during construction only and
//! must be serialized by the owning algorithm.

use std::collections::VecDeque;
use std::sync::Arc;

use clustree_common::ClusterId;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Shared handle to a hierarchy.
pub type HierarchyRef = Arc<RwLock<Hierarchy>>;

#[derive(Debug, Clone, Default)]
struct Links {
    parents: SmallVec<[ClusterId; 2]>,
    children: SmallVec<[ClusterId; 4]>,
}

#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: FxHashMap<ClusterId, Links>,
    edge_count: usize,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-node hierarchy built from explicit relation lists.
    ///
    /// The slices are copied onto `node` as given, duplicates and self
    /// references included. The other endpoints receive the reverse link
    /// once each; `node` never gains a reverse link to itself.
    pub fn from_relations(node: ClusterId, children: &[ClusterId], parents: &[ClusterId]) -> Self {
        let mut hierarchy = Self::new();
        hierarchy.nodes.insert(
            node,
            Links {
                parents: SmallVec::from_slice(parents),
                children: SmallVec::from_slice(children),
            },
        );
        for &child in children.iter().filter(|&&child| child != node) {
            let links = hierarchy.nodes.entry(child).or_default();
            if !links.parents.contains(&node) {
                links.parents.push(node);
            }
        }
        for &parent in parents.iter().filter(|&&parent| parent != node) {
            let links = hierarchy.nodes.entry(parent).or_default();
            if !links.children.contains(&node) {
                links.children.push(node);
            }
        }
        hierarchy.edge_count = children.len() + parents.len();
        hierarchy
    }

    pub fn into_shared(self) -> HierarchyRef {
        Arc::new(RwLock::new(self))
    }

    /// Returns `true` if the node was not yet known.
    pub fn add_node(&mut self, id: ClusterId) -> bool {
        let known = self.nodes.contains_key(&id);
        if !known {
            self.nodes.insert(id, Links::default());
        }
        !known
    }

    pub fn contains(&self, id: ClusterId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Add a `parent → child` edge, registering unknown endpoints.
    ///
    /// Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, parent: ClusterId, child: ClusterId) -> bool {
        let children = &mut self.nodes.entry(parent).or_default().children;
        if children.contains(&child) {
            return false;
        }
        children.push(child);
        self.nodes.entry(child).or_default().parents.push(parent);
        self.edge_count += 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(%parent, %child, "hierarchy edge added");

        true
    }

    /// Returns `false` if there was no such edge.
    pub fn remove_edge(&mut self, parent: ClusterId, child: ClusterId) -> bool {
        let Some(links) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let Some(pos) = links.children.iter().position(|&c| c == child) else {
            return false;
        };
        links.children.remove(pos);
        if let Some(links) = self.nodes.get_mut(&child) {
            links.parents.retain(|p| *p != parent);
        }
        self.edge_count -= 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(%parent, %child, "hierarchy edge removed");

        true
    }

    pub fn num_parents(&self, id: ClusterId) -> usize {
        self.parents(id).len()
    }

    pub fn num_children(&self, id: ClusterId) -> usize {
        self.children(id).len()
    }

    /// Direct parents in registration order; empty for unknown nodes.
    pub fn parents(&self, id: ClusterId) -> &[ClusterId] {
        match self.nodes.get(&id) {
            Some(links) => &links.parents,
            None => &[],
        }
    }

    /// Direct children in registration order; empty for unknown nodes.
    pub fn children(&self, id: ClusterId) -> &[ClusterId] {
        match self.nodes.get(&id) {
            Some(links) => &links.children,
            None => &[],
        }
    }

    /// Extend `seed` with every node reachable from `id` over child edges.
    ///
    /// Breadth-first; `id` itself is never emitted (even on a cycle back
    /// to it) and every other reachable node is emitted exactly once.
    pub fn descendants<C: Extend<ClusterId>>(&self, id: ClusterId, seed: C) -> C {
        self.reachable(id, seed, |links| links.children.as_slice())
    }

    /// Extend `seed` with every node reachable from `id` over parent edges.
    pub fn ancestors<C: Extend<ClusterId>>(&self, id: ClusterId, seed: C) -> C {
        self.reachable(id, seed, |links| links.parents.as_slice())
    }

    /// Nodes without parents, ascending by id.
    pub fn roots(&self) -> Vec<ClusterId> {
        let mut roots: Vec<_> = self
            .nodes
            .iter()
            .filter(|(_, links)| links.parents.is_empty())
            .map(|(&id, _)| id)
            .collect();
        roots.sort_unstable();
        roots
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn reachable<C, F>(&self, start: ClusterId, mut out: C, next: F) -> C
    where
        C: Extend<ClusterId>,
        F: Fn(&Links) -> &[ClusterId],
    {
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut queue = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            let Some(links) = self.nodes.get(&id) else {
                continue;
            };
            for &neighbour in next(links) {
                if visited.insert(neighbour) {
                    out.extend(Some(neighbour));
                    queue.push_back(neighbour);
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(%start, reached = visited.len() - 1, "hierarchy traversal");

        out
    }
}
