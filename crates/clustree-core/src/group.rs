//! Group references: the item sets clusters are built over.
//!
//! A cluster never owns its items. It holds a [`GroupRef`] and forwards
//! membership queries, so several clusters (or several clusterings) may
//! share one group.

use std::fmt::Debug;
use std::sync::Arc;

use clustree_common::ItemId;
use rustc_hash::FxHashSet;

/// Size/membership/iteration contract of an externally owned item set.
pub trait ItemGroup: Debug + Send + Sync {
    fn size(&self) -> usize;

    /// Iteration order is implementation defined but stable within one pass.
    fn iter(&self) -> Box<dyn Iterator<Item = ItemId> + '_>;

    fn ids(&self) -> FxHashSet<ItemId> {
        self.iter().collect()
    }

    fn contains(&self, id: ItemId) -> bool {
        self.iter().any(|candidate| candidate == id)
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Shared, non-owning handle held by clusters.
pub type GroupRef = Arc<dyn ItemGroup>;

/// Duplicate-free list of item ids, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct IdGroup {
    ids: Vec<ItemId>,
    members: FxHashSet<ItemId>,
}

impl IdGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when `id` was already a member.
    pub fn insert(&mut self, id: ItemId) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        if !self.members.remove(&id) {
            return false;
        }
        self.ids.retain(|&member| member != id);
        true
    }

    pub fn as_slice(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn into_ref(self) -> GroupRef {
        Arc::new(self)
    }
}

impl FromIterator<ItemId> for IdGroup {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        let mut group = IdGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl PartialEq for IdGroup {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for IdGroup {}

impl ItemGroup for IdGroup {
    fn size(&self) -> usize {
        self.ids.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = ItemId> + '_> {
        Box::new(self.ids.iter().copied())
    }

    fn ids(&self) -> FxHashSet<ItemId> {
        self.members.clone()
    }

    fn contains(&self, id: ItemId) -> bool {
        self.members.contains(&id)
    }
}
