//! Cluster entities.
//!
//! A [`Cluster`] is a group reference plus optional name, model and
//! hierarchy participation. It forwards membership queries to its group and
//! graph queries to its hierarchy; it owns neither.
//!
//! Hierarchy bookkeeping uses the cluster's own [`ClusterId`] node handle,
//! fixed at construction. Without a hierarchy handle the cluster is flat
//! and every graph query answers false/0/empty.

use std::borrow::Cow;

use clustree_common::{ClusterId, ItemId, ReportError};
use rustc_hash::FxHashSet;

use crate::group::GroupRef;
use crate::hierarchy::{Hierarchy, HierarchyRef};
use crate::model::Model;
use crate::report::ReportSink;

/// Label used when a cluster has neither a name nor a model.
pub const DEFAULT_CLUSTER_LABEL: &str = "Cluster";

/// Resolves cluster handles to display names for reports.
pub trait ClusterNames {
    fn display_name(&self, id: ClusterId) -> Option<Cow<'_, str>>;
}

#[derive(Debug)]
pub struct Cluster {
    node: ClusterId,
    db_id: Option<u32>,
    name: Option<String>,
    group: GroupRef,
    model: Option<Box<dyn Model>>,
    hierarchy: Option<HierarchyRef>,
}

impl Cluster {
    /// Flat, unnamed cluster without a model.
    pub fn new(node: ClusterId, group: GroupRef) -> Self {
        Self {
            node,
            db_id: None,
            name: None,
            group,
            model: None,
            hierarchy: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_model(mut self, model: impl Model + 'static) -> Self {
        self.model = Some(Box::new(model));
        self
    }

    pub fn with_db_id(mut self, db_id: u32) -> Self {
        self.db_id = Some(db_id);
        self
    }

    /// Join an externally managed hierarchy, registering this node in it.
    pub fn with_hierarchy(mut self, hierarchy: HierarchyRef) -> Self {
        self.set_hierarchy(hierarchy);
        self
    }

    /// Build a private hierarchy from explicit relation lists.
    ///
    /// The lists are copied; later changes to them are not observed.
    pub fn with_relations(mut self, children: &[ClusterId], parents: &[ClusterId]) -> Self {
        self.hierarchy = Some(Hierarchy::from_relations(self.node, children, parents).into_shared());
        self
    }

    pub fn node(&self) -> ClusterId {
        self.node
    }

    pub fn db_id(&self) -> Option<u32> {
        self.db_id
    }

    pub fn set_db_id(&mut self, db_id: u32) {
        self.db_id = Some(db_id);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn group(&self) -> &GroupRef {
        &self.group
    }

    pub fn set_group(&mut self, group: GroupRef) {
        self.group = group;
    }

    pub fn model(&self) -> Option<&dyn Model> {
        self.model.as_deref()
    }

    /// The model, if it is an `M`.
    pub fn model_as<M: Model + 'static>(&self) -> Option<&M> {
        self.model()?.as_any().downcast_ref::<M>()
    }

    pub fn set_model(&mut self, model: Option<Box<dyn Model>>) {
        self.model = model;
    }

    pub fn take_model(&mut self) -> Option<Box<dyn Model>> {
        self.model.take()
    }

    pub fn hierarchy(&self) -> Option<&HierarchyRef> {
        self.hierarchy.as_ref()
    }

    pub fn set_hierarchy(&mut self, hierarchy: HierarchyRef) {
        hierarchy.write().add_node(self.node);
        self.hierarchy = Some(hierarchy);
    }

    /// Detach from the hierarchy. The graph itself is left untouched.
    pub fn clear_hierarchy(&mut self) -> Option<HierarchyRef> {
        self.hierarchy.take()
    }

    /* ───────────────────────── group delegation ───────────────────────── */

    pub fn size(&self) -> usize {
        self.group.size()
    }

    pub fn ids(&self) -> FxHashSet<ItemId> {
        self.group.ids()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.group.iter()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.group.contains(id)
    }

    /* ─────────────────────── hierarchy delegation ─────────────────────── */

    pub fn is_hierarchical(&self) -> bool {
        self.hierarchy.is_some()
    }

    pub fn num_parents(&self) -> usize {
        self.hierarchy
            .as_ref()
            .map_or(0, |h| h.read().num_parents(self.node))
    }

    pub fn num_children(&self) -> usize {
        self.hierarchy
            .as_ref()
            .map_or(0, |h| h.read().num_children(self.node))
    }

    /// Direct parents in registration order.
    pub fn parents(&self) -> Vec<ClusterId> {
        self.hierarchy
            .as_ref()
            .map(|h| h.read().parents(self.node).to_vec())
            .unwrap_or_default()
    }

    /// Direct children in registration order.
    pub fn children(&self) -> Vec<ClusterId> {
        self.hierarchy
            .as_ref()
            .map(|h| h.read().children(self.node).to_vec())
            .unwrap_or_default()
    }

    /// Extend `seed` with all transitive children; `seed` unchanged when flat.
    pub fn descendants<C: Extend<ClusterId>>(&self, seed: C) -> C {
        match &self.hierarchy {
            Some(h) => h.read().descendants(self.node, seed),
            None => seed,
        }
    }

    /// Extend `seed` with all transitive parents; `seed` unchanged when flat.
    pub fn ancestors<C: Extend<ClusterId>>(&self, seed: C) -> C {
        match &self.hierarchy {
            Some(h) => h.read().ancestors(self.node, seed),
            None => seed,
        }
    }

    pub fn descendant_set(&self) -> FxHashSet<ClusterId> {
        self.descendants(FxHashSet::default())
    }

    pub fn ancestor_set(&self) -> FxHashSet<ClusterId> {
        self.ancestors(FxHashSet::default())
    }

    /* ───────────────────────────── labels ─────────────────────────────── */

    pub fn suggested_label(&self) -> Cow<'_, str> {
        match &self.model {
            Some(model) => model.suggested_label(),
            None => Cow::Borrowed(DEFAULT_CLUSTER_LABEL),
        }
    }

    pub fn name_or_label(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => self.suggested_label(),
        }
    }

    /// Runtime type of the cluster/model pairing, e.g. `Cluster<EmModel>`.
    pub fn class_name(&self) -> String {
        let model = self.model.as_ref().map_or("none", |m| m.type_name());
        let short = model.rsplit("::").next().unwrap_or(model);
        format!("Cluster<{short}>")
    }

    /* ───────────────────────────── report ─────────────────────────────── */

    /// Write the cluster's metadata (not its members) to `out`.
    ///
    /// A model fragment that cannot be produced is logged and noted in the
    /// output; only sink failures abort the report.
    pub fn write_report(
        &self,
        names: &dyn ClusterNames,
        out: &mut dyn ReportSink,
    ) -> Result<(), ReportError> {
        out.comment_print_ln(&format!("Cluster: {}", self.name_or_label()))?;
        out.comment_print_ln(&format!("Class: {}", self.class_name()))?;
        out.comment_print_ln(&format!("Size: {}", self.size()))?;

        if self.is_hierarchical() {
            write_relations(out, "Parents: ", &self.parents(), names)?;
            write_relations(out, "Children: ", &self.children(), names)?;
        }

        if !out.include_model() {
            return Ok(());
        }
        let Some(writer) = self.model.as_deref().and_then(|m| m.as_text_writeable()) else {
            return Ok(());
        };
        match writer.write_to_text(out) {
            Ok(()) => Ok(()),
            Err(err @ ReportError::Format(_)) => Err(err),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(cluster = %self.node, error = %err, "model report fragment skipped");

                out.comment_print_ln(&format!("Model: {err}"))?;
                Ok(())
            }
        }
    }
}

fn write_relations(
    out: &mut dyn ReportSink,
    heading: &str,
    ids: &[ClusterId],
    names: &dyn ClusterNames,
) -> Result<(), ReportError> {
    out.comment_print(heading)?;
    for (i, &id) in ids.iter().enumerate() {
        if i > 0 {
            out.comment_print(", ")?;
        }
        match names.display_name(id) {
            Some(name) => out.comment_print(&name)?,
            None => out.comment_print(&id.to_string())?,
        }
    }
    out.comment_end_line()?;
    Ok(())
}
