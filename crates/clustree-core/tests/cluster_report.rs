//! Report emission for flat and hierarchical clusterings.
use std::sync::Arc;

use clustree_common::{Matrix, RealVector};
use clustree_core::{
    BaseModel, Cluster, Clustering, EmModel, GroupRef, IdGroup, ItemId, MeanModel,
    MinMaxNormalization, TextWriterConfig, TextWriterStream,
};

fn group(ids: &[u32]) -> GroupRef {
    ids.iter().copied().map(ItemId).collect::<IdGroup>().into_ref()
}

fn em_model() -> EmModel {
    EmModel::new(RealVector::from([0.5, 0.5]), Matrix::identity(2))
}

#[test]
fn hierarchical_report_lists_relations() {
    let mut tree = Clustering::hierarchical("tree");
    let root = tree.add_cluster(|id| Cluster::new(id, group(&[1, 2, 3])).with_name("root"));
    let left = tree.add_cluster(|id| Cluster::new(id, group(&[1, 2])).with_name("left"));
    let right = tree.add_cluster(|id| Cluster::new(id, group(&[3])).with_model(BaseModel));
    tree.add_edge(root, left).unwrap();
    tree.add_edge(root, right).unwrap();

    let mut out = TextWriterStream::with_config(
        String::new(),
        TextWriterConfig {
            include_model: false,
            ..Default::default()
        },
    );
    tree.write_report(&mut out).unwrap();
    let text = out.finish().unwrap();

    let expected = "\
# Clustering: tree (3 clusters)
# Cluster: root
# Class: Cluster<none>
# Size: 3
# Parents: 
# Children: left, Cluster
# Cluster: left
# Class: Cluster<none>
# Size: 2
# Parents: root
# Children: 
# Cluster: Cluster
# Class: Cluster<BaseModel>
# Size: 1
# Parents: root
# Children: 
";
    assert_eq!(text, expected);
}

#[test]
fn flat_report_has_no_relation_lines() {
    let mut flat = Clustering::new("flat");
    flat.add_cluster(|id| {
        Cluster::new(id, group(&[7]))
            .with_model(MeanModel::new(RealVector::from([0.0, 1.0])))
    });

    let norm = MinMaxNormalization::new(vec![0.0, 0.0], vec![10.0, 4.0]).unwrap();
    let mut out = TextWriterStream::new(String::new()).with_normalization(Arc::new(norm));
    flat.write_report(&mut out).unwrap();
    let text = out.finish().unwrap();

    assert!(!text.contains("Parents"));
    assert!(text.contains("# Cluster: MeanCluster\n"));
    assert!(text.contains("# Class: Cluster<MeanModel>\n"));
    assert!(text.contains("# Mean: 0 4\n"));
}

#[test]
fn model_failure_does_not_abort_report() {
    let mut flat = Clustering::new("flat");
    let id = flat.add_cluster(|id| Cluster::new(id, group(&[1, 2])).with_model(em_model()));

    // three-dimensional normalization cannot restore a two-dimensional mean
    let norm = MinMaxNormalization::new(vec![0.0; 3], vec![1.0; 3]).unwrap();
    let mut out = TextWriterStream::new(String::new()).with_normalization(Arc::new(norm));
    flat.get(id).unwrap().write_report(&flat, &mut out).unwrap();
    let text = out.finish().unwrap();

    assert!(text.starts_with("# Cluster: EMCluster\n# Class: Cluster<EmModel>\n# Size: 2\n"));
    assert!(!text.contains("Covariance"));
    assert!(text.contains(
        "# Model: cannot restore feature values: vector has 2 dimensions but the normalization expects 3\n"
    ));
}

#[test]
fn em_model_fragment_is_appended() {
    let mut flat = Clustering::new("flat");
    flat.add_cluster(|id| Cluster::new(id, group(&[1])).with_name("gauss").with_model(em_model()));

    let mut out = TextWriterStream::with_config(String::new(), TextWriterConfig::plain());
    flat.write_report(&mut out).unwrap();
    let text = out.finish().unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines[1], "Cluster: gauss");
    assert!(lines[4].starts_with("Model class: "));
    assert_eq!(lines[5], "Mean: 0.5 0.5");
    assert_eq!(lines[6], "Covariance Matrix: [[1, 0], [0, 1]]");
}
