use avm_core::errors::AvmError;
use avm_core::{LinkDescriptor, VersionEdge, VersionNode};
use avm_graph::VersionsGraph;

#[test]
fn node_registration_is_idempotent() {
    let graph = VersionsGraph::new();
    let node = VersionNode::new("V1").with_descriptor("Image", "1");

    let first = graph.add_node(node.clone());
    let second = graph.add_node(node);

    assert_eq!(first, second);
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn structurally_distinct_nodes_get_distinct_ids() {
    let graph = VersionsGraph::new();
    let v1 = graph.add_node(VersionNode::new("V1"));
    let v2 = graph.add_node(VersionNode::new("V2"));

    assert_ne!(v1, v2);
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn edge_registration_is_idempotent() {
    let graph = VersionsGraph::new();
    graph.add_node(VersionNode::new("V1"));
    graph.add_node(VersionNode::new("V2"));

    let edge = VersionEdge::new("V1", "V2", "patch_V1_V2")
        .with_link(LinkDescriptor::new("Image", "1", "2"));
    let first = graph.add_edge(edge.clone()).unwrap();
    let second = graph.add_edge(edge).unwrap();

    assert_eq!(first, second);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn lookup_round_trips_for_every_registered_name() {
    let graph = VersionsGraph::new();
    for name in ["V1", "V2", "V3"] {
        graph.add_node(VersionNode::new(name).with_descriptor("Study", "1"));
    }

    for name in ["V1", "V2", "V3"] {
        let id = graph.node_id(name).unwrap();
        assert_eq!(graph.node(id).name(), name);
    }
}

#[test]
fn name_lookup_is_case_sensitive() {
    let graph = VersionsGraph::new();
    graph.add_node(VersionNode::new("V1"));

    assert!(matches!(
        graph.node_id("v1"),
        Err(AvmError::Version(info)) if info.code == "unknown-version"
    ));
}

#[test]
fn unknown_name_lookup_reports_the_requested_name() {
    let graph = VersionsGraph::new();

    match graph.node_id("V99") {
        Err(AvmError::Version(info)) => {
            assert_eq!(info.code, "unknown-version");
            assert_eq!(info.context.get("name").map(String::as_str), Some("V99"));
        }
        other => panic!("expected unknown-version, got {other:?}"),
    }
}

#[test]
fn edge_with_unregistered_endpoint_is_a_contract_error() {
    let graph = VersionsGraph::new();
    graph.add_node(VersionNode::new("V1"));

    assert!(matches!(
        graph.add_edge(VersionEdge::new("V1", "V2", "patch_V1_V2")),
        Err(AvmError::Graph(info)) if info.code == "unregistered-endpoint"
    ));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn different_edge_on_a_connected_pair_is_rejected() {
    let graph = VersionsGraph::new();
    graph.add_node(VersionNode::new("V1"));
    graph.add_node(VersionNode::new("V2"));
    graph
        .add_edge(VersionEdge::new("V1", "V2", "patch_V1_V2"))
        .unwrap();

    let conflicting = VersionEdge::new("V1", "V2", "patch_V1_V2_bis").with_weight(2);
    assert!(matches!(
        graph.add_edge(conflicting),
        Err(AvmError::Graph(info)) if info.code == "duplicate-edge"
    ));
    assert_eq!(graph.edge_count(), 1);

    // the opposite direction is a distinct ordered pair
    graph
        .add_edge(VersionEdge::new("V2", "V1", "patch_V2_V1"))
        .unwrap();
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn edge_payload_survives_the_round_trip() {
    let graph = VersionsGraph::new();
    let v1 = graph.add_node(VersionNode::new("V1"));
    let v2 = graph.add_node(VersionNode::new("V2"));

    let edge = VersionEdge::new("V1", "V2", "patch_V1_V2")
        .with_weight(3)
        .with_link(LinkDescriptor::new("Mesh", "1", "2"));
    graph.add_edge(edge.clone()).unwrap();

    let stored = graph.edge(v1, v2).unwrap();
    assert_eq!(stored, edge);
    assert_eq!(stored.patch_name(), "patch_V1_V2");
    assert_eq!(stored.weight(), 3);
}
