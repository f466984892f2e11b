use std::sync::Arc;
use std::thread;

use avm_core::{LinkDescriptor, LinkKey, VersionEdge, VersionNode};
use avm_graph::VersionsGraph;

fn populated() -> Arc<VersionsGraph> {
    let graph = VersionsGraph::new();
    let names = ["V1", "V2", "V3", "V4", "V5", "V6"];
    for name in names {
        graph.add_node(VersionNode::new(name).with_descriptor("Image", name.trim_start_matches('V')));
    }
    for pair in names.windows(2) {
        graph
            .add_edge(
                VersionEdge::new(pair[0], pair[1], format!("patch_{}_{}", pair[0], pair[1]))
                    .with_link(LinkDescriptor::new("Mesh", "1", "2")),
            )
            .unwrap();
    }
    // a discouraged shortcut that must never win
    graph
        .add_edge(VersionEdge::new("V1", "V6", "lossy_V1_V6").with_weight(50))
        .unwrap();
    Arc::new(graph)
}

#[test]
fn concurrent_readers_observe_consistent_results() {
    let graph = populated();
    let expected_chain = graph.shortest_path("V1", "V6").unwrap();
    assert_eq!(expected_chain.len(), 5);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let graph = Arc::clone(&graph);
        let expected_chain = expected_chain.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..200 {
                assert_eq!(graph.shortest_path("V1", "V6").unwrap(), expected_chain);

                let v1 = graph.node_id("V1").unwrap();
                let v2 = graph.node_id("V2").unwrap();
                let linked = graph
                    .linked_version(v1, v2, &LinkKey::new("Mesh", "1"))
                    .unwrap();
                assert_eq!(linked.as_deref(), Some("2"));

                assert_eq!(graph.connected_versions("V1").len(), 5);
                assert!(graph.connected_versions("NoSuchVersion").is_empty());
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn late_registration_does_not_disturb_readers() {
    // registration is bootstrap-time in practice; this only checks that a
    // writer and readers interleave without deadlocking across the three
    // locks
    let graph = populated();

    let writer = {
        let graph = Arc::clone(&graph);
        thread::spawn(move || {
            for index in 0..50 {
                let name = format!("X{index}");
                graph.add_node(VersionNode::new(name.clone()));
                graph
                    .add_edge(VersionEdge::new("V6", name, format!("patch_V6_X{index}")))
                    .unwrap();
            }
        })
    };
    let reader = {
        let graph = Arc::clone(&graph);
        thread::spawn(move || {
            for _ in 0..500 {
                assert_eq!(graph.shortest_path("V1", "V6").unwrap().len(), 5);
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(graph.connected_versions("V1").len(), 55);
}
