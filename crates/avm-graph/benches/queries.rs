use avm_core::{LinkDescriptor, LinkKey, VersionEdge, VersionNode};
use avm_graph::VersionsGraph;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A 200-version chain with a lossy shortcut every 10 versions.
fn fixture() -> VersionsGraph {
    let graph = VersionsGraph::new();
    for index in 0..200usize {
        graph.add_node(
            VersionNode::new(format!("V{index}")).with_descriptor("Image", index.to_string()),
        );
    }
    for index in 1..200usize {
        graph
            .add_edge(
                VersionEdge::new(
                    format!("V{}", index - 1),
                    format!("V{index}"),
                    format!("patch_V{}_V{index}", index - 1),
                )
                .with_link(LinkDescriptor::new(
                    "Mesh",
                    (index - 1).to_string(),
                    index.to_string(),
                )),
            )
            .unwrap();
    }
    for index in (10..200usize).step_by(10) {
        graph
            .add_edge(
                VersionEdge::new(
                    format!("V{}", index - 10),
                    format!("V{index}"),
                    format!("lossy_V{}_V{index}", index - 10),
                )
                .with_weight(25),
            )
            .unwrap();
    }
    graph
}

fn queries_bench(c: &mut Criterion) {
    let graph = fixture();
    let v0 = graph.node_id("V0").unwrap();
    let v1 = graph.node_id("V1").unwrap();

    c.bench_function("shortest_path_end_to_end", |b| {
        b.iter(|| black_box(graph.shortest_path("V0", "V199").unwrap()));
    });

    c.bench_function("linked_version_explicit_and_implicit", |b| {
        let explicit = LinkKey::new("Mesh", "0");
        let implicit = LinkKey::new("Image", "0");
        b.iter(|| {
            black_box(graph.linked_version(v0, v1, &explicit).unwrap());
            black_box(graph.linked_version(v0, v1, &implicit).unwrap());
        });
    });

    c.bench_function("connected_versions_full_chain", |b| {
        b.iter(|| black_box(graph.connected_versions("V0")));
    });

    c.bench_function("node_name_lookup", |b| {
        b.iter(|| black_box(graph.node_id("V150").unwrap()));
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);
