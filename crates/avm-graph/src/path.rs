//! Shortest-path and reachability traversals over the arena.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use avm_core::NodeId;

use crate::store::GraphStore;

/// Dijkstra from `origin`, then a predecessor walk back from `target`.
///
/// The returned chain excludes the origin; it is empty when origin and
/// target coincide. `None` means the target is unreachable — detected by
/// an explicit distance check, never inferred from predecessor contents.
pub(crate) fn shortest_chain(
    store: &GraphStore,
    origin: NodeId,
    target: NodeId,
) -> Option<Vec<NodeId>> {
    let count = store.node_count();
    let origin_idx = origin.as_raw() as usize;
    let target_idx = target.as_raw() as usize;
    if origin_idx == target_idx {
        return Some(Vec::new());
    }

    let mut dist = vec![u64::MAX; count];
    // Every vertex starts as its own predecessor; relaxation rewrites all
    // entries on the shortest-path tree except the origin's.
    let mut prev: Vec<usize> = (0..count).collect();
    dist[origin_idx] = 0;

    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0u64, origin_idx)));
    while let Some(Reverse((cost, vertex))) = heap.pop() {
        if cost > dist[vertex] {
            continue;
        }
        if vertex == target_idx {
            break;
        }
        for (next, _, weight) in store.neighbors(NodeId::from_raw(vertex as u64)) {
            let next_idx = next.as_raw() as usize;
            let candidate = cost + u64::from(*weight);
            if candidate < dist[next_idx] {
                dist[next_idx] = candidate;
                prev[next_idx] = vertex;
                heap.push(Reverse((candidate, next_idx)));
            }
        }
    }

    if dist[target_idx] == u64::MAX {
        return None;
    }

    let mut chain = VecDeque::new();
    let mut vertex = target_idx;
    while vertex != origin_idx {
        chain.push_front(NodeId::from_raw(vertex as u64));
        vertex = prev[vertex];
    }
    Some(chain.into())
}

/// Breadth-first discovery order from `origin`, origin included as the
/// first element.
pub(crate) fn discovery_order(store: &GraphStore, origin: NodeId) -> Vec<NodeId> {
    let mut visited = vec![false; store.node_count()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    visited[origin.as_raw() as usize] = true;
    queue.push_back(origin);
    while let Some(vertex) = queue.pop_front() {
        order.push(vertex);
        for (next, _, _) in store.neighbors(vertex) {
            let next_idx = next.as_raw() as usize;
            if !visited[next_idx] {
                visited[next_idx] = true;
                queue.push_back(*next);
            }
        }
    }
    order
}
