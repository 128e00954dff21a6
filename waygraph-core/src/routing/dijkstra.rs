use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::{HashMap, hash_map::Entry};

use crate::NodeId;
use crate::model::RoadGraph;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

// Costs pushed onto the heap are always finite (infinite weights are skipped
// during relaxation), so total ordering over them is well defined.
impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap); ties broken by
// node id so the pop order is fully deterministic.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm from `start` to `goal`, with `weight_fn(u, v)` as the
/// edge cost. Weights must be non-negative; `f64::INFINITY` means "no edge".
///
/// Returns the node-id path and its total cost, or `(vec![], INFINITY)` when
/// `goal` is unreachable. The frontier keeps duplicate entries instead of
/// decreasing keys; stale pops are skipped against the distance map.
pub fn dijkstra_route<F>(
    graph: &RoadGraph,
    start: NodeId,
    goal: NodeId,
    weight_fn: F,
) -> (Vec<NodeId>, f64)
where
    F: Fn(NodeId, NodeId) -> f64,
{
    let mut dist: HashMap<NodeId, f64> = HashMap::new();
    let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    dist.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // First pop of the goal is optimal with non-negative weights
        if node == goal {
            break;
        }

        // Skip if we've already found a better path
        if cost > dist.get(&node).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        for (next, _) in graph.neighbors(node) {
            let weight = weight_fn(node, next);
            // Cannot happen for neighbors the graph itself returned
            if weight.is_infinite() {
                continue;
            }
            let next_cost = cost + weight;

            match dist.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    prev.insert(next, node);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        prev.insert(next, node);
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    if start != goal && !prev.contains_key(&goal) {
        return (Vec::new(), f64::INFINITY);
    }

    // Follow predecessors backward from the goal, then flip to start -> goal
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&parent) = prev.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();

    let cost = dist.get(&goal).copied().unwrap_or(f64::INFINITY);
    (path, cost)
}
