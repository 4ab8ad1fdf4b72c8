use crate::errors::GraphError;
use crate::graph::Graph;
use super::shortest_path::shortest_path;
use super::{GraphNodeMap, ShortestPath};

use std::{cmp::Ordering, collections::BinaryHeap, fmt::Debug, hash::Hash};
use indexmap::map::Entry::{Occupied, Vacant};
use num_traits::Zero;


/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// The weight record W accumulates in full along every relaxation, but only
/// the primary cost extracted by `cost_of` decides which paths win; auxiliary
/// attributes ride along in lockstep. The search stops as soon as the end
/// node is settled - with non-negative weights no later relaxation can
/// improve it.
///
/// Returns Ok(None) when the end node cannot be reached from the start.
/// Missing endpoints and negative primary weights are input errors.
pub fn dijkstra<N, W, C, F>(
    graph: &Graph<N, W>,
    start: &N,
    end: &N,
    cost_of: F,
) -> Result<Option<ShortestPath<N, W, C>>, GraphError>
where
    N: Eq + Hash + Clone + Debug,
    W: Zero + Copy,
    C: Zero + Ord + Copy + Debug,
    F: Fn(&W) -> C,
{
    if !graph.contains(start) {
        return Err(GraphError::unknown(start));
    }
    if !graph.contains(end) {
        return Err(GraphError::unknown(end));
    }

    // Nodes to visit - binary heap sorts biggest to smallest, so ordering
    // on QueueEntry is reversed to always expand the least costly node first
    let mut nodes_to_visit: BinaryHeap<QueueEntry<C>> = BinaryHeap::new();

    // Best-known way to reach each seen node
    // The tuple contains (parent_index, totals); the start node's parent
    // index is usize::MAX to indicate it has no parent
    let mut node_map: GraphNodeMap<N, W> = GraphNodeMap::default();

    let start_index = node_map.insert_full(start.clone(), (usize::MAX, W::zero())).0;
    nodes_to_visit.push(QueueEntry {
        index: start_index,
        cost: C::zero(),
    });

    // Loop over each node to visit, removing the smallest node
    while let Some(QueueEntry { cost, index }) = nodes_to_visit.pop() {
        // fetch current best totals for the node
        let (node, &(_, totals)) = node_map.get_index(index).unwrap();

        // If the cost from the heap is higher than the best known cost,
        // a better path to this node was already found - skip it
        if cost > cost_of(&totals) {
            continue;
        }

        // The end node is settled, no further relaxation can improve it
        if node == end {
            let path = shortest_path(&node_map, index);
            return Ok(Some(ShortestPath { cost, totals, path }));
        }

        let node = node.clone();

        // loop over neighbors
        for (neighbor, weight) in graph.neighbors(&node) {
            if cost_of(weight) < C::zero() {
                return Err(GraphError::negative(&node, neighbor));
            }

            // new totals to reach this node = edge weight + node totals
            let new_totals = totals + *weight;
            let new_cost = cost_of(&new_totals);

            // Check if we've found a better path to this neighbor
            let neighbor_index;

            match node_map.entry(neighbor.clone()) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    neighbor_index = e.index();
                    e.insert((index, new_totals));
                }
                Occupied(mut e) => {
                    if cost_of(&e.get().1) > new_cost {
                        // We've found a better path to this neighbor
                        neighbor_index = e.index();
                        e.insert((index, new_totals));
                    } else {
                        // The existing path is better, do nothing
                        continue;
                    }
                }
            }

            // Only add to the queue if we've found a better path
            nodes_to_visit.push(QueueEntry {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    // Heap exhausted without settling the end node - unreachable
    Ok(None)
}


/// Queue entry
/// - for ordering we only need the cost and a way to identify the node
/// - ordering is reversed so the BinaryHeap behaves as a min-heap
#[derive(Debug)]
struct QueueEntry<C> {
    index: usize,
    cost: C,
}

impl<C: Ord> Ord for QueueEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}
impl<C: Ord> PartialOrd for QueueEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<C: PartialEq> PartialEq for QueueEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}
impl<C: PartialEq> Eq for QueueEntry<C> {}
