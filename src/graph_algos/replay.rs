use crate::errors::GraphError;
use crate::graph::Graph;
use super::ShortestPath;

use std::{collections::VecDeque, fmt::Debug, hash::Hash};
use num_traits::Zero;
use tracing::trace;


/// One observable step of the scan solver
#[derive(Clone, Debug, PartialEq)]
pub enum ReplayStep<N, C> {
    /// The unvisited node with the lowest known cost was selected
    Visit { node: N, cost: C },
    /// A cheaper path to `to` was found through the node just visited
    Relax { from: N, to: N, cost: C },
    /// The end node was selected; its cost is final
    Reached { node: N, cost: C },
}


/// Best-known way to reach a node
/// `via` is None for the start node
#[derive(Clone, Copy, Debug)]
struct Candidate<W> {
    via: Option<usize>,
    totals: W,
}


/// Step-by-step shortest-path scan
///
/// The classic formulation of Dijkstra's algorithm: every node starts at an
/// infinite distance and each round selects the unvisited node with the
/// lowest known cost by a full linear scan. Exposed as an iterator so a
/// presentation layer can pace or cancel the computation between steps;
/// dropping the iterator abandons it without leaving any shared state
/// behind. Ties between equal-cost candidates go to the node inserted into
/// the graph first.
///
/// [`dijkstra_scan`] drives the same transitions to completion in one call
/// and serves as the reference implementation for the heap solver.
pub struct Replay<'g, N, W, C, F> {
    graph: &'g Graph<N, W>,
    cost_of: F,
    end: usize,
    best: Vec<Option<Candidate<W>>>,
    visited: Vec<bool>,
    pending: VecDeque<ReplayStep<N, C>>,
    done: bool,
}

impl<'g, N, W, C, F> Replay<'g, N, W, C, F>
where
    N: Eq + Hash + Clone + Debug,
    W: Zero + Copy,
    C: Zero + Ord + Copy + Debug,
    F: Fn(&W) -> C,
{
    /// Prepare a scan between two nodes of the graph
    /// Fails on an unknown endpoint or a negative primary weight; weights
    /// are validated up front so iteration itself cannot fail
    pub fn new(
        graph: &'g Graph<N, W>,
        start: &N,
        end: &N,
        cost_of: F,
    ) -> Result<Self, GraphError> {
        let start_index = graph
            .index_of(start)
            .ok_or_else(|| GraphError::unknown(start))?;
        let end = graph.index_of(end).ok_or_else(|| GraphError::unknown(end))?;

        for (id, _) in graph.iter() {
            for (neighbor, weight) in graph.neighbors(id) {
                if cost_of(weight) < C::zero() {
                    return Err(GraphError::negative(id, neighbor));
                }
            }
        }

        let mut best = vec![None; graph.len()];
        best[start_index] = Some(Candidate {
            via: None,
            totals: W::zero(),
        });

        Ok(Self {
            graph,
            cost_of,
            end,
            best,
            visited: vec![false; graph.len()],
            pending: VecDeque::new(),
            done: false,
        })
    }

    /// Unvisited node with the lowest known cost
    /// Linear scan over all nodes; the earliest insertion wins ties
    fn lowest_cost_node(&self) -> Option<usize> {
        let mut lowest: Option<(usize, C)> = None;

        for (index, candidate) in self.best.iter().enumerate() {
            if self.visited[index] {
                continue;
            }
            let Some(candidate) = candidate else {
                continue;
            };

            let cost = (self.cost_of)(&candidate.totals);
            match lowest {
                Some((_, lowest_cost)) if lowest_cost <= cost => {}
                _ => lowest = Some((index, cost)),
            }
        }

        lowest.map(|(index, _)| index)
    }

    /// Best-known result so far; final once the iterator is exhausted
    /// None while the end node has not been reached
    pub fn route(&self) -> Option<ShortestPath<N, W, C>> {
        let end_candidate = self.best[self.end]?;

        // Trace back from the end node and reverse
        let mut path = Vec::new();
        let mut current = Some(self.end);
        while let Some(index) = current {
            path.push(self.graph.node_at(index).unwrap().clone());
            current = self.best[index].unwrap().via;
        }
        path.reverse();

        Some(ShortestPath {
            cost: (self.cost_of)(&end_candidate.totals),
            totals: end_candidate.totals,
            path,
        })
    }

    /// Drain all remaining steps and return the final result
    pub fn run(mut self) -> Option<ShortestPath<N, W, C>> {
        while self.next().is_some() {}
        self.route()
    }
}

impl<'g, N, W, C, F> Iterator for Replay<'g, N, W, C, F>
where
    N: Eq + Hash + Clone + Debug,
    W: Zero + Copy,
    C: Zero + Ord + Copy + Debug,
    F: Fn(&W) -> C,
{
    type Item = ReplayStep<N, C>;

    fn next(&mut self) -> Option<Self::Item> {
        // Relaxations queued by the previous visit drain first
        if let Some(step) = self.pending.pop_front() {
            return Some(step);
        }
        if self.done {
            return None;
        }

        let Some(current) = self.lowest_cost_node() else {
            // Every reachable node is visited; the rest stay at infinity
            self.done = true;
            return None;
        };

        self.visited[current] = true;

        let totals = self.best[current].unwrap().totals;
        let cost = (self.cost_of)(&totals);
        let node = self.graph.node_at(current).unwrap().clone();

        if current == self.end {
            self.done = true;
            return Some(ReplayStep::Reached { node, cost });
        }

        // Relax neighbors, queuing an event per improvement
        let graph = self.graph;
        for (neighbor, weight) in graph.neighbors(&node) {
            let neighbor_index = graph.index_of(neighbor).unwrap();
            if self.visited[neighbor_index] {
                continue;
            }

            let new_totals = totals + *weight;
            let new_cost = (self.cost_of)(&new_totals);

            let improved = match &self.best[neighbor_index] {
                Some(candidate) => new_cost < (self.cost_of)(&candidate.totals),
                None => true,
            };
            if improved {
                trace!(from = ?node, to = ?neighbor, cost = ?new_cost, "relaxed");
                self.best[neighbor_index] = Some(Candidate {
                    via: Some(current),
                    totals: new_totals,
                });
                self.pending.push_back(ReplayStep::Relax {
                    from: node.clone(),
                    to: neighbor.clone(),
                    cost: new_cost,
                });
            }
        }

        Some(ReplayStep::Visit { node, cost })
    }
}


/// Reference solver using the naive full-scan selection
/// Same contract and results as [`dijkstra`](super::dijkstra); kept for
/// cross-validation and for callers that want the replay's tie-break order
pub fn dijkstra_scan<N, W, C, F>(
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
    Ok(Replay::new(graph, start, end, cost_of)?.run())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_algos::dijkstra;

    fn cost(weight: &u64) -> u64 {
        *weight
    }

    fn demo_graph() -> Graph<String, u64> {
        let mut graph = Graph::new();
        for id in ["start", "A", "B", "C", "D", "finish"] {
            graph.add_node(id.to_string());
        }
        let edges = [
            ("start", "A", 5),
            ("start", "B", 2),
            ("A", "C", 4),
            ("A", "D", 2),
            ("B", "A", 8),
            ("B", "D", 7),
            ("C", "D", 6),
            ("C", "finish", 3),
            ("D", "finish", 1),
        ];
        for (from, to, weight) in edges {
            graph
                .add_edge(&from.to_string(), &to.to_string(), weight)
                .unwrap();
        }
        graph
    }

    #[test]
    fn test_scan_finds_optimal_path() {
        let graph = demo_graph();

        let route = dijkstra_scan(&graph, &"start".to_string(), &"finish".to_string(), cost)
            .unwrap()
            .unwrap();

        assert_eq!(route.cost, 8);
        assert_eq!(
            route.path,
            vec!["start", "A", "D", "finish"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_scan_reports_unreachable() {
        let mut graph = Graph::new();
        graph.add_node("a".to_string());
        graph.add_node("b".to_string());
        graph.add_node("c".to_string());
        graph.connect(&"a".to_string(), &"b".to_string(), 1u64).unwrap();

        let route = dijkstra_scan(&graph, &"a".to_string(), &"c".to_string(), cost).unwrap();
        assert!(route.is_none());
    }

    #[test]
    fn test_replay_event_order() {
        let graph = demo_graph();

        let steps: Vec<_> =
            Replay::new(&graph, &"start".to_string(), &"finish".to_string(), cost)
                .unwrap()
                .collect();

        // The first step visits the start at cost zero
        assert_eq!(
            steps[0],
            ReplayStep::Visit {
                node: "start".to_string(),
                cost: 0
            }
        );

        // The visit of the start is followed by its two relaxations
        assert_eq!(
            steps[1],
            ReplayStep::Relax {
                from: "start".to_string(),
                to: "A".to_string(),
                cost: 5
            }
        );
        assert_eq!(
            steps[2],
            ReplayStep::Relax {
                from: "start".to_string(),
                to: "B".to_string(),
                cost: 2
            }
        );

        // The last step reaches the end with the final cost
        assert_eq!(
            steps.last(),
            Some(&ReplayStep::Reached {
                node: "finish".to_string(),
                cost: 8
            })
        );
    }

    #[test]
    fn test_replay_run_matches_pure_solve() {
        let graph = demo_graph();
        let start = "start".to_string();
        let finish = "finish".to_string();

        let replayed = Replay::new(&graph, &start, &finish, cost).unwrap().run();
        let solved = dijkstra(&graph, &start, &finish, cost).unwrap();

        assert_eq!(replayed, solved);
    }

    #[test]
    fn test_replay_can_be_abandoned() {
        let graph = demo_graph();
        let start = "start".to_string();
        let finish = "finish".to_string();

        // Consume a few steps, then drop the iterator
        let mut replay = Replay::new(&graph, &start, &finish, cost).unwrap();
        replay.next();
        replay.next();
        // The end node has not been reached yet
        assert!(replay.route().is_none());
        drop(replay);

        // A fresh computation is unaffected
        let route = dijkstra_scan(&graph, &start, &finish, cost).unwrap().unwrap();
        assert_eq!(route.cost, 8);
    }

    #[test]
    fn test_equal_cost_ties_go_to_insertion_order() {
        // Two paths of equal cost; the one through the earlier-inserted
        // node must win
        let mut graph = Graph::new();
        for id in ["s", "a", "b", "t"] {
            graph.add_node(id.to_string());
        }
        for (from, to) in [("s", "a"), ("s", "b"), ("a", "t"), ("b", "t")] {
            graph
                .connect(&from.to_string(), &to.to_string(), 1u64)
                .unwrap();
        }

        let route = dijkstra_scan(&graph, &"s".to_string(), &"t".to_string(), cost)
            .unwrap()
            .unwrap();

        assert_eq!(route.cost, 2);
        assert_eq!(
            route.path,
            vec!["s", "a", "t"].into_iter().map(String::from).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_scan_rejects_negative_weights_up_front() {
        let mut graph = Graph::new();
        graph.add_node("a".to_string());
        graph.add_node("b".to_string());
        graph.connect(&"a".to_string(), &"b".to_string(), -2i64).unwrap();

        let result = Replay::new(&graph, &"a".to_string(), &"b".to_string(), |w: &i64| *w);
        assert!(matches!(result, Err(GraphError::NegativeWeight { .. })));
    }

    #[test]
    fn test_scan_matches_heap_on_random_graphs() {
        for _ in 0..25 {
            let node_count = 2 + rand::random_range(0..15usize);
            let ids: Vec<String> = (0..node_count).map(|i| format!("n{i}")).collect();

            let mut graph: Graph<String, u64> = Graph::new();
            for id in &ids {
                graph.add_node(id.clone());
            }
            for i in 0..node_count {
                for j in (i + 1)..node_count {
                    if rand::random::<f64>() < 0.3 {
                        let weight = 1 + rand::random_range(0..100u64);
                        graph.connect(&ids[i], &ids[j], weight).unwrap();
                    }
                }
            }

            let start = &ids[rand::random_range(0..node_count)];
            let end = &ids[rand::random_range(0..node_count)];

            let heap = dijkstra(&graph, start, end, cost).unwrap();
            let scan = dijkstra_scan(&graph, start, end, cost).unwrap();

            match (&heap, &scan) {
                (Some(h), Some(s)) => assert_eq!(h.cost, s.cost),
                (None, None) => {}
                _ => panic!("solvers disagree on reachability: {heap:?} vs {scan:?}"),
            }

            // Edges are symmetric, so the cost must be direction-independent
            let reverse = dijkstra(&graph, end, start, cost).unwrap();
            assert_eq!(heap.map(|r| r.cost), reverse.map(|r| r.cost));
        }
    }

    #[test]
    fn test_scan_start_equals_end() {
        let graph = demo_graph();
        let start = "start".to_string();

        let steps: Vec<_> = Replay::new(&graph, &start, &start, cost).unwrap().collect();
        assert_eq!(
            steps,
            vec![ReplayStep::Reached {
                node: "start".to_string(),
                cost: 0
            }]
        );

        let route = dijkstra_scan(&graph, &start, &start, cost).unwrap().unwrap();
        assert_eq!(route.cost, 0);
        assert_eq!(route.path, vec!["start".to_string()]);
    }
}
