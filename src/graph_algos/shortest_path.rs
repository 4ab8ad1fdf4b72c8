use super::GraphNodeMap;

/// Construct the shortest path from the goal node back to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, W> - map of nodes with their parent index and totals
/// goal_index: usize - index of the goal node in the node_map
///
/// Infallible: the solver only calls this for a goal it has settled, and
/// every parent index in the map points back into the map.
pub(crate) fn shortest_path<N, W>(node_map: &GraphNodeMap<N, W>, goal_index: usize) -> Vec<N>
where
    N: Clone,
{
    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != usize::MAX {
        let (node, &(parent_index, _)) = node_map.get_index(current_index).unwrap();
        path.push(node.clone());
        current_index = parent_index;
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    path
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_path_reconstruction() {
        // Build a node map manually to test path building
        let mut node_map: GraphNodeMap<String, u32> = GraphNodeMap::default();

        // Insert nodes with their parent indices and accumulated costs
        let a_index = node_map.insert_full("A".to_string(), (usize::MAX, 0)).0;
        let b_index = node_map.insert_full("B".to_string(), (a_index, 1)).0;
        let c_index = node_map.insert_full("C".to_string(), (a_index, 3)).0;
        let d_index = node_map.insert_full("D".to_string(), (c_index, 4)).0;

        // Path from A to D: A -> C -> D
        let path_to_d = shortest_path(&node_map, d_index);
        assert_eq!(
            path_to_d,
            vec!["A", "C", "D"].into_iter().map(String::from).collect::<Vec<_>>()
        );

        // Path from A to B: A -> B
        let path_to_b = shortest_path(&node_map, b_index);
        assert_eq!(
            path_to_b,
            vec!["A", "B"].into_iter().map(String::from).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_shortest_path_of_start_is_single_node() {
        let mut node_map: GraphNodeMap<String, u32> = GraphNodeMap::default();
        let a_index = node_map.insert_full("A".to_string(), (usize::MAX, 0)).0;

        assert_eq!(shortest_path(&node_map, a_index), vec!["A".to_string()]);
    }
}
