//! Graph abstraction builder.
//!
//! Clusters a flat graph into parent nodes via clique detection of sizes
//! 4, 3, 2, with island absorption and size-1 fallback for whatever is
//! left over, producing one layer of a hierarchy. Iteration is always in
//! ascending node-id order so that abstractions are deterministic across
//! runs.

use std::collections::{HashMap, HashSet};

use crate::graph::{FlatGraph, GraphNode, NodeId};
use crate::position::AbstractPosition;

/// An unordered set of 2-4 node ids that form a complete subgraph.
pub type Clique = Vec<NodeId>;

fn sorted_ids(ids: &HashSet<NodeId>) -> Vec<NodeId> {
	let mut v: Vec<NodeId> = ids.iter().copied().collect();
	v.sort_unstable();
	v
}

fn is_candidate(
	node_id: NodeId,
	valid: &HashSet<NodeId>,
	removed: &HashSet<NodeId>,
	graph: &FlatGraph,
	min_degree: usize,
) -> bool {
	valid.contains(&node_id) && !removed.contains(&node_id) && graph.node_degree(node_id) >= min_degree
}

/// Whether every distinct ordered pair of `ids` are neighbours in `graph`.
///
/// This checks the full all-pairs condition (`i != j` over every pair),
/// not the reference implementation's skewed `j`-starts-at-1 inner loop.
fn is_clique(ids: &[NodeId], graph: &FlatGraph) -> bool {
	for i in 0..ids.len() {
		for j in 0..ids.len() {
			if i != j && !graph.are_neighbours(ids[i], ids[j]) {
				return false;
			}
		}
	}
	true
}

/// Find all disjoint cliques of size 4, preferring candidates in
/// ascending node-id order. Claimed node ids are removed from `node_ids`.
pub fn find_cliques_4(node_ids: &mut HashSet<NodeId>, graph: &FlatGraph) -> Vec<Clique> {
	const DEGREE: usize = 3;
	let mut cliques = Vec::new();
	let mut removed = HashSet::new();

	for pivot in sorted_ids(node_ids) {
		if !is_candidate(pivot, node_ids, &removed, graph, DEGREE) {
			continue;
		}
		let mut found = false;
		'search: for n1 in graph.get_neighbours_unrestricted(pivot) {
			if !is_candidate(n1, node_ids, &removed, graph, DEGREE) {
				continue;
			}
			for n2 in graph.get_neighbours_unrestricted(n1) {
				if n2 == pivot || !is_candidate(n2, node_ids, &removed, graph, DEGREE) {
					continue;
				}
				for n3 in graph.get_neighbours_unrestricted(n2) {
					if n3 == pivot || n3 == n1 || !is_candidate(n3, node_ids, &removed, graph, DEGREE) {
						continue;
					}
					if is_clique(&[pivot, n1, n2, n3], graph) {
						cliques.push(vec![pivot, n1, n2, n3]);
						removed.insert(pivot);
						removed.insert(n1);
						removed.insert(n2);
						removed.insert(n3);
						found = true;
						break 'search;
					}
				}
			}
		}
		let _ = found;
	}

	for id in &removed {
		node_ids.remove(id);
	}
	cliques
}

/// Find all disjoint cliques of size 3 among the still-unclaimed remainder.
pub fn find_cliques_3(node_ids: &mut HashSet<NodeId>, graph: &FlatGraph) -> Vec<Clique> {
	const DEGREE: usize = 2;
	let mut cliques = Vec::new();
	let mut removed = HashSet::new();

	for pivot in sorted_ids(node_ids) {
		if !is_candidate(pivot, node_ids, &removed, graph, DEGREE) {
			continue;
		}
		'search: for n1 in graph.get_neighbours_unrestricted(pivot) {
			if !is_candidate(n1, node_ids, &removed, graph, DEGREE) {
				continue;
			}
			for n2 in graph.get_neighbours_unrestricted(n1) {
				if n2 == pivot || !is_candidate(n2, node_ids, &removed, graph, DEGREE) {
					continue;
				}
				if is_clique(&[pivot, n1, n2], graph) {
					cliques.push(vec![pivot, n1, n2]);
					removed.insert(pivot);
					removed.insert(n1);
					removed.insert(n2);
					break 'search;
				}
			}
		}
	}

	for id in &removed {
		node_ids.remove(id);
	}
	cliques
}

/// Find all disjoint cliques of size 2 among the still-unclaimed remainder.
pub fn find_cliques_2(node_ids: &mut HashSet<NodeId>, graph: &FlatGraph) -> Vec<Clique> {
	const DEGREE: usize = 1;
	let mut cliques = Vec::new();
	let mut removed = HashSet::new();

	for pivot in sorted_ids(node_ids) {
		if !is_candidate(pivot, node_ids, &removed, graph, DEGREE) {
			continue;
		}
		for n1 in graph.get_neighbours_unrestricted(pivot) {
			if !is_candidate(n1, node_ids, &removed, graph, DEGREE) {
				continue;
			}
			cliques.push(vec![pivot, n1]);
			removed.insert(pivot);
			removed.insert(n1);
			break;
		}
	}

	for id in &removed {
		node_ids.remove(id);
	}
	cliques
}

/// Coordinate-wise average of the grid positions a clique represents,
/// weighted by count of grid positions (not by child-node count).
fn average_position(clique: &[NodeId], graph: &FlatGraph) -> AbstractPosition {
	let mut n = 0u32;
	let mut x = 0.0;
	let mut y = 0.0;
	for &id in clique {
		for pos in &graph.get_node(id).unwrap().represented_positions {
			x += pos.x as f64;
			y += pos.y as f64;
			n += 1;
		}
	}
	AbstractPosition::new(x / n as f64, y / n as f64)
}

fn collect_grid_positions(clique: &[NodeId], graph: &FlatGraph) -> HashSet<crate::position::GridPosition> {
	let mut positions = HashSet::new();
	for &id in clique {
		positions.extend(graph.get_node(id).unwrap().represented_positions.iter().copied());
	}
	positions
}

/// Cluster `graph` into one abstraction layer up, returning the new flat
/// graph and the parent→children map that relates it to `graph`.
pub fn create_abstract_graph(graph: &FlatGraph) -> (FlatGraph, HashMap<NodeId, HashSet<NodeId>>) {
	let mut current_node_ids: HashSet<NodeId> = graph.all_node_ids().collect();

	let cliques_4 = find_cliques_4(&mut current_node_ids, graph);
	let cliques_3 = find_cliques_3(&mut current_node_ids, graph);
	let cliques_2 = find_cliques_2(&mut current_node_ids, graph);

	let mut cliques_all: Vec<Clique> = Vec::new();
	cliques_all.extend(cliques_4);
	cliques_all.extend(cliques_3);
	cliques_all.extend(cliques_2);

	// Map each clustered node to the index of the clique that claimed it,
	// so islands can be found via their sole neighbour's clique.
	let mut node_id_to_clique: HashMap<NodeId, usize> = HashMap::new();
	for (idx, clique) in cliques_all.iter().enumerate() {
		for &id in clique {
			node_id_to_clique.insert(id, idx);
		}
	}

	let mut island_node_ids = HashSet::new();
	for id in sorted_ids(&current_node_ids) {
		let neighbours = graph.get_neighbours_unrestricted(id);
		if neighbours.len() == 1 {
			let clique_idx = node_id_to_clique[&neighbours[0]];
			cliques_all[clique_idx].push(id);
			island_node_ids.insert(id);
		}
	}
	for id in &island_node_ids {
		current_node_ids.remove(id);
	}

	log::debug!(
		"abstraction: cliques 4/3/2 = {}, singletons = {}, islands = {}",
		cliques_all.len(),
		current_node_ids.len(),
		island_node_ids.len()
	);

	let mut abstract_graph = FlatGraph::new();
	let mut parent_child_mapping: HashMap<NodeId, HashSet<NodeId>> = HashMap::new();
	let mut id_counter: NodeId = 0;

	for clique in &cliques_all {
		abstract_graph.add_node(GraphNode {
			id: id_counter,
			position: average_position(clique, graph),
			represented_positions: collect_grid_positions(clique, graph),
		});
		parent_child_mapping.entry(id_counter).or_default().extend(clique.iter().copied());
		id_counter += 1;
	}
	for single in sorted_ids(&current_node_ids) {
		let clique = vec![single];
		abstract_graph.add_node(GraphNode {
			id: id_counter,
			position: average_position(&clique, graph),
			represented_positions: collect_grid_positions(&clique, graph),
		});
		parent_child_mapping.entry(id_counter).or_default().insert(single);
		id_counter += 1;
	}

	let are_children_neighbours = |a: &HashSet<NodeId>, b: &HashSet<NodeId>| -> bool {
		a.iter().any(|&c1| b.iter().any(|&c2| graph.are_neighbours(c1, c2)))
	};

	let parent_ids = sorted_ids(&parent_child_mapping.keys().copied().collect());
	for (i, &pi) in parent_ids.iter().enumerate() {
		for &pj in &parent_ids[i + 1..] {
			if are_children_neighbours(&parent_child_mapping[&pi], &parent_child_mapping[&pj]) {
				abstract_graph.add_edge(pi, pj);
			}
		}
	}

	(abstract_graph, parent_child_mapping)
}
