//! A* search: single-layer shortest-path search over a [`FlatGraph`],
//! used standalone and as the per-layer engine inside [`crate::pra_star`].

use std::collections::HashMap;
use std::time::Instant;

use crate::error::Result;
use crate::graph::{FlatGraph, NodeId};
use crate::position::{GridPosition, OctileDistance};
use crate::priority_set::{IndexedPrioritySet, Keyed};

const EPS: f64 = 1e-5;

fn is_greater(lhs: f64, rhs: f64) -> bool {
	lhs > rhs + EPS
}

/// Outcome of one [`a_star`] or [`crate::pra_star::pra_star`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchOutput {
	pub expanded: usize,
	pub generated: usize,
	pub duration: f64,
	pub first_move_duration: f64,
	pub path_cost: f64,
	pub path_node_ids: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
	parent: Option<usize>,
	node_id: NodeId,
	g: f64,
	f: f64,
}

impl Keyed for SearchNode {
	fn key(&self) -> u64 {
		self.node_id
	}
}

fn less(a: &SearchNode, b: &SearchNode) -> bool {
	a.f < b.f || (a.f == b.f && a.g > b.g)
}

fn reconstruct_path(arena: &[SearchNode], mut idx: usize) -> Vec<NodeId> {
	let mut path = Vec::new();
	loop {
		let node = arena[idx];
		path.push(node.node_id);
		match node.parent {
			Some(parent_idx) => idx = parent_idx,
			None => break,
		}
	}
	path.reverse();
	path
}

/// Runs A* from `start_pos` to `goal_pos` over `graph`, honoring the
/// graph's current restriction set.
///
/// Returns a [`SearchOutput`] with `path_cost == -1.0` and an empty
/// `path_node_ids` if the open set is exhausted before the goal is
/// reached (rather than failing - "no path" is a normal outcome here,
/// see [`crate::error::SearchError`]).
pub fn a_star(graph: &FlatGraph, start_pos: GridPosition, goal_pos: GridPosition) -> Result<SearchOutput> {
	let start_id = graph.get_pos_node_id(start_pos)?;
	let goal_id = graph.get_pos_node_id(goal_pos)?;

	let mut open: IndexedPrioritySet<SearchNode, _> = IndexedPrioritySet::new(less);
	// Closed nodes live in an append-only arena so that a child's parent
	// index stays valid even if the node it points to is later dropped
	// from `closed_index` (see the re-open branch below).
	let mut closed: Vec<SearchNode> = Vec::new();
	let mut closed_index: HashMap<NodeId, usize> = HashMap::new();

	let mut expanded = 0usize;
	let mut generated = 0usize;

	let timer = Instant::now();

	let start_node = graph.get_node(start_id).expect("start_id resolved from graph");
	let goal_node = graph.get_node(goal_id).expect("goal_id resolved from graph");
	open.insert(SearchNode { parent: None, node_id: start_id, g: 0.0, f: start_node.position.octile_distance(&goal_node.position) });

	while let Some(current) = open.pop() {
		closed.push(current);
		let current_idx = closed.len() - 1;
		closed_index.insert(current.node_id, current_idx);
		expanded += 1;

		if current.node_id == goal_id {
			let duration = timer.elapsed().as_secs_f64();
			return Ok(SearchOutput {
				expanded,
				generated,
				duration,
				first_move_duration: duration,
				path_cost: current.g,
				path_node_ids: reconstruct_path(&closed, current_idx),
			});
		}

		let current_node = graph.get_node(current.node_id).expect("closed node is in graph");
		for neighbour_id in graph.get_neighbours(current.node_id) {
			let neighbour_node = graph.get_node(neighbour_id).expect("neighbour is in graph");
			let delta_g = current_node.position.octile_distance(&neighbour_node.position);
			let child_g = current.g + delta_g;
			let child_h = neighbour_node.position.octile_distance(&goal_node.position);
			debug_assert!(!is_greater(current.f - current.g, delta_g + child_h), "heuristic triangle inequality violated");
			let child = SearchNode { parent: Some(current_idx), node_id: neighbour_id, g: child_g, f: child_g + child_h };

			let accepted = if let Some(&closed_idx) = closed_index.get(&child.node_id) {
				if is_greater(closed[closed_idx].g, child.g) {
					closed_index.remove(&child.node_id);
					open.insert(child);
					true
				} else {
					false
				}
			} else if open.contains_key(child.node_id) {
				let existing_g = open.get(child.node_id).expect("just checked contains_key").g;
				if is_greater(existing_g, child.g) {
					open.update(child);
					true
				} else {
					false
				}
			} else {
				open.insert(child);
				true
			};
			if accepted {
				generated += 1;
			}
		}
	}

	let duration = timer.elapsed().as_secs_f64();
	Ok(SearchOutput { expanded, generated, duration, first_move_duration: -1.0, path_cost: -1.0, path_node_ids: Vec::new() })
}
