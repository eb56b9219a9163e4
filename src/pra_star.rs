//! PRA* search: hierarchical refinement search that starts at a
//! middle abstraction layer and repeatedly refines the truncated path
//! downward, re-running A* at each layer restricted to a corridor built
//! from the previous layer's result.

use std::collections::HashSet;

use crate::astar::{a_star, SearchOutput};
use crate::error::{Result, SearchError};
use crate::graph::NodeId;
use crate::hierarchy::HierarchicalGraph;
use crate::position::{GridPosition, OctileDistance};

/// Runs PRA* from `start_pos` to `goal_pos` over `hierarchy`.
///
/// `k` truncates each layer's A* path to at most `k` nodes before
/// refining into the next layer down; `k == 0` means unbounded (no
/// truncation). Mutates every layer's restriction set as a side effect
/// of driving each per-layer A* search - callers re-running PRA* on the
/// same hierarchy should not rely on restriction sets from a previous
/// call still being in place.
///
/// [`SearchOutput::path_node_ids`] holds the layer-0 node ids stitched
/// across every outer refinement round, one per grid position of the
/// assembled route; consecutive entries are always layer-0 neighbours.
pub fn pra_star(hierarchy: &mut HierarchicalGraph, k: usize, start_pos: GridPosition, goal_pos: GridPosition) -> Result<SearchOutput> {
	let starting_level = hierarchy.num_layers() / 2;
	let effective_k = if k < 1 { usize::MAX } else { k };

	let mut constrained_nodes: HashSet<NodeId> = HashSet::new();
	let mut search_output = SearchOutput::default();
	let mut astar_output = SearchOutput::default();
	let mut solution_path: Vec<GridPosition> = vec![start_pos];
	let mut solution_node_ids: Vec<NodeId> = vec![hierarchy.get_layer(0).get_pos_node_id(start_pos)?];
	let mut current_start_pos = start_pos;

	loop {
		let mut current_goal_pos = goal_pos;

		for i in 0..=starting_level {
			let current_level = starting_level - i;

			{
				let layer = hierarchy.get_layer_mut(current_level);
				layer.set_constrained_nodes(constrained_nodes.clone());
			}
			let layer = hierarchy.get_layer(current_level);
			astar_output = a_star(layer, current_start_pos, current_goal_pos)?;

			if astar_output.path_node_ids.is_empty() {
				return Err(SearchError::NoPath);
			}
			let truncated_len = astar_output.path_node_ids.len().min(effective_k);
			astar_output.path_node_ids.truncate(truncated_len);

			let tail_id = *astar_output.path_node_ids.last().expect("truncated to at least 1");
			let mut grid_positions: HashSet<GridPosition> =
				layer.get_node(tail_id).expect("tail id is in this layer").represented_positions.clone();

			if i < starting_level {
				let child_nodes: Vec<NodeId> =
					hierarchy.get_parent_child_mapping(current_level - 1, tail_id).iter().copied().collect();
				let child_graph = hierarchy.get_layer(current_level - 1);

				let closest_child_id = child_nodes
					.iter()
					.copied()
					.min_by(|&lhs, &rhs| {
						let child_1 = child_graph.get_node(lhs).expect("child id resolves in child layer");
						let child_2 = child_graph.get_node(rhs).expect("child id resolves in child layer");
						let p1 = closest_position(&child_1.represented_positions, &current_goal_pos);
						let p2 = closest_position(&child_2.represented_positions, &current_goal_pos);
						p1.octile_distance(&goal_pos).partial_cmp(&p2.octile_distance(&goal_pos)).expect("finite distance")
					})
					.expect("non-empty parent-child mapping");

				grid_positions =
					child_graph.get_node(closest_child_id).expect("closest child id resolves").represented_positions.clone();
			}

			current_goal_pos = closest_position(&grid_positions, &goal_pos);

			constrained_nodes.clear();
			if i < starting_level {
				for &path_node_id in &astar_output.path_node_ids {
					let child_ids = hierarchy.get_parent_child_mapping(current_level - 1, path_node_id);
					constrained_nodes.extend(child_ids.iter().copied());
				}
			}

			search_output.expanded += astar_output.expanded;
			search_output.generated += astar_output.generated;
			search_output.duration += astar_output.duration;
		}

		for &path_node_id in astar_output.path_node_ids.iter().skip(1) {
			let pos = *hierarchy
				.get_layer(0)
				.get_node(path_node_id)
				.expect("layer-0 id resolves")
				.represented_positions
				.iter()
				.next()
				.expect("layer-0 node represents exactly one position");
			solution_path.push(pos);
			solution_node_ids.push(path_node_id);
		}

		if search_output.first_move_duration == 0.0 {
			search_output.first_move_duration = search_output.duration;
		}

		current_start_pos = current_goal_pos;
		if current_goal_pos == goal_pos {
			break;
		}
	}

	let mut path_cost = 0.0;
	for i in 1..solution_path.len() {
		path_cost += solution_path[i].octile_distance(&solution_path[i - 1]);
	}
	search_output.path_cost = path_cost;
	search_output.path_node_ids = solution_node_ids;

	Ok(search_output)
}

fn closest_position(positions: &HashSet<GridPosition>, target: &GridPosition) -> GridPosition {
	*positions
		.iter()
		.min_by(|a, b| a.octile_distance(target).partial_cmp(&b.octile_distance(target)).expect("finite distance"))
		.expect("non-empty position set")
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::graph::{FlatGraph, GraphNode};
	use crate::position::AbstractPosition;

	fn node(id: NodeId, x: usize, y: usize) -> GraphNode {
		let mut represented = HashSet::new();
		represented.insert(GridPosition::new(x, y));
		GraphNode { id, position: AbstractPosition::new(x as f64, y as f64), represented_positions: represented }
	}

	fn open_grid(n: usize) -> FlatGraph {
		let mut g = FlatGraph::new();
		for y in 0..n {
			for x in 0..n {
				g.add_node(node((y * n + x) as NodeId, x, y));
			}
		}
		for y in 0..n as i64 {
			for x in 0..n as i64 {
				for (dx, dy) in [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)] {
					let (nx, ny) = (x + dx, y + dy);
					if (0..n as i64).contains(&nx) && (0..n as i64).contains(&ny) && (ny, nx) > (y, x) {
						g.add_edge((y * n as i64 + x) as NodeId, (ny * n as i64 + nx) as NodeId);
					}
				}
			}
		}
		g
	}

	#[test]
	fn pra_star_matches_a_star_cost_on_open_grid() {
		let flat = open_grid(8);
		let a_star_cost = a_star(&flat, GridPosition::new(0, 0), GridPosition::new(7, 7)).unwrap().path_cost;

		let mut hierarchy = HierarchicalGraph::build(flat);
		let out = pra_star(&mut hierarchy, 0, GridPosition::new(0, 0), GridPosition::new(7, 7)).unwrap();
		assert!((out.path_cost - a_star_cost).abs() < 1e-6);
	}

	#[test]
	fn pra_star_single_node_hierarchy_is_trivial() {
		let flat = open_grid(2);
		let mut hierarchy = HierarchicalGraph::build(flat);
		let out = pra_star(&mut hierarchy, 0, GridPosition::new(0, 0), GridPosition::new(1, 1)).unwrap();
		assert!((out.path_cost - std::f64::consts::SQRT_2).abs() < 1e-6);
	}

	/// PRA* returns a non-empty path_node_ids sequence whose consecutive
	/// grid positions are each other's neighbours at layer 0.
	#[test]
	fn pra_star_path_node_ids_are_layer0_neighbours() {
		let flat = open_grid(4);
		let mut hierarchy = HierarchicalGraph::build(flat);
		let out = pra_star(&mut hierarchy, 2, GridPosition::new(0, 0), GridPosition::new(3, 3)).unwrap();
		assert!(!out.path_node_ids.is_empty());
		assert_eq!(out.path_node_ids[0], hierarchy.get_layer(0).get_pos_node_id(GridPosition::new(0, 0)).unwrap());
		assert_eq!(
			*out.path_node_ids.last().unwrap(),
			hierarchy.get_layer(0).get_pos_node_id(GridPosition::new(3, 3)).unwrap()
		);
		for w in out.path_node_ids.windows(2) {
			assert!(hierarchy.get_layer(0).are_neighbours(w[0], w[1]));
		}
	}
}
