//! Hierarchical graph: layered flat graphs plus per-level
//! parent-child maps, built by repeatedly abstracting a layer-0 graph.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::abstraction::create_abstract_graph;
use crate::graph::{FlatGraph, NodeId};

pub type ParentChildMap = HashMap<NodeId, HashSet<NodeId>>;

/// An ordered stack of flat graphs (layer 0 = concrete grid graph, layer
/// `num_layers() - 1` = top) plus one parent→children map per adjacent
/// layer pair. `parent_child_mappings[i]` relates layer `i+1` (parents)
/// to layer `i` (children).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HierarchicalGraph {
	layers: Vec<FlatGraph>,
	parent_child_mappings: Vec<ParentChildMap>,
}

impl HierarchicalGraph {
	/// Builds a hierarchy from a layer-0 graph, abstracting repeatedly
	/// until a layer has at most 1 node or 0 edges.
	pub fn build(layer0: FlatGraph) -> Self {
		let mut layers = vec![layer0];
		let mut parent_child_mappings = Vec::new();

		while layers.last().unwrap().node_count() > 1 && layers.last().unwrap().edge_count() > 0 {
			let (abstract_graph, parent_child_mapping) = create_abstract_graph(layers.last().unwrap());
			log::debug!(
				"built layer {} with {} nodes, {} edges",
				layers.len(),
				abstract_graph.node_count(),
				abstract_graph.edge_count()
			);
			layers.push(abstract_graph);
			parent_child_mappings.push(parent_child_mapping);
		}

		Self { layers, parent_child_mappings }
	}

	pub fn num_layers(&self) -> usize {
		self.layers.len()
	}

	pub fn get_layer(&self, layer_idx: usize) -> &FlatGraph {
		&self.layers[layer_idx]
	}

	pub fn get_layer_mut(&mut self, layer_idx: usize) -> &mut FlatGraph {
		&mut self.layers[layer_idx]
	}

	/// The children (in layer `level`) of `parent_node_id` (in layer `level + 1`).
	pub fn get_parent_child_mapping(&self, level: usize, parent_node_id: NodeId) -> &HashSet<NodeId> {
		&self.parent_child_mappings[level][&parent_node_id]
	}

	/// Clears every layer's restriction set. Used after loading a cached
	/// hierarchy from disk: restriction sets are per-search state and must
	/// never be treated as "live" across a load, per the resolved Open
	/// Question on `HierarchicalGraph::load`.
	pub fn clear_all_restrictions(&mut self) {
		for layer in &mut self.layers {
			layer.set_constrained_nodes(HashSet::new());
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::graph::GraphNode;
	use crate::position::{AbstractPosition, GridPosition};

	fn grid_4x4_all_edges() -> FlatGraph {
		let mut g = FlatGraph::new();
		for y in 0..4i64 {
			for x in 0..4i64 {
				let id = (y * 4 + x) as NodeId;
				let mut rep = HashSet::new();
				rep.insert(GridPosition::new(x as usize, y as usize));
				g.add_node(GraphNode { id, position: AbstractPosition::new(x as f64, y as f64), represented_positions: rep });
			}
		}
		for y in 0..4i64 {
			for x in 0..4i64 {
				for (dx, dy) in [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)] {
					let (nx, ny) = (x + dx, y + dy);
					if (0..4).contains(&nx) && (0..4).contains(&ny) && (ny, nx) > (y, x) {
						g.add_edge((y * 4 + x) as NodeId, (ny * 4 + nx) as NodeId);
					}
				}
			}
		}
		g
	}

	/// Open 4x4 grid, all edges -> exactly 3 layers; the sole
	/// top-layer node's represented_positions covers all 16 positions.
	#[test]
	fn three_layers_built_and_top_layer_covers_all_positions() {
		let h = HierarchicalGraph::build(grid_4x4_all_edges());
		assert_eq!(h.num_layers(), 3);
		let top = h.get_layer(2);
		assert_eq!(top.node_count(), 1);
		let top_node = top.all_nodes().next().unwrap();
		assert_eq!(top_node.represented_positions.len(), 16);
	}

	#[test]
	fn hierarchy_terminates_and_top_is_trivial() {
		let h = HierarchicalGraph::build(grid_4x4_all_edges());
		let top = h.get_layer(h.num_layers() - 1);
		assert!(top.node_count() <= 1 || top.edge_count() == 0);
	}

	#[test]
	fn represented_positions_partition_bottom_up() {
		let h = HierarchicalGraph::build(grid_4x4_all_edges());
		let base: HashSet<_> = h.get_layer(0).all_nodes().flat_map(|n| n.represented_positions.iter().copied()).collect();
		for i in 1..h.num_layers() {
			let layer_positions: HashSet<_> =
				h.get_layer(i).all_nodes().flat_map(|n| n.represented_positions.iter().copied()).collect();
			assert_eq!(layer_positions, base);
		}
	}
}
