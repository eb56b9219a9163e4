//! Flat graphs: the concrete layer-0 grid graph and every abstraction
//! layer built on top of it.
//!
//! A `FlatGraph` owns its nodes, an undirected irreflexive simple edge
//! relation between them, a grid-position→node-id mapping, and an
//! optional restriction set used by PRA* to constrain neighbor
//! enumeration to a corridor.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, Result};
use crate::position::{AbstractPosition, GridPosition};

pub type NodeId = u64;

/// A node of a flat graph.
///
/// At layer 0 a node represents exactly one grid position, equal to its
/// own. At higher layers it represents the union of its children's grid
/// positions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	pub position: AbstractPosition,
	pub represented_positions: HashSet<GridPosition>,
}

/// A set of graph nodes with an undirected, irreflexive, simple edge
/// relation, a grid-position→id map, and an optional restriction set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlatGraph {
	nodes: HashMap<NodeId, GraphNode>,
	neighbours: HashMap<NodeId, HashSet<NodeId>>,
	position_to_id: HashMap<GridPosition, NodeId>,
	constrained_nodes: HashSet<NodeId>,
	edge_count: usize,
}

impl FlatGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a node, establishes its grid-position→id mapping entries,
	/// and initializes an empty neighbor bucket.
	pub fn add_node(&mut self, node: GraphNode) {
		for &pos in &node.represented_positions {
			self.position_to_id.insert(pos, node.id);
		}
		self.neighbours.entry(node.id).or_insert_with(HashSet::new);
		self.nodes.insert(node.id, node);
	}

	/// Adds an undirected edge between `a` and `b`. Both ids must already
	/// exist. The caller must not add the same edge twice - doing so
	/// would double the edge counter without changing the adjacency sets.
	pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
		debug_assert!(self.nodes.contains_key(&a));
		debug_assert!(self.nodes.contains_key(&b));
		self.neighbours.entry(a).or_insert_with(HashSet::new).insert(b);
		self.neighbours.entry(b).or_insert_with(HashSet::new).insert(a);
		self.edge_count += 1;
	}

	pub fn edge_count(&self) -> usize {
		self.edge_count
	}

	pub fn get_node(&self, id: NodeId) -> Option<&GraphNode> {
		self.nodes.get(&id)
	}

	pub fn get_pos_node_id(&self, position: GridPosition) -> Result<NodeId> {
		self.position_to_id.get(&position).copied().ok_or(SearchError::InvalidPosition(position))
	}

	pub fn all_node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.nodes.keys().copied()
	}

	pub fn all_nodes(&self) -> impl Iterator<Item = &GraphNode> {
		self.nodes.values()
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn are_neighbours(&self, a: NodeId, b: NodeId) -> bool {
		self.neighbours.get(&a).map_or(false, |ns| ns.contains(&b))
	}

	/// Degree of a node, ignoring the restriction set.
	pub fn node_degree(&self, id: NodeId) -> usize {
		self.neighbours.get(&id).map_or(0, |ns| ns.len())
	}

	/// Neighbors of `id`, subject to restriction: the gate tests
	/// membership of the *queried* node `id`, not of each candidate
	/// neighbor. If the restriction set is empty, or `id` itself is in
	/// it, all neighbors are returned; otherwise none are.
	///
	/// This asymmetric gate (on the queried node rather than each
	/// neighbor) is preserved from the reference implementation as
	/// specified, not a bug fix.
	pub fn get_neighbours(&self, id: NodeId) -> Vec<NodeId> {
		let all_or_none = self.constrained_nodes.is_empty() || self.constrained_nodes.contains(&id);
		if !all_or_none {
			return Vec::new();
		}
		self.neighbours.get(&id).map_or_else(Vec::new, |ns| ns.iter().copied().collect())
	}

	/// Neighbors of `id` ignoring the restriction set entirely.
	pub fn get_neighbours_unrestricted(&self, id: NodeId) -> Vec<NodeId> {
		self.neighbours.get(&id).map_or_else(Vec::new, |ns| ns.iter().copied().collect())
	}

	/// Replaces the restriction set. Empty means unrestricted.
	pub fn set_constrained_nodes(&mut self, node_ids: HashSet<NodeId>) {
		self.constrained_nodes = node_ids;
	}

	pub fn constrained_nodes(&self) -> &HashSet<NodeId> {
		&self.constrained_nodes
	}
}
