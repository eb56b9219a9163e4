//! Grid pathfinding core: octile-distance A* and its hierarchical PRA*
//! refinement, plus the map/scenario I/O and graph persistence glue the
//! three CLI binaries are built on.

pub mod abstraction;
pub mod astar;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod map_io;
pub mod persist;
pub mod position;
pub mod pra_star;
pub mod priority_set;
pub mod runner;
pub mod scenario;

pub use astar::{a_star, SearchOutput};
pub use error::{Result, SearchError};
pub use graph::{FlatGraph, GraphNode, NodeId};
pub use hierarchy::HierarchicalGraph;
pub use position::{AbstractPosition, GridPosition, OctileDistance};
pub use pra_star::pra_star;

/// Algorithm selector shared by the CLI binaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmType {
	AStar,
	PraStar,
}

impl std::str::FromStr for AlgorithmType {
	type Err = SearchError;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"astar" => Ok(Self::AStar),
			"pra" => Ok(Self::PraStar),
			other => Err(SearchError::UnknownAlgorithm(other.to_string())),
		}
	}
}

/// Header row for the CSV results export shared by `run-single` and `run-multi`.
pub const RESULTS_CSV_HEADER: &str =
	"start_x,start_y,goal_x,goal_y,optimal_cost,solution_cost,expanded,generated,duration,first_move_duration";
