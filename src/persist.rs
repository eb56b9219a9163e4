//! Graph cache persistence and path derivation.
//!
//! Flat and hierarchical graphs are expensive to rebuild (clique search
//! in particular), so each is cached to a sibling file next to the map
//! it was built from. The cache format is `bincode`, standing in for the
//! original's `libnop` wire format (see DESIGN.md).

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::graph::FlatGraph;
use crate::hierarchy::HierarchicalGraph;
use crate::map_io::{flat_graph_from_map, load_map};

/// `./AR00011SR.map.scen` -> `./AR00011SR.map`
pub fn scenario_to_map_path(scenario_path: &Path) -> PathBuf {
	let stem = scenario_path.file_stem().unwrap_or_default();
	scenario_path.with_file_name(stem)
}

/// `./AR00011SR.map` -> `./AR00011SR.flat_graph.bin`
pub fn map_to_flat_graph_path(map_path: &Path) -> PathBuf {
	map_path.with_extension("flat_graph.bin")
}

/// `./AR00011SR.map` -> `./AR00011SR.hierarchical_graph.bin`
pub fn map_to_hierarchical_graph_path(map_path: &Path) -> PathBuf {
	map_path.with_extension("hierarchical_graph.bin")
}

/// Loads the cached flat graph for `map_path` if present, otherwise
/// parses the map and builds it fresh (without writing the cache back -
/// see [`save_flat_graph`]).
pub fn load_flat_graph(map_path: &Path, force_create: bool) -> Result<FlatGraph> {
	let cache_path = map_to_flat_graph_path(map_path);
	if cache_path.exists() && !force_create {
		log::info!("loading cached flat graph from {}", cache_path.display());
		let bytes = std::fs::read(&cache_path)?;
		return Ok(bincode::deserialize(&bytes)?);
	}
	log::info!("building flat graph from map {}", map_path.display());
	let map = load_map(map_path)?;
	Ok(flat_graph_from_map(&map))
}

pub fn save_flat_graph(graph: &FlatGraph, map_path: &Path) -> Result<()> {
	let cache_path = map_to_flat_graph_path(map_path);
	log::info!("caching flat graph to {}", cache_path.display());
	let bytes = bincode::serialize(graph)?;
	std::fs::write(cache_path, bytes)?;
	Ok(())
}

/// Loads the cached hierarchical graph for `map_path` if present,
/// otherwise builds the layer-0 flat graph and abstracts it fresh.
///
/// A hierarchy loaded from cache always has every layer's restriction
/// set cleared to empty (unrestricted): restriction sets are transient
/// per-search state, not part of the graph's identity, so the cache
/// format doesn't even round-trip their contents.
pub fn load_hierarchical_graph(map_path: &Path, force_create: bool) -> Result<HierarchicalGraph> {
	let cache_path = map_to_hierarchical_graph_path(map_path);
	if cache_path.exists() && !force_create {
		log::info!("loading cached hierarchical graph from {}", cache_path.display());
		let bytes = std::fs::read(&cache_path)?;
		let mut hierarchy: HierarchicalGraph = bincode::deserialize(&bytes)?;
		hierarchy.clear_all_restrictions();
		return Ok(hierarchy);
	}
	let flat_graph = load_flat_graph(map_path, force_create)?;
	Ok(HierarchicalGraph::build(flat_graph))
}

pub fn save_hierarchical_graph(graph: &HierarchicalGraph, map_path: &Path) -> Result<()> {
	let cache_path = map_to_hierarchical_graph_path(map_path);
	log::info!("caching hierarchical graph to {}", cache_path.display());
	let bytes = bincode::serialize(graph)?;
	std::fs::write(cache_path, bytes)?;
	Ok(())
}
