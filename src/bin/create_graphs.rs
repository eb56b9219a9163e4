//! `create-graphs --map_path=P` - builds and caches the layer-0 flat
//! graph and its hierarchy for a map, emitting `<P>.flat_graph.bin` and
//! `<P>.hierarchical_graph.bin` next to it.

use std::path::Path;
use std::process::exit;

use clap::{crate_version, App, Arg};

use pra_star_pathfinding::hierarchy::HierarchicalGraph;
use pra_star_pathfinding::persist::{load_flat_graph, save_flat_graph, save_hierarchical_graph};

fn main() {
	env_logger::init_from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"));

	let matches = App::new("create-graphs")
		.version(crate_version!())
		.about("Builds and caches the flat graph and hierarchy for a map")
		.arg(Arg::with_name("map_path").long("map_path").takes_value(true).required(true).help("Full path for the map"))
		.get_matches();

	let map_path = Path::new(matches.value_of("map_path").unwrap());

	if let Err(e) = run(map_path) {
		eprintln!("Error: {}", e);
		exit(1);
	}
}

fn run(map_path: &Path) -> pra_star_pathfinding::Result<()> {
	log::info!("building flat graph for {}", map_path.display());
	let flat_graph = load_flat_graph(map_path, true)?;
	save_flat_graph(&flat_graph, map_path)?;

	log::info!("building hierarchy for {}", map_path.display());
	let hierarchical_graph = HierarchicalGraph::build(flat_graph);
	save_hierarchical_graph(&hierarchical_graph, map_path)?;

	log::info!("done");
	Ok(())
}
