//! `run-multi` - runs every scenario in a scenario file through the
//! requested algorithm and writes one results CSV covering all of them.

use std::path::Path;
use std::process::exit;

use clap::{crate_version, App, Arg};

use pra_star_pathfinding::scenario::load_scenarios;
use pra_star_pathfinding::{runner, AlgorithmType};

fn main() {
	env_logger::init_from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"));

	let matches = App::new("run-multi")
		.version(crate_version!())
		.about("Runs every scenario in a scenario file through A* or PRA*")
		.arg(Arg::with_name("scenario_path").long("scenario_path").takes_value(true).required(true).help("Full path for the scenario"))
		.arg(Arg::with_name("algorithm").long("algorithm").takes_value(true).default_value("pra").help("Search algorithm to run"))
		.arg(Arg::with_name("k").long("k").takes_value(true).default_value("0").help("K parameter for PRA*, 0 means infinity"))
		.arg(Arg::with_name("export_path").long("export_path").takes_value(true).required(true).help("Path to save search results"))
		.get_matches();

	let scenario_path = Path::new(matches.value_of("scenario_path").unwrap());
	let export_path = Path::new(matches.value_of("export_path").unwrap());

	if let Err(e) = run(scenario_path, matches.value_of("algorithm").unwrap(), matches.value_of("k").unwrap(), export_path) {
		eprintln!("Error: {}", e);
		exit(1);
	}
}

fn run(scenario_path: &Path, algorithm_str: &str, k: &str, export_path: &Path) -> pra_star_pathfinding::Result<()> {
	let k: usize = k.parse().map_err(|_| pra_star_pathfinding::SearchError::Parse("k is not an integer".into()))?;
	let algorithm: AlgorithmType = algorithm_str.parse()?;
	let scenarios = load_scenarios(scenario_path)?;
	runner::run(scenario_path, &scenarios, algorithm, k, export_path)
}
