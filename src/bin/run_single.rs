//! `run-single` - runs one scenario from a scenario file through the
//! requested algorithm and writes a one-line results CSV.

use std::path::Path;
use std::process::exit;

use clap::{crate_version, App, Arg};

use pra_star_pathfinding::scenario::load_scenario;
use pra_star_pathfinding::{runner, AlgorithmType};

fn main() {
	env_logger::init_from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"));

	let matches = App::new("run-single")
		.version(crate_version!())
		.about("Runs a single scenario through A* or PRA*")
		.arg(Arg::with_name("scenario_path").long("scenario_path").takes_value(true).required(true).help("Full path for the scenario"))
		.arg(
			Arg::with_name("scenario_number")
				.long("scenario_number")
				.takes_value(true)
				.required(true)
				.help("Scenario number for selecting from the scenario path"),
		)
		.arg(Arg::with_name("algorithm").long("algorithm").takes_value(true).default_value("pra").help("Search algorithm to run"))
		.arg(Arg::with_name("k").long("k").takes_value(true).default_value("0").help("K parameter for PRA*, 0 means infinity"))
		.arg(Arg::with_name("export_path").long("export_path").takes_value(true).required(true).help("Path to save search results"))
		.get_matches();

	let scenario_path = Path::new(matches.value_of("scenario_path").unwrap());
	let export_path = Path::new(matches.value_of("export_path").unwrap());

	if let Err(e) = run(
		scenario_path,
		matches.value_of("scenario_number").unwrap(),
		matches.value_of("algorithm").unwrap(),
		matches.value_of("k").unwrap(),
		export_path,
	) {
		eprintln!("Error: {}", e);
		exit(1);
	}
}

fn run(scenario_path: &Path, scenario_number: &str, algorithm_str: &str, k: &str, export_path: &Path) -> pra_star_pathfinding::Result<()> {
	let scenario_number: usize =
		scenario_number.parse().map_err(|_| pra_star_pathfinding::SearchError::Parse("scenario_number is not an integer".into()))?;
	let k: usize = k.parse().map_err(|_| pra_star_pathfinding::SearchError::Parse("k is not an integer".into()))?;
	let algorithm: AlgorithmType = algorithm_str.parse()?;
	let scenario = load_scenario(scenario_path, scenario_number)?;
	runner::run(scenario_path, &[scenario], algorithm, k, export_path)
}
