//! Shared driver behind `run-single` and `run-multi`: resolves the map
//! backing a scenario file, runs the requested algorithm over every
//! requested scenario, and writes the results CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::persist::{load_flat_graph, load_hierarchical_graph, scenario_to_map_path};
use crate::scenario::Scenario;
use crate::{a_star, pra_star, AlgorithmType, RESULTS_CSV_HEADER};

/// Runs `algorithm` over every scenario in `scenarios` (all assumed to
/// share the same backing map, derived from `scenario_path`), logging
/// one line per scenario and writing `export_path` as a CSV with
/// [`RESULTS_CSV_HEADER`].
pub fn run(scenario_path: &Path, scenarios: &[Scenario], algorithm: AlgorithmType, k: usize, export_path: &Path) -> Result<()> {
	if let Some(parent) = export_path.parent() {
		if !parent.as_os_str().is_empty() {
			std::fs::create_dir_all(parent)?;
		}
	}
	let mut export_file = File::create(export_path)?;
	writeln!(export_file, "{}", RESULTS_CSV_HEADER)?;

	let map_path = scenario_to_map_path(scenario_path);

	match algorithm {
		AlgorithmType::AStar => {
			let graph = load_flat_graph(&map_path, false)?;
			for scenario in scenarios {
				let output = a_star(&graph, scenario.start_pos(), scenario.goal_pos())?;
				report(scenario, &output, &mut export_file)?;
			}
		}
		AlgorithmType::PraStar => {
			let mut hierarchy = load_hierarchical_graph(&map_path, false)?;
			for scenario in scenarios {
				let output = pra_star(&mut hierarchy, k, scenario.start_pos(), scenario.goal_pos())?;
				report(scenario, &output, &mut export_file)?;
			}
		}
	}

	Ok(())
}

fn report(scenario: &Scenario, output: &crate::SearchOutput, export_file: &mut File) -> Result<()> {
	log::info!(
		"Solution from ({},{}), to ({},{}). Optimal cost: {}, Found cost: {}, Expanded: {}, Generated: {}, \
		 Total duration: {}, First move duration: {}",
		scenario.start_x,
		scenario.start_y,
		scenario.goal_x,
		scenario.goal_y,
		scenario.optimal_cost,
		output.path_cost,
		output.expanded,
		output.generated,
		output.duration,
		output.first_move_duration
	);
	writeln!(
		export_file,
		"{},{},{},{},{},{},{},{},{},{}",
		scenario.start_x,
		scenario.start_y,
		scenario.goal_x,
		scenario.goal_y,
		scenario.optimal_cost,
		output.path_cost,
		output.expanded,
		output.generated,
		output.duration,
		output.first_move_duration
	)?;
	Ok(())
}
