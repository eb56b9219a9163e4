//! ASCII scenario-file parsing: movingai-style `.scen` files, a version
//! line followed by one tab/space-delimited problem instance per line.

use std::path::Path;

use crate::error::{Result, SearchError};
use crate::position::GridPosition;

/// One start/goal problem instance plus the scenario generator's metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
	pub bucket: i64,
	pub map_name: String,
	pub width: usize,
	pub height: usize,
	pub start_x: usize,
	pub start_y: usize,
	pub goal_x: usize,
	pub goal_y: usize,
	pub optimal_cost: f64,
}

impl Scenario {
	pub fn start_pos(&self) -> GridPosition {
		GridPosition::new(self.start_x, self.start_y)
	}

	pub fn goal_pos(&self) -> GridPosition {
		GridPosition::new(self.goal_x, self.goal_y)
	}
}

fn parse_line(line: &str) -> Result<Scenario> {
	let mut fields = line.split_whitespace();
	let mut next = |what: &'static str| fields.next().ok_or_else(|| SearchError::Parse(format!("scenario line is missing {what}")));

	let bucket: i64 = next("bucket")?.parse().map_err(|_| SearchError::Parse("bucket is not an integer".into()))?;
	let map_name = next("map_name")?.to_string();
	let width: usize = next("width")?.parse().map_err(|_| SearchError::Parse("width is not an integer".into()))?;
	let height: usize = next("height")?.parse().map_err(|_| SearchError::Parse("height is not an integer".into()))?;
	let start_x: usize = next("start_x")?.parse().map_err(|_| SearchError::Parse("start_x is not an integer".into()))?;
	let start_y: usize = next("start_y")?.parse().map_err(|_| SearchError::Parse("start_y is not an integer".into()))?;
	let goal_x: usize = next("goal_x")?.parse().map_err(|_| SearchError::Parse("goal_x is not an integer".into()))?;
	let goal_y: usize = next("goal_y")?.parse().map_err(|_| SearchError::Parse("goal_y is not an integer".into()))?;
	let optimal_cost: f64 = next("optimal_cost")?.parse().map_err(|_| SearchError::Parse("optimal_cost is not a float".into()))?;

	Ok(Scenario { bucket, map_name, width, height, start_x, start_y, goal_x, goal_y, optimal_cost })
}

/// Loads the `n`th problem instance (0-indexed) from a scenario file,
/// skipping the leading version line.
pub fn load_scenario(scenario_path: &Path, n: usize) -> Result<Scenario> {
	let content = std::fs::read_to_string(scenario_path)?;
	let line = content
		.lines()
		.nth(n + 1)
		.ok_or_else(|| SearchError::Parse(format!("scenario file has no line {} (after the version line)", n)))?;
	parse_line(line)
}

/// Loads every problem instance from a scenario file, skipping the
/// leading version line.
pub fn load_scenarios(scenario_path: &Path) -> Result<Vec<Scenario>> {
	let content = std::fs::read_to_string(scenario_path)?;
	content.lines().skip(1).map(parse_line).collect()
}
