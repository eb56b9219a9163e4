//! Error taxonomy for the pathfinding core and its I/O glue.
//!
//! I/O and parse errors are meant to abort a CLI process (see the
//! binaries under `src/bin/`); `InvalidPosition` is a programming-invariant
//! violation surfaced to library callers as a `Result` rather than a panic,
//! since a caller may reasonably query an out-of-map position and want to
//! handle that without crashing. `NoPath` is usually not an error at all -
//! `a_star`/`pra_star` encode "no path" as a value (see `SearchOutput`) -
//! it only becomes a `SearchError::NoPath` when PRA*'s internal invariant
//! that every constrained sub-search must succeed is violated.

use thiserror::Error;

use crate::position::GridPosition;

#[derive(Error, Debug)]
pub enum SearchError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("parse error: {0}")]
	Parse(String),
	#[error("position {0} is not covered by any node")]
	InvalidPosition(GridPosition),
	/// Display text matches the reference CLI's exact diagnostic line
	/// ("Error: Unknown algorithm type.") so `eprintln!("Error: {}", e)`
	/// in the binaries reproduces it verbatim.
	#[error("Unknown algorithm type.")]
	UnknownAlgorithm(String),
	#[error("no path found")]
	NoPath,
	#[error("graph cache corrupt or incompatible: {0}")]
	Cache(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
