//! Positions and the octile distance metric shared by the heuristic and edge costs.
//!
//! Two flavors of position exist: [`GridPosition`], the externally meaningful
//! coordinate of a reachable grid cell, and [`AbstractPosition`], the
//! centroid of a cluster of grid positions produced by the abstraction
//! builder. The two are never interchangeable as external coordinates -
//! only `GridPosition` ever comes from or goes to a caller.

use serde::{Deserialize, Serialize};

/// A reachable grid cell, identified by non-negative integer coordinates.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GridPosition {
	pub x: usize,
	pub y: usize,
}

impl GridPosition {
	pub fn new(x: usize, y: usize) -> Self {
		Self { x, y }
	}
}

impl std::fmt::Display for GridPosition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// The centroid of a cluster of grid positions. Never an external coordinate.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct AbstractPosition {
	pub x: f64,
	pub y: f64,
}

impl AbstractPosition {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl From<GridPosition> for AbstractPosition {
	fn from(p: GridPosition) -> Self {
		Self { x: p.x as f64, y: p.y as f64 }
	}
}

const SQRT2: f64 = std::f64::consts::SQRT_2;

/// Octile distance: the admissible, consistent heuristic for 8-connected
/// grids with unit cardinal cost and `sqrt(2)` diagonal cost.
///
/// `dist = sqrt(2) * min(dx, dy) + |dx - dy|`
fn octile(dx: f64, dy: f64) -> f64 {
	let (dx, dy) = (dx.abs(), dy.abs());
	SQRT2 * dx.min(dy) + (dx - dy).abs()
}

/// Trait for types between which an octile distance can be computed.
///
/// Coordinates are promoted to `f64` before subtracting, so this is safe
/// to call even when the underlying position type holds wide unsigned
/// integers that would otherwise overflow on subtraction.
pub trait OctileDistance<Rhs = Self> {
	fn octile_distance(&self, other: &Rhs) -> f64;
}

impl OctileDistance for GridPosition {
	fn octile_distance(&self, other: &Self) -> f64 {
		octile(self.x as f64 - other.x as f64, self.y as f64 - other.y as f64)
	}
}

impl OctileDistance for AbstractPosition {
	fn octile_distance(&self, other: &Self) -> f64 {
		octile(self.x - other.x, self.y - other.y)
	}
}

impl OctileDistance<GridPosition> for AbstractPosition {
	fn octile_distance(&self, other: &GridPosition) -> f64 {
		octile(self.x - other.x as f64, self.y - other.y as f64)
	}
}

impl OctileDistance<AbstractPosition> for GridPosition {
	fn octile_distance(&self, other: &AbstractPosition) -> f64 {
		other.octile_distance(self)
	}
}
