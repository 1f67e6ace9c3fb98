//! Town model constants - all fixed values in one place

use crate::core::types::Uid;

// Plane
/// Half-size of the initial editing plane
pub const DIM_MAX: f64 = 1000.0;
/// Safety distance used by interactive edits
pub const DIST_MIN: f64 = 10.0;

// Districts
pub const MIN_CAPACITY: u32 = 1_000;
pub const MAX_CAPACITY: u32 = 1_000_000;
/// Maximum number of links on a housing district
pub const MAX_LINK: usize = 3;
/// Reserved uid meaning "no district"
pub const NO_LINK: Uid = u32::MAX;

// Travel
pub const DEFAULT_SPEED: f64 = 5.0;
/// Speed between two transport districts
pub const FAST_SPEED: f64 = 20.0;
/// Access time of an unreachable destination
pub const INFINITE_TIME: f64 = 1e100;
