//! Town layer - districts, links, access paths and metrics

pub mod district;
pub mod link;
pub mod metrics;
pub mod pathfinding;
pub mod state;
pub mod validation;

pub use district::{District, DistrictType};
pub use link::Link;
pub use metrics::TownMetrics;
pub use pathfinding::PathResult;
pub use state::Town;
