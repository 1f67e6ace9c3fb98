//! Archipelago - town model for a district-planning editor
//!
//! A town is a set of circular districts (housing, transport, production)
//! joined by straight links. The model keeps the town geometrically
//! consistent, finds access paths over the link graph and scores the layout.

pub mod core;
pub mod render;
pub mod spatial;
pub mod storage;
pub mod town;
