//! Planar geometry helpers

pub mod geometry;
