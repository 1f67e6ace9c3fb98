//! Districts: circular zones on the town plane

use serde::{Deserialize, Serialize};

use crate::core::constants::{MAX_CAPACITY, MIN_CAPACITY, NO_LINK};
use crate::core::error::{Result, TownError};
use crate::core::types::{Uid, Vec2};

/// Type of district
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistrictType {
    Housing,
    Transport,
    Production,
}

impl DistrictType {
    /// Section order in town files
    pub const ALL: [DistrictType; 3] = [
        DistrictType::Housing,
        DistrictType::Transport,
        DistrictType::Production,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DistrictType::Housing => "housing",
            DistrictType::Transport => "transport",
            DistrictType::Production => "production",
        }
    }
}

/// A district (town node)
///
/// A district has no conception of a town and never checks for duplicate
/// uids or overlaps; that is the town's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct District {
    uid: Uid,
    district_type: DistrictType,
    position: Vec2,
    capacity: u32,
    #[serde(skip)]
    pub selected: bool,
    #[serde(skip)]
    pub highlighted: bool,
}

impl District {
    /// Create a district, validating the uid, position and capacity
    pub fn new(district_type: DistrictType, uid: Uid, position: Vec2, capacity: u32) -> Result<Self> {
        if uid == NO_LINK {
            return Err(TownError::ReservedUid);
        }
        if !position.is_finite() {
            return Err(TownError::NonFinitePosition(uid));
        }
        check_capacity(capacity as u64)?;

        Ok(Self {
            uid,
            district_type,
            position,
            capacity,
            selected: false,
            highlighted: false,
        })
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn district_type(&self) -> DistrictType {
        self.district_type
    }

    pub fn set_type(&mut self, district_type: DistrictType) {
        self.district_type = district_type;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Set the position; NaN or infinite coordinates are rejected
    pub fn set_position(&mut self, position: Vec2) -> Result<()> {
        if !position.is_finite() {
            return Err(TownError::NonFinitePosition(self.uid));
        }
        self.position = position;
        Ok(())
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Set the capacity; out of range values are rejected
    pub fn set_capacity(&mut self, capacity: u32) -> Result<()> {
        check_capacity(capacity as u64)?;
        self.capacity = capacity;
        Ok(())
    }

    /// Radius derived from the capacity
    pub fn radius(&self) -> f64 {
        (self.capacity as f64).sqrt()
    }

    /// Set the capacity from a radius
    ///
    /// Unlike `set_capacity` this never fails: `radius²` is clamped into the
    /// capacity range and truncated, so the resulting radius generally
    /// differs from the requested one.
    pub fn set_radius(&mut self, radius: f64) {
        self.capacity = capacity_from_radius(radius);
    }

    pub fn is_type(&self, district_type: DistrictType) -> bool {
        self.district_type == district_type
    }
}

/// Capacity matching a radius, clamped into `[MIN_CAPACITY, MAX_CAPACITY]`
pub fn capacity_from_radius(radius: f64) -> u32 {
    let squared = radius * radius;
    if squared.is_nan() {
        return MIN_CAPACITY;
    }
    squared.clamp(MIN_CAPACITY as f64, MAX_CAPACITY as f64) as u32
}

/// Validate a raw capacity value
pub fn check_capacity(capacity: u64) -> Result<()> {
    if capacity < MIN_CAPACITY as u64 {
        return Err(TownError::CapacityTooLow(capacity));
    }
    if capacity > MAX_CAPACITY as u64 {
        return Err(TownError::CapacityTooHigh(capacity));
    }
    Ok(())
}
