//! Town quality indices
//!
//! - ENJ: housing balance, `(housing - transport - production) / total` capacity
//! - CI: connection cost, link length × smaller end capacity × speed
//! - MTA: mean access time from housing to transport plus production
//!
//! All three are recomputed from the current state on every call.

use serde::Serialize;

use crate::core::constants::{DEFAULT_SPEED, FAST_SPEED, INFINITE_TIME};
use crate::town::district::DistrictType;
use crate::town::state::Town;

/// Snapshot of all three indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TownMetrics {
    pub enj: f64,
    pub ci: f64,
    pub mta: f64,
}

impl Town {
    /// Housing balance index; 0 for an empty town
    pub fn enj(&self) -> f64 {
        let mut balance = 0.0;
        let mut population = 0.0;

        for district in self.districts() {
            let capacity = district.capacity() as f64;
            population += capacity;
            match district.district_type() {
                DistrictType::Housing => balance += capacity,
                DistrictType::Transport | DistrictType::Production => balance -= capacity,
            }
        }

        if population == 0.0 {
            return 0.0;
        }
        balance / population
    }

    /// Connection cost index
    pub fn ci(&self) -> f64 {
        self.links()
            .iter()
            .filter_map(|link| {
                let a = self.get_district(link.uid0())?;
                let b = self.get_district(link.uid1())?;
                let length = a.position().distance(&b.position());
                let capacity = a.capacity().min(b.capacity()) as f64;
                let speed = if a.is_type(DistrictType::Transport) && b.is_type(DistrictType::Transport) {
                    FAST_SPEED
                } else {
                    DEFAULT_SPEED
                };
                Some(length * capacity * speed)
            })
            .sum()
    }

    /// Mean transit access over housing districts; 0 without housing
    ///
    /// Each housing district contributes its access time to the nearest
    /// transport and to the nearest production district, `INFINITE_TIME`
    /// for each one it cannot reach.
    pub fn mta(&self) -> f64 {
        let mut sum = 0.0;
        let mut housing = 0usize;

        for district in self.districts_of_type(DistrictType::Housing) {
            for target in [DistrictType::Transport, DistrictType::Production] {
                sum += self
                    .path_find(district.uid(), target)
                    .map_or(INFINITE_TIME, |result| result.distance);
            }
            housing += 1;
        }

        if housing == 0 {
            return 0.0;
        }
        sum / housing as f64
    }

    pub fn metrics(&self) -> TownMetrics {
        TownMetrics {
            enj: self.enj(),
            ci: self.ci(),
            mta: self.mta(),
        }
    }
}
