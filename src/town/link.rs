//! Links: undirected connections between two districts

use serde::Serialize;

use crate::core::error::{Result, TownError};
use crate::core::types::Uid;

/// A connection between two districts
///
/// The uid order is not preserved: `uid0` is always the smaller one, so two
/// links over the same pair compare equal whichever way they were built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Link {
    uid0: Uid,
    uid1: Uid,
}

impl Link {
    /// Create a link; fails when both ends are the same district
    pub fn new(a: Uid, b: Uid) -> Result<Self> {
        if a == b {
            return Err(TownError::SelfLink(a));
        }
        Ok(Self {
            uid0: a.min(b),
            uid1: a.max(b),
        })
    }

    pub fn uid0(&self) -> Uid {
        self.uid0
    }

    pub fn uid1(&self) -> Uid {
        self.uid1
    }

    /// Whether `uid` is one of the two ends
    pub fn touches(&self, uid: Uid) -> bool {
        self.uid0 == uid || self.uid1 == uid
    }

    /// The end opposite to `uid`, if `uid` is an end
    pub fn other(&self, uid: Uid) -> Option<Uid> {
        if self.uid0 == uid {
            Some(self.uid1)
        } else if self.uid1 == uid {
            Some(self.uid0)
        } else {
            None
        }
    }

    pub fn uids(&self) -> [Uid; 2] {
        [self.uid0, self.uid1]
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.uid0, self.uid1)
    }
}
