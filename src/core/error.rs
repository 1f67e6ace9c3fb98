use thiserror::Error;

use crate::core::constants::{MAX_CAPACITY, MIN_CAPACITY};
use crate::core::types::Uid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TownError {
    #[error("Impossible to have two identical uids: {0}")]
    DuplicateUid(Uid),

    #[error("Impossible to have the reserved uid")]
    ReservedUid,

    #[error("Impossible to have a too little capacity: {0} < {min}", min = MIN_CAPACITY)]
    CapacityTooLow(u64),

    #[error("Impossible to have a too much capacity: {0} > {max}", max = MAX_CAPACITY)]
    CapacityTooHigh(u64),

    #[error("Impossible to place node {0} at a non-finite position")]
    NonFinitePosition(Uid),

    #[error("Impossible to have superposition between two nodes: {first} with {second}")]
    NodeNodeOverlap { first: Uid, second: Uid },

    #[error("Impossible to have superposition between a link and a node. Node is {0}")]
    NodeLinkOverlap(Uid),

    #[error("No node correspond for this link. Node not found: {0}")]
    LinkEndpointMissing(Uid),

    #[error("Link already exists inbetween nodes {uid0} and {uid1}")]
    DuplicateLink { uid0: Uid, uid1: Uid },

    #[error("Impossible to self-link a node: {0} <-> {0}")]
    SelfLink(Uid),

    #[error("Too many connections for node: {0}")]
    HousingLinkLimitExceeded(Uid),

    #[error("Node does not exist: {0}")]
    NodeNotFound(Uid),

    #[error("District {0} lies outside of the town extent")]
    OutOfBounds(Uid),
}

impl TownError {
    /// Node-node overlap with the pair in ascending order
    pub fn node_overlap(a: Uid, b: Uid) -> Self {
        TownError::NodeNodeOverlap {
            first: a.min(b),
            second: a.max(b),
        }
    }

    /// UIDs this error refers to
    pub fn uids(&self) -> Vec<Uid> {
        match self {
            TownError::DuplicateUid(uid)
            | TownError::NodeLinkOverlap(uid)
            | TownError::LinkEndpointMissing(uid)
            | TownError::SelfLink(uid)
            | TownError::HousingLinkLimitExceeded(uid)
            | TownError::NodeNotFound(uid)
            | TownError::OutOfBounds(uid)
            | TownError::NonFinitePosition(uid) => vec![*uid],
            TownError::NodeNodeOverlap { first, second } => vec![*first, *second],
            TownError::DuplicateLink { uid0, uid1 } => vec![*uid0, *uid1],
            TownError::ReservedUid
            | TownError::CapacityTooLow(_)
            | TownError::CapacityTooHigh(_) => Vec::new(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TownError>;
