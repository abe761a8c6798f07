#![forbid(unsafe_code)]

//! Advisory per-container capacity (WIP limit) checks.
//!
//! Capacity never blocks a move. The report only flags containers whose item
//! count exceeds their ceiling so the presentation layer can highlight them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::id::ContainerId;

/// Capacity state of one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityStatus {
    pub count: usize,
    pub limit: Option<u32>,
    /// `count > limit`. Always false without a limit.
    pub over_limit: bool,
    /// `count == limit`. Always false without a limit.
    pub at_limit: bool,
}

impl CapacityStatus {
    #[must_use]
    pub fn new(count: usize, limit: Option<u32>) -> Self {
        let (over_limit, at_limit) = match limit {
            Some(limit) => {
                let limit = limit as usize;
                (count > limit, count == limit)
            }
            None => (false, false),
        };
        Self {
            count,
            limit,
            over_limit,
            at_limit,
        }
    }

    /// Slots left before the ceiling, `None` when unbounded.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        self.limit
            .map(|limit| (limit as usize).saturating_sub(self.count))
    }
}

/// Capacity status of every container, keyed by container id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityReport {
    statuses: BTreeMap<ContainerId, CapacityStatus>,
}

impl CapacityReport {
    #[must_use]
    pub fn get(&self, id: &ContainerId) -> Option<&CapacityStatus> {
        self.statuses.get(id)
    }

    /// Whether any container is over its ceiling.
    #[must_use]
    pub fn any_over_limit(&self) -> bool {
        self.statuses.values().any(|s| s.over_limit)
    }

    /// Containers over their ceiling, in id order.
    pub fn over_limit(&self) -> impl Iterator<Item = &ContainerId> + '_ {
        self.statuses
            .iter()
            .filter(|(_, s)| s.over_limit)
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContainerId, &CapacityStatus)> + '_ {
        self.statuses.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

/// Compute the capacity report for a board.
#[must_use]
pub fn check_capacity<P>(board: &Board<P>) -> CapacityReport {
    let statuses = board
        .containers()
        .iter()
        .map(|c| (c.id().clone(), CapacityStatus::new(c.len(), c.capacity())))
        .collect();
    CapacityReport { statuses }
}
