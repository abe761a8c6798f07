#![forbid(unsafe_code)]

//! Errors raised by board operations.

use std::fmt;

use crate::id::{ContainerId, ItemId};

/// Failure of a board operation.
///
/// Every operation that returns one of these has left the board exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The operation referenced an item that is not on the board.
    ItemNotFound { id: ItemId },
    /// The operation referenced a container that is not on the board.
    ContainerNotFound { id: ContainerId },
    /// Two containers share an identifier.
    DuplicateContainer { id: ContainerId },
    /// An item identifier appears more than once across the board.
    DuplicateItem { id: ItemId },
    /// A container still holds items and cannot be removed.
    ContainerNotEmpty { id: ContainerId, count: usize },
    /// Structural edits are refused while a drag session owns the board.
    GestureActive,
}

impl BoardError {
    /// Whether the error names an unknown item or container.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ItemNotFound { .. } | Self::ContainerNotFound { .. }
        )
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemNotFound { id } => write!(f, "item not found: {id}"),
            Self::ContainerNotFound { id } => write!(f, "container not found: {id}"),
            Self::DuplicateContainer { id } => write!(f, "duplicate container id: {id}"),
            Self::DuplicateItem { id } => write!(f, "duplicate item id: {id}"),
            Self::ContainerNotEmpty { id, count } => {
                write!(f, "container '{id}' has {count} items and cannot be removed")
            }
            Self::GestureActive => write!(f, "board is locked by an active drag session"),
        }
    }
}

impl std::error::Error for BoardError {}
