#![forbid(unsafe_code)]

//! Cardflow public facade crate.
//!
//! Re-exports the board model, the drag engine and the geometry types, and
//! offers a prelude for hosts wiring a Kanban board to pointer and keyboard
//! input.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use cardflow_core::{Direction, Point, Rect};

// --- Board re-exports ------------------------------------------------------

pub use cardflow_board::{
    Assignee, Board, BoardEdit, BoardError, BoardFilter, CapacityReport, CapacityStatus, Card,
    Container, ContainerId, DragEntity, EntityKind, Filterable, Item, ItemId, Priority, Slot,
    Status, Tag, check_capacity,
};

// --- Drag re-exports -------------------------------------------------------

pub use cardflow_dnd::{
    BoardEngine, CancelReason, DragConfig, DragConfigError, DragEffect, DragPhase, DragTransition,
    DropRect, DropTarget, DropTargetId, EngineEvent, GestureInput, MoveRecord, NoopReason,
    SubscriptionId,
};

/// A board of stock [`Card`] payloads.
pub type CardBoard = Board<Card>;

/// An engine over stock [`Card`] payloads.
pub type CardEngine = BoardEngine<Card>;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Cardflow hosts.
#[derive(Debug)]
pub enum Error {
    /// Board operation referenced unknown ids or broke a rule.
    Board(BoardError),
    /// Configuration failed to load or validate.
    Config(DragConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Board(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<BoardError> for Error {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

impl From<DragConfigError> for Error {
    fn from(err: DragConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Cardflow APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build an engine from a container list and a config in one step.
pub fn engine<P: Clone>(containers: Vec<Container<P>>, config: DragConfig) -> Result<BoardEngine<P>> {
    let board = Board::new(containers)?;
    Ok(BoardEngine::new(board, config)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Board, BoardEdit, BoardEngine, BoardFilter, Card, CardBoard, CardEngine, Container,
        Direction, DragConfig, DragEntity, DropRect, EngineEvent, Error, GestureInput, Item,
        MoveRecord, Point, Rect, Result,
    };

    pub use crate::{board, core, dnd};
}

pub use cardflow_board as board;
pub use cardflow_core as core;
pub use cardflow_dnd as dnd;
