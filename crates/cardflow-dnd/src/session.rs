#![forbid(unsafe_code)]

//! Drag session lifecycle.
//!
//! ```text
//! Idle -> Dragging -> Committing -> Idle
//!            |  ^
//!            +--+ optimistic reorder
//!            |
//!            +---> Cancelled -> Idle (rollback)
//! ```
//!
//! [`DragController`] owns the live [`Board`] for the whole lifetime of the
//! engine. Each entry point runs to completion and returns one
//! [`DragTransition`]; `Committing` and `Cancelled` only ever appear as the
//! `to` phase of a terminal transition, the controller itself is back in
//! `Idle` by the time the call returns.
//!
//! # Invariants
//!
//! 1. At most one session is active. `start` while dragging is a no-op
//!    ([`NoopReason::ConcurrentGestureIgnored`]).
//! 2. Optimistic moves are applied in call order through the board's
//!    atomic move operations, so the board is consistent after every call.
//! 3. Cancellation restores the board captured at `start`, byte for byte.
//! 4. A committed session yields exactly one [`MoveRecord`], from the slot
//!    captured at `start` to the final slot.
//!
//! # Failure Modes
//!
//! | Input | Outcome |
//! |-------|---------|
//! | `start` on unknown id | `Err(BoardError::*NotFound)`, still idle |
//! | pointer outside every rect | `Noop { NoTarget }`, board untouched |
//! | item rect while dragging a container | `Noop { InvalidTarget }` |
//! | `end` before any target resolved | cancel with `CancelReason::NoTarget` |

use cardflow_board::{Board, BoardEdit, BoardError, ContainerId, DragEntity, EntityKind, Slot};
use cardflow_core::{Direction, Point};
use serde::{Deserialize, Serialize};

use crate::collision::{
    CollisionResolver, DropRect, DropTarget, DropTargetId, TargetRejection, target_for,
};
use crate::config::DragConfig;
use crate::keyboard::resolve_intent;

/// Controller lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Committing,
    Cancelled,
}

impl DragPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Committing => "committing",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Explicit no-op diagnostics for inputs that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    IdleWithoutActiveDrag,
    ConcurrentGestureIgnored,
    NoTarget,
    TargetUnchanged,
    InvalidTarget,
    UnknownTarget,
}

impl From<TargetRejection> for NoopReason {
    fn from(rejection: TargetRejection) -> Self {
        match rejection {
            TargetRejection::InvalidTarget => Self::InvalidTarget,
            TargetRejection::UnknownTarget => Self::UnknownTarget,
        }
    }
}

/// Why a session ended without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Host called cancel (escape key, pointer lost).
    Explicit,
    /// Gesture ended before any target was resolved.
    NoTarget,
    /// The board was replaced mid-drag.
    Reinitialized,
    /// Cleanup path outside normal gesture handling.
    Programmatic,
}

/// The single authoritative description of a completed drag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub entity: DragEntity,
    pub from: Slot,
    pub to: Slot,
}

impl MoveRecord {
    #[must_use]
    pub fn entity_id(&self) -> &str {
        self.entity.id()
    }

    #[must_use]
    pub const fn entity_kind(&self) -> EntityKind {
        self.entity.kind()
    }

    /// Source container; `None` for container moves.
    #[must_use]
    pub fn from_container(&self) -> Option<&ContainerId> {
        self.from.container.as_ref()
    }

    /// Destination container; `None` for container moves.
    #[must_use]
    pub fn to_container(&self) -> Option<&ContainerId> {
        self.to.container.as_ref()
    }

    #[must_use]
    pub const fn from_index(&self) -> usize {
        self.from.index
    }

    #[must_use]
    pub const fn to_index(&self) -> usize {
        self.to.index
    }

    /// The entity ended where it started.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Transition effect emitted by one lifecycle step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        entity: DragEntity,
        origin: Slot,
    },
    Reordered {
        entity: DragEntity,
        previous: Option<DropTarget>,
        target: DropTarget,
        slot: Slot,
        /// False when the new target left the board order as it was.
        changed: bool,
    },
    Committed {
        record: MoveRecord,
    },
    Cancelled {
        entity: DragEntity,
        reason: CancelReason,
        rolled_back: bool,
    },
    Noop {
        reason: NoopReason,
    },
}

impl DragEffect {
    /// Whether the live board differs after this effect.
    #[must_use]
    pub const fn board_changed(&self) -> bool {
        match self {
            Self::Reordered { changed, .. } => *changed,
            Self::Cancelled { rolled_back, .. } => *rolled_back,
            Self::Started { .. } | Self::Committed { .. } | Self::Noop { .. } => false,
        }
    }
}

/// One state-machine transition with deterministic telemetry fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

impl DragTransition {
    /// The move record, if this transition committed a session.
    #[must_use]
    pub fn record(&self) -> Option<&MoveRecord> {
        match &self.effect {
            DragEffect::Committed { record } => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn noop_reason(&self) -> Option<NoopReason> {
        match self.effect {
            DragEffect::Noop { reason } => Some(reason),
            _ => None,
        }
    }
}

/// One gesture sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput<'a> {
    /// Raw pointer position plus the host's measured droppables.
    Pointer {
        position: Point,
        rects: &'a [DropRect],
    },
    /// Keyboard step relative to the current provisional slot.
    Intent(Direction),
    /// The host already knows which droppable is hovered.
    Over(&'a DropTargetId),
}

impl<'a> GestureInput<'a> {
    #[must_use]
    pub const fn pointer(position: Point, rects: &'a [DropRect]) -> Self {
        Self::Pointer { position, rects }
    }
}

/// Transient state of the active drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSession {
    entity: DragEntity,
    origin: Slot,
    current: Slot,
    provisional: Option<DropTarget>,
    optimistic_moves: u32,
    started_sequence: u64,
}

impl DragSession {
    #[must_use]
    pub fn entity(&self) -> &DragEntity {
        &self.entity
    }

    /// Slot captured when the gesture started.
    #[must_use]
    pub fn origin(&self) -> &Slot {
        &self.origin
    }

    /// Slot the entity currently occupies on the live board.
    #[must_use]
    pub fn current(&self) -> &Slot {
        &self.current
    }

    #[must_use]
    pub fn provisional(&self) -> Option<&DropTarget> {
        self.provisional.as_ref()
    }

    /// Number of optimistic moves that changed the board.
    #[must_use]
    pub const fn optimistic_moves(&self) -> u32 {
        self.optimistic_moves
    }

    /// Transition id of the `Started` transition.
    #[must_use]
    pub const fn started_sequence(&self) -> u64 {
        self.started_sequence
    }
}

#[derive(Debug, Clone)]
struct ActiveDrag<P> {
    session: DragSession,
    base: Board<P>,
}

/// Owner of the live board and the drag lifecycle.
#[derive(Debug, Clone)]
pub struct DragController<P> {
    board: Board<P>,
    active: Option<ActiveDrag<P>>,
    resolver: CollisionResolver,
    crosses_containers: bool,
    transition_counter: u64,
}

impl<P> DragController<P> {
    pub fn new(board: Board<P>, config: &DragConfig) -> Self {
        Self {
            board,
            active: None,
            resolver: config.resolver(),
            crosses_containers: config.keyboard_crosses_containers,
            transition_counter: 0,
        }
    }

    /// The live board, including any optimistic moves.
    #[must_use]
    pub fn board(&self) -> &Board<P> {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.active.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.active.as_ref().map(|active| &active.session)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub const fn resolver(&self) -> &CollisionResolver {
        &self.resolver
    }

    /// Replace the board, aborting any session first.
    pub fn reset(&mut self, board: Board<P>) -> Option<DragTransition> {
        let transition = self
            .active
            .take()
            .map(|active| self.abort(active, CancelReason::Reinitialized));
        self.board = board;
        transition
    }

    /// Apply a sample and optimistically move the dragged entity.
    pub fn update(&mut self, input: GestureInput<'_>) -> Result<DragTransition, BoardError> {
        let Some((entity, previous)) = self
            .active
            .as_ref()
            .map(|active| (active.session.entity.clone(), active.session.provisional.clone()))
        else {
            return Ok(self.noop(DragPhase::Idle, NoopReason::IdleWithoutActiveDrag));
        };

        let resolved = match input {
            GestureInput::Pointer { position, rects } => self
                .resolver
                .resolve(&self.board, &entity, position, rects)
                .map(|resolution| resolution.target)
                .ok_or(NoopReason::NoTarget),
            GestureInput::Intent(direction) => {
                match resolve_intent(&self.board, &entity, direction, self.crosses_containers) {
                    Ok(Some(target)) => Ok(target),
                    Ok(None) => Err(NoopReason::NoTarget),
                    Err(rejection) => Err(rejection.into()),
                }
            }
            GestureInput::Over(over) => {
                target_for(&self.board, &entity, over).map_err(NoopReason::from)
            }
        };
        let target = match resolved {
            Ok(target) => target,
            Err(reason) => return Ok(self.noop(DragPhase::Dragging, reason)),
        };
        if previous.as_ref() == Some(&target) {
            return Ok(self.noop(DragPhase::Dragging, NoopReason::TargetUnchanged));
        }

        let outcome = match &entity {
            DragEntity::Item(id) => self.board.move_item(id, &target.container, target.index)?,
            DragEntity::Container(id) => self.board.move_container(id, target.index)?,
        };
        if let Some(active) = self.active.as_mut() {
            active.session.provisional = Some(target.clone());
            active.session.current = outcome.to.clone();
            if outcome.changed {
                active.session.optimistic_moves = active.session.optimistic_moves.saturating_add(1);
            }
        }
        tracing::trace!(
            entity = %entity,
            slot = %outcome.to,
            changed = outcome.changed,
            "optimistic reorder"
        );
        Ok(self.transition(
            DragPhase::Dragging,
            DragPhase::Dragging,
            DragEffect::Reordered {
                entity,
                previous,
                target,
                slot: outcome.to,
                changed: outcome.changed,
            },
        ))
    }

    /// Finish the gesture: commit if a target was ever resolved, otherwise
    /// roll back.
    pub fn end(&mut self) -> DragTransition {
        let Some(active) = self.active.take() else {
            return self.noop(DragPhase::Idle, NoopReason::IdleWithoutActiveDrag);
        };
        if active.session.provisional.is_none() {
            return self.abort(active, CancelReason::NoTarget);
        }
        let session = active.session;
        let record = MoveRecord {
            entity: session.entity,
            from: session.origin,
            to: session.current,
        };
        tracing::debug!(
            entity = %record.entity,
            from = %record.from,
            to = %record.to,
            optimistic_moves = session.optimistic_moves,
            "drag committed"
        );
        self.transition(
            DragPhase::Dragging,
            DragPhase::Committing,
            DragEffect::Committed { record },
        )
    }

    /// Explicit cancellation; always rolls back.
    pub fn cancel(&mut self) -> DragTransition {
        match self.active.take() {
            Some(active) => self.abort(active, CancelReason::Explicit),
            None => self.noop(DragPhase::Idle, NoopReason::IdleWithoutActiveDrag),
        }
    }

    /// Unconditionally return to Idle, rolling back any session.
    ///
    /// Returns `None` when already idle.
    pub fn force_cancel(&mut self) -> Option<DragTransition> {
        self.active
            .take()
            .map(|active| self.abort(active, CancelReason::Programmatic))
    }

    /// Structural edit of the live board. Refused while a drag is active.
    pub fn apply_edit(&mut self, edit: BoardEdit<P>) -> Result<(), BoardError> {
        if self.active.is_some() {
            return Err(BoardError::GestureActive);
        }
        self.board.apply_edit(edit)
    }

    fn abort(&mut self, active: ActiveDrag<P>, reason: CancelReason) -> DragTransition {
        let ActiveDrag { session, base } = active;
        self.board = base;
        let rolled_back = session.optimistic_moves > 0;
        tracing::debug!(entity = %session.entity, ?reason, rolled_back, "drag cancelled");
        self.transition(
            DragPhase::Dragging,
            DragPhase::Cancelled,
            DragEffect::Cancelled {
                entity: session.entity,
                reason,
                rolled_back,
            },
        )
    }

    fn noop(&mut self, phase: DragPhase, reason: NoopReason) -> DragTransition {
        tracing::trace!(phase = phase.as_str(), ?reason, "drag input ignored");
        self.transition(phase, phase, DragEffect::Noop { reason })
    }

    fn transition(&mut self, from: DragPhase, to: DragPhase, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to,
            effect,
        }
    }
}

impl<P: Clone> DragController<P> {
    /// Begin dragging `entity`, capturing its slot and a rollback copy.
    pub fn start(&mut self, entity: DragEntity) -> Result<DragTransition, BoardError> {
        if self.active.is_some() {
            return Ok(self.noop(DragPhase::Dragging, NoopReason::ConcurrentGestureIgnored));
        }
        let origin = match &entity {
            DragEntity::Item(id) => self
                .board
                .locate_item(id)
                .ok_or_else(|| BoardError::ItemNotFound { id: id.clone() })?,
            DragEntity::Container(id) => self
                .board
                .container_index(id)
                .map(Slot::top_level)
                .ok_or_else(|| BoardError::ContainerNotFound { id: id.clone() })?,
        };
        tracing::debug!(entity = %entity, origin = %origin, "drag started");
        let transition = self.transition(
            DragPhase::Idle,
            DragPhase::Dragging,
            DragEffect::Started {
                entity: entity.clone(),
                origin: origin.clone(),
            },
        );
        self.active = Some(ActiveDrag {
            session: DragSession {
                entity,
                current: origin.clone(),
                origin,
                provisional: None,
                optimistic_moves: 0,
                started_sequence: transition.transition_id,
            },
            base: self.board.clone(),
        });
        Ok(transition)
    }
}
