#![forbid(unsafe_code)]

//! Host-facing engine: gesture entry points, listeners, capacity cache.
//!
//! # Usage
//!
//! ```ignore
//! let mut engine = BoardEngine::new(board, DragConfig::default())?;
//! engine.subscribe(|event| match event {
//!     EngineEvent::BoardChanged(board) => rerender(board),
//!     EngineEvent::MoveCompleted(record) => persist(record),
//! });
//!
//! engine.on_gesture_start(DragEntity::item("card-7"))?;
//! engine.on_gesture_move(GestureInput::pointer(pointer, &rects))?;
//! engine.on_gesture_end();
//! ```

use std::fmt;

use cardflow_board::{Board, BoardEdit, BoardError, CapacityReport, DragEntity, check_capacity};

use crate::config::{DragConfig, DragConfigError};
use crate::session::{
    DragController, DragEffect, DragPhase, DragSession, DragTransition, GestureInput, MoveRecord,
};

/// Identifier returned by [`BoardEngine::subscribe`].
pub type SubscriptionId = u64;

/// Notification delivered to listeners.
#[derive(Debug)]
pub enum EngineEvent<'a, P> {
    /// The live board changed (optimistic move, rollback, edit, reinitialise).
    BoardChanged(&'a Board<P>),
    /// A drag committed. Emitted once per session.
    MoveCompleted(&'a MoveRecord),
}

type Listener<P> = Box<dyn FnMut(&EngineEvent<'_, P>)>;

/// The board reordering engine.
pub struct BoardEngine<P> {
    controller: DragController<P>,
    config: DragConfig,
    capacity: CapacityReport,
    listeners: Vec<(SubscriptionId, Listener<P>)>,
    next_subscription: SubscriptionId,
}

impl<P: fmt::Debug> fmt::Debug for BoardEngine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardEngine")
            .field("controller", &self.controller)
            .field("config", &self.config)
            .field("capacity", &self.capacity)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<P: Clone> BoardEngine<P> {
    /// Create an engine over `board`. Fails if `config` does not validate.
    pub fn new(board: Board<P>, config: DragConfig) -> Result<Self, DragConfigError> {
        let config = config.validated()?;
        let capacity = if config.track_capacity {
            check_capacity(&board)
        } else {
            CapacityReport::default()
        };
        Ok(Self {
            controller: DragController::new(board, &config),
            config,
            capacity,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Replace the board, aborting any active drag without a move record.
    pub fn initialize(&mut self, board: Board<P>) -> Option<DragTransition> {
        let transition = self.controller.reset(board);
        tracing::debug!(
            containers = self.controller.board().container_count(),
            items = self.controller.board().item_count(),
            aborted = transition.is_some(),
            "board initialized"
        );
        self.board_changed();
        transition
    }

    pub fn on_gesture_start(&mut self, entity: DragEntity) -> Result<DragTransition, BoardError> {
        self.controller.start(entity)
    }

    pub fn on_gesture_move(
        &mut self,
        input: GestureInput<'_>,
    ) -> Result<DragTransition, BoardError> {
        let transition = self.controller.update(input)?;
        if transition.effect.board_changed() {
            self.board_changed();
        }
        Ok(transition)
    }

    pub fn on_gesture_end(&mut self) -> DragTransition {
        let transition = self.controller.end();
        self.settle(&transition);
        transition
    }

    pub fn on_gesture_cancel(&mut self) -> DragTransition {
        let transition = self.controller.cancel();
        self.settle(&transition);
        transition
    }

    /// Abort any drag from a cleanup path.
    pub fn force_cancel(&mut self) -> Option<DragTransition> {
        let transition = self.controller.force_cancel()?;
        self.settle(&transition);
        Some(transition)
    }

    /// Structural edit (add/remove/rename columns and cards).
    ///
    /// Refused with [`BoardError::GestureActive`] while a drag is active.
    pub fn apply_edit(&mut self, edit: BoardEdit<P>) -> Result<(), BoardError> {
        let name = edit.name();
        match self.controller.apply_edit(edit) {
            Ok(()) => {
                self.board_changed();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(edit = name, error = %err, "board edit rejected");
                Err(err)
            }
        }
    }

    /// Deep copy of the live board.
    #[must_use]
    pub fn snapshot(&self) -> Board<P> {
        self.controller.board().snapshot()
    }
}

impl<P> BoardEngine<P> {
    /// Register a listener. Listeners run synchronously, in subscription
    /// order, before the triggering call returns.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&EngineEvent<'_, P>) + 'static,
    ) -> SubscriptionId {
        self.next_subscription += 1;
        let id = self.next_subscription;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Capacity status as of the last board change.
    #[must_use]
    pub fn capacity_status(&self) -> &CapacityReport {
        &self.capacity
    }

    #[must_use]
    pub fn board(&self) -> &Board<P> {
        self.controller.board()
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.controller.session()
    }

    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    fn settle(&mut self, transition: &DragTransition) {
        match &transition.effect {
            DragEffect::Committed { record } => {
                for (_, listener) in &mut self.listeners {
                    listener(&EngineEvent::MoveCompleted(record));
                }
            }
            effect if effect.board_changed() => self.board_changed(),
            _ => {}
        }
    }

    fn board_changed(&mut self) {
        if self.config.track_capacity {
            self.capacity = check_capacity(self.controller.board());
        }
        let event = EngineEvent::BoardChanged(self.controller.board());
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use cardflow_board::{Container, ContainerId, Item};
    use cardflow_core::Direction;

    use crate::collision::DropTargetId;

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Board(Vec<usize>),
        Move(MoveRecord),
    }

    fn engine() -> BoardEngine<()> {
        let board = Board::new(vec![
            Container::new("todo", "Todo")
                .with_capacity(1)
                .with_items([Item::new("A", ()), Item::new("B", ())]),
            Container::new("done", "Done").with_capacity(1),
        ])
        .unwrap();
        BoardEngine::new(board, DragConfig::default()).unwrap()
    }

    fn record(engine: &mut BoardEngine<()>) -> Rc<RefCell<Vec<Seen>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.subscribe(move |event| {
            let entry = match event {
                EngineEvent::BoardChanged(board) => {
                    Seen::Board(board.containers().iter().map(|c| c.len()).collect())
                }
                EngineEvent::MoveCompleted(record) => Seen::Move((*record).clone()),
            };
            sink.borrow_mut().push(entry);
        });
        seen
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DragConfig {
            probe_width: -1.0,
            ..DragConfig::default()
        };
        assert!(BoardEngine::new(Board::<()>::default(), config).is_err());
    }

    #[test]
    fn commit_notifies_board_then_record() {
        let mut engine = engine();
        let seen = record(&mut engine);
        engine.on_gesture_start(DragEntity::item("A")).unwrap();
        let over = DropTargetId::Container("done".into());
        engine.on_gesture_move(GestureInput::Over(&over)).unwrap();
        engine.on_gesture_move(GestureInput::Over(&over)).unwrap();
        engine.on_gesture_end();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], Seen::Board(vec![1, 1]));
        let Seen::Move(record) = &seen[1] else {
            panic!("expected move record, got {:?}", seen[1]);
        };
        assert_eq!(record.entity_id(), "A");
    }

    #[test]
    fn cancel_notifies_rollback() {
        let mut engine = engine();
        let seen = record(&mut engine);
        engine.on_gesture_start(DragEntity::item("A")).unwrap();
        engine
            .on_gesture_move(GestureInput::Intent(Direction::Right))
            .unwrap();
        engine.on_gesture_cancel();
        assert_eq!(
            *seen.borrow(),
            vec![Seen::Board(vec![1, 1]), Seen::Board(vec![2, 0])]
        );
    }

    #[test]
    fn noops_are_silent() {
        let mut engine = engine();
        let seen = record(&mut engine);
        engine.on_gesture_start(DragEntity::item("A")).unwrap();
        engine
            .on_gesture_move(GestureInput::Intent(Direction::Up))
            .unwrap();
        engine.on_gesture_end();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn capacity_tracks_optimistic_moves() {
        let mut engine = engine();
        let todo = ContainerId::new("todo");
        let done = ContainerId::new("done");
        assert!(engine.capacity_status().get(&todo).unwrap().over_limit);

        engine.on_gesture_start(DragEntity::item("A")).unwrap();
        engine
            .on_gesture_move(GestureInput::Intent(Direction::Right))
            .unwrap();
        let report = engine.capacity_status();
        assert!(!report.get(&todo).unwrap().over_limit);
        assert!(report.get(&done).unwrap().at_limit);

        engine.on_gesture_cancel();
        assert!(engine.capacity_status().get(&todo).unwrap().over_limit);
    }

    #[test]
    fn capacity_tracking_can_be_disabled() {
        let config = DragConfig {
            track_capacity: false,
            ..DragConfig::default()
        };
        let engine = BoardEngine::new(Board::<()>::default(), config).unwrap();
        assert!(engine.capacity_status().is_empty());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut engine = engine();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = engine.subscribe(move |_| *sink.borrow_mut() += 1);
        engine.initialize(engine.snapshot());
        assert!(engine.unsubscribe(id));
        assert!(!engine.unsubscribe(id));
        engine.initialize(engine.snapshot());
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn edits_notify_and_refuse_mid_drag() {
        let mut engine = engine();
        let seen = record(&mut engine);
        engine
            .apply_edit(BoardEdit::RemoveItem { id: "B".into() })
            .unwrap();
        assert_eq!(*seen.borrow(), vec![Seen::Board(vec![1, 0])]);

        engine.on_gesture_start(DragEntity::item("A")).unwrap();
        assert_eq!(
            engine.apply_edit(BoardEdit::RemoveItem { id: "A".into() }),
            Err(BoardError::GestureActive)
        );
    }

    #[test]
    fn initialize_mid_drag_aborts_without_record() {
        let mut engine = engine();
        let seen = record(&mut engine);
        engine.on_gesture_start(DragEntity::item("A")).unwrap();
        let aborted = engine.initialize(Board::default());
        assert!(aborted.is_some());
        assert_eq!(engine.phase(), DragPhase::Idle);
        assert_eq!(*seen.borrow(), vec![Seen::Board(vec![])]);
    }
}
