//! Card boards end to end: drag, filter, capacity and edits through the
//! facade.

use std::cell::RefCell;
use std::rc::Rc;

use cardflow::prelude::*;
use cardflow::{ContainerId, Error, Priority, Status, Tag};

fn card(title: &str, priority: Priority, status: Status, tags: &[&str]) -> Card {
    let mut card = Card::new(title).with_priority(priority).with_status(status);
    for tag in tags {
        card = card.with_tag(Tag::new(*tag, *tag));
    }
    card
}

fn engine() -> CardEngine {
    cardflow::engine(
        vec![
            Container::new("todo", "To Do").with_capacity(2).with_items([
                Item::new("c1", card("Design landing page", Priority::High, Status::Todo, &["ui"])),
                Item::new("c2", card("Fix login bug", Priority::Critical, Status::Todo, &["bug"])),
            ]),
            Container::new("doing", "In Progress").with_items([Item::new(
                "c3",
                card("Write API docs", Priority::Medium, Status::InProgress, &["docs"]),
            )]),
            Container::new("done", "Done").with_capacity(1),
        ],
        DragConfig::default(),
    )
    .unwrap()
}

#[test]
fn keyboard_drag_then_filter() {
    let mut engine = engine();
    let moves = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&moves);
    engine.subscribe(move |event| {
        if let EngineEvent::MoveCompleted(record) = event {
            sink.borrow_mut().push(record.entity_id().to_string());
        }
    });

    engine.on_gesture_start(DragEntity::item("c2")).unwrap();
    engine
        .on_gesture_move(GestureInput::Intent(Direction::Right))
        .unwrap();
    engine
        .on_gesture_move(GestureInput::Intent(Direction::Right))
        .unwrap();
    engine.on_gesture_end();
    assert_eq!(*moves.borrow(), vec!["c2".to_string()]);

    let done = ContainerId::new("done");
    assert!(engine.capacity_status().get(&done).unwrap().at_limit);

    let filtered = BoardFilter::new("bug").apply(engine.board());
    let visible: Vec<usize> = filtered.containers().iter().map(|c| c.len()).collect();
    assert_eq!(visible, vec![0, 0, 1]);
    // Filtering never touches the live board.
    assert_eq!(engine.board().item_count(), 3);
}

#[test]
fn errors_convert_into_facade_error() {
    let duplicate = cardflow::engine(
        vec![Container::<()>::new("a", "A"), Container::new("a", "Again")],
        DragConfig::default(),
    );
    assert!(matches!(duplicate, Err(Error::Board(_))));

    let bad_probe = cardflow::engine(
        vec![Container::<()>::new("a", "A")],
        DragConfig {
            probe_height: 0.0,
            ..DragConfig::default()
        },
    );
    let err = bad_probe.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("probe_height"));
}

#[test]
fn card_board_round_trips_through_json() {
    let engine = engine();
    let json = serde_json::to_string(&engine.snapshot()).unwrap();
    let back: CardBoard = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, engine.board());
}

#[test]
fn column_edits_through_engine() {
    let mut engine = engine();
    engine
        .apply_edit(BoardEdit::InsertContainer {
            index: 3,
            container: Container::new("review", "Review"),
        })
        .unwrap();
    engine
        .apply_edit(BoardEdit::SetCollapsed {
            id: "done".into(),
            collapsed: true,
        })
        .unwrap();
    let err = engine
        .apply_edit(BoardEdit::RemoveContainer { id: "doing".into() })
        .unwrap_err();
    assert!(err.to_string().contains("doing"));

    let titles: Vec<&str> = engine.board().containers().iter().map(|c| c.title()).collect();
    assert_eq!(titles, vec!["To Do", "In Progress", "Done", "Review"]);
    assert!(engine.board().containers()[2].is_collapsed());
}
