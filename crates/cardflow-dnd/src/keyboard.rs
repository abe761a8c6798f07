#![forbid(unsafe_code)]

//! Keyboard reorder intents.
//!
//! Arrow keys step the dragged entity one slot from where it currently is
//! on the (optimistically updated) board:
//!
//! | Dragged   | Up / Down                 | Left / Right                        |
//! |-----------|---------------------------|-------------------------------------|
//! | item      | previous / next index     | adjacent container, same index (*)  |
//! | container | rejected (invalid target) | previous / next container position  |
//!
//! (*) clamped to the adjacent container's length, and only when
//! [`DragConfig::keyboard_crosses_containers`](crate::DragConfig) is set.
//!
//! Stepping past either edge yields no target; the drag stays where it is.

use cardflow_board::{Board, DragEntity};
use cardflow_core::Direction;

use crate::collision::{DropTarget, TargetRejection};

/// Resolve a directional intent into a drop target.
///
/// `Ok(None)` means the intent points off the board edge (or across
/// containers when crossing is disabled).
pub fn resolve_intent<P>(
    board: &Board<P>,
    dragged: &DragEntity,
    direction: Direction,
    crosses_containers: bool,
) -> Result<Option<DropTarget>, TargetRejection> {
    match dragged {
        DragEntity::Container(id) => {
            if direction.is_vertical() {
                return Err(TargetRejection::InvalidTarget);
            }
            let from = board
                .container_index(id)
                .ok_or(TargetRejection::UnknownTarget)?;
            let Some(to) = step(from, direction, board.container_count()) else {
                return Ok(None);
            };
            Ok(Some(DropTarget::new(
                board.containers()[to].id().clone(),
                to,
            )))
        }
        DragEntity::Item(id) => {
            let slot = board.locate_item(id).ok_or(TargetRejection::UnknownTarget)?;
            let Some(container) = slot.container else {
                return Err(TargetRejection::UnknownTarget);
            };
            if direction.is_vertical() {
                let len = board.container(&container).map_or(0, |c| c.len());
                return Ok(step(slot.index, direction, len).map(|to| DropTarget::new(container, to)));
            }
            if !crosses_containers {
                return Ok(None);
            }
            let col = board
                .container_index(&container)
                .ok_or(TargetRejection::UnknownTarget)?;
            let Some(next) = step(col, direction, board.container_count()) else {
                return Ok(None);
            };
            let target = &board.containers()[next];
            Ok(Some(DropTarget::new(
                target.id().clone(),
                slot.index.min(target.len()),
            )))
        }
    }
}

/// Move `index` one step in `direction` within `0..len`.
fn step(index: usize, direction: Direction, len: usize) -> Option<usize> {
    let next = index.checked_add_signed(direction.step())?;
    (next < len).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardflow_board::{Container, Item};

    fn board() -> Board<()> {
        Board::new(vec![
            Container::new("todo", "Todo").with_items([
                Item::new("A", ()),
                Item::new("B", ()),
                Item::new("C", ()),
            ]),
            Container::new("doing", "Doing").with_items([Item::new("D", ())]),
            Container::new("done", "Done"),
        ])
        .unwrap()
    }

    fn intent(dragged: DragEntity, direction: Direction) -> Result<Option<DropTarget>, TargetRejection> {
        resolve_intent(&board(), &dragged, direction, true)
    }

    #[test]
    fn vertical_steps_within_container() {
        assert_eq!(
            intent(DragEntity::item("B"), Direction::Up),
            Ok(Some(DropTarget::new("todo", 0)))
        );
        assert_eq!(
            intent(DragEntity::item("B"), Direction::Down),
            Ok(Some(DropTarget::new("todo", 2)))
        );
    }

    #[test]
    fn edges_yield_no_target() {
        assert_eq!(intent(DragEntity::item("A"), Direction::Up), Ok(None));
        assert_eq!(intent(DragEntity::item("C"), Direction::Down), Ok(None));
        assert_eq!(intent(DragEntity::item("A"), Direction::Left), Ok(None));
        assert_eq!(intent(DragEntity::container("done"), Direction::Right), Ok(None));
    }

    #[test]
    fn horizontal_crosses_and_clamps() {
        assert_eq!(
            intent(DragEntity::item("C"), Direction::Right),
            Ok(Some(DropTarget::new("doing", 1)))
        );
        assert_eq!(
            intent(DragEntity::item("D"), Direction::Right),
            Ok(Some(DropTarget::new("done", 0)))
        );
    }

    #[test]
    fn crossing_can_be_disabled() {
        let b = board();
        assert_eq!(
            resolve_intent(&b, &DragEntity::item("A"), Direction::Right, false),
            Ok(None)
        );
    }

    #[test]
    fn container_intents() {
        assert_eq!(
            intent(DragEntity::container("doing"), Direction::Left),
            Ok(Some(DropTarget::new("todo", 0)))
        );
        assert_eq!(
            intent(DragEntity::container("doing"), Direction::Up),
            Err(TargetRejection::InvalidTarget)
        );
    }

    #[test]
    fn unknown_entity_is_rejected() {
        assert_eq!(
            intent(DragEntity::item("ghost"), Direction::Up),
            Err(TargetRejection::UnknownTarget)
        );
    }
}
