#![forbid(unsafe_code)]

//! Board state model: ordered containers holding ordered items.
//!
//! # Invariants
//!
//! 1. Container identifiers are unique.
//! 2. Every item identifier appears in exactly one container, exactly once.
//! 3. Move operations never change the set of items on the board; they only
//!    change where each item sits.
//! 4. Every mutating operation is atomic: on error the board is untouched.
//!
//! The fields of [`Board`] and [`Container`] are private so the invariants
//! can only be established by [`Board::new`] (or deserialization, which goes
//! through the same validation) and preserved by the operations below.
//!
//! # Index semantics
//!
//! A target index always names the *final* position of the moved entity.
//! Moving an item within its own container therefore behaves like an
//! array move: `[A, B, C]` with `A -> 2` becomes `[B, C, A]`.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::id::{ContainerId, ItemId};

/// A single draggable unit (a card) with an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<P> {
    pub id: ItemId,
    pub payload: P,
}

impl<P> Item<P> {
    pub fn new(id: impl Into<ItemId>, payload: P) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

/// An ordered list of items (a board column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container<P> {
    id: ContainerId,
    #[serde(default)]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacity: Option<u32>,
    #[serde(default)]
    collapsed: bool,
    #[serde(default = "Vec::new")]
    items: Vec<Item<P>>,
}

impl<P> Container<P> {
    /// Create an empty, unbounded container.
    pub fn new(id: impl Into<ContainerId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            capacity: None,
            collapsed: false,
            items: Vec::new(),
        }
    }

    /// Set the advisory capacity ceiling.
    #[must_use]
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Append items in order. Uniqueness is checked when the board is built.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item<P>>) -> Self {
        self.items.extend(items);
        self
    }

    #[must_use]
    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Advisory ceiling; `None` means unbounded.
    #[must_use]
    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    #[must_use]
    pub fn items(&self) -> &[Item<P>] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of an item inside this container.
    #[must_use]
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item<P>> {
        &mut self.items
    }

    pub(crate) fn set_capacity(&mut self, capacity: Option<u32>) {
        self.capacity = capacity;
    }

    pub(crate) fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }
}

/// A position on the board.
///
/// Item slots name their container. Container slots have no parent and
/// `index` is the position among containers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerId>,
    pub index: usize,
}

impl Slot {
    /// A slot inside a container.
    pub fn in_container(container: impl Into<ContainerId>, index: usize) -> Self {
        Self {
            container: Some(container.into()),
            index,
        }
    }

    /// A slot in the top-level container order.
    #[must_use]
    pub const fn top_level(index: usize) -> Self {
        Self {
            container: None,
            index,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.container {
            Some(container) => write!(f, "{container}[{}]", self.index),
            None => write!(f, "[{}]", self.index),
        }
    }
}

/// Result of a move operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub from: Slot,
    pub to: Slot,
    /// False when the move was a no-op (same place).
    pub changed: bool,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>"))]
struct BoardRepr<P> {
    containers: Vec<Container<P>>,
}

impl<P> TryFrom<BoardRepr<P>> for Board<P> {
    type Error = BoardError;

    fn try_from(repr: BoardRepr<P>) -> Result<Self, Self::Error> {
        Board::new(repr.containers)
    }
}

/// The ordered collection of containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BoardRepr<P>",
    bound(deserialize = "P: Deserialize<'de>")
)]
pub struct Board<P> {
    containers: Vec<Container<P>>,
}

impl<P> Default for Board<P> {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
        }
    }
}

impl<P> Board<P> {
    /// Build a board, rejecting duplicate container or item identifiers.
    pub fn new(containers: Vec<Container<P>>) -> Result<Self, BoardError> {
        let board = Self { containers };
        board.validate()?;
        Ok(board)
    }

    /// Build from containers already known to satisfy the invariant.
    pub(crate) fn from_valid(containers: Vec<Container<P>>) -> Self {
        Self { containers }
    }

    /// Re-check the consistency invariant.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut container_ids = FxHashSet::default();
        let mut item_ids = FxHashSet::default();
        for container in &self.containers {
            if !container_ids.insert(&container.id) {
                return Err(BoardError::DuplicateContainer {
                    id: container.id.clone(),
                });
            }
            for item in &container.items {
                if !item_ids.insert(&item.id) {
                    return Err(BoardError::DuplicateItem {
                        id: item.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn containers(&self) -> &[Container<P>] {
        &self.containers
    }

    #[must_use]
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Total number of items across all containers.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.containers.iter().map(Container::len).sum()
    }

    /// Item identifiers in board order (container by container).
    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.containers
            .iter()
            .flat_map(|c| c.items.iter().map(|item| &item.id))
    }

    #[must_use]
    pub fn container(&self, id: &ContainerId) -> Option<&Container<P>> {
        self.containers.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn container_index(&self, id: &ContainerId) -> Option<usize> {
        self.containers.iter().position(|c| &c.id == id)
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item<P>> {
        self.find_item(id)
            .map(|(col, row)| &self.containers[col].items[row])
    }

    /// Container and index currently holding an item.
    #[must_use]
    pub fn locate_item(&self, id: &ItemId) -> Option<Slot> {
        self.find_item(id)
            .map(|(col, row)| Slot::in_container(self.containers[col].id.clone(), row))
    }

    /// Container owning an item.
    #[must_use]
    pub fn owner_of(&self, id: &ItemId) -> Option<&Container<P>> {
        self.find_item(id).map(|(col, _)| &self.containers[col])
    }

    /// `(container index, item index)` of an item.
    pub(crate) fn find_item(&self, id: &ItemId) -> Option<(usize, usize)> {
        self.containers
            .iter()
            .enumerate()
            .find_map(|(col, c)| c.position(id).map(|row| (col, row)))
    }

    /// Move an item to `index` inside `target`.
    ///
    /// The index is clamped to the target's length (not counting the moved
    /// item). Moving an item onto its current slot is a no-op.
    pub fn move_item(
        &mut self,
        id: &ItemId,
        target: &ContainerId,
        index: usize,
    ) -> Result<MoveOutcome, BoardError> {
        let (from_col, from_row) = self
            .find_item(id)
            .ok_or_else(|| BoardError::ItemNotFound { id: id.clone() })?;
        let to_col = self
            .container_index(target)
            .ok_or_else(|| BoardError::ContainerNotFound { id: target.clone() })?;

        let target_len = self.containers[to_col].items.len() - usize::from(from_col == to_col);
        let to_row = index.min(target_len);
        let from = Slot::in_container(self.containers[from_col].id.clone(), from_row);
        let to = Slot::in_container(target.clone(), to_row);

        if from_col == to_col && from_row == to_row {
            return Ok(MoveOutcome {
                from,
                to,
                changed: false,
            });
        }

        let item = self.containers[from_col].items.remove(from_row);
        self.containers[to_col].items.insert(to_row, item);
        tracing::trace!(item = %id, %from, %to, "moved item");
        Ok(MoveOutcome {
            from,
            to,
            changed: true,
        })
    }

    /// Move a container to `index` in the container order (clamped).
    pub fn move_container(
        &mut self,
        id: &ContainerId,
        index: usize,
    ) -> Result<MoveOutcome, BoardError> {
        let from_idx = self
            .container_index(id)
            .ok_or_else(|| BoardError::ContainerNotFound { id: id.clone() })?;
        let to_idx = index.min(self.containers.len() - 1);
        let changed = from_idx != to_idx;
        if changed {
            let container = self.containers.remove(from_idx);
            self.containers.insert(to_idx, container);
            tracing::trace!(container = %id, from = from_idx, to = to_idx, "moved container");
        }
        Ok(MoveOutcome {
            from: Slot::top_level(from_idx),
            to: Slot::top_level(to_idx),
            changed,
        })
    }

    pub(crate) fn containers_mut(&mut self) -> &mut Vec<Container<P>> {
        &mut self.containers
    }
}

impl<P: Clone> Board<P> {
    /// Deep copy for read-only consumers.
    #[must_use]
    pub fn snapshot(&self) -> Board<P> {
        self.clone()
    }
}
