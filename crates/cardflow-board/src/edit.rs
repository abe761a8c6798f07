#![forbid(unsafe_code)]

//! Structural board edits (add/remove/configure cards and columns).
//!
//! Edits are the only way besides moves to change a board. Each one is
//! validated before anything is mutated, so a rejected edit leaves the
//! board exactly as it was.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Container, Item};
use crate::error::BoardError;
use crate::id::{ContainerId, ItemId};

/// One structural edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BoardEdit<P> {
    /// Insert a new item at `index` (clamped) inside `container`.
    InsertItem {
        container: ContainerId,
        index: usize,
        item: Item<P>,
    },
    RemoveItem {
        id: ItemId,
    },
    /// Insert a new container at `index` (clamped) in the container order.
    InsertContainer {
        index: usize,
        container: Container<P>,
    },
    /// Remove an empty container.
    RemoveContainer {
        id: ContainerId,
    },
    SetCapacity {
        id: ContainerId,
        capacity: Option<u32>,
    },
    SetCollapsed {
        id: ContainerId,
        collapsed: bool,
    },
    Rename {
        id: ContainerId,
        title: String,
    },
}

impl<P> BoardEdit<P> {
    /// Stable operation name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InsertItem { .. } => "insert_item",
            Self::RemoveItem { .. } => "remove_item",
            Self::InsertContainer { .. } => "insert_container",
            Self::RemoveContainer { .. } => "remove_container",
            Self::SetCapacity { .. } => "set_capacity",
            Self::SetCollapsed { .. } => "set_collapsed",
            Self::Rename { .. } => "rename",
        }
    }
}

impl<P> Board<P> {
    /// Apply a structural edit atomically.
    pub fn apply_edit(&mut self, edit: BoardEdit<P>) -> Result<(), BoardError> {
        let name = edit.name();
        match edit {
            BoardEdit::InsertItem {
                container,
                index,
                item,
            } => {
                if self.find_item(&item.id).is_some() {
                    return Err(BoardError::DuplicateItem { id: item.id });
                }
                let col = self.require_container(&container)?;
                let items = self.containers_mut()[col].items_mut();
                let index = index.min(items.len());
                items.insert(index, item);
            }
            BoardEdit::RemoveItem { id } => {
                let (col, row) = self
                    .find_item(&id)
                    .ok_or(BoardError::ItemNotFound { id })?;
                self.containers_mut()[col].items_mut().remove(row);
            }
            BoardEdit::InsertContainer { index, container } => {
                self.check_new_container(&container)?;
                let containers = self.containers_mut();
                let index = index.min(containers.len());
                containers.insert(index, container);
            }
            BoardEdit::RemoveContainer { id } => {
                let col = self.require_container(&id)?;
                let count = self.containers()[col].len();
                if count > 0 {
                    return Err(BoardError::ContainerNotEmpty { id, count });
                }
                self.containers_mut().remove(col);
            }
            BoardEdit::SetCapacity { id, capacity } => {
                let col = self.require_container(&id)?;
                self.containers_mut()[col].set_capacity(capacity);
            }
            BoardEdit::SetCollapsed { id, collapsed } => {
                let col = self.require_container(&id)?;
                self.containers_mut()[col].set_collapsed(collapsed);
            }
            BoardEdit::Rename { id, title } => {
                let col = self.require_container(&id)?;
                self.containers_mut()[col].set_title(title);
            }
        }
        tracing::debug!(edit = name, "applied board edit");
        Ok(())
    }

    fn require_container(&self, id: &ContainerId) -> Result<usize, BoardError> {
        self.container_index(id)
            .ok_or_else(|| BoardError::ContainerNotFound { id: id.clone() })
    }

    fn check_new_container(&self, container: &Container<P>) -> Result<(), BoardError> {
        if self.container_index(container.id()).is_some() {
            return Err(BoardError::DuplicateContainer {
                id: container.id().clone(),
            });
        }
        for (pos, item) in container.items().iter().enumerate() {
            let repeated = container.items()[..pos].iter().any(|i| i.id == item.id);
            if repeated || self.find_item(&item.id).is_some() {
                return Err(BoardError::DuplicateItem {
                    id: item.id.clone(),
                });
            }
        }
        Ok(())
    }
}
