#![forbid(unsafe_code)]

//! Board state model for Cardflow.
//!
//! # Role in Cardflow
//! `cardflow-board` owns the data: an ordered list of containers (columns),
//! each holding an ordered list of items (cards) with an opaque payload.
//! It provides the invariant-preserving move and edit operations the drag
//! engine builds on, plus two read-only views of a board:
//!
//! - **Capacity**: advisory per-container ceilings ([`check_capacity`]).
//! - **Filtering**: search and label filters for rendering ([`BoardFilter`]).
//!
//! # Consistency invariant
//! Every item id is referenced by exactly one container and container ids
//! are unique. [`Board::new`] establishes it, every operation preserves it,
//! and every failed operation leaves the board untouched.

pub mod board;
pub mod capacity;
pub mod card;
pub mod edit;
pub mod error;
pub mod filter;
pub mod id;

pub use board::{Board, Container, Item, MoveOutcome, Slot};
pub use capacity::{CapacityReport, CapacityStatus, check_capacity};
pub use card::{Assignee, Card, Priority, Status, Tag};
pub use edit::BoardEdit;
pub use error::BoardError;
pub use filter::{BoardFilter, Filterable, assignee_counts, label_counts};
pub use id::{ContainerId, DragEntity, EntityKind, ItemId};
