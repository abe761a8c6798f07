#![forbid(unsafe_code)]

//! Drag-and-drop reordering for Cardflow boards.
//!
//! # Role in Cardflow
//! `cardflow-dnd` turns a stream of gesture samples into board moves. It is
//! split the same way the work is:
//!
//! - [`collision`] resolves a pointer against measured rectangles.
//! - [`keyboard`] resolves arrow-key intents against the board itself.
//! - [`session`] runs the drag lifecycle, applying optimistic moves and
//!   rolling them back on cancel.
//! - [`engine`] wraps the controller for a host: listeners, capacity cache
//!   and structural edits.
//!
//! Everything is synchronous and single-threaded; each entry point runs to
//! completion before it returns.

pub mod collision;
pub mod config;
pub mod engine;
pub mod keyboard;
pub mod session;

pub use collision::{
    CollisionResolver, CollisionTier, DropRect, DropTarget, DropTargetId, Resolution,
    TargetRejection, target_for,
};
pub use config::{DEFAULT_PROBE_SIZE, DragConfig, DragConfigError};
pub use engine::{BoardEngine, EngineEvent, SubscriptionId};
pub use keyboard::resolve_intent;
pub use session::{
    CancelReason, DragController, DragEffect, DragPhase, DragSession, DragTransition,
    GestureInput, MoveRecord, NoopReason,
};
