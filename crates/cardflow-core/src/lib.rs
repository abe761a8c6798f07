#![forbid(unsafe_code)]

//! Core: geometry primitives and the input vocabulary shared by the board
//! model and the drag engine.
//!
//! # Role in Cardflow
//! `cardflow-core` is the leaf crate. It knows nothing about boards, items or
//! drag sessions; it only describes where things are on screen ([`Rect`],
//! [`Point`]) and which way a keyboard gesture points ([`Direction`]).
//!
//! # How it fits in the system
//! The host measures its rendered columns and cards and hands the rectangles
//! to `cardflow-dnd`, which resolves them against `cardflow-board` state. The
//! core never measures anything itself.

pub mod geometry;
pub mod input;

pub use geometry::{Point, Rect};
pub use input::Direction;
