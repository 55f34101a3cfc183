//! Falling-block puzzle engine.
//!
//! Pure game logic: the piece catalog, the 7-bag randomizer, playfield
//! collision and line clearing, score/level progression, and the session
//! state machine. Rendering, input handling, and persistence live in the
//! `blockfall-tui` crate and consume read-only snapshots of this state.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
