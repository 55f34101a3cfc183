//! Game engine logic and state management.
//!
//! This module orchestrates the core data structures into a playable game:
//!
//! - [`GameSession`] - The state machine owning playfield, piece, and clock
//! - [`PieceQueue`] - 7-bag piece generation with a fixed-depth preview
//! - [`Progression`] - Score, line count, level, and gravity interval
//! - [`RenderView`] - Read-only snapshot for external renderers
//!
//! # Game flow
//!
//! 1. Construct a [`GameSession`] (optionally with a fixed seed)
//! 2. Call [`start`](GameSession::start), then feed input intents and
//!    elapsed time each frame
//! 3. Gravity steps the piece down; a blocked step locks it, clears full
//!    lines, scores them, and spawns the next piece
//! 4. A spawn that collides ends the game; [`reset`](GameSession::reset)
//!    begins a fresh one
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{GameSession, SpinDirection};
//!
//! let mut session = GameSession::with_seed(7);
//! session.start();
//!
//! session.move_left();
//! session.rotate(SpinDirection::Clockwise);
//! session.advance(Duration::from_millis(1000));
//! session.hard_drop();
//!
//! assert!(session.progression().score() > 0);
//! ```

pub use self::{game_session::*, piece_queue::*, progression::*, render_view::*};

mod game_session;
mod piece_queue;
mod progression;
mod render_view;
