pub use self::{piece::*, playfield::*};

pub(crate) mod piece;
pub(crate) mod playfield;

/// Playfield width in cells.
pub const COLS: usize = 10;

/// Playfield height in cells.
pub const ROWS: usize = 20;
