use serde::{Deserialize, Serialize};

use super::playfield::Playfield;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// Every piece kind, one of each.
    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::J,
        Self::L,
        Self::O,
        Self::S,
        Self::T,
        Self::Z,
    ];

    /// Returns the four pivot-relative cell offsets for the given rotation.
    #[must_use]
    pub const fn offsets(self, rotation: Rotation) -> [(i8, i8); 4] {
        SHAPE_OFFSETS[self as usize][rotation.index()]
    }

    /// Offsets shifted into a zero-based bounding box, for preview rendering.
    #[must_use]
    #[expect(clippy::cast_sign_loss)]
    pub fn normalized_offsets(self, rotation: Rotation) -> [(usize, usize); 4] {
        let offsets = self.offsets(rotation);
        let min_dx = offsets.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let min_dy = offsets.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        offsets.map(|(dx, dy)| ((dx - min_dx) as usize, (dy - min_dy) as usize))
    }

    /// Width and height of the zero-based bounding box for the rotation.
    #[must_use]
    pub fn extent(self, rotation: Rotation) -> (usize, usize) {
        let cells = self.normalized_offsets(rotation);
        let width = cells.iter().map(|&(dx, _)| dx).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|&(_, dy)| dy).max().unwrap_or(0) + 1;
        (width, height)
    }
}

/// Rotation state of a piece: one of four quarter-turn orientations,
/// wrapping modulo 4. `0` is the spawn orientation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rotation(u8);

impl Rotation {
    #[must_use]
    pub const fn rotated(self, spin: SpinDirection) -> Self {
        match spin {
            SpinDirection::Clockwise => Self((self.0 + 1) % 4),
            SpinDirection::CounterClockwise => Self((self.0 + 3) % 4),
        }
    }

    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Direction of a rotation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinDirection {
    Clockwise,
    CounterClockwise,
}

/// The currently falling piece: kind, rotation, and pivot position.
///
/// Movement and rotation return new values; [`GameSession`] commits them
/// only after collision checks against the playfield.
///
/// [`GameSession`]: crate::engine::GameSession
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    rotation: Rotation,
    x: i32,
    y: i32,
}

const SPAWN_X: i32 = 4;
const SPAWN_Y: i32 = 1;

/// Kick offsets tried in order after a rotation collides in place. Nearer
/// columns are preferred over farther ones; a single upward step comes last.
const KICK_OFFSETS: [(i32, i32); 6] = [(0, 0), (1, 0), (-1, 0), (2, 0), (-2, 0), (0, -1)];

impl ActivePiece {
    /// A freshly spawned piece: horizontally centered, pivot on row 1, so
    /// some cells may start above the visible top of the field.
    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation(0),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Pivot position. Cells above the field have negative y.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Absolute coordinates of the piece's four cells.
    #[must_use]
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.kind
            .offsets(self.rotation)
            .map(|(dx, dy)| (self.x + i32::from(dx), self.y + i32::from(dy)))
    }

    #[must_use]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation,
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub const fn rotated(&self, spin: SpinDirection) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation.rotated(spin),
            x: self.x,
            y: self.y,
        }
    }

    /// Attempts the rotation against the playfield, trying each kick offset
    /// in order and returning the first placement that fits. `None` when
    /// every kick collides; the caller leaves the piece untouched then.
    #[must_use]
    pub fn rotated_with_kick(&self, spin: SpinDirection, field: &Playfield) -> Option<Self> {
        let rotated = self.rotated(spin);
        KICK_OFFSETS
            .iter()
            .map(|&(dx, dy)| rotated.translated(dx, dy))
            .find(|piece| !field.collides(piece))
    }

    /// How many cells the piece can still descend before resting.
    #[must_use]
    pub fn drop_distance(&self, field: &Playfield) -> i32 {
        let mut distance = 0;
        while !field.collides(&self.translated(0, distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// The piece as it would rest after falling as far as it can.
    #[must_use]
    pub fn dropped(&self, field: &Playfield) -> Self {
        self.translated(0, self.drop_distance(field))
    }
}

/// Pivot-relative cell offsets for every kind and rotation, indexed by
/// `[kind][rotation]`. Four successive clockwise rotations return every
/// shape to its original cells.
const SHAPE_OFFSETS: [[[(i8, i8); 4]; 4]; PieceKind::LEN] = [
    // I
    [
        [(-1, 0), (0, 0), (1, 0), (2, 0)],
        [(1, -1), (1, 0), (1, 1), (1, 2)],
        [(-1, 1), (0, 1), (1, 1), (2, 1)],
        [(0, -1), (0, 0), (0, 1), (0, 2)],
    ],
    // J
    [
        [(-1, -1), (-1, 0), (0, 0), (1, 0)],
        [(0, -1), (1, -1), (0, 0), (0, 1)],
        [(-1, 0), (0, 0), (1, 0), (1, 1)],
        [(0, -1), (0, 0), (-1, 1), (0, 1)],
    ],
    // L
    [
        [(1, -1), (-1, 0), (0, 0), (1, 0)],
        [(0, -1), (0, 0), (0, 1), (1, 1)],
        [(-1, 0), (0, 0), (1, 0), (-1, 1)],
        [(-1, -1), (0, -1), (0, 0), (0, 1)],
    ],
    // O
    [[(0, -1), (1, -1), (0, 0), (1, 0)]; 4],
    // S
    [
        [(0, -1), (1, -1), (-1, 0), (0, 0)],
        [(0, -1), (0, 0), (1, 0), (1, 1)],
        [(0, 0), (1, 0), (-1, 1), (0, 1)],
        [(-1, -1), (-1, 0), (0, 0), (0, 1)],
    ],
    // T
    [
        [(0, -1), (-1, 0), (0, 0), (1, 0)],
        [(0, -1), (0, 0), (1, 0), (0, 1)],
        [(-1, 0), (0, 0), (1, 0), (0, 1)],
        [(0, -1), (-1, 0), (0, 0), (0, 1)],
    ],
    // Z
    [
        [(-1, -1), (0, -1), (0, 0), (1, 0)],
        [(1, -1), (0, 0), (1, 0), (0, 1)],
        [(-1, 0), (0, 0), (0, 1), (1, 1)],
        [(0, -1), (-1, 0), (0, 0), (-1, 1)],
    ],
];
