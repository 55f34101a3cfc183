use arrayvec::ArrayVec;

use crate::{
    core::{ActivePiece, COLS, PieceKind, ROWS},
    engine::{GameSession, PREVIEW_LEN},
};

/// What occupies one cell of the rendered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    /// Landing preview of the active piece.
    Ghost,
    /// A locked cell or the active piece itself.
    Piece(PieceKind),
}

/// Read-only, render-ready snapshot of a session: locked cells, the ghost
/// projection, the active piece, and the upcoming queue.
///
/// External collaborators draw from this view once per frame; nothing here
/// feeds back into collision state.
#[derive(Debug, Clone)]
pub struct RenderView {
    tiles: [[Tile; COLS]; ROWS],
    next: ArrayVec<PieceKind, PREVIEW_LEN>,
}

impl RenderView {
    pub(crate) fn capture(session: &GameSession) -> Self {
        let mut tiles = [[Tile::Empty; COLS]; ROWS];
        for (y, row) in session.playfield().rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(kind) = cell {
                    tiles[y][x] = Tile::Piece(*kind);
                }
            }
        }

        let mut view = Self {
            tiles,
            next: session.next_pieces().take(PREVIEW_LEN).collect(),
        };
        view.overlay(&session.ghost_piece(), Tile::Ghost);
        let piece = session.active_piece();
        view.overlay(piece, Tile::Piece(piece.kind()));
        view
    }

    /// Paints the piece's visible cells; cells above the top are skipped.
    fn overlay(&mut self, piece: &ActivePiece, tile: Tile) {
        for (x, y) in piece.cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < COLS && y < ROWS {
                self.tiles[y][x] = tile;
            }
        }
    }

    /// Rows of tiles, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile; COLS]> {
        self.tiles.iter()
    }

    /// The upcoming piece kinds, soonest first.
    #[must_use]
    pub fn next_pieces(&self) -> &[PieceKind] {
        &self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_tiles(view: &RenderView, pred: impl Fn(Tile) -> bool) -> usize {
        view.rows().flatten().filter(|&&tile| pred(tile)).count()
    }

    #[test]
    fn test_view_of_a_fresh_session_shows_piece_and_ghost() {
        let session = GameSession::with_seed(1);
        let view = session.render_view();

        // Empty field: four active cells at the top, four ghost cells at the
        // bottom, nothing else.
        assert_eq!(count_tiles(&view, |tile| matches!(tile, Tile::Piece(_))), 4);
        assert_eq!(count_tiles(&view, |tile| tile == Tile::Ghost), 4);
        assert_eq!(
            count_tiles(&view, |tile| tile == Tile::Empty),
            COLS * ROWS - 8,
        );
    }

    #[test]
    fn test_active_piece_is_drawn_over_its_ghost() {
        let mut session = GameSession::with_seed(2);
        session.start();
        // Drive the piece down onto its own landing position.
        while session.active_piece().drop_distance(session.playfield()) > 0 {
            session.soft_drop();
        }

        let view = session.render_view();
        assert_eq!(count_tiles(&view, |tile| tile == Tile::Ghost), 0);
        assert_eq!(count_tiles(&view, |tile| matches!(tile, Tile::Piece(_))), 4);
    }

    #[test]
    fn test_view_preview_matches_the_queue() {
        let session = GameSession::with_seed(3);
        let view = session.render_view();
        let queued: Vec<_> = session.next_pieces().collect();
        assert_eq!(view.next_pieces(), &queued[..]);
        assert_eq!(view.next_pieces().len(), PREVIEW_LEN);
    }

    #[test]
    fn test_locked_cells_appear_in_the_view() {
        let mut session = GameSession::with_seed(4);
        session.start();
        let kind = session.active_piece().kind();
        session.hard_drop();

        let view = session.render_view();
        let locked = count_tiles(&view, |tile| tile == Tile::Piece(kind));
        assert!(locked >= 4, "locked cells plus possibly the active piece");
    }
}
