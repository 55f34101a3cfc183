use std::time::Duration;

use crate::{
    core::{ActivePiece, PieceKind, Playfield, SpinDirection},
    engine::{PieceQueue, Progression, RenderView},
};

/// Lifecycle of a game session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Fresh board with gravity idle, awaiting an explicit start.
    Ready,
    Running,
    Paused,
    /// Terminal; only [`GameSession::reset`] leaves it.
    GameOver,
}

/// A complete falling-block game: playfield, active piece, piece queue,
/// score progression, and the gravity clock.
///
/// All mutable state lives in this one value, so independent sessions can
/// coexist and tests can drive the engine deterministically through
/// [`with_seed`](Self::with_seed). Every operation is synchronous: locking
/// and line clearing happen atomically within the call that triggers them,
/// never on a deferred timer.
///
/// Input intents are no-ops in any state but [`Running`](SessionState::Running).
#[derive(Debug, Clone)]
pub struct GameSession {
    playfield: Playfield,
    piece: ActivePiece,
    queue: PieceQueue,
    progression: Progression,
    state: SessionState,
    gravity_elapsed: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a fresh ready session with an OS-random piece sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_queue(PieceQueue::new())
    }

    /// Creates a fresh ready session with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_queue(PieceQueue::from_seed(seed))
    }

    fn with_queue(mut queue: PieceQueue) -> Self {
        let piece = ActivePiece::spawn(queue.pop_next());
        Self {
            playfield: Playfield::new(),
            piece,
            queue,
            progression: Progression::new(),
            state: SessionState::Ready,
            gravity_elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.piece
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active piece projected to its hard-drop landing position.
    /// Rendering-only; never part of collision state.
    #[must_use]
    pub fn ghost_piece(&self) -> ActivePiece {
        self.piece.dropped(&self.playfield)
    }

    /// Upcoming piece kinds, soonest first.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.preview()
    }

    /// Captures a render-ready snapshot of the visible state.
    #[must_use]
    pub fn render_view(&self) -> RenderView {
        RenderView::capture(self)
    }

    /// Begins play from the ready state.
    pub fn start(&mut self) {
        if self.state.is_ready() {
            self.state = SessionState::Running;
        }
    }

    /// Halts gravity. No tick fires while paused.
    pub fn pause(&mut self) {
        if self.state.is_running() {
            self.state = SessionState::Paused;
        }
    }

    /// Resumes play. The gravity clock restarts from zero, so time spent
    /// paused is never repaid as catch-up drops.
    pub fn resume(&mut self) {
        if self.state.is_paused() {
            self.gravity_elapsed = Duration::ZERO;
            self.state = SessionState::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            SessionState::Ready | SessionState::GameOver => {}
        }
    }

    /// Discards everything and returns to a fresh ready board with a newly
    /// seeded piece sequence.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances the gravity clock while running. Once the accumulated time
    /// reaches the level's drop interval the piece descends one cell (or
    /// locks when it cannot), and the accumulator resets to zero —
    /// overshoot beyond the interval is discarded.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.state.is_running() {
            return;
        }
        self.gravity_elapsed += elapsed;
        if self.gravity_elapsed >= self.progression.drop_interval() {
            if !self.shift(0, 1) {
                self.lock_and_advance();
            }
            self.gravity_elapsed = Duration::ZERO;
        }
    }

    /// Moves the piece one column left. Returns whether it moved.
    pub fn move_left(&mut self) -> bool {
        self.state.is_running() && self.shift(-1, 0)
    }

    /// Moves the piece one column right. Returns whether it moved.
    pub fn move_right(&mut self) -> bool {
        self.state.is_running() && self.shift(1, 0)
    }

    /// Rotates the piece, kicking it sideways or up when the turned shape
    /// would collide in place. Returns false when every kick fails; the
    /// piece is untouched then.
    pub fn rotate(&mut self, spin: SpinDirection) -> bool {
        if !self.state.is_running() {
            return false;
        }
        match self.piece.rotated_with_kick(spin, &self.playfield) {
            Some(piece) => {
                self.piece = piece;
                true
            }
            None => false,
        }
    }

    /// Descends one cell for one point, or locks the piece when it is
    /// already resting.
    pub fn soft_drop(&mut self) {
        if !self.state.is_running() {
            return;
        }
        if self.shift(0, 1) {
            self.progression.award_soft_drop();
        } else {
            self.lock_and_advance();
        }
    }

    /// Drops the piece to its resting row for two points per cell and locks
    /// it immediately, even when it is already resting.
    pub fn hard_drop(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let distance = self.piece.drop_distance(&self.playfield);
        self.piece = self.piece.translated(0, distance);
        self.progression
            .award_hard_drop(usize::try_from(distance).unwrap_or(0));
        self.lock_and_advance();
    }

    fn shift(&mut self, dx: i32, dy: i32) -> bool {
        let moved = self.piece.translated(dx, dy);
        if self.playfield.collides(&moved) {
            return false;
        }
        self.piece = moved;
        true
    }

    /// Commits the piece, clears and scores full lines, and spawns the next
    /// piece. A spawn that collides ends the game; the blocked piece stays
    /// visible for the final frame.
    fn lock_and_advance(&mut self) {
        self.playfield.lock(&self.piece);
        let cleared = self.playfield.clear_full_lines();
        self.progression.record_lock(cleared);
        self.piece = ActivePiece::spawn(self.queue.pop_next());
        if self.playfield.collides(&self.piece) {
            self.state = SessionState::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{COLS, ROWS, Rotation};

    use super::*;

    fn running_session(seed: u64) -> GameSession {
        let mut session = GameSession::with_seed(seed);
        session.start();
        session
    }

    #[test]
    fn test_fresh_session_is_ready_with_a_valid_spawn() {
        let session = GameSession::with_seed(1);
        assert!(session.state().is_ready());
        assert!(!session.playfield().collides(session.active_piece()));
        assert_eq!(session.active_piece().position(), (4, 1));
        assert_eq!(session.progression().score(), 0);
    }

    #[test]
    fn test_spawned_o_piece_does_not_collide_on_an_empty_board() {
        let mut session = running_session(2);
        session.piece = ActivePiece::spawn(PieceKind::O);
        assert!(!session.playfield().collides(session.active_piece()));
        assert!(session.state().is_running());
    }

    #[test]
    fn test_start_only_leaves_the_ready_state() {
        let mut session = GameSession::with_seed(3);
        session.start();
        assert!(session.state().is_running());

        session.pause();
        session.start();
        assert!(session.state().is_paused(), "start must not resume");
    }

    #[test]
    fn test_inputs_are_noops_unless_running() {
        let mut session = GameSession::with_seed(4);
        let piece = *session.active_piece();

        assert!(!session.move_left());
        assert!(!session.move_right());
        assert!(!session.rotate(SpinDirection::Clockwise));
        session.soft_drop();
        session.hard_drop();
        session.advance(Duration::from_secs(10));

        assert_eq!(*session.active_piece(), piece);
        assert_eq!(session.progression().score(), 0);
        assert!(session.state().is_ready());
    }

    #[test]
    fn test_moves_succeed_until_a_wall_blocks_them() {
        let mut session = running_session(5);
        session.piece = ActivePiece::spawn(PieceKind::O);

        // O spans columns 4..=5; four steps reach the left wall.
        for _ in 0..4 {
            assert!(session.move_left());
        }
        assert!(!session.move_left());
        assert_eq!(session.active_piece().position(), (0, 1));
    }

    #[test]
    fn test_soft_drop_awards_one_point_per_cell() {
        let mut session = running_session(6);
        session.soft_drop();
        session.soft_drop();
        assert_eq!(session.progression().score(), 2);
    }

    #[test]
    fn test_hard_drop_awards_two_points_per_cell_and_locks() {
        let mut session = running_session(7);
        session.piece = ActivePiece::spawn(PieceKind::O);
        let distance = session.piece.drop_distance(&session.playfield);
        assert_eq!(distance, 18);

        session.hard_drop();
        assert_eq!(session.progression().score(), 36);
        // The piece locked on the floor and a fresh one spawned.
        let locked = session
            .playfield()
            .rows()
            .flatten()
            .filter(|cell| cell.is_some())
            .count();
        assert_eq!(locked, 4);
        assert_eq!(session.active_piece().position(), (4, 1));
        assert!(session.state().is_running());
    }

    #[test]
    fn test_hard_drop_locks_even_at_distance_zero() {
        let mut session = running_session(8);
        session.piece = ActivePiece::spawn(PieceKind::O);
        // Block row 2 under the piece, leaving a gap so nothing clears.
        for x in 0..COLS - 1 {
            session.playfield.set_cell(x, 2, PieceKind::J);
        }

        // Resting directly on the blocked row: distance 0, still locks.
        session.hard_drop();
        assert_eq!(session.progression().score(), 0);
        let locked = session
            .playfield
            .rows()
            .flatten()
            .filter(|cell| cell.is_some())
            .count();
        assert_eq!(locked, COLS - 1 + 4);
    }

    #[test]
    fn test_completing_the_bottom_row_scores_a_single() {
        let mut session = running_session(9);
        for x in (0..COLS).filter(|x| !(3..=6).contains(x)) {
            session.playfield.set_cell(x, ROWS - 1, PieceKind::J);
        }
        session.piece = ActivePiece::spawn(PieceKind::I);
        let drop_points = 2 * usize::try_from(session.piece.drop_distance(&session.playfield)).unwrap();

        // The horizontal I fills the remaining columns 3..=6.
        session.hard_drop();
        assert_eq!(session.progression().cleared_lines(), 1);
        assert_eq!(session.progression().score(), 100 + drop_points);
        assert!(session.playfield().rows().flatten().all(Option::is_none));
        assert!(session.state().is_running());
    }

    #[test]
    fn test_rotation_against_the_left_wall_kicks_rightward() {
        let mut session = running_session(10);
        // Vertical I hugging the left wall.
        session.piece = ActivePiece::spawn(PieceKind::I)
            .rotated(SpinDirection::CounterClockwise)
            .translated(-4, 0);
        assert_eq!(session.active_piece().position(), (0, 1));

        assert!(session.rotate(SpinDirection::Clockwise));
        assert_eq!(session.active_piece().rotation(), Rotation::default());
        assert_eq!(session.active_piece().position(), (1, 1));
        assert!(!session.playfield().collides(session.active_piece()));
    }

    #[test]
    fn test_rotation_is_rejected_when_no_kick_resolves() {
        let mut session = running_session(11);
        session.piece = ActivePiece::spawn(PieceKind::I)
            .rotated(SpinDirection::CounterClockwise)
            .translated(-4, 0);
        // One locked cell defeats the rightward kicks; the wall defeats the
        // rest, including the upward one.
        session.playfield.set_cell(1, 1, PieceKind::T);

        let before = *session.active_piece();
        assert!(!session.rotate(SpinDirection::Clockwise));
        assert_eq!(*session.active_piece(), before);
    }

    #[test]
    fn test_gravity_fires_at_the_drop_interval() {
        let mut session = running_session(12);
        let (x, y) = session.active_piece().position();

        session.advance(Duration::from_millis(999));
        assert_eq!(session.active_piece().position(), (x, y));

        session.advance(Duration::from_millis(1));
        assert_eq!(session.active_piece().position(), (x, y + 1));
    }

    #[test]
    fn test_gravity_overshoot_is_discarded() {
        let mut session = running_session(13);
        let (x, y) = session.active_piece().position();

        // 1.5 intervals: one step fires, the surplus 500ms is dropped.
        session.advance(Duration::from_millis(1500));
        assert_eq!(session.active_piece().position(), (x, y + 1));
        session.advance(Duration::from_millis(999));
        assert_eq!(session.active_piece().position(), (x, y + 1));
    }

    #[test]
    fn test_pause_freezes_gravity_and_resume_restarts_from_zero() {
        let mut session = running_session(14);
        let (x, y) = session.active_piece().position();

        session.advance(Duration::from_millis(900));
        session.pause();
        session.advance(Duration::from_secs(60));
        assert!(session.state().is_paused());
        assert_eq!(session.active_piece().position(), (x, y));

        session.resume();
        session.advance(Duration::from_millis(999));
        assert_eq!(session.active_piece().position(), (x, y));
        session.advance(Duration::from_millis(1));
        assert_eq!(session.active_piece().position(), (x, y + 1));
    }

    #[test]
    fn test_spawn_collision_ends_the_game() {
        let mut session = running_session(15);
        for y in 0..4 {
            for x in 3..=6 {
                session.playfield.set_cell(x, y, PieceKind::L);
            }
        }

        session.hard_drop();
        assert!(session.state().is_game_over());

        // Terminal state ignores further intents and time.
        assert!(!session.move_left());
        session.toggle_pause();
        session.advance(Duration::from_secs(5));
        assert!(session.state().is_game_over());
    }

    #[test]
    fn test_reset_returns_to_a_fresh_ready_board() {
        let mut session = running_session(16);
        session.hard_drop();
        session.reset();

        assert!(session.state().is_ready());
        assert!(session.playfield().rows().flatten().all(Option::is_none));
        assert_eq!(session.progression().score(), 0);
        assert_eq!(session.active_piece().position(), (4, 1));
    }

    #[test]
    fn test_seeded_sessions_share_a_piece_sequence() {
        let mut a = running_session(42);
        let mut b = running_session(42);
        for _ in 0..5 {
            assert_eq!(a.active_piece().kind(), b.active_piece().kind());
            a.hard_drop();
            b.hard_drop();
        }
    }

    #[test]
    fn test_ghost_piece_rests_on_the_floor_of_an_empty_board() {
        let session = GameSession::with_seed(17);
        let ghost = session.ghost_piece();
        assert!(ghost.cells().iter().any(|&(_, y)| y == 19));
        assert!(!session.playfield().collides(&ghost));
        // Projection leaves the session untouched.
        assert_eq!(session.active_piece().position(), (4, 1));
    }
}
