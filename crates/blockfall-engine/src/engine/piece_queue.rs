use std::collections::VecDeque;

use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

use crate::core::PieceKind;

/// Number of upcoming pieces the queue keeps visible.
pub const PREVIEW_LEN: usize = 5;

/// Supplies pieces using the 7-bag system.
///
/// A shuffled batch of one-of-each kind is consumed before the next batch is
/// shuffled, so no kind can repeat before all six others have appeared —
/// except across a batch boundary, which is accepted 7-bag behavior. Drawn
/// kinds feed a FIFO preview queue that never runs dry.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg64Mcg,
    bag: Vec<PieceKind>,
    next: VecDeque<PieceKind>,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceQueue {
    /// Creates a queue seeded from OS randomness.
    #[must_use]
    pub fn new() -> Self {
        Self::from_seed(rand::rng().random())
    }

    /// Creates a queue with a fixed seed, yielding a reproducible sequence.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut this = Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
            bag: Vec::with_capacity(PieceKind::LEN),
            next: VecDeque::with_capacity(PREVIEW_LEN + 1),
        };
        this.top_up();
        this
    }

    /// Pops one kind from the bag, shuffling a fresh batch first when the
    /// bag is empty. O(1) amortized; never re-rolls.
    fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.bag.extend(PieceKind::ALL);
            self.bag.shuffle(&mut self.rng);
        }
        self.bag.pop().expect("bag was just refilled")
    }

    /// Appends drawn kinds until the preview is at full depth.
    fn top_up(&mut self) {
        while self.next.len() < PREVIEW_LEN {
            let kind = self.draw();
            self.next.push_back(kind);
        }
    }

    /// Takes the next kind, keeping the preview at full depth.
    pub fn pop_next(&mut self) -> PieceKind {
        self.top_up();
        let kind = self
            .next
            .pop_front()
            .expect("preview queue was just topped up");
        self.top_up();
        kind
    }

    /// Upcoming kinds, soonest first. Always `PREVIEW_LEN` entries.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.next.iter().copied()
    }
}
