//! RNG module - uniform random piece generation
//!
//! Pieces are drawn independently and uniformly from the seven templates (no
//! 7-bag). The preview queue always holds exactly three upcoming kinds; taking
//! the head appends one fresh draw at the tail.
//!
//! The random source is injected by the caller so games are reproducible from
//! a seed.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::types::{PieceKind, NEXT_QUEUE_LEN};

/// Seedable random source used by the engine
pub type GameRng = ChaCha8Rng;

/// Create the engine's random source from a seed
pub fn seeded_rng(seed: u64) -> GameRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniformly draw one piece kind
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
}

/// Fixed-length FIFO of upcoming pieces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceQueue {
    /// Ring storage; `head` is the next piece to spawn
    slots: [PieceKind; NEXT_QUEUE_LEN],
    head: usize,
}

impl PieceQueue {
    /// Fill a fresh queue with independent draws
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut slots = [PieceKind::I; NEXT_QUEUE_LEN];
        for slot in &mut slots {
            *slot = random_kind(rng);
        }
        Self { slots, head: 0 }
    }

    /// Build a queue with known contents (head first)
    pub fn from_kinds(kinds: [PieceKind; NEXT_QUEUE_LEN]) -> Self {
        Self {
            slots: kinds,
            head: 0,
        }
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.slots[self.head]
    }

    /// Take the head and append one fresh draw at the tail
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PieceKind {
        let piece = self.slots[self.head];
        self.slots[self.head] = random_kind(rng);
        self.head = (self.head + 1) % NEXT_QUEUE_LEN;
        piece
    }

    /// Upcoming pieces in spawn order
    pub fn preview(&self) -> [PieceKind; NEXT_QUEUE_LEN] {
        let mut out = [PieceKind::I; NEXT_QUEUE_LEN];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.slots[(self.head + i) % NEXT_QUEUE_LEN];
        }
        out
    }

    pub fn len(&self) -> usize {
        NEXT_QUEUE_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
