//! RNG module - uniform random piece selection
//!
//! Each spawn draws one of the seven catalog kinds with equal probability
//! (no bag, no history). The generator is seeded so a given seed always
//! produces the same piece sequence, which keeps tests and benches reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Seeded uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceRng {
    seed: u64,
    rng: StdRng,
}

impl PieceRng {
    /// Create a new generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}
