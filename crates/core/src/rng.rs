//! RNG module - uniform random piece generation
//!
//! Every draw is independent and uniform over the seven kinds; repeats are
//! allowed (no bag). A small seeded LCG keeps the generator `Copy`, so it can
//! live inside immutable game-state snapshots and replay deterministically.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce a short first cycle
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high 16 bits; the low bits of a power-of-two LCG cycle with
    /// short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform i.i.d. piece generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32);
        PieceKind::from_index(idx as usize)
    }

    /// Current generator state (feed back into `new` to continue the sequence)
    pub fn state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
