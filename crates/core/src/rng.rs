//! RNG module - seeded piece generation
//!
//! The game owns its generator, so two sessions with the same seed and rules
//! see the same piece sequence. Two strategies are available: independent
//! uniform draws, and the "7-bag" shuffle which hands out one of each kind
//! before repeating.

use crate::config::Randomizer;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator)
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seed 0 is treated as 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`. Uses the high bits; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Seeded source of piece kinds
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    randomizer: Randomizer,
    seed: u32,
    rng: SimpleRng,
    bag: [PieceKind; 7],
    /// Next unread bag slot; 7 means the bag is empty.
    bag_index: usize,
}

impl PieceGenerator {
    pub fn new(randomizer: Randomizer, seed: u32) -> Self {
        Self {
            randomizer,
            seed,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
        }
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Draw the next kind.
    pub fn draw(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => {
                let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[i]
            }
            Randomizer::Bag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
        }
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }
}

impl Iterator for PieceGenerator {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}
