//! Deterministic dice source for simulations and tests.
//!
//! RULE: The engine never rolls dice. Only drivers (the runner's simulation
//! mode, tests) draw from a DiceRng, and always from an explicit seed.

use crate::outcome::{DicePair, Die, RoundInput};
use rand::{seq::SliceRandom, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct DiceRng {
    seed:  u64,
    inner: Pcg64Mcg,
}

impl DiceRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, inner: Pcg64Mcg::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll one fair die.
    pub fn roll_die(&mut self) -> Die {
        // FACES is non-empty, so choose() always yields.
        Die::FACES.choose(&mut self.inner).copied().unwrap_or(Die::FACES[0])
    }

    pub fn roll_pair(&mut self) -> DicePair {
        DicePair { first: self.roll_die(), second: self.roll_die() }
    }

    /// Roll both pairs of a round.
    pub fn roll_round(&mut self) -> RoundInput {
        let player = self.roll_pair();
        let banker = self.roll_pair();
        RoundInput::Dice { player, banker }
    }
}
