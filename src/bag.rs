//! 7-bag randomizer for piece generation
//!
//! All 7 piece types are shuffled into a "bag" and dealt out before
//! reshuffling, bounding how long any type can be absent. Two bags are kept
//! pending so the next-piece queue can always be refilled: draws pop the
//! front of the current bag, and when it empties the next bag is promoted
//! and a fresh one is shuffled behind it.

use crate::tetromino::TetrominoType;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The 7-bag piece randomizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SevenBag {
    current: Vec<TetrominoType>,
    next: Vec<TetrominoType>,
    rng: ChaCha8Rng,
}

impl SevenBag {
    /// Create a randomizer with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a randomizer with a fixed seed (for reproducible games and tests)
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let current = shuffled_bag(&mut rng);
        let next = shuffled_bag(&mut rng);
        Self { current, next, rng }
    }

    /// Draw the next piece type.
    ///
    /// Promotes the next bag and shuffles a replacement when the current
    /// bag has been exhausted.
    pub fn draw(&mut self) -> TetrominoType {
        if self.current.is_empty() {
            let fresh = shuffled_bag(&mut self.rng);
            self.current = std::mem::replace(&mut self.next, fresh);
        }
        self.current.remove(0)
    }

    /// Remaining types in the bag currently being dealt
    pub fn current(&self) -> &[TetrominoType] {
        &self.current
    }

    /// The pending bag dealt after the current one empties
    pub fn pending(&self) -> &[TetrominoType] {
        &self.next
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new()
    }
}

/// A fresh Fisher-Yates shuffled permutation of the 7 types
fn shuffled_bag(rng: &mut ChaCha8Rng) -> Vec<TetrominoType> {
    let mut bag = TetrominoType::all().to_vec();
    bag.shuffle(rng);
    bag
}
