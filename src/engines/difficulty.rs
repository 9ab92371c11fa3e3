//! Strength levels and what they buy.

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 4;

const SEARCH_DEPTHS: [u8; 4] = [1, 2, 3, 4];

/// A strength level clamped to `MIN_DIFFICULTY..=MAX_DIFFICULTY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const fn new(level: u8) -> Self {
        let level = if level < MIN_DIFFICULTY {
            MIN_DIFFICULTY
        } else if level > MAX_DIFFICULTY {
            MAX_DIFFICULTY
        } else {
            level
        };
        Self(level)
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    pub const fn search_depth(self) -> u8 {
        SEARCH_DEPTHS[(self.0 - MIN_DIFFICULTY) as usize]
    }

    /// Only the weakest level ever skips the search for a random move.
    pub const fn plays_random_moves(self) -> bool {
        self.0 == MIN_DIFFICULTY
    }

    pub const fn scores_mobility(self, min_difficulty: u8) -> bool {
        self.0 >= min_difficulty
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new(2)
    }
}
