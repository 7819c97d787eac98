//! Coin flipping

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DiceError;
use crate::random::{random_int_inclusive, RandomPort, ThreadRandom};

/// Side of a coin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinFace {
    Heads,
    Tails,
}

impl CoinFace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heads => "heads",
            Self::Tails => "tails",
        }
    }
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoinFace {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heads" => Ok(Self::Heads),
            "tails" => Ok(Self::Tails),
            _ => Err(DiceError::type_mismatch("heads or tails", s)),
        }
    }
}

/// A two-sided coin showing the face it last landed on.
///
/// ```
/// use knucklebones_domain::{Coin, CoinFace};
///
/// let mut coin = Coin::new();
/// let face = coin.flip();
/// assert_eq!(coin.result(), face);
/// assert!(matches!(face, CoinFace::Heads | CoinFace::Tails));
/// ```
#[derive(Debug, Clone)]
pub struct Coin<R = ThreadRandom> {
    face: CoinFace,
    rng: R,
}

impl Coin {
    /// Create a coin and flip it
    pub fn new() -> Self {
        Self::with_source(ThreadRandom)
    }
}

impl Default for Coin {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomPort> Coin<R> {
    /// Create a coin that draws from the given random source
    pub fn with_source(rng: R) -> Self {
        let mut coin = Self {
            face: CoinFace::Heads,
            rng,
        };
        coin.flip();
        coin
    }

    /// Flip the coin and return the face it lands on
    pub fn flip(&mut self) -> CoinFace {
        self.face = match random_int_inclusive(&self.rng, 0, 1) {
            0 => CoinFace::Heads,
            _ => CoinFace::Tails,
        };
        self.face
    }

    /// The face currently showing
    pub fn result(&self) -> CoinFace {
        self.face
    }
}

impl<R> fmt::Display for Coin<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face)
    }
}
