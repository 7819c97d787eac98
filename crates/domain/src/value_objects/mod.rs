//! Value objects: dice and coins

mod coin;
mod dice;

pub use coin::{Coin, CoinFace};
pub use dice::{Die, DieSnapshot, FaceCount, Polyhedral};
