//! Knucklebones domain: dice and coins over an injectable random source.

pub mod error;
pub mod random;
pub mod value_objects;

pub use error::DiceError;

pub use random::{random_int_inclusive, RandomPort, ThreadRandom};

#[cfg(any(test, feature = "testing"))]
pub use random::{FixedRandomPort, MockRandomPort};

pub use value_objects::{Coin, CoinFace, Die, DieSnapshot, FaceCount, Polyhedral};
