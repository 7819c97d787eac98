//! Dice value objects
//!
//! A [`Die`] holds a validated [`FaceCount`] and the value it last rolled.
//! Standard polyhedral dice (d4 through d100) are named through
//! [`Polyhedral`] rather than separate types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DiceError;
use crate::random::{random_int_inclusive, RandomPort, ThreadRandom};

const EXPECTED_FACES: &str = "a number of faces";
const EXPECTED_STANDARD_DIE: &str = "a standard die (d4, d6, d8, d10, d12, d20, d100)";

/// Number of faces on a die. Always greater than 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FaceCount(u32);

impl FaceCount {
    /// Face count used when none is given
    pub const DEFAULT: FaceCount = FaceCount(4);

    /// Validate a face count
    pub fn new(faces: i64) -> Result<Self, DiceError> {
        if faces <= 1 {
            return Err(DiceError::out_of_range(faces));
        }
        u32::try_from(faces)
            .map(Self)
            .map_err(|_| DiceError::out_of_range(faces))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for FaceCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FaceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FaceCount> for u32 {
    fn from(faces: FaceCount) -> Self {
        faces.0
    }
}

impl From<Polyhedral> for FaceCount {
    fn from(kind: Polyhedral) -> Self {
        kind.face_count()
    }
}

impl TryFrom<i64> for FaceCount {
    type Error = DiceError;

    fn try_from(faces: i64) -> Result<Self, Self::Error> {
        Self::new(faces)
    }
}

impl TryFrom<i32> for FaceCount {
    type Error = DiceError;

    fn try_from(faces: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(faces))
    }
}

impl TryFrom<u32> for FaceCount {
    type Error = DiceError;

    fn try_from(faces: u32) -> Result<Self, Self::Error> {
        Self::new(i64::from(faces))
    }
}

impl TryFrom<usize> for FaceCount {
    type Error = DiceError;

    fn try_from(faces: usize) -> Result<Self, Self::Error> {
        Self::new(i64::try_from(faces).unwrap_or(i64::MAX))
    }
}

impl TryFrom<f64> for FaceCount {
    type Error = DiceError;

    /// Any number at or below 1 is out of range; above that only finite,
    /// integral values are numbers of faces.
    fn try_from(faces: f64) -> Result<Self, Self::Error> {
        if faces.is_nan() {
            return Err(DiceError::type_mismatch(EXPECTED_FACES, faces.to_string()));
        }
        if faces <= 1.0 {
            return Err(DiceError::out_of_range(faces));
        }
        if faces.is_infinite() || faces.fract() != 0.0 {
            return Err(DiceError::type_mismatch(EXPECTED_FACES, faces.to_string()));
        }
        // Saturating cast; anything past u32::MAX is rejected by new()
        Self::new(faces as i64)
    }
}

impl TryFrom<&str> for FaceCount {
    type Error = DiceError;

    /// Accepts "6", "+6" or "d6" (case-insensitive, surrounding whitespace ignored).
    fn try_from(input: &str) -> Result<Self, Self::Error> {
        let normalized = input.trim().to_lowercase();
        let digits = normalized.strip_prefix('d').unwrap_or(normalized.as_str());
        let faces: i64 = digits
            .parse()
            .map_err(|_| DiceError::type_mismatch(EXPECTED_FACES, input))?;
        Self::new(faces)
    }
}

impl TryFrom<&String> for FaceCount {
    type Error = DiceError;

    fn try_from(input: &String) -> Result<Self, Self::Error> {
        Self::try_from(input.as_str())
    }
}

impl FromStr for FaceCount {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Standard polyhedral dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polyhedral {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl Polyhedral {
    pub const ALL: [Polyhedral; 7] = [
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    /// Number of faces on this die
    pub const fn faces(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    pub const fn face_count(self) -> FaceCount {
        FaceCount(self.faces())
    }

    /// Look up the standard die with the given number of faces
    pub fn from_faces(faces: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.faces() == faces)
    }
}

impl fmt::Display for Polyhedral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.faces())
    }
}

impl FromStr for Polyhedral {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let faces = FaceCount::try_from(s)
            .map_err(|_| DiceError::type_mismatch(EXPECTED_STANDARD_DIE, s))?;
        Self::from_faces(faces.get())
            .ok_or_else(|| DiceError::type_mismatch(EXPECTED_STANDARD_DIE, s))
    }
}

/// A die with a face count and the value it currently shows.
///
/// The face count can only change through [`Die::set_faces`], which re-rolls,
/// so the value never exceeds the face count.
///
/// ```
/// use knucklebones_domain::Die;
///
/// let mut die = Die::new(15).unwrap();
/// assert_eq!(die.faces(), 15);
/// assert!((1..=15).contains(&die.value()));
///
/// die.set_faces(20).unwrap();
/// assert_eq!(die.faces(), 20);
/// assert!((1..=20).contains(&die.value()));
/// ```
#[derive(Debug, Clone)]
pub struct Die<R = ThreadRandom> {
    faces: FaceCount,
    value: u32,
    rng: R,
}

impl Die {
    /// Create a die with the given number of faces and roll it.
    ///
    /// Accepts integers, integral floats, and strings. Numeric strings ("6",
    /// "+6") and die names ("d6", "D6") are read as face counts; any other
    /// string is a [`DiceError::TypeMismatch`].
    pub fn new<F>(faces: F) -> Result<Self, DiceError>
    where
        F: TryInto<FaceCount, Error = DiceError>,
    {
        Self::with_source(faces, ThreadRandom)
    }

    /// Create one of the standard polyhedral dice and roll it
    pub fn standard(kind: Polyhedral) -> Self {
        Self::from_face_count(kind.face_count(), ThreadRandom)
    }

    pub fn d4() -> Self {
        Self::standard(Polyhedral::D4)
    }

    pub fn d6() -> Self {
        Self::standard(Polyhedral::D6)
    }

    pub fn d8() -> Self {
        Self::standard(Polyhedral::D8)
    }

    pub fn d10() -> Self {
        Self::standard(Polyhedral::D10)
    }

    pub fn d12() -> Self {
        Self::standard(Polyhedral::D12)
    }

    pub fn d20() -> Self {
        Self::standard(Polyhedral::D20)
    }

    pub fn d100() -> Self {
        Self::standard(Polyhedral::D100)
    }
}

impl Default for Die {
    /// A four-sided die
    fn default() -> Self {
        Self::from_face_count(FaceCount::DEFAULT, ThreadRandom)
    }
}

impl<R: RandomPort> Die<R> {
    /// Create a die that draws from the given random source
    pub fn with_source<F>(faces: F, rng: R) -> Result<Self, DiceError>
    where
        F: TryInto<FaceCount, Error = DiceError>,
    {
        Ok(Self::from_face_count(faces.try_into()?, rng))
    }

    /// Create a die from an already validated face count
    pub fn from_face_count(faces: FaceCount, rng: R) -> Self {
        let mut die = Self {
            faces,
            value: 1,
            rng,
        };
        die.roll();
        die
    }

    /// Roll the die and return the new value
    pub fn roll(&mut self) -> u32 {
        self.value = random_int_inclusive(&self.rng, 1, self.faces.get());
        self.value
    }

    /// Change the number of faces and re-roll.
    ///
    /// Validation happens first; on error the die is left untouched.
    /// Returns the newly rolled value.
    pub fn set_faces<F>(&mut self, faces: F) -> Result<u32, DiceError>
    where
        F: TryInto<FaceCount, Error = DiceError>,
    {
        self.faces = faces.try_into()?;
        Ok(self.roll())
    }

    /// The value currently showing
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The number of faces on the die
    pub fn faces(&self) -> u32 {
        self.faces.get()
    }

    pub fn face_count(&self) -> FaceCount {
        self.faces
    }

    /// The standard die this matches, if any
    pub fn kind(&self) -> Option<Polyhedral> {
        Polyhedral::from_faces(self.faces.get())
    }

    pub fn snapshot(&self) -> DieSnapshot {
        DieSnapshot {
            faces: self.faces.get(),
            value: self.value,
        }
    }
}

impl<R> fmt::Display for Die<R> {
    /// Format as "d6 = 4"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{} = {}", self.faces, self.value)
    }
}

/// Serializable view of a die at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DieSnapshot {
    pub faces: u32,
    pub value: u32,
}
