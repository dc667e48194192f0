use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::{DomainError, ValidationKind};

/// One of a player's fixed pool of number cards, 1..=15.
///
/// Played at most once per game; the constructor is the only way to build
/// one, so an in-range value is an invariant of the type.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HandCard(u8);

impl HandCard {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 15;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::validation(
                ValidationKind::OutOfRange,
                format!("hand card must be in 1..=15, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HandCard {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for HandCard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for HandCard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        HandCard::new(value).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// A score card: signed, never zero, drawn from the fixed 15-card deck.
///
/// Positive cards reward the highest unique play; negative cards penalize
/// the lowest unique play.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ScoreCard(i8);

impl ScoreCard {
    pub const MIN: i8 = -5;
    pub const MAX: i8 = 10;

    pub fn new(value: i8) -> Result<Self, DomainError> {
        if value == 0 || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::validation(
                ValidationKind::OutOfRange,
                format!("score card must be nonzero in -5..=10, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> i8 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<i8> for ScoreCard {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for ScoreCard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i8(self.0)
    }
}

impl<'de> Deserialize<'de> for ScoreCard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i8::deserialize(deserializer)?;
        ScoreCard::new(value).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

#[cfg(test)]
pub fn hand_card(value: u8) -> HandCard {
    HandCard::new(value).expect("valid hand card")
}

#[cfg(test)]
pub fn score_card(value: i8) -> ScoreCard {
    ScoreCard::new(value).expect("valid score card")
}
