// Proptest generators for domain types.
// These generators keep values inside the fixed card ranges so strategies
// never produce unrepresentable inputs.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::domain::cards::{HandCard, ScoreCard};
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};

/// Generate a valid hand card value (1..=15).
pub fn hand_card() -> impl Strategy<Value = HandCard> {
    (HandCard::MIN..=HandCard::MAX).prop_map(|v| HandCard::new(v).expect("in range"))
}

/// Generate a valid score card from the fixed deck values.
pub fn score_card() -> impl Strategy<Value = ScoreCard> {
    prop_oneof![
        (ScoreCard::MIN..=-1i8),
        (1i8..=ScoreCard::MAX),
    ]
    .prop_map(|v| ScoreCard::new(v).expect("nonzero in range"))
}

/// Generate a roster of 2..=6 distinct player names.
pub fn roster() -> impl Strategy<Value = Vec<String>> {
    (MIN_PLAYERS..=MAX_PLAYERS).prop_map(|count| {
        (0..count).map(|i| format!("player{i}")).collect()
    })
}

/// Generate a complete move map for a roster: every player has a play, and
/// plays may collide across players (each player's own hand is distinct, but
/// two players can hold the same value).
pub fn complete_plays() -> impl Strategy<Value = BTreeMap<String, HandCard>> {
    roster().prop_flat_map(|names| {
        let count = names.len();
        proptest::collection::vec(hand_card(), count).prop_map(move |cards| {
            names
                .iter()
                .cloned()
                .zip(cards.iter().copied())
                .collect::<BTreeMap<_, _>>()
        })
    })
}
