use crate::domain::cards::{HandCard, ScoreCard};

/// Player-count policy. Minimum is fixed at 2.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// One round per score card; the game ends when the deck is exhausted.
pub const DECK_SIZE: usize = 15;

/// The fixed score-card deck: {-5..=-1} ∪ {1..=10}, zero excluded.
pub fn score_deck() -> Vec<ScoreCard> {
    (ScoreCard::MIN..=ScoreCard::MAX)
        .filter(|&v| v != 0)
        .map(|v| ScoreCard::new(v).expect("deck values are valid by construction"))
        .collect()
}

/// The fixed initial hand every player starts with: 1..=15.
pub fn full_hand() -> Vec<HandCard> {
    (HandCard::MIN..=HandCard::MAX)
        .map(|v| HandCard::new(v).expect("hand values are valid by construction"))
        .collect()
}

pub fn player_count_in_bounds(count: usize) -> bool {
    (MIN_PLAYERS..=MAX_PLAYERS).contains(&count)
}
