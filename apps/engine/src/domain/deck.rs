//! Score-card deck lifecycle.
//!
//! Draw policy: the deck is shuffled exactly once at game creation with an
//! RNG seeded from the room's game seed, the shuffled order is stored in the
//! room document, and rounds draw in that order. No card repeats within a
//! game and the game ends exactly when every card has been used.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards::ScoreCard;
use crate::domain::rules::score_deck;

/// Shuffle the fixed 15-card deck deterministically for one game.
///
/// Same seed, same draw order; the order is part of the shared document so
/// every client agrees on the next card without coordination.
pub fn shuffled_score_deck(seed: u64) -> Vec<ScoreCard> {
    let mut deck = score_deck();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    deck
}

/// Next card to reveal: the first deck entry not yet used.
pub fn next_score_card(deck: &[ScoreCard], used: &[ScoreCard]) -> Option<ScoreCard> {
    deck.iter().find(|card| !used.contains(card)).copied()
}

/// True iff every deck value has been used.
pub fn is_exhausted(deck: &[ScoreCard], used: &[ScoreCard]) -> bool {
    deck.iter().all(|card| used.contains(card))
}
