//! Round resolution: map simultaneous plays plus the revealed score card to
//! a score delta.
//!
//! A positive card goes to the highest unique play; a negative card hits the
//! lowest unique play. A tie at the decisive value falls through to the next
//! distinct value exactly once; a tie there voids the round. At most one
//! player is ever awarded or penalized, and only by the card's exact value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::cards::{HandCard, ScoreCard};

/// Why a player received this round's delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardReason {
    /// Sole highest play against a positive card.
    HighestUnique,
    /// Highest value was tied; this was the unique next-highest play.
    NextHighestAfterTie,
    /// Sole lowest play against a negative card.
    LowestUnique,
    /// Lowest value was tied; this was the unique next-lowest play.
    NextLowestAfterTie,
}

/// A single player's score delta for the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAward {
    pub player: String,
    pub delta: i32,
    pub reason: AwardReason,
}

/// Resolution of one round. `awards` is empty when ties void the round;
/// players without an entry implicitly have delta 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundOutcome {
    pub awards: Vec<ScoreAward>,
}

impl RoundOutcome {
    pub fn delta_for(&self, player: &str) -> i32 {
        self.awards
            .iter()
            .find(|a| a.player == player)
            .map(|a| a.delta)
            .unwrap_or(0)
    }
}

/// Resolve a completed round.
///
/// Deterministic given the inputs: the move map is keyed by player name and
/// the decision depends only on played values. Plays must be the complete
/// set for the round; callers enforce that every player has moved.
pub fn resolve_round(plays: &BTreeMap<String, HandCard>, score_card: ScoreCard) -> RoundOutcome {
    let mut outcome = RoundOutcome::default();

    // Sorted descending by played value; name order within equal values does
    // not matter because tied values never win.
    let mut ranked: Vec<(&String, HandCard)> = plays.iter().map(|(n, &c)| (n, c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let candidate = if score_card.is_positive() {
        unique_holder(ranked.iter().map(|&(n, c)| (n, c)), score_card, true)
    } else {
        unique_holder(ranked.iter().rev().map(|&(n, c)| (n, c)), score_card, false)
    };

    if let Some(award) = candidate {
        outcome.awards.push(award);
    }
    outcome
}

/// Walk plays from the decisive end (highest first for positive cards,
/// lowest first for negative) and find the unique holder of the first or
/// second distinct value. The cascade is exactly one level deep: a tie at
/// the second distinct value voids the round.
fn unique_holder<'a, I>(ordered: I, score_card: ScoreCard, positive: bool) -> Option<ScoreAward>
where
    I: Iterator<Item = (&'a String, HandCard)>,
{
    let plays: Vec<(&String, HandCard)> = ordered.collect();

    let mut level = 0;
    let mut idx = 0;
    while idx < plays.len() && level < 2 {
        let value = plays[idx].1;
        let holders: Vec<&String> = plays
            .iter()
            .filter(|&&(_, c)| c == value)
            .map(|&(n, _)| n)
            .collect();
        if holders.len() == 1 {
            let reason = match (positive, level) {
                (true, 0) => AwardReason::HighestUnique,
                (true, _) => AwardReason::NextHighestAfterTie,
                (false, 0) => AwardReason::LowestUnique,
                (false, _) => AwardReason::NextLowestAfterTie,
            };
            return Some(ScoreAward {
                player: holders[0].clone(),
                delta: i32::from(score_card.value()),
                reason,
            });
        }
        idx += holders.len();
        level += 1;
    }
    None
}
