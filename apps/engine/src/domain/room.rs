//! The room aggregate: the authoritative shared game document.
//!
//! A `Room` serializes 1:1 to the JSON document stored under its room code;
//! camelCase field names are the wire format every client reads and writes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards::{HandCard, ScoreCard};
use crate::domain::rules::full_hand;

/// Room-wide or per-player stage of play.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Pre-game; players may join, the host may start.
    Lobby,
    /// Per-round card-choice window.
    Selecting,
    /// All plays recorded; results shown until the host advances.
    Revealing,
    /// Terminal; no further mutation.
    Finished,
}

/// One player's public entry in the room roster.
///
/// `phase` tracks this player's own progress within the round: a player
/// whose move is recorded shows `Revealing` while stragglers remain
/// `Selecting`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPlayer {
    pub name: String,
    pub score: i32,
    pub phase: Phase,
    pub connected: bool,
}

impl RoomPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            phase: Phase::Lobby,
            connected: true,
        }
    }
}

/// Immutable record of a resolved round, appended for audit/history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round_no: u32,
    pub score_card: ScoreCard,
    pub plays: BTreeMap<String, HandCard>,
    pub deltas: BTreeMap<String, i32>,
}

/// The authoritative shared aggregate, keyed by room code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// 6-digit identifier; also the document key.
    pub room_code: String,
    pub host_name: String,
    /// Insertion order = join order = display order.
    pub players: Vec<RoomPlayer>,
    pub phase: Phase,
    /// 1-based once the game has started.
    pub current_round: u32,
    /// Full deck in this game's draw order (shuffled once at creation).
    pub score_cards: Vec<ScoreCard>,
    pub used_score_cards: Vec<ScoreCard>,
    pub current_score_card: Option<ScoreCard>,
    /// This round's recorded plays, keyed by player name. Each player only
    /// ever writes their own entry.
    pub player_moves: BTreeMap<String, HandCard>,
    pub round_results: Vec<RoundRecord>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Optimistic-lock counter; bumped by every store update.
    pub version: u64,
}

impl Room {
    pub fn player(&self, name: &str) -> Option<&RoomPlayer> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut RoomPlayer> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    pub fn is_host(&self, name: &str) -> bool {
        self.host_name == name
    }

    /// A player's remaining hand, derived from the fixed initial hand minus
    /// every card they played in resolved rounds and any pending move this
    /// round. Derived rather than stored so replicas cannot diverge.
    pub fn hand_of(&self, name: &str) -> Vec<HandCard> {
        let mut spent: Vec<HandCard> = self
            .round_results
            .iter()
            .filter_map(|r| r.plays.get(name))
            .copied()
            .collect();
        if let Some(&pending) = self.player_moves.get(name) {
            spent.push(pending);
        }
        full_hand()
            .into_iter()
            .filter(|card| !spent.contains(card))
            .collect()
    }

    /// True when every rostered player has a recorded move this round.
    pub fn all_players_moved(&self) -> bool {
        !self.players.is_empty()
            && self
                .players
                .iter()
                .all(|p| self.player_moves.contains_key(&p.name))
    }
}
