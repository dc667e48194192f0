//! Partial-field update DTO for the room document.
//!
//! Builder-style: start from [`RoomPatch::new`], chain `with_*` setters for
//! the fields the action touches, and pass the result to
//! [`RoomStore::update`](super::RoomStore::update). Unset fields are left
//! untouched by the merge.

use crate::domain::cards::{HandCard, ScoreCard};
use crate::domain::room::{Phase, Room, RoomPlayer, RoundRecord};

/// A merge-semantics update against one room document.
///
/// `set_move` merges a single entry into the move map rather than replacing
/// the map; simultaneous plays from different players therefore write
/// disjoint fields. `current_score_card` is three-state: `None` = no change,
/// `Some(Some(card))` = set, `Some(None)` = clear.
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub phase: Option<Phase>,
    pub current_round: Option<u32>,
    pub current_score_card: Option<Option<ScoreCard>>,
    pub used_score_cards: Option<Vec<ScoreCard>>,
    pub players: Option<Vec<RoomPlayer>>,
    pub set_move: Option<(String, HandCard)>,
    pub clear_moves: bool,
    pub push_round_result: Option<RoundRecord>,
    /// When set, the update only applies if the stored version matches.
    pub expected_version: Option<u64>,
}

impl RoomPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_current_round(mut self, round: u32) -> Self {
        self.current_round = Some(round);
        self
    }

    pub fn with_current_score_card(mut self, card: Option<ScoreCard>) -> Self {
        self.current_score_card = Some(card);
        self
    }

    pub fn with_used_score_cards(mut self, used: Vec<ScoreCard>) -> Self {
        self.used_score_cards = Some(used);
        self
    }

    pub fn with_players(mut self, players: Vec<RoomPlayer>) -> Self {
        self.players = Some(players);
        self
    }

    pub fn with_move(mut self, player: impl Into<String>, card: HandCard) -> Self {
        self.set_move = Some((player.into(), card));
        self
    }

    pub fn clearing_moves(mut self) -> Self {
        self.clear_moves = true;
        self
    }

    pub fn with_round_result(mut self, record: RoundRecord) -> Self {
        self.push_round_result = Some(record);
        self
    }

    pub fn expecting_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }

    /// Merge this patch into a document. Version checking and bumping are
    /// the store's job; this only applies field changes.
    pub fn apply(&self, room: &mut Room) {
        if let Some(phase) = self.phase {
            room.phase = phase;
        }
        if let Some(round) = self.current_round {
            room.current_round = round;
        }
        if let Some(card) = self.current_score_card {
            room.current_score_card = card;
        }
        if let Some(used) = &self.used_score_cards {
            room.used_score_cards = used.clone();
        }
        if let Some(players) = &self.players {
            room.players = players.clone();
        }
        if self.clear_moves {
            room.player_moves.clear();
        }
        if let Some((player, card)) = &self.set_move {
            room.player_moves.insert(player.clone(), *card);
        }
        if let Some(record) = &self.push_round_result {
            room.round_results.push(record.clone());
        }
    }
}
