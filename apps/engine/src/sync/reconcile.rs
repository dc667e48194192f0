//! Reconciliation of the remote authoritative document with per-client
//! local state.
//!
//! `reconcile` is pure and idempotent: applying it twice with the same
//! snapshot yields the same state as applying it once, regardless of how
//! many intermediate remote states were coalesced or skipped.

use crate::domain::cards::{HandCard, ScoreCard};
use crate::domain::room::{Phase, Room};

/// One player as seen by this client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPlayer {
    pub name: String,
    /// Derived: fixed initial hand minus every card this player has played.
    pub hand: Vec<HandCard>,
    pub played_card: Option<HandCard>,
    pub score: i32,
    pub connected: bool,
}

/// Per-client view of the game, rebuilt from each inbound snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalGameState {
    pub room_code: String,
    pub self_name: String,
    pub is_host: bool,
    pub players: Vec<LocalPlayer>,
    pub phase: Phase,
    pub current_round: u32,
    pub current_score_card: Option<ScoreCard>,
    pub used_score_cards: Vec<ScoreCard>,
    /// Own play committed locally but not yet visible in a remote snapshot:
    /// (round it was recorded for, card).
    pub optimistic_play: Option<(u32, HandCard)>,
}

impl LocalGameState {
    /// Empty state for a client that has not yet seen a snapshot.
    pub fn new(self_name: impl Into<String>) -> Self {
        Self {
            room_code: String::new(),
            self_name: self_name.into(),
            is_host: false,
            players: Vec::new(),
            phase: Phase::Lobby,
            current_round: 0,
            current_score_card: None,
            used_score_cards: Vec::new(),
            optimistic_play: None,
        }
    }

    pub fn self_player(&self) -> Option<&LocalPlayer> {
        self.players.iter().find(|p| p.name == self.self_name)
    }
}

/// Fold a remote snapshot into local state.
///
/// Rules: hands are recomputed from recorded history, never trusted from a
/// counter; scores come from the remote verbatim; an optimistic local play
/// is kept until the remote move map shows it or the snapshot's round has
/// advanced past the round it was recorded for; players present remotely
/// but unknown locally appear with a fresh hand, and players missing from
/// the remote roster are dropped.
pub fn reconcile(local: &LocalGameState, room: &Room) -> LocalGameState {
    let self_name = local.self_name.clone();

    // Optimism is cleared only once the snapshot's round has advanced past
    // the round the play was recorded for; until then a stale snapshot that
    // lacks the move must not blank the local play.
    let optimistic_play = local
        .optimistic_play
        .filter(|&(round, _)| room.current_round <= round);

    let players = room
        .players
        .iter()
        .map(|remote| {
            let mut hand = room.hand_of(&remote.name);
            let mut played_card = room.player_moves.get(&remote.name).copied();

            if remote.name == self_name {
                if let Some((_, card)) = optimistic_play {
                    hand.retain(|&c| c != card);
                    played_card = Some(card);
                }
            }

            LocalPlayer {
                name: remote.name.clone(),
                hand,
                played_card,
                score: remote.score,
                connected: remote.connected,
            }
        })
        .collect();

    LocalGameState {
        room_code: room.room_code.clone(),
        is_host: room.is_host(&self_name),
        self_name,
        players,
        phase: room.phase,
        current_round: room.current_round,
        current_score_card: room.current_score_card,
        used_score_cards: room.used_score_cards.clone(),
        optimistic_play,
    }
}
