//! Phase state machine: lobby → selecting → revealing → (selecting | finished).
//!
//! Every transition validates against the current room state before touching
//! it, so a rejected action leaves the document unchanged.

use time::OffsetDateTime;

use crate::domain::cards::HandCard;
use crate::domain::deck::{is_exhausted, next_score_card, shuffled_score_deck};
use crate::domain::resolver::{resolve_round, RoundOutcome};
use crate::domain::room::{Phase, Room, RoomPlayer, RoundRecord};
use crate::domain::rules::{player_count_in_bounds, MAX_PLAYERS, MIN_PLAYERS};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Whether this play completed the round (every player has moved).
    pub all_played: bool,
    /// Resolution applied with the phase change, if the round completed.
    pub outcome: Option<RoundOutcome>,
}

/// Create a fresh lobby room with the host as sole player.
///
/// The score deck is shuffled once here from `seed`; the stored order is the
/// game-long draw order.
pub fn create_room(host_name: &str, room_code: &str, seed: u64, now: OffsetDateTime) -> Room {
    Room {
        room_code: room_code.to_string(),
        host_name: host_name.to_string(),
        players: vec![RoomPlayer::new(host_name)],
        phase: Phase::Lobby,
        current_round: 0,
        score_cards: shuffled_score_deck(seed),
        used_score_cards: Vec::new(),
        current_score_card: None,
        player_moves: Default::default(),
        round_results: Vec::new(),
        created_at: now,
        version: 0,
    }
}

/// Join a lobby room. Rejected once the game has started, when the room is
/// at the player cap, or when the display name is already taken.
pub fn join_room(room: &mut Room, name: &str) -> Result<(), DomainError> {
    if room.phase != Phase::Lobby {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Joining is only possible before the game starts",
        ));
    }
    if room.players.len() >= MAX_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::RoomFull,
            format!("Room already has {MAX_PLAYERS} players"),
        ));
    }
    if room.player(name).is_some() {
        return Err(DomainError::validation(
            ValidationKind::DuplicateName,
            format!("Name {name:?} is already taken in this room"),
        ));
    }
    room.players.push(RoomPlayer::new(name));
    Ok(())
}

/// Host-only: lobby → selecting. Draws the first score card and opens round 1.
pub fn start_game(room: &mut Room, actor: &str) -> Result<(), DomainError> {
    if room.phase != Phase::Lobby {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Game already started",
        ));
    }
    if !room.is_host(actor) {
        return Err(DomainError::validation(
            ValidationKind::NotHost,
            "Only the host may start the game",
        ));
    }
    if !player_count_in_bounds(room.players.len()) {
        return Err(DomainError::validation(
            ValidationKind::TooFewPlayers,
            format!(
                "Need {MIN_PLAYERS}..={MAX_PLAYERS} players, have {}",
                room.players.len()
            ),
        ));
    }

    let first = next_score_card(&room.score_cards, &room.used_score_cards).ok_or_else(|| {
        DomainError::validation_other("Invariant violated: fresh deck must not be exhausted")
    })?;

    room.phase = Phase::Selecting;
    room.current_round = 1;
    room.current_score_card = Some(first);
    for player in &mut room.players {
        player.phase = Phase::Selecting;
    }
    Ok(())
}

/// Record a player's card for the round.
///
/// Legal only in `selecting`; the card must be in the player's derived hand
/// and the player must not already have a recorded move. When the play
/// completes the round, resolution runs in the same mutation: the delta is
/// applied, the round record appended, the score card marked used, and the
/// room phase set to `revealing`.
pub fn play_card(room: &mut Room, player: &str, card: HandCard) -> Result<PlayOutcome, DomainError> {
    if room.phase != Phase::Selecting {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Cards can only be played while selecting",
        ));
    }
    if room.player(player).is_none() {
        return Err(DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("{player:?} is not in this room"),
        ));
    }
    if room.player_moves.contains_key(player) {
        return Err(DomainError::validation(
            ValidationKind::AlreadyPlayed,
            "Player already moved this round",
        ));
    }
    if !room.hand_of(player).contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("Card {} is not in hand", card.value()),
        ));
    }

    room.player_moves.insert(player.to_string(), card);
    if let Some(entry) = room.player_mut(player) {
        entry.phase = Phase::Revealing;
    }

    if !room.all_players_moved() {
        return Ok(PlayOutcome {
            all_played: false,
            outcome: None,
        });
    }

    let outcome = reveal_round(room)?;
    Ok(PlayOutcome {
        all_played: true,
        outcome: Some(outcome),
    })
}

/// Idempotent catch-up for the stale-snapshot race: when the move that
/// completed the round was written from a snapshot that lacked other moves,
/// no client resolved it. The host's session calls this on every inbound
/// snapshot; it is a no-op unless the room is still `selecting` with a
/// complete move set.
pub fn reveal_if_complete(room: &mut Room) -> Result<Option<RoundOutcome>, DomainError> {
    if room.phase != Phase::Selecting || !room.all_players_moved() {
        return Ok(None);
    }
    reveal_round(room).map(Some)
}

fn reveal_round(room: &mut Room) -> Result<RoundOutcome, DomainError> {
    let score_card = room.current_score_card.ok_or_else(|| {
        DomainError::validation_other("Invariant violated: selecting round has no score card")
    })?;

    let outcome = resolve_round(&room.player_moves, score_card);
    for award in &outcome.awards {
        if let Some(player) = room.player_mut(&award.player) {
            player.score += award.delta;
        }
    }

    room.round_results.push(RoundRecord {
        round_no: room.current_round,
        score_card,
        plays: room.player_moves.clone(),
        deltas: outcome
            .awards
            .iter()
            .map(|a| (a.player.clone(), a.delta))
            .collect(),
    });
    // The revealed card is consumed exactly once, at resolution.
    room.used_score_cards.push(score_card);
    room.phase = Phase::Revealing;
    for player in &mut room.players {
        player.phase = Phase::Revealing;
    }
    Ok(outcome)
}

/// Host-only: acknowledge the revealed round and move on.
///
/// Clears the move map, resets per-player phases, and either opens the next
/// round with a fresh score card or finishes the game when the deck is
/// exhausted.
pub fn advance_round(room: &mut Room, actor: &str) -> Result<(), DomainError> {
    if room.phase != Phase::Revealing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "No revealed round to advance from",
        ));
    }
    if !room.is_host(actor) {
        return Err(DomainError::validation(
            ValidationKind::NotHost,
            "Only the host may advance the round",
        ));
    }

    room.player_moves.clear();

    if is_exhausted(&room.score_cards, &room.used_score_cards) {
        room.phase = Phase::Finished;
        room.current_score_card = None;
        for player in &mut room.players {
            player.phase = Phase::Finished;
        }
        return Ok(());
    }

    let next = next_score_card(&room.score_cards, &room.used_score_cards).ok_or_else(|| {
        DomainError::validation_other("Invariant violated: non-exhausted deck has no next card")
    })?;
    room.phase = Phase::Selecting;
    room.current_round += 1;
    room.current_score_card = Some(next);
    for player in &mut room.players {
        player.phase = Phase::Selecting;
    }
    Ok(())
}
