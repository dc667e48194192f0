//! Per-client orchestration of local actions against the shared document.
//!
//! Every action is a read-validate-patch cycle: load the authoritative
//! snapshot, run the domain transition on a copy, and push only the touched
//! fields back through the store port. Version-guarded patches retry a
//! bounded number of times on optimistic-lock conflicts.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::cards::HandCard;
use crate::domain::room::{Phase, Room};
use crate::domain::transitions::{
    self, advance_round, join_room, play_card, reveal_if_complete, start_game, PlayOutcome,
};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::store::{RoomPatch, RoomStore, RoomSubscription};
use crate::sync::reconcile::{reconcile, LocalGameState};
use crate::utils::room_code::generate_room_code;

/// Retry budget for version-guarded writes and room-code generation.
const MAX_SYNC_RETRIES: usize = 3;

/// One client's connection to a room.
#[derive(Debug)]
pub struct RoomSession<S: RoomStore> {
    store: Arc<S>,
    state: LocalGameState,
}

impl<S: RoomStore> RoomSession<S> {
    /// Create a new room with `host_name` as the sole player and host.
    pub async fn create(store: Arc<S>, host_name: &str) -> Result<Self, AppError> {
        let seed = rand::random::<u64>();
        for _ in 0..MAX_SYNC_RETRIES {
            let code = generate_room_code();
            let room = transitions::create_room(host_name, &code, seed, OffsetDateTime::now_utc());
            match store.create(room).await {
                Ok(created) => {
                    info!(room_code = %code, host = %host_name, "Room created");
                    let state = reconcile(&LocalGameState::new(host_name), &created);
                    return Ok(Self { store, state });
                }
                // Code collision: roll a fresh code and try again.
                Err(err) if err.code() == ErrorCode::Conflict => {
                    debug!(room_code = %code, "Room code taken, regenerating");
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
        Err(AppError::internal("Could not allocate a free room code"))
    }

    /// Join an existing lobby room under `name`.
    pub async fn join(store: Arc<S>, room_code: &str, name: &str) -> Result<Self, AppError> {
        let mut attempt = 0;
        loop {
            let room = store.require(room_code).await?;
            let mut next = room.clone();
            join_room(&mut next, name)?;

            let patch = RoomPatch::new()
                .with_players(next.players.clone())
                .expecting_version(room.version);
            match store.update(room_code, patch).await {
                Ok(updated) => {
                    info!(room_code = %room_code, player = %name, "Joined room");
                    let state = reconcile(&LocalGameState::new(name), &updated);
                    return Ok(Self { store, state });
                }
                Err(err) if err.is_retryable() && attempt + 1 < MAX_SYNC_RETRIES => {
                    attempt += 1;
                    debug!(room_code = %room_code, attempt, "Join raced a concurrent write, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Host-only: start the game.
    pub async fn start(&mut self) -> Result<(), AppError> {
        let code = self.state.room_code.clone();
        let actor = self.state.self_name.clone();
        let mut attempt = 0;
        loop {
            let room = self.store.require(&code).await?;
            let mut next = room.clone();
            start_game(&mut next, &actor)?;

            let patch = RoomPatch::new()
                .with_phase(next.phase)
                .with_current_round(next.current_round)
                .with_current_score_card(next.current_score_card)
                .with_players(next.players.clone())
                .expecting_version(room.version);
            match self.store.update(&code, patch).await {
                Ok(updated) => {
                    info!(
                        room_code = %code,
                        players = updated.players.len(),
                        "Game started"
                    );
                    self.state = reconcile(&self.state, &updated);
                    return Ok(());
                }
                Err(err) if err.is_retryable() && attempt + 1 < MAX_SYNC_RETRIES => {
                    attempt += 1;
                    debug!(room_code = %code, attempt, "Start raced a concurrent write, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Play a card for the current round.
    ///
    /// A play that does not complete the round writes only this player's
    /// entry in the move map (a disjoint field), so simultaneous plays from
    /// different players cannot clobber each other. The play that completes
    /// the round carries the resolution in the same version-guarded patch.
    pub async fn play_card(&mut self, card: HandCard) -> Result<PlayOutcome, AppError> {
        let code = self.state.room_code.clone();
        let player = self.state.self_name.clone();
        let mut attempt = 0;
        loop {
            let room = self.store.require(&code).await?;
            let played_round = room.current_round;
            let mut next = room.clone();
            let outcome = play_card(&mut next, &player, card)?;

            let patch = if outcome.all_played {
                let record = next.round_results.last().cloned().ok_or_else(|| {
                    AppError::internal("Completed round produced no round record")
                })?;
                RoomPatch::new()
                    .with_move(&player, card)
                    .with_phase(next.phase)
                    .with_players(next.players.clone())
                    .with_used_score_cards(next.used_score_cards.clone())
                    .with_round_result(record)
                    .expecting_version(room.version)
            } else {
                RoomPatch::new().with_move(&player, card)
            };

            match self.store.update(&code, patch).await {
                Ok(updated) => {
                    info!(
                        room_code = %code,
                        player = %player,
                        card = card.value(),
                        round = played_round,
                        completed_round = outcome.all_played,
                        "Card played"
                    );
                    self.state.optimistic_play = Some((played_round, card));
                    self.state = reconcile(&self.state, &updated);
                    return Ok(outcome);
                }
                Err(err) if err.is_retryable() && attempt + 1 < MAX_SYNC_RETRIES => {
                    attempt += 1;
                    debug!(room_code = %code, attempt, "Play raced a concurrent write, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Host-only: acknowledge the revealed round and open the next one (or
    /// finish the game when the deck is exhausted).
    pub async fn advance_round(&mut self) -> Result<(), AppError> {
        let code = self.state.room_code.clone();
        let actor = self.state.self_name.clone();
        let mut attempt = 0;
        loop {
            let room = self.store.require(&code).await?;
            let mut next = room.clone();
            advance_round(&mut next, &actor)?;

            let patch = RoomPatch::new()
                .with_phase(next.phase)
                .with_current_round(next.current_round)
                .with_current_score_card(next.current_score_card)
                .with_players(next.players.clone())
                .clearing_moves()
                .expecting_version(room.version);
            match self.store.update(&code, patch).await {
                Ok(updated) => {
                    info!(
                        room_code = %code,
                        round = updated.current_round,
                        phase = ?updated.phase,
                        "Round advanced"
                    );
                    self.state = reconcile(&self.state, &updated);
                    return Ok(());
                }
                Err(err) if err.is_retryable() && attempt + 1 < MAX_SYNC_RETRIES => {
                    attempt += 1;
                    debug!(room_code = %code, attempt, "Advance raced a concurrent write, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Fold an inbound snapshot into local state.
    ///
    /// When this client is the host it also repairs the stale-snapshot race:
    /// if the snapshot shows a complete move set still in `selecting`, the
    /// completing play was written from a snapshot that lacked other moves
    /// and nobody resolved the round. The host resolves it here under a
    /// version guard; losing that guard means another client already did.
    pub async fn apply_snapshot(&mut self, room: &Room) -> Result<(), AppError> {
        self.state = reconcile(&self.state, room);

        if !self.state.is_host || room.phase != Phase::Selecting || !room.all_players_moved() {
            return Ok(());
        }

        let mut next = room.clone();
        let Some(_) = reveal_if_complete(&mut next)? else {
            return Ok(());
        };
        let record = next
            .round_results
            .last()
            .cloned()
            .ok_or_else(|| AppError::internal("Completed round produced no round record"))?;

        let patch = RoomPatch::new()
            .with_phase(next.phase)
            .with_players(next.players.clone())
            .with_used_score_cards(next.used_score_cards.clone())
            .with_round_result(record)
            .expecting_version(room.version);
        match self.store.update(&room.room_code, patch).await {
            Ok(updated) => {
                info!(
                    room_code = %room.room_code,
                    round = updated.current_round,
                    "Host resolved a round completed by concurrent plays"
                );
                self.state = reconcile(&self.state, &updated);
                Ok(())
            }
            Err(err) if err.is_retryable() => {
                debug!(room_code = %room.room_code, "Round already resolved elsewhere");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Subscribe to this session's room.
    pub async fn subscribe(&self) -> Result<RoomSubscription, AppError> {
        self.store.subscribe(&self.state.room_code).await
    }

    pub fn state(&self) -> &LocalGameState {
        &self.state
    }

    pub fn room_code(&self) -> &str {
        &self.state.room_code
    }
}
