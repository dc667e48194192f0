//! Domain layer: pure game rules, room aggregate, and phase transitions.

pub mod cards;
pub mod deck;
pub mod resolver;
pub mod room;
pub mod rules;
pub mod transitions;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_transitions;

// Re-exports for ergonomics
pub use cards::{HandCard, ScoreCard};
pub use resolver::{resolve_round, AwardReason, RoundOutcome, ScoreAward};
pub use room::{Phase, Room, RoomPlayer, RoundRecord};
pub use transitions::{
    advance_round, create_room, join_room, play_card, reveal_if_complete, start_game, PlayOutcome,
};
