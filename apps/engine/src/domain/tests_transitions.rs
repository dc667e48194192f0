use time::macros::datetime;

use crate::domain::cards::hand_card;
use crate::domain::deck::is_exhausted;
use crate::domain::room::{Phase, Room};
use crate::domain::rules::DECK_SIZE;
use crate::domain::transitions::{
    advance_round, create_room, join_room, play_card, reveal_if_complete, start_game,
};
use crate::errors::domain::{DomainError, ValidationKind};

fn lobby_with(names: &[&str]) -> Room {
    let mut room = create_room(names[0], "123456", 42, datetime!(2025-06-01 12:00 UTC));
    for name in &names[1..] {
        join_room(&mut room, name).expect("join in lobby");
    }
    room
}

fn started_with(names: &[&str]) -> Room {
    let mut room = lobby_with(names);
    start_game(&mut room, names[0]).expect("host can start");
    room
}

fn assert_validation(err: DomainError, kind: ValidationKind) {
    match err {
        DomainError::Validation(actual, _) => assert_eq!(actual, kind),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn create_room_starts_in_lobby_with_host_only() {
    let room = create_room("alice", "654321", 7, datetime!(2025-06-01 12:00 UTC));
    assert_eq!(room.phase, Phase::Lobby);
    assert_eq!(room.players.len(), 1);
    assert_eq!(room.host_name, "alice");
    assert_eq!(room.score_cards.len(), DECK_SIZE);
    assert_eq!(room.current_score_card, None);
}

#[test]
fn join_rejected_after_start() {
    let mut room = started_with(&["alice", "bob"]);
    let err = join_room(&mut room, "carol").unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);
}

#[test]
fn join_rejected_when_full() {
    let mut room = lobby_with(&["a", "b", "c", "d", "e", "f"]);
    let err = join_room(&mut room, "g").unwrap_err();
    assert_validation(err, ValidationKind::RoomFull);
}

#[test]
fn join_rejected_on_duplicate_name() {
    let mut room = lobby_with(&["alice", "bob"]);
    let err = join_room(&mut room, "bob").unwrap_err();
    assert_validation(err, ValidationKind::DuplicateName);
}

#[test]
fn start_requires_host() {
    let mut room = lobby_with(&["alice", "bob"]);
    let err = start_game(&mut room, "bob").unwrap_err();
    assert_validation(err, ValidationKind::NotHost);
    // Room unchanged by the rejected action.
    assert_eq!(room.phase, Phase::Lobby);
}

#[test]
fn start_requires_two_players() {
    let mut room = lobby_with(&["alice"]);
    let err = start_game(&mut room, "alice").unwrap_err();
    assert_validation(err, ValidationKind::TooFewPlayers);
}

#[test]
fn start_opens_round_one_with_a_score_card() {
    let room = started_with(&["alice", "bob"]);
    assert_eq!(room.phase, Phase::Selecting);
    assert_eq!(room.current_round, 1);
    assert!(room.current_score_card.is_some());
    assert!(room.used_score_cards.is_empty());
    assert!(room.players.iter().all(|p| p.phase == Phase::Selecting));
}

#[test]
fn played_cards_never_return_to_hand() {
    let mut room = started_with(&["alice", "bob"]);
    play_card(&mut room, "alice", hand_card(9)).expect("first play");
    play_card(&mut room, "bob", hand_card(3)).expect("second play");
    advance_round(&mut room, "alice").expect("host advances");

    // alice's 9 is spent for the rest of the game.
    let err = play_card(&mut room, "alice", hand_card(9)).unwrap_err();
    assert_validation(err, ValidationKind::CardNotInHand);
}

#[test]
fn play_rejects_second_move_in_same_round() {
    let mut room = started_with(&["alice", "bob"]);
    play_card(&mut room, "alice", hand_card(9)).expect("first play");
    let err = play_card(&mut room, "alice", hand_card(5)).unwrap_err();
    assert_validation(err, ValidationKind::AlreadyPlayed);
}

#[test]
fn play_rejects_unknown_player() {
    let mut room = started_with(&["alice", "bob"]);
    let err = play_card(&mut room, "mallory", hand_card(1)).unwrap_err();
    assert_validation(err, ValidationKind::UnknownPlayer);
}

#[test]
fn play_rejects_outside_selecting() {
    let mut room = lobby_with(&["alice", "bob"]);
    let err = play_card(&mut room, "alice", hand_card(1)).unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);
}

#[test]
fn last_play_resolves_and_reveals() {
    let mut room = started_with(&["alice", "bob"]);
    let score_card = room.current_score_card.expect("card drawn");

    let first = play_card(&mut room, "alice", hand_card(10)).unwrap();
    assert!(!first.all_played);
    assert_eq!(room.phase, Phase::Selecting);
    assert_eq!(room.player("alice").unwrap().phase, Phase::Revealing);
    assert_eq!(room.player("bob").unwrap().phase, Phase::Selecting);

    let second = play_card(&mut room, "bob", hand_card(4)).unwrap();
    assert!(second.all_played);
    assert_eq!(room.phase, Phase::Revealing);
    assert_eq!(room.used_score_cards, vec![score_card]);
    assert_eq!(room.round_results.len(), 1);

    let outcome = second.outcome.expect("resolved");
    let delta = i32::from(score_card.value());
    let expected_winner = if score_card.is_positive() {
        "alice"
    } else {
        "bob"
    };
    assert_eq!(outcome.delta_for(expected_winner), delta);
    assert_eq!(room.player(expected_winner).unwrap().score, delta);
}

#[test]
fn advance_requires_host_and_revealing() {
    let mut room = started_with(&["alice", "bob"]);
    let err = advance_round(&mut room, "alice").unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);

    play_card(&mut room, "alice", hand_card(10)).unwrap();
    play_card(&mut room, "bob", hand_card(4)).unwrap();
    let err = advance_round(&mut room, "bob").unwrap_err();
    assert_validation(err, ValidationKind::NotHost);
}

#[test]
fn advance_opens_next_round_with_fresh_card() {
    let mut room = started_with(&["alice", "bob"]);
    let first_card = room.current_score_card.unwrap();
    play_card(&mut room, "alice", hand_card(10)).unwrap();
    play_card(&mut room, "bob", hand_card(4)).unwrap();

    advance_round(&mut room, "alice").unwrap();
    assert_eq!(room.phase, Phase::Selecting);
    assert_eq!(room.current_round, 2);
    assert!(room.player_moves.is_empty());
    let second_card = room.current_score_card.unwrap();
    assert_ne!(first_card, second_card);
    assert!(room.players.iter().all(|p| p.phase == Phase::Selecting));
}

#[test]
fn reveal_if_complete_is_noop_unless_round_complete() {
    let mut room = started_with(&["alice", "bob"]);
    assert_eq!(reveal_if_complete(&mut room).unwrap(), None);

    play_card(&mut room, "alice", hand_card(10)).unwrap();
    assert_eq!(reveal_if_complete(&mut room).unwrap(), None);

    // Simulate the stale-snapshot race: bob's move landed in the document
    // without anyone running resolution.
    room.player_moves.insert("bob".to_string(), hand_card(4));
    let outcome = reveal_if_complete(&mut room).unwrap();
    assert!(outcome.is_some());
    assert_eq!(room.phase, Phase::Revealing);

    // Second call is a no-op once revealed.
    assert_eq!(reveal_if_complete(&mut room).unwrap(), None);
    assert_eq!(room.round_results.len(), 1);
}

#[test]
fn full_game_finishes_exactly_at_deck_exhaustion() {
    // Scenario: after 15 resolved rounds with no repeats the deck is
    // exhausted and the room is finished.
    let mut room = started_with(&["alice", "bob"]);

    for round in 1..=DECK_SIZE as u32 {
        assert_eq!(room.current_round, round);
        assert_eq!(room.phase, Phase::Selecting);
        let a = room.hand_of("alice")[0];
        let b = *room.hand_of("bob").last().expect("bob has cards left");
        play_card(&mut room, "alice", a).unwrap();
        play_card(&mut room, "bob", b).unwrap();
        assert_eq!(room.phase, Phase::Revealing);
        advance_round(&mut room, "alice").unwrap();
    }

    assert_eq!(room.phase, Phase::Finished);
    assert_eq!(room.used_score_cards.len(), DECK_SIZE);
    assert!(is_exhausted(&room.score_cards, &room.used_score_cards));
    assert_eq!(room.current_score_card, None);

    // No duplicate score card was ever revealed.
    let mut used: Vec<i8> = room.used_score_cards.iter().map(|c| c.value()).collect();
    used.sort_unstable();
    used.dedup();
    assert_eq!(used.len(), DECK_SIZE);

    // Terminal: nothing further is legal.
    let alice_card = room.hand_of("alice")[0];
    let err = play_card(&mut room, "alice", alice_card).unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);
    let err = advance_round(&mut room, "alice").unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);
}
