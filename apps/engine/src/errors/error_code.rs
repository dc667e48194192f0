//! Error codes for the game engine.
//!
//! This module defines all error codes used throughout the engine.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in rejected-action reports.

use core::fmt;

/// Centralized error codes for rejected actions and failures.
///
/// This enum ensures type safety and prevents the use of ad-hoc error codes.
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Action not legal in the current phase
    PhaseMismatch,
    /// Only the host may perform this transition
    NotHost,
    /// Card not in hand
    CardNotInHand,
    /// Player already moved this round
    AlreadyPlayed,
    /// Room is full
    RoomFull,
    /// Too few players to start
    TooFewPlayers,
    /// Display name already taken in the room
    DuplicateName,
    /// Actor is not a member of the room
    UnknownPlayer,
    /// Value outside its fixed range
    OutOfRange,
    /// General validation error
    ValidationError,

    // Resource not found
    /// Room code does not resolve to a document
    RoomNotFound,
    /// Player not found in the room
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Document was modified concurrently
    OptimisticLock,
    /// General conflict error
    Conflict,

    // Internal
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// Canonical string form of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::PhaseMismatch => "PHASE_MISMATCH",
            ErrorCode::NotHost => "NOT_HOST",
            ErrorCode::CardNotInHand => "CARD_NOT_IN_HAND",
            ErrorCode::AlreadyPlayed => "ALREADY_PLAYED",
            ErrorCode::RoomFull => "ROOM_FULL",
            ErrorCode::TooFewPlayers => "TOO_FEW_PLAYERS",
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::UnknownPlayer => "UNKNOWN_PLAYER",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::RoomNotFound => "ROOM_NOT_FOUND",
            ErrorCode::PlayerNotFound => "PLAYER_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::OptimisticLock => "OPTIMISTIC_LOCK",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
