#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod domain;
pub mod error;
pub mod errors;
pub mod store;
pub mod sync;
pub mod telemetry;
pub mod utils;

// Re-exports for public API
pub use domain::{HandCard, Phase, Room, RoomPlayer, RoundRecord, ScoreCard};
pub use error::AppError;
pub use errors::ErrorCode;
pub use store::{InMemoryRoomStore, RoomPatch, RoomStore, RoomSubscription};
pub use sync::{reconcile, LocalGameState, RoomSession};
pub use telemetry::init_tracing;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
