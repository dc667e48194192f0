//! Store port: the room document store as seen by the core.
//!
//! The core never talks to a concrete backend directly; everything goes
//! through [`RoomStore`], which models the four operations the external
//! store must provide: whole-document create/read, partial-field update
//! with merge semantics, and subscribe-for-changes.

mod memory;
mod patch;

pub use memory::InMemoryRoomStore;
pub use patch::RoomPatch;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::room::Room;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// A live feed of room snapshots.
///
/// The current document is delivered first, then every subsequent update.
/// Dropping the subscription unsubscribes; the store prunes dead receivers
/// on its next broadcast.
#[derive(Debug)]
pub struct RoomSubscription {
    receiver: mpsc::UnboundedReceiver<Room>,
}

impl RoomSubscription {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<Room>) -> Self {
        Self { receiver }
    }

    /// Next snapshot, or `None` once the store side has gone away.
    pub async fn next(&mut self) -> Option<Room> {
        self.receiver.recv().await
    }

    /// Non-blocking drain helper for callers that only want the latest
    /// coalesced state.
    pub fn try_next(&mut self) -> Option<Room> {
        self.receiver.try_recv().ok()
    }
}

/// The shared mutable room document, keyed by room code.
///
/// Correctness under concurrent writers relies on two things (and nothing
/// else from the backend): per-entry merge of the move map so simultaneous
/// plays touch disjoint fields, and version checks for room-wide
/// transitions.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Create the document. Fails if the key is already taken.
    async fn create(&self, room: Room) -> Result<Room, AppError>;

    /// Whole-document read; `None` when the code resolves to nothing.
    async fn get(&self, code: &str) -> Result<Option<Room>, AppError>;

    /// Partial-field update with merge semantics. Returns the document
    /// after the merge. Rejects with an optimistic-lock conflict when the
    /// patch carries an `expected_version` that no longer matches.
    async fn update(&self, code: &str, patch: RoomPatch) -> Result<Room, AppError>;

    /// Subscribe to document changes; the current state arrives first.
    async fn subscribe(&self, code: &str) -> Result<RoomSubscription, AppError>;

    /// Read the document or fail with a not-found error.
    async fn require(&self, code: &str) -> Result<Room, AppError> {
        self.get(code).await?.ok_or_else(|| {
            AppError::not_found(ErrorCode::RoomNotFound, format!("No room with code {code}"))
        })
    }
}
