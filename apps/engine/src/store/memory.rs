//! In-memory room store.
//!
//! Backs tests and local play with the same observable contract as a real
//! remote document store: whole-document reads, merge-semantics updates
//! with version checking, and snapshot fan-out to every subscriber of a
//! room code.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

use super::{RoomPatch, RoomStore, RoomSubscription};
use crate::domain::room::Room;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[derive(Default, Debug)]
pub struct InMemoryRoomStore {
    rooms: DashMap<String, Room>,
    watchers: DashMap<String, Vec<mpsc::UnboundedSender<Room>>>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fan the current snapshot out to every live subscriber of this code.
    /// Senders whose receiver was dropped are pruned here.
    fn broadcast(&self, code: &str, room: &Room) {
        if let Some(mut entry) = self.watchers.get_mut(code) {
            entry.retain(|sender| sender.send(room.clone()).is_ok());
        }
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn create(&self, room: Room) -> Result<Room, AppError> {
        let code = room.room_code.clone();
        if self.rooms.contains_key(&code) {
            return Err(DomainError::conflict(
                ConflictKind::Other("ROOM_CODE_TAKEN".into()),
                format!("Room code {code} already exists"),
            )
            .into());
        }
        debug!(room_code = %code, "Creating room document");
        self.rooms.insert(code.clone(), room.clone());
        self.broadcast(&code, &room);
        Ok(room)
    }

    async fn get(&self, code: &str) -> Result<Option<Room>, AppError> {
        Ok(self.rooms.get(code).map(|entry| entry.clone()))
    }

    async fn update(&self, code: &str, patch: RoomPatch) -> Result<Room, AppError> {
        let updated = {
            let mut entry = self.rooms.get_mut(code).ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Room, format!("No room with code {code}"))
            })?;

            if let Some(expected) = patch.expected_version {
                if entry.version != expected {
                    return Err(DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Room was modified concurrently (expected version {expected}, actual {})",
                            entry.version
                        ),
                    )
                    .into());
                }
            }

            patch.apply(&mut entry);
            entry.version += 1;
            entry.clone()
        };

        debug!(room_code = %code, version = updated.version, "Room document updated");
        self.broadcast(code, &updated);
        Ok(updated)
    }

    async fn subscribe(&self, code: &str) -> Result<RoomSubscription, AppError> {
        let current = self.rooms.get(code).map(|entry| entry.clone()).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Room, format!("No room with code {code}"))
        })?;

        let (tx, rx) = mpsc::unbounded_channel();
        // Deliver the current state first so a late subscriber converges
        // without waiting for the next write.
        let _ = tx.send(current);
        self.watchers.entry(code.to_string()).or_default().push(tx);
        Ok(RoomSubscription::new(rx))
    }
}
