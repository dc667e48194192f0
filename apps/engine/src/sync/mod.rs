//! Synchronization adapter: local optimistic state reconciled against
//! remote snapshots, and the per-client action orchestrator.

pub mod reconcile;
pub mod session;

pub use reconcile::{reconcile, LocalGameState, LocalPlayer};
pub use session::RoomSession;
