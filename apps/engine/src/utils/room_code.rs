//! Room code generation.
//!
//! Room codes are 6-digit numeric strings; the code doubles as the shared
//! document key.

use rand::Rng;

/// Generate a 6-digit room code (100000..=999999) from OS entropy.
pub fn generate_room_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(100_000..1_000_000u32).to_string()
}
