//! Test helpers for generating unique test data
//!
//! ULID-backed so that names and room labels never collide between test
//! runs, keeping tests isolated without coordination.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use engine_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique player display name
///
/// # Examples
/// ```
/// use engine_test_support::unique_helpers::unique_name;
///
/// let name1 = unique_name();
/// let name2 = unique_name();
/// assert_ne!(name1, name2);
/// ```
pub fn unique_name() -> String {
    unique_str("player")
}
