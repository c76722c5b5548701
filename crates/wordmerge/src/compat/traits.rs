//! # Trait Checks
//!
//! Compile-time assertions used by tests.

/// Asserts (at compile time) that `S` is `Send`.
pub fn static_is_send_check<S: Send>(_: &S) {}

/// Asserts (at compile time) that `S` is `Sync`.
pub fn static_is_sync_check<S: Sync>(_: &S) {}

/// Asserts (at compile time) that `S` is `Send + Sync`.
pub fn static_is_send_sync_check<S: Send + Sync>(v: &S) {
    static_is_send_check(v);
    static_is_sync_check(v);
}
