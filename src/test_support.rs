//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::state::App;
use crate::store::Store;

/// Creates a test App backed by an in-memory database.
pub fn test_app() -> App {
    App::new(Store::open_in_memory().unwrap(), 14).unwrap()
}
