//! In-process repositories used when no database URL is configured, and by
//! the HTTP integration tests.
//!
//! Records live in mutex-guarded vectors in insertion order, so owner-scoped
//! listings come back oldest first like the Diesel adapters.

mod categories;
mod contacts;
mod users;

pub use categories::InMemoryCategoryRepository;
pub use contacts::InMemoryContactRepository;
pub use users::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock `rows`, reporting a poisoned mutex through `poisoned`.
fn lock<'a, T, E>(
    rows: &'a Mutex<Vec<T>>,
    poisoned: impl FnOnce(&'static str) -> E,
) -> Result<MutexGuard<'a, Vec<T>>, E> {
    rows.lock()
        .map_err(|_| poisoned("in-memory repository lock poisoned"))
}
