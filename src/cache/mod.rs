//! Local cache for offline support.
//!
//! This module provides a small persisted key-value store that:
//! - Keeps the last-known-good property list as one JSON snapshot
//! - Records when that snapshot was last written
//! - Remembers remote auth/credential problems across restarts for display
//!
//! Cache failures never fail a store operation; callers log and carry on.

mod storage;
mod traits;

pub use storage::{LocalCache, NoopCache, SqliteCache};
pub use traits::PropertyCache;
