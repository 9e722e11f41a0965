//! Results export for finished (or in-progress) games.

mod summary;

pub use summary::*;
