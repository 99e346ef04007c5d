//! Request handlers.
//!
//! Public handlers read from the cached content snapshot. Admin handlers
//! validate against the snapshot, write through the repositories in
//! `regelwerk_db`, and invalidate the snapshot once the write has committed.

pub mod auth;
pub mod categories;
pub mod content;
pub mod factions;
pub mod navigation;
pub mod reorder;
pub mod rules;
pub mod search;
pub mod views;
