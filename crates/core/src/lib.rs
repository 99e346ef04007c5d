//! Regelwerk domain logic.
//!
//! Everything in this crate is pure: it operates on in-memory snapshots of
//! categories, rules and factions and never touches the database or the
//! network, so the API layer, the repository layer and tests can share it.

pub mod content;
pub mod error;
pub mod highlight;
pub mod html;
pub mod integrity;
pub mod navigation;
pub mod ordering;
pub mod search;
pub mod seed;
pub mod types;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
