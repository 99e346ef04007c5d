//! Row structs and request DTOs.
//!
//! Content entities themselves live in `regelwerk_core::content`; this
//! module holds the database row shapes that do not map one to one onto
//! them, plus the input DTOs the admin API deserializes.

pub mod category;
pub mod faction;
pub mod rule;
pub mod session;
pub mod user;
