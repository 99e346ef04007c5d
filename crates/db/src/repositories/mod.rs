//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod faction_repo;
pub mod rule_repo;
pub mod session_repo;
pub mod user_repo;

pub use category_repo::{CategoryRepo, DeletedCounts};
pub use faction_repo::FactionRepo;
pub use rule_repo::RuleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
