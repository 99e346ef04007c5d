//! Request and response bodies shared by the three `move` endpoints.

use regelwerk_core::ordering::{Direction, MoveOutcome, OrderStrategy};
use serde::{Deserialize, Serialize};

/// Request body for `POST /admin/{categories,rules,factions}/{id}/move`.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: Direction,
    /// Overrides the entity's default strategy.
    pub strategy: Option<OrderStrategy>,
}

/// The outcome plus the sibling group in its new display order.
#[derive(Debug, Serialize)]
pub struct MoveResponse<T: Serialize> {
    #[serde(flatten)]
    pub outcome: MoveOutcome,
    pub strategy: OrderStrategy,
    pub siblings: Vec<T>,
}
