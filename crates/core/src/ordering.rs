//! Moving items up and down within a sibling group.
//!
//! Siblings are categories sharing a `parent_id`, or rules/factions sharing
//! a `category_id`. Two strategies exist:
//!
//! - [`OrderStrategy::Swap`] exchanges `order_position` with the neighbour
//!   and leaves every other sibling untouched. Neighbours sharing a
//!   position cannot be told apart by a swap, so that case renumbers.
//! - [`OrderStrategy::Renumber`] swaps the two slots, then assigns every
//!   sibling its zero-based index.
//!
//! The caller persists the whole sibling group in one transaction and only
//! then publishes the new order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::{Category, ContentSnapshot, Faction, Rule};
use crate::error::CoreError;
use crate::types::DbId;

/// Anything with an id and a position among its siblings.
pub trait Ordered {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    fn id(&self) -> DbId;
    fn order_position(&self) -> i32;
    fn set_order_position(&mut self, position: i32);
}

impl Ordered for Category {
    const ENTITY: &'static str = "Category";

    fn id(&self) -> DbId {
        self.id
    }
    fn order_position(&self) -> i32 {
        self.order_position
    }
    fn set_order_position(&mut self, position: i32) {
        self.order_position = position;
    }
}

impl Ordered for Rule {
    const ENTITY: &'static str = "Rule";

    fn id(&self) -> DbId {
        self.id
    }
    fn order_position(&self) -> i32 {
        self.order_position
    }
    fn set_order_position(&mut self, position: i32) {
        self.order_position = position;
    }
}

impl Ordered for Faction {
    const ENTITY: &'static str = "Faction";

    fn id(&self) -> DbId {
        self.id
    }
    fn order_position(&self) -> i32 {
        self.order_position
    }
    fn set_order_position(&mut self, position: i32) {
        self.order_position = position;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStrategy {
    Swap,
    Renumber,
}

impl OrderStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStrategy::Swap => "swap",
            OrderStrategy::Renumber => "renumber",
        }
    }
}

impl fmt::Display for OrderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swap" => Ok(OrderStrategy::Swap),
            "renumber" => Ok(OrderStrategy::Renumber),
            other => Err(CoreError::Validation(format!(
                "Invalid order strategy '{other}'. Valid strategies: swap, renumber"
            ))),
        }
    }
}

/// Strategy used for categories unless a request asks otherwise.
pub const CATEGORY_STRATEGY: OrderStrategy = OrderStrategy::Swap;
/// Strategy used for rules unless a request asks otherwise.
pub const RULE_STRATEGY: OrderStrategy = OrderStrategy::Renumber;
/// Strategy used for factions unless a request asks otherwise.
pub const FACTION_STRATEGY: OrderStrategy = OrderStrategy::Renumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The item was already first (moving up) or last (moving down).
    Unchanged,
    /// The item moved from slot `from` to slot `to`.
    Moved { from: usize, to: usize },
}

/// Move the item `id` one slot in `direction` within `siblings`.
///
/// `siblings` must be in display order. On success the slice is left in the
/// new display order with positions updated per `strategy`. Boundary moves
/// leave the slice untouched.
pub fn move_item<T: Ordered>(
    siblings: &mut [T],
    id: DbId,
    direction: Direction,
    strategy: OrderStrategy,
) -> Result<MoveOutcome, CoreError> {
    let from = siblings
        .iter()
        .position(|s| s.id() == id)
        .ok_or(CoreError::NotFound {
            entity: T::ENTITY,
            id,
        })?;

    let to = match direction {
        Direction::Up if from == 0 => return Ok(MoveOutcome::Unchanged),
        Direction::Down if from + 1 == siblings.len() => return Ok(MoveOutcome::Unchanged),
        Direction::Up => from - 1,
        Direction::Down => from + 1,
    };

    let tied = siblings[from].order_position() == siblings[to].order_position();
    match strategy {
        OrderStrategy::Swap if !tied => {
            let moved = siblings[from].order_position();
            let neighbour = siblings[to].order_position();
            siblings[from].set_order_position(neighbour);
            siblings[to].set_order_position(moved);
            siblings.swap(from, to);
        }
        OrderStrategy::Swap | OrderStrategy::Renumber => {
            siblings.swap(from, to);
            renumber(siblings);
        }
    }

    Ok(MoveOutcome::Moved { from, to })
}

/// Assign every item its zero-based index as `order_position`.
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order_position(index as i32);
    }
}

/// Items of `after` whose position differs from the same item in `before`.
///
/// Items missing from `before` count as changed.
pub fn changed_positions<T: Ordered + Clone>(before: &[T], after: &[T]) -> Vec<T> {
    after
        .iter()
        .filter(|item| {
            before
                .iter()
                .find(|old| old.id() == item.id())
                .map(Ordered::order_position)
                != Some(item.order_position())
        })
        .cloned()
        .collect()
}

fn sorted<T: Ordered>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(Ordered::order_position);
    items
}

/// Categories sharing `parent_id`, in display order.
pub fn sibling_categories(snapshot: &ContentSnapshot, parent_id: Option<DbId>) -> Vec<Category> {
    sorted(
        snapshot
            .categories
            .iter()
            .filter(|c| c.parent_id == parent_id)
            .cloned()
            .collect(),
    )
}

/// Rules of one rulebook, in display order.
pub fn sibling_rules(snapshot: &ContentSnapshot, category_id: DbId) -> Vec<Rule> {
    sorted(snapshot.rules_of(category_id).cloned().collect())
}

/// Factions of one category, in display order.
pub fn sibling_factions(snapshot: &ContentSnapshot, category_id: DbId) -> Vec<Faction> {
    sorted(snapshot.factions_of(category_id).cloned().collect())
}
