//! Referential integrity for category deletes.
//!
//! Rules and factions point at categories by `category_id` without a
//! database foreign key, and rulebooks point at their parent the same way.
//! What happens to those children when a category is deleted is decided
//! here, before anything touches the database.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::ContentSnapshot;
use crate::error::CoreError;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Refuse to delete a category that still has children.
    #[default]
    Restrict,
    /// Delete the category, its rulebooks and everything attached to them.
    Cascade,
    /// Delete the category alone. Children stay stored but unreachable.
    Orphan,
}

impl DeletePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DeletePolicy::Restrict => "restrict",
            DeletePolicy::Cascade => "cascade",
            DeletePolicy::Orphan => "orphan",
        }
    }
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeletePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restrict" => Ok(DeletePolicy::Restrict),
            "cascade" => Ok(DeletePolicy::Cascade),
            "orphan" => Ok(DeletePolicy::Orphan),
            other => Err(CoreError::Validation(format!(
                "Invalid delete policy '{other}'. Valid policies: restrict, cascade, orphan"
            ))),
        }
    }
}

/// Ids to delete in a single transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletePlan {
    pub category_ids: Vec<DbId>,
    pub rule_ids: Vec<DbId>,
    pub faction_ids: Vec<DbId>,
}

impl DeletePlan {
    pub fn total(&self) -> usize {
        self.category_ids.len() + self.rule_ids.len() + self.faction_ids.len()
    }
}

/// Work out what deleting category `id` under `policy` removes.
pub fn plan_category_delete(
    snapshot: &ContentSnapshot,
    id: DbId,
    policy: DeletePolicy,
) -> Result<DeletePlan, CoreError> {
    snapshot.category(id).ok_or(CoreError::NotFound {
        entity: "Category",
        id,
    })?;

    let mut category_ids = vec![id];
    category_ids.extend(snapshot.rulebooks_of(id).map(|c| c.id));

    let rule_ids: Vec<DbId> = snapshot
        .rules
        .iter()
        .filter(|r| category_ids.contains(&r.category_id))
        .map(|r| r.id)
        .collect();
    let faction_ids: Vec<DbId> = snapshot
        .factions
        .iter()
        .filter(|f| category_ids.contains(&f.category_id))
        .map(|f| f.id)
        .collect();

    match policy {
        DeletePolicy::Cascade => Ok(DeletePlan {
            category_ids,
            rule_ids,
            faction_ids,
        }),
        DeletePolicy::Orphan => Ok(DeletePlan {
            category_ids: vec![id],
            ..DeletePlan::default()
        }),
        DeletePolicy::Restrict => {
            let rulebooks = category_ids.len() - 1;
            if rulebooks + rule_ids.len() + faction_ids.len() > 0 {
                return Err(CoreError::Conflict(format!(
                    "Category still has {rulebooks} rulebook(s), {} rule(s) and {} faction(s)",
                    rule_ids.len(),
                    faction_ids.len()
                )));
            }
            Ok(DeletePlan {
                category_ids,
                ..DeletePlan::default()
            })
        }
    }
}

/// Content that no page can reach any more.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrphanReport {
    /// Rulebooks whose parent category is gone.
    pub rulebook_ids: Vec<DbId>,
    /// Rules whose category is missing or not a rulebook.
    pub rule_ids: Vec<DbId>,
    /// Factions whose category is missing.
    pub faction_ids: Vec<DbId>,
}

impl OrphanReport {
    pub fn is_empty(&self) -> bool {
        self.rulebook_ids.is_empty() && self.rule_ids.is_empty() && self.faction_ids.is_empty()
    }
}

pub fn find_orphans(snapshot: &ContentSnapshot) -> OrphanReport {
    let rulebook_ids = snapshot
        .rulebooks()
        .filter(|c| c.parent_id.and_then(|p| snapshot.category(p)).is_none())
        .map(|c| c.id)
        .collect();
    let rule_ids = snapshot
        .rules
        .iter()
        .filter(|r| snapshot.rulebook(r.category_id).is_none())
        .map(|r| r.id)
        .collect();
    let faction_ids = snapshot
        .factions
        .iter()
        .filter(|f| snapshot.category(f.category_id).is_none())
        .map(|f| f.id)
        .collect();

    OrphanReport {
        rulebook_ids,
        rule_ids,
        faction_ids,
    }
}
