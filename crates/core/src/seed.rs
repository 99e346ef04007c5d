//! The "Fraktionen" main category and its three faction galleries.

use serde::Serialize;

use crate::content::{next_order_position, Category, CategoryKind, ContentSnapshot};
use crate::types::{DbId, Timestamp};

pub const FACTIONS_MAIN_TITLE: &str = "Fraktionen";
pub const FACTIONS_ICON: &str = "users";

/// Gallery titles with their icons, in display order.
pub const FACTION_GALLERIES: [(&str, &str); 3] = [
    ("Staatsfraktionen", "shield"),
    ("Legale Fraktionen", "briefcase"),
    ("Illegale Fraktionen", "sword"),
];

/// Categories to insert and categories to rewrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedPlan {
    pub created: Vec<Category>,
    pub updated: Vec<Category>,
}

impl SeedPlan {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty()
    }

    /// Everything that has to be written, inserts first.
    pub fn changes(&self) -> impl Iterator<Item = &Category> {
        self.created.iter().chain(self.updated.iter())
    }
}

/// Plan the faction galleries against the current snapshot.
///
/// Titles are matched case-insensitively. Existing categories are reused;
/// an existing gallery with the wrong kind is switched to
/// [`CategoryKind::FactionGallery`]. Running the plan twice creates nothing
/// the second time.
pub fn plan_faction_seed(snapshot: &ContentSnapshot, now: Timestamp) -> SeedPlan {
    let mut plan = SeedPlan::default();

    let main_id = match snapshot
        .main_categories()
        .find(|c| same_title(&c.title, FACTIONS_MAIN_TITLE))
    {
        Some(main) => main.id,
        None => {
            let position =
                next_order_position(snapshot.main_categories().map(|c| c.order_position));
            let main = new_category(FACTIONS_MAIN_TITLE, FACTIONS_ICON, position, None, now);
            let id = main.id;
            plan.created.push(main);
            id
        }
    };

    let mut positions: Vec<i32> = snapshot
        .rulebooks_of(main_id)
        .map(|c| c.order_position)
        .collect();

    for (title, icon) in FACTION_GALLERIES {
        let existing = snapshot
            .rulebooks_of(main_id)
            .find(|c| same_title(&c.title, title));

        match existing {
            Some(gallery) if gallery.kind == CategoryKind::FactionGallery => {}
            Some(gallery) => plan.updated.push(Category {
                kind: CategoryKind::FactionGallery,
                updated_at: now,
                ..gallery.clone()
            }),
            None => {
                let position = next_order_position(positions.iter().copied());
                positions.push(position);
                let mut gallery = new_category(title, icon, position, Some(main_id), now);
                gallery.kind = CategoryKind::FactionGallery;
                plan.created.push(gallery);
            }
        }
    }

    plan
}

fn same_title(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn new_category(
    title: &str,
    icon: &str,
    order_position: i32,
    parent_id: Option<DbId>,
    now: Timestamp,
) -> Category {
    Category {
        id: DbId::new_v4(),
        title: title.to_string(),
        icon: icon.to_string(),
        order_position,
        parent_id,
        kind: CategoryKind::Standard,
        created_at: now,
        updated_at: now,
    }
}
