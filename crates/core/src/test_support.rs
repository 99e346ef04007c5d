//! Fixture builders shared by the unit tests of this crate.

use chrono::Utc;

use crate::content::{Category, CategoryKind, Faction, Rule};
use crate::types::DbId;

pub fn category(title: &str, order_position: i32) -> Category {
    let now = Utc::now();
    Category {
        id: DbId::new_v4(),
        title: title.to_string(),
        icon: "book".to_string(),
        order_position,
        parent_id: None,
        kind: CategoryKind::Standard,
        created_at: now,
        updated_at: now,
    }
}

pub fn rulebook(parent_id: DbId, title: &str, order_position: i32) -> Category {
    Category {
        parent_id: Some(parent_id),
        ..category(title, order_position)
    }
}

pub fn gallery(parent_id: DbId, title: &str, order_position: i32) -> Category {
    Category {
        kind: CategoryKind::FactionGallery,
        ..rulebook(parent_id, title, order_position)
    }
}

pub fn rule(category_id: DbId, title: &str, content: &str, order_position: i32) -> Rule {
    let now = Utc::now();
    Rule {
        id: DbId::new_v4(),
        category_id,
        title: title.to_string(),
        content: content.to_string(),
        order_position,
        created_at: now,
        updated_at: now,
    }
}

pub fn faction(category_id: DbId, name: &str, order_position: i32) -> Faction {
    let now = Utc::now();
    Faction {
        id: DbId::new_v4(),
        category_id,
        name: name.to_string(),
        image_url: "https://img.example/logo.png".to_string(),
        discord_url: "https://discord.gg/example".to_string(),
        order_position,
        created_at: now,
        updated_at: now,
    }
}
