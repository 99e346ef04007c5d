//! Content model: categories, rulebooks, rules and factions.
//!
//! Categories form a forest of depth at most two. A category without a
//! parent is a *main category*; a category with a parent is a *rulebook*
//! and must sit directly under a main category. Rules belong to rulebooks
//! and factions belong to faction-gallery categories, both by
//! `category_id` only (there is no foreign key, see [`crate::integrity`]).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length (in characters) of a category title, rule title or faction name.
pub const MAX_TITLE_LEN: usize = 200;

/// Icon names are kebab-case identifiers from the front end's icon set.
static ICON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid icon regex"));

pub const MAX_ICON_LEN: usize = 50;

/// Icon given to categories created without one.
pub const DEFAULT_ICON: &str = "book";

// ---------------------------------------------------------------------------
// Category kind
// ---------------------------------------------------------------------------

pub const KIND_STANDARD: &str = "standard";
pub const KIND_FACTION_GALLERY: &str = "faction_gallery";

/// How a category is presented when navigated to.
///
/// `FactionGallery` categories open the faction gallery view instead of the
/// generic category/rulebook view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    #[default]
    Standard,
    FactionGallery,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Standard => KIND_STANDARD,
            CategoryKind::FactionGallery => KIND_FACTION_GALLERY,
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            KIND_STANDARD => Ok(CategoryKind::Standard),
            KIND_FACTION_GALLERY => Ok(CategoryKind::FactionGallery),
            other => Err(CoreError::Validation(format!(
                "Invalid category kind '{other}'. Valid kinds: {KIND_STANDARD}, {KIND_FACTION_GALLERY}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub title: String,
    /// Icon name understood by the front end's icon set.
    pub icon: String,
    pub order_position: i32,
    pub parent_id: Option<DbId>,
    pub kind: CategoryKind,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    pub fn is_main(&self) -> bool {
        is_main_category(self)
    }

    pub fn is_rulebook(&self) -> bool {
        is_subcategory(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    /// Rich text as HTML markup.
    pub content: String,
    pub order_position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub image_url: String,
    pub discord_url: String,
    pub order_position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// `true` for top-level navigation nodes (no parent).
pub fn is_main_category(category: &Category) -> bool {
    category.parent_id.is_none()
}

/// `true` for rulebooks (categories nested under a main category).
pub fn is_subcategory(category: &Category) -> bool {
    !is_main_category(category)
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Full in-memory copy of the three collections.
///
/// Each collection is expected in display order (`order_position`
/// ascending), which is how the repositories return them. Every lookup
/// preserves that order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentSnapshot {
    pub categories: Vec<Category>,
    pub rules: Vec<Rule>,
    pub factions: Vec<Faction>,
}

impl ContentSnapshot {
    pub fn new(categories: Vec<Category>, rules: Vec<Rule>, factions: Vec<Faction>) -> Self {
        Self {
            categories,
            rules,
            factions,
        }
    }

    pub fn category(&self, id: DbId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a category by id, returning it only if it is a rulebook.
    pub fn rulebook(&self, id: DbId) -> Option<&Category> {
        self.category(id).filter(|c| c.is_rulebook())
    }

    pub fn rule(&self, id: DbId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn faction(&self, id: DbId) -> Option<&Faction> {
        self.factions.iter().find(|f| f.id == id)
    }

    pub fn main_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_main())
    }

    /// All rulebooks regardless of parent.
    pub fn rulebooks(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_rulebook())
    }

    pub fn rulebooks_of(&self, parent_id: DbId) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |c| c.parent_id == Some(parent_id))
    }

    pub fn rules_of(&self, category_id: DbId) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(move |r| r.category_id == category_id)
    }

    pub fn factions_of(&self, category_id: DbId) -> impl Iterator<Item = &Faction> {
        self.factions
            .iter()
            .filter(move |f| f.category_id == category_id)
    }

    /// Resolve a category from a URL key.
    ///
    /// The key is tried as a UUID first, then as a title compared
    /// case-insensitively (older links used the title).
    pub fn find_category_by_key(&self, key: &str) -> Option<&Category> {
        if let Ok(id) = key.parse::<DbId>() {
            if let Some(found) = self.category(id) {
                return Some(found);
            }
        }
        let wanted = key.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.title.to_lowercase() == wanted)
    }
}

// ---------------------------------------------------------------------------
// Ordering helpers
// ---------------------------------------------------------------------------

/// Position for an item appended to a sibling group.
///
/// One past the largest existing position, never below `1`.
pub fn next_order_position<I>(positions: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    positions.into_iter().max().unwrap_or(0).max(0) + 1
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a title or name: non-empty after trimming, at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_icon(icon: &str) -> Result<(), CoreError> {
    if icon.len() > MAX_ICON_LEN || !ICON_RE.is_match(icon) {
        return Err(CoreError::Validation(format!(
            "Invalid icon '{icon}'. Icons are lowercase names like 'book' or 'shield-check'"
        )));
    }
    Ok(())
}

/// Validate that rule content is present.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if crate::html::strip_html(content).trim().is_empty() {
        return Err(CoreError::Validation("Content is required".into()));
    }
    Ok(())
}

/// Validate an external link (faction image or Discord invite).
pub fn validate_url(field: &str, value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if !(value.starts_with("https://") || value.starts_with("http://")) {
        return Err(CoreError::Validation(format!(
            "{field} must be an http(s) URL"
        )));
    }
    Ok(())
}

/// Validate the parent of a category being created or moved.
///
/// `category_id` is `None` for a category that does not exist yet. A parent
/// must exist, must itself be a main category, and cannot be the category
/// itself. A category that already has rulebooks cannot become a rulebook,
/// since that would nest three levels deep.
pub fn validate_category_parent(
    snapshot: &ContentSnapshot,
    category_id: Option<DbId>,
    parent_id: Option<DbId>,
) -> Result<(), CoreError> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };

    if category_id == Some(parent_id) {
        return Err(CoreError::Validation(
            "A category cannot be its own parent".into(),
        ));
    }

    let parent = snapshot.category(parent_id).ok_or(CoreError::NotFound {
        entity: "Category",
        id: parent_id,
    })?;

    if parent.is_rulebook() {
        return Err(CoreError::Validation(
            "Rulebooks can only be nested under a main category".into(),
        ));
    }

    if let Some(id) = category_id {
        if snapshot.rulebooks_of(id).next().is_some() {
            return Err(CoreError::Validation(
                "A category with rulebooks cannot become a rulebook".into(),
            ));
        }
    }

    Ok(())
}

/// Validate that a rule points at an existing rulebook.
pub fn validate_rule_target(snapshot: &ContentSnapshot, category_id: DbId) -> Result<(), CoreError> {
    let category = snapshot.category(category_id).ok_or(CoreError::NotFound {
        entity: "Category",
        id: category_id,
    })?;
    if !category.is_rulebook() {
        return Err(CoreError::Validation(
            "Rules must belong to a rulebook, not a main category".into(),
        ));
    }
    Ok(())
}

/// Validate that a faction points at an existing category.
pub fn validate_faction_target(
    snapshot: &ContentSnapshot,
    category_id: DbId,
) -> Result<(), CoreError> {
    snapshot.category(category_id).ok_or(CoreError::NotFound {
        entity: "Category",
        id: category_id,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::test_support::{category, rule, rulebook};

    #[test]
    fn main_and_subcategory_are_complementary() {
        let main = category("Allgemein", 1);
        let book = rulebook(main.id, "Verkehr", 1);
        for c in [&main, &book] {
            assert_eq!(is_main_category(c), !is_subcategory(c));
        }
        assert!(main.is_main());
        assert!(book.is_rulebook());
    }

    #[test]
    fn kind_round_trips_through_str() {
        assert_eq!(
            "faction_gallery".parse::<CategoryKind>().unwrap(),
            CategoryKind::FactionGallery
        );
        assert_eq!(CategoryKind::Standard.to_string(), "standard");
        assert_matches!("gallery".parse::<CategoryKind>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn snapshot_lookups_preserve_order() {
        let main = category("Allgemein", 1);
        let a = rulebook(main.id, "A", 2);
        let b = rulebook(main.id, "B", 1);
        let snapshot = ContentSnapshot::new(vec![main.clone(), a.clone(), b.clone()], vec![], vec![]);

        let titles: Vec<_> = snapshot.rulebooks_of(main.id).map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert!(snapshot.rulebook(main.id).is_none());
        assert_eq!(snapshot.rulebook(a.id).map(|c| c.id), Some(a.id));
    }

    #[test]
    fn find_by_key_accepts_id_or_title() {
        let main = category("Allgemein", 1);
        let snapshot = ContentSnapshot::new(vec![main.clone()], vec![], vec![]);

        assert_eq!(snapshot.find_category_by_key(&main.id.to_string()).map(|c| c.id), Some(main.id));
        assert_eq!(snapshot.find_category_by_key("ALLGEMEIN").map(|c| c.id), Some(main.id));
        assert!(snapshot.find_category_by_key("missing").is_none());
    }

    #[test]
    fn next_position_starts_at_one() {
        assert_eq!(next_order_position(Vec::<i32>::new()), 1);
        assert_eq!(next_order_position([3, 7, 2]), 8);
        assert_eq!(next_order_position([-4]), 1);
    }

    #[test]
    fn title_validation() {
        assert!(validate_title("Title", "Verkehr").is_ok());
        assert_matches!(validate_title("Title", "   "), Err(CoreError::Validation(_)));
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert_matches!(validate_title("Title", &long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn icon_validation() {
        assert!(validate_icon("book").is_ok());
        assert!(validate_icon("shield-check").is_ok());
        assert_matches!(validate_icon(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_icon("Book"), Err(CoreError::Validation(_)));
        assert_matches!(validate_icon("<svg>"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn content_must_have_text() {
        assert!(validate_content("<p>Text</p>").is_ok());
        assert_matches!(validate_content("<p></p>"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn url_validation() {
        assert!(validate_url("Discord URL", "https://discord.gg/abc").is_ok());
        assert_matches!(validate_url("Discord URL", "discord.gg/abc"), Err(CoreError::Validation(_)));
        assert_matches!(validate_url("Discord URL", ""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rulebooks_nest_only_one_level() {
        let main = category("Allgemein", 1);
        let book = rulebook(main.id, "Verkehr", 1);
        let other_main = category("Sonstiges", 2);
        let snapshot =
            ContentSnapshot::new(vec![main.clone(), book.clone(), other_main.clone()], vec![], vec![]);

        assert!(validate_category_parent(&snapshot, None, None).is_ok());
        assert!(validate_category_parent(&snapshot, None, Some(main.id)).is_ok());
        assert_matches!(
            validate_category_parent(&snapshot, None, Some(book.id)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_category_parent(&snapshot, Some(main.id), Some(main.id)),
            Err(CoreError::Validation(_))
        );
        // `main` has a rulebook, so it cannot be moved under `other_main`.
        assert_matches!(
            validate_category_parent(&snapshot, Some(main.id), Some(other_main.id)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_category_parent(&snapshot, None, Some(DbId::new_v4())),
            Err(CoreError::NotFound { entity: "Category", .. })
        );
    }

    #[test]
    fn rules_target_rulebooks() {
        let main = category("Allgemein", 1);
        let book = rulebook(main.id, "Verkehr", 1);
        let snapshot = ContentSnapshot::new(
            vec![main.clone(), book.clone()],
            vec![rule(book.id, "Tempo", "<p>50</p>", 0)],
            vec![],
        );

        assert!(validate_rule_target(&snapshot, book.id).is_ok());
        assert_matches!(validate_rule_target(&snapshot, main.id), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_rule_target(&snapshot, DbId::new_v4()),
            Err(CoreError::NotFound { .. })
        );
        assert!(validate_faction_target(&snapshot, main.id).is_ok());
    }
}
