//! Page models for the category, rulebook and faction gallery views.
//!
//! Each function resolves its target from a URL key and returns `None` if
//! the target does not exist, in which case nothing is rendered.

use serde::Serialize;

use crate::content::{Category, ContentSnapshot, Faction};
use crate::highlight::mark_html;
use crate::navigation::{route_for_category, Route};
use crate::search::is_blank_query;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub id: DbId,
    pub title: String,
    pub icon: String,
    pub route: Route,
    pub path: String,
}

impl Link {
    fn to(category: &Category) -> Self {
        let route = route_for_category(category);
        Self {
            id: category.id,
            title: category.title.clone(),
            icon: category.icon.clone(),
            path: route.path(),
            route,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub category: Category,
    pub rulebooks: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleView {
    pub id: DbId,
    pub title: String,
    /// Rule HTML with `<mark>` around highlight occurrences.
    pub content_html: String,
    pub order_position: i32,
    /// The rule the visitor came for; opened and scrolled to.
    pub auto_expand: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulebookView {
    pub rulebook: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    pub rules: Vec<RuleView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactionView {
    pub category: Category,
    pub factions: Vec<Faction>,
}

/// A category page: the category and the rulebooks nested under it.
pub fn category_view(snapshot: &ContentSnapshot, key: &str) -> Option<CategoryView> {
    let category = snapshot.find_category_by_key(key)?;
    Some(CategoryView {
        category: category.clone(),
        rulebooks: snapshot.rulebooks_of(category.id).map(Link::to).collect(),
    })
}

/// A rulebook page.
///
/// `highlight` marks every occurrence in the rule bodies; `rule` selects
/// the rule to expand. The key may name any category, matching how older
/// links addressed rulebooks by title.
pub fn rulebook_view(
    snapshot: &ContentSnapshot,
    key: &str,
    highlight: Option<&str>,
    rule: Option<DbId>,
) -> Option<RulebookView> {
    let rulebook = snapshot.find_category_by_key(key)?;
    let highlight = highlight.filter(|h| !is_blank_query(h));

    let rules = snapshot
        .rules_of(rulebook.id)
        .map(|r| RuleView {
            id: r.id,
            title: r.title.clone(),
            content_html: match highlight {
                Some(term) => mark_html(&r.content, term),
                None => r.content.clone(),
            },
            order_position: r.order_position,
            auto_expand: rule == Some(r.id),
        })
        .collect();

    Some(RulebookView {
        rulebook: rulebook.clone(),
        parent: rulebook
            .parent_id
            .and_then(|id| snapshot.category(id))
            .map(Link::to),
        highlight: highlight.map(str::to_string),
        rules,
    })
}

/// A faction gallery page.
pub fn faction_view(snapshot: &ContentSnapshot, id: DbId) -> Option<FactionView> {
    let category = snapshot.category(id)?;
    Some(FactionView {
        category: category.clone(),
        factions: snapshot.factions_of(id).cloned().collect(),
    })
}
