//! Navigation: routes, the two-level category tree and its expansion state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::content::{Category, CategoryKind, ContentSnapshot};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// A page of the public site or admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Route {
    Home,
    Category {
        id: DbId,
    },
    Rulebook {
        id: DbId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        highlight: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rule: Option<DbId>,
    },
    Factions {
        id: DbId,
    },
    Login,
    Admin,
}

impl Route {
    pub fn rulebook(id: DbId) -> Self {
        Route::Rulebook {
            id,
            highlight: None,
            rule: None,
        }
    }

    /// Render the route as a path with query string.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Category { id } => format!("/category/{id}"),
            Route::Rulebook {
                id,
                highlight,
                rule,
            } => {
                let mut params = Vec::new();
                if let Some(term) = highlight {
                    let term: String = form_urlencoded::byte_serialize(term.as_bytes()).collect();
                    params.push(format!("highlight={term}"));
                }
                if let Some(rule) = rule {
                    params.push(format!("rule={rule}"));
                }
                if params.is_empty() {
                    format!("/rulebook/{id}")
                } else {
                    format!("/rulebook/{id}?{}", params.join("&"))
                }
            }
            Route::Factions { id } => format!("/factions/{id}"),
            Route::Login => "/login".to_string(),
            Route::Admin => "/admin".to_string(),
        }
    }

    /// Parse a path produced by [`Route::path`] (or typed by a user).
    ///
    /// Returns `None` for unknown paths and malformed ids.
    pub fn parse(path: &str) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["admin", ..] => Some(Route::Admin),
            ["category", id] => id.parse().ok().map(|id| Route::Category { id }),
            ["factions", id] => id.parse().ok().map(|id| Route::Factions { id }),
            ["rulebook", id] => {
                let id = id.parse().ok()?;
                let mut highlight = None;
                let mut rule = None;
                let pairs = form_urlencoded::parse(query.unwrap_or_default().as_bytes());
                for (key, value) in pairs {
                    match key.as_ref() {
                        "highlight" if !value.is_empty() => highlight = Some(value.into_owned()),
                        "rule" => rule = value.parse().ok(),
                        _ => {}
                    }
                }
                Some(Route::Rulebook {
                    id,
                    highlight,
                    rule,
                })
            }
            _ => None,
        }
    }

    /// `true` if both routes show the same page, ignoring query parameters.
    pub fn same_page(&self, other: &Route) -> bool {
        match (self, other) {
            (Route::Rulebook { id: a, .. }, Route::Rulebook { id: b, .. }) => a == b,
            _ => self == other,
        }
    }
}

/// Where clicking a category in the navigation leads.
///
/// Faction galleries open the faction view; otherwise main categories open
/// the category view and rulebooks the rulebook view.
pub fn route_for_category(category: &Category) -> Route {
    match category.kind {
        CategoryKind::FactionGallery => Route::Factions { id: category.id },
        CategoryKind::Standard if category.is_main() => Route::Category { id: category.id },
        CategoryKind::Standard => Route::rulebook(category.id),
    }
}

// ---------------------------------------------------------------------------
// Expansion state
// ---------------------------------------------------------------------------

/// Which main categories are expanded in the sidebar. All start collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    expanded: BTreeSet<DbId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = DbId>,
    {
        Self {
            expanded: ids.into_iter().collect(),
        }
    }

    pub fn is_expanded(&self, id: DbId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn expand(&mut self, id: DbId) {
        self.expanded.insert(id);
    }

    pub fn collapse(&mut self, id: DbId) {
        self.expanded.remove(&id);
    }

    /// Flip one node. Returns the new state of that node.
    pub fn toggle(&mut self, id: DbId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = DbId> + '_ {
        self.expanded.iter().copied()
    }

    /// Expand the main category that contains the active rulebook.
    ///
    /// Returns `true` if a node was newly expanded.
    pub fn reveal(&mut self, active: &Route, snapshot: &ContentSnapshot) -> bool {
        let Route::Rulebook { id, .. } = active else {
            return false;
        };
        match snapshot.category(*id).and_then(|c| c.parent_id) {
            Some(parent_id) => self.expanded.insert(parent_id),
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavTree {
    pub nodes: Vec<MainNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainNode {
    pub id: DbId,
    pub title: String,
    pub icon: String,
    pub kind: CategoryKind,
    pub path: String,
    pub expanded: bool,
    pub active: bool,
    pub rulebooks: Vec<RulebookNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulebookNode {
    pub id: DbId,
    pub title: String,
    pub icon: String,
    pub kind: CategoryKind,
    pub path: String,
    pub active: bool,
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleEntry {
    pub id: DbId,
    pub title: String,
    pub order_position: i32,
}

/// Project the flat category list into main categories and their rulebooks.
///
/// Children are included for every node; `expanded` tells the view whether
/// to show them. Rulebooks whose parent no longer exists do not appear.
pub fn build_tree(
    snapshot: &ContentSnapshot,
    expansion: &ExpansionState,
    active: Option<&Route>,
) -> NavTree {
    let is_active = |route: &Route| active.is_some_and(|a| a.same_page(route));

    let nodes = snapshot
        .main_categories()
        .map(|main| {
            let route = route_for_category(main);
            let rulebooks = snapshot
                .rulebooks_of(main.id)
                .map(|book| {
                    let route = route_for_category(book);
                    RulebookNode {
                        id: book.id,
                        title: book.title.clone(),
                        icon: book.icon.clone(),
                        kind: book.kind,
                        path: route.path(),
                        active: is_active(&route),
                        rules: snapshot
                            .rules_of(book.id)
                            .map(|r| RuleEntry {
                                id: r.id,
                                title: r.title.clone(),
                                order_position: r.order_position,
                            })
                            .collect(),
                    }
                })
                .collect();

            MainNode {
                id: main.id,
                title: main.title.clone(),
                icon: main.icon.clone(),
                kind: main.kind,
                path: route.path(),
                expanded: expansion.is_expanded(main.id),
                active: is_active(&route),
                rulebooks,
            }
        })
        .collect();

    NavTree { nodes }
}
