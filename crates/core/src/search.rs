//! Free-text search across a content snapshot.
//!
//! Matching is a case-insensitive substring test with no tokenization and
//! no scoring. Results come out in a fixed scan order: main categories,
//! rulebooks, rules, factions, each in snapshot order.

use serde::Serialize;

use crate::content::ContentSnapshot;
use crate::highlight::{contains_ignore_case, find_ignore_case};
use crate::html::strip_html;
use crate::navigation::{route_for_category, Route};
use crate::types::DbId;

/// Characters of context kept on each side of the first content match.
pub const PREVIEW_CONTEXT_CHARS: usize = 50;

/// Characters kept when only the rule title matched.
pub const PREVIEW_FALLBACK_CHARS: usize = 150;

pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Category,
    Rulebook,
    Rule,
    Faction,
}

/// One search hit with everything needed to navigate to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub kind: ResultKind,
    pub id: DbId,
    pub title: String,
    pub route: Route,
    pub path: String,
    /// Main category the hit lives under (or, for factions, its gallery).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rulebook_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_url: Option<String>,
}

impl SearchResult {
    fn new(kind: ResultKind, id: DbId, title: &str, route: Route) -> Self {
        Self {
            kind,
            id,
            title: title.to_string(),
            path: route.path(),
            route,
            category_id: None,
            rulebook_id: None,
            preview: None,
            image_url: None,
            discord_url: None,
        }
    }
}

/// `true` if the query has no non-whitespace characters.
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Search titles, rule text and faction names for `query`.
///
/// A blank query yields no results. Rules whose category is not an existing
/// rulebook are skipped because there is no page to show them on.
pub fn search(query: &str, snapshot: &ContentSnapshot) -> Vec<SearchResult> {
    if is_blank_query(query) {
        return Vec::new();
    }

    let mut results = Vec::new();

    for category in snapshot.main_categories() {
        if contains_ignore_case(&category.title, query) {
            results.push(SearchResult::new(
                ResultKind::Category,
                category.id,
                &category.title,
                route_for_category(category),
            ));
        }
    }

    for book in snapshot.rulebooks() {
        if contains_ignore_case(&book.title, query) {
            let mut hit = SearchResult::new(
                ResultKind::Rulebook,
                book.id,
                &book.title,
                route_for_category(book),
            );
            hit.category_id = book.parent_id;
            results.push(hit);
        }
    }

    for rule in &snapshot.rules {
        let text = strip_html(&rule.content);
        if !contains_ignore_case(&rule.title, query) && !contains_ignore_case(&text, query) {
            continue;
        }
        let Some(book) = snapshot.rulebook(rule.category_id) else {
            continue;
        };
        let route = Route::Rulebook {
            id: book.id,
            highlight: Some(query.to_string()),
            rule: Some(rule.id),
        };
        let mut hit = SearchResult::new(ResultKind::Rule, rule.id, &rule.title, route);
        hit.rulebook_id = Some(book.id);
        hit.category_id = book.parent_id;
        hit.preview = Some(preview_of_text(&text, query));
        results.push(hit);
    }

    for faction in &snapshot.factions {
        if contains_ignore_case(&faction.name, query) {
            let mut hit = SearchResult::new(
                ResultKind::Faction,
                faction.id,
                &faction.name,
                Route::Factions {
                    id: faction.category_id,
                },
            );
            hit.category_id = Some(faction.category_id);
            hit.image_url = Some(faction.image_url.clone());
            hit.discord_url = Some(faction.discord_url.clone());
            results.push(hit);
        }
    }

    results
}

/// Preview of rule content around the first occurrence of `query`.
pub fn content_preview(content: &str, query: &str) -> String {
    preview_of_text(&strip_html(content), query)
}

fn preview_of_text(text: &str, query: &str) -> String {
    let Some((match_start, match_end)) = find_ignore_case(text, query) else {
        let head: String = text.chars().take(PREVIEW_FALLBACK_CHARS).collect();
        return format!("{head}{ELLIPSIS}");
    };

    let total = text.chars().count();
    let first = text[..match_start].chars().count();
    let last = first + text[match_start..match_end].chars().count();

    let start = first.saturating_sub(PREVIEW_CONTEXT_CHARS);
    let end = (last + PREVIEW_CONTEXT_CHARS).min(total);
    let window: String = text.chars().skip(start).take(end - start).collect();

    let lead = if start > 0 { ELLIPSIS } else { "" };
    let tail = if end < total { ELLIPSIS } else { "" };
    format!("{lead}{window}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentSnapshot;
    use crate::test_support::{category, faction, gallery, rule, rulebook};

    fn traffic_snapshot() -> (ContentSnapshot, DbId, DbId) {
        let main = category("Allgemein", 1);
        let book = rulebook(main.id, "Straßenregeln", 1);
        let filler = "x".repeat(80);
        let by_title = rule(book.id, "Verkehrsregeln", "<p>Fahre vorsichtig.</p>", 0);
        let by_content = rule(
            book.id,
            "Geschwindigkeit",
            &format!("<p>{filler} im Verkehr ist Vorsicht geboten.</p>"),
            1,
        );
        let ids = (by_title.id, by_content.id);
        let snapshot =
            ContentSnapshot::new(vec![main, book], vec![by_title, by_content], vec![]);
        (snapshot, ids.0, ids.1)
    }

    #[test]
    fn blank_query_returns_nothing() {
        let (snapshot, _, _) = traffic_snapshot();
        assert!(search("", &snapshot).is_empty());
        assert!(search("   \t", &snapshot).is_empty());
    }

    #[test]
    fn empty_snapshot_returns_nothing() {
        assert!(search("Verkehr", &ContentSnapshot::default()).is_empty());
    }

    #[test]
    fn verkehr_matches_title_and_content() {
        let (snapshot, title_hit, content_hit) = traffic_snapshot();
        let results = search("Verkehr", &snapshot);

        let ids: Vec<_> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![title_hit, content_hit]);

        let preview = results[1].preview.as_deref().unwrap();
        assert!(preview.starts_with(ELLIPSIS), "preview: {preview}");
        assert!(preview.contains("im Verkehr ist"));
        // 50 chars before + "Verkehr" + rest of the (short) tail.
        let body = preview.trim_start_matches(ELLIPSIS);
        assert_eq!(body.chars().take(50).filter(|c| *c == 'x').count(), 46);
    }

    #[test]
    fn every_result_contains_the_query() {
        let (mut snapshot, _, _) = traffic_snapshot();
        let gal = gallery(snapshot.categories[0].id, "Verkehrswacht", 2);
        snapshot.factions.push(faction(gal.id, "Verkehrspolizei", 1));
        snapshot.categories.push(gal);

        for query in ["verkehr", "VERKEHR", "regeln", "x"] {
            for hit in search(query, &snapshot) {
                let in_title = contains_ignore_case(&hit.title, query);
                let in_content = hit.kind == ResultKind::Rule
                    && snapshot
                        .rule(hit.id)
                        .is_some_and(|r| contains_ignore_case(&strip_html(&r.content), query));
                assert!(in_title || in_content, "{query:?} not in {hit:?}");
            }
        }
    }

    #[test]
    fn scan_order_is_categories_rulebooks_rules_factions() {
        let main = category("Fraktionen", 1);
        let gal = gallery(main.id, "Legale Fraktionen", 1);
        let f = faction(gal.id, "Fraktion Nord", 1);
        let r = rule(gal.id, "Fraktionsregel", "", 0);
        let snapshot = ContentSnapshot::new(vec![gal.clone(), main.clone()], vec![r], vec![f]);

        let kinds: Vec<_> = search("fraktion", &snapshot).iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ResultKind::Category,
                ResultKind::Rulebook,
                ResultKind::Rule,
                ResultKind::Faction
            ]
        );
    }

    #[test]
    fn rule_result_routes_to_rulebook_with_highlight() {
        let (snapshot, title_hit, _) = traffic_snapshot();
        let book_id = snapshot.categories[1].id;
        let hit = search("Verkehr", &snapshot)
            .into_iter()
            .find(|r| r.id == title_hit)
            .unwrap();

        assert_eq!(hit.rulebook_id, Some(book_id));
        assert_eq!(hit.category_id, Some(snapshot.categories[0].id));
        assert_eq!(
            hit.path,
            format!("/rulebook/{book_id}?highlight=Verkehr&rule={title_hit}")
        );
    }

    #[test]
    fn rule_without_rulebook_is_excluded() {
        let main = category("Allgemein", 1);
        let under_main = rule(main.id, "Verkehr A", "", 0);
        let dangling = rule(DbId::new_v4(), "Verkehr B", "", 1);
        let snapshot = ContentSnapshot::new(vec![main], vec![under_main, dangling], vec![]);

        assert!(search("verkehr", &snapshot).is_empty());
    }

    #[test]
    fn faction_result_routes_to_gallery() {
        let main = category("Fraktionen", 1);
        let gal = gallery(main.id, "Staatsfraktionen", 1);
        let f = faction(gal.id, "Polizei", 1);
        let snapshot = ContentSnapshot::new(vec![main, gal.clone()], vec![], vec![f.clone()]);

        let results = search("poli", &snapshot);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].route, Route::Factions { id: gal.id });
        assert_eq!(results[0].image_url.as_deref(), Some(f.image_url.as_str()));
    }

    #[test]
    fn preview_without_truncation_has_no_ellipsis() {
        assert_eq!(content_preview("<p>Kurzer Verkehr Text</p>", "verkehr"), "Kurzer Verkehr Text");
    }

    #[test]
    fn preview_truncates_both_sides() {
        let text = format!("{}Verkehr{}", "a".repeat(60), "b".repeat(60));
        let preview = content_preview(&text, "verkehr");
        assert_eq!(
            preview,
            format!("...{}Verkehr{}...", "a".repeat(50), "b".repeat(50))
        );
    }

    #[test]
    fn preview_falls_back_to_head_when_only_title_matched() {
        let text = "y".repeat(200);
        let preview = content_preview(&text, "verkehr");
        assert_eq!(preview, format!("{}...", "y".repeat(150)));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = format!("{}Verkehr", "ä".repeat(60));
        let preview = content_preview(&text, "verkehr");
        assert_eq!(preview, format!("...{}Verkehr", "ä".repeat(50)));
    }
}
