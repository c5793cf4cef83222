//! List processing pipeline: filter, sort, paginate
//!
//! Every admin list (tours, enquiries, posts, destinations, ...) runs the
//! same three stages over a fully fetched collection:
//!
//! ```text
//! items ──▶ Filters::apply ──▶ SortSpec::apply ──▶ Paginator::slice ──▶ page
//! ```
//!
//! The stages only know about entities through the [`Listable`] accessors,
//! so one implementation serves every resource. The server runs the same
//! code for list endpoints that receive query parameters.

use crate::core::field::FieldValue;
use crate::core::query::PaginationMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field accessors an entity exposes to the list pipeline
pub trait Listable {
    /// Text fields scanned by the free-text search
    fn search_fields(&self) -> Vec<&str>;

    /// Exact text value of a field used by categorical filters
    ///
    /// Returns `None` when the entity has no such field; such an entity
    /// never matches a filter on that field.
    fn filter_value(&self, field: &str) -> Option<String>;

    /// Comparison key of a field used by the sort stage
    fn sort_key(&self, field: &str) -> Option<FieldValue>;
}

impl<T: Listable + ?Sized> Listable for &T {
    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }

    fn filter_value(&self, field: &str) -> Option<String> {
        (**self).filter_value(field)
    }

    fn sort_key(&self, field: &str) -> Option<FieldValue> {
        (**self).sort_key(field)
    }
}

// =============================================================================
// Filter stage
// =============================================================================

/// Search term plus exact-match filters, combined with logical AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    search: String,
    equals: BTreeMap<String, String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Filters::set_search`]
    pub fn with_search(mut self, term: &str) -> Self {
        self.set_search(term);
        self
    }

    /// Builder form of [`Filters::set_equals`]
    pub fn with_equals(mut self, field: &str, value: &str) -> Self {
        self.set_equals(field, value);
        self
    }

    /// Replace the search term, returning whether it changed
    pub fn set_search(&mut self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term == self.search {
            return false;
        }
        self.search = term;
        true
    }

    /// Set an exact-match filter; an empty value removes it
    ///
    /// Returns whether the filter set changed.
    pub fn set_equals(&mut self, field: &str, value: &str) -> bool {
        if value.is_empty() {
            return self.equals.remove(field).is_some();
        }
        self.equals.insert(field.to_string(), value.to_string()) != Some(value.to_string())
    }

    /// Drop the search term and every filter
    pub fn clear(&mut self) {
        self.search.clear();
        self.equals.clear();
    }

    /// Current (lowercased) search term
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current value of an exact-match filter
    pub fn equals(&self, field: &str) -> Option<&str> {
        self.equals.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.equals.is_empty()
    }

    /// Whether one entity passes every filter
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        if !self.search.is_empty() {
            let hit = item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.search));
            if !hit {
                return false;
            }
        }

        self.equals
            .iter()
            .all(|(field, expected)| item.filter_value(field).as_deref() == Some(expected))
    }

    /// Keep matching entities, preserving input order
    pub fn apply<'a, T: Listable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

// =============================================================================
// Sort stage
// =============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A single sort field and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn descending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `field`, `field:asc` or `field:desc`
    pub fn parse(expr: &str) -> Option<Self> {
        let (field, direction) = match expr.split_once(':') {
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some(_) => return None,
            None => (expr, SortDirection::Asc),
        };

        let field = field.trim();
        if field.is_empty() {
            return None;
        }

        Some(Self {
            field: field.to_string(),
            direction,
        })
    }

    /// Column-header click semantics
    ///
    /// Selecting the current field flips the direction; selecting another
    /// field starts ascending.
    pub fn toggle(current: Option<&SortSpec>, field: &str) -> SortSpec {
        match current {
            Some(spec) if spec.field == field => SortSpec {
                field: spec.field.clone(),
                direction: spec.direction.toggled(),
            },
            _ => SortSpec::ascending(field),
        }
    }

    /// Stable in-place sort; ties keep input order in both directions
    pub fn apply<T: Listable>(&self, items: &mut [T]) {
        items.sort_by(|a, b| {
            let ka = a.sort_key(&self.field).unwrap_or(FieldValue::Null);
            let kb = b.sort_key(&self.field).unwrap_or(FieldValue::Null);
            match self.direction {
                SortDirection::Asc => ka.compare(&kb),
                SortDirection::Desc => kb.compare(&ka),
            }
        });
    }
}

impl std::fmt::Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.field, direction)
    }
}

/// Run the filter and sort stages over a collection
pub fn process<'a, T: Listable>(
    items: &'a [T],
    filters: &Filters,
    sort: Option<&SortSpec>,
) -> Vec<&'a T> {
    let mut selected = filters.apply(items);
    if let Some(sort) = sort {
        sort.apply(&mut selected);
    }
    selected
}

// =============================================================================
// Paginator
// =============================================================================

/// Fixed-size, 1-based page window over a processed list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    items_per_page: usize,
}

impl Paginator {
    pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.items_per_page)
    }

    /// Items of the current page; empty past the last page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.items_per_page);
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.items_per_page).min(items.len());
        &items[start..end]
    }

    pub fn can_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self, len: usize) -> bool {
        self.current_page < self.total_pages(len)
    }

    /// Step back one page unless already on the first
    pub fn previous(&mut self) -> bool {
        if !self.can_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Step forward one page unless already on the last
    pub fn next(&mut self, len: usize) -> bool {
        if !self.can_next(len) {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Jump to a page; not clamped against the list length
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn meta(&self, len: usize) -> PaginationMeta {
        PaginationMeta::new(self.current_page, self.items_per_page, len)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITEMS_PER_PAGE)
    }
}

// =============================================================================
// ListView
// =============================================================================

/// A fetched collection plus the filter/sort/page state of one list screen
///
/// Changing the search term or any filter sends the view back to page 1.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    filters: Filters,
    sort: Option<SortSpec>,
    paginator: Paginator,
}

impl<T: Listable> ListView<T> {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            filters: Filters::new(),
            sort: None,
            paginator: Paginator::new(items_per_page),
        }
    }

    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Replace the collection after a (re)fetch; page and filters are kept
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn set_search(&mut self, term: &str) {
        self.filters.set_search(term);
        self.paginator.reset();
    }

    pub fn set_filter(&mut self, field: &str, value: &str) {
        self.filters.set_equals(field, value);
        self.paginator.reset();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.paginator.reset();
    }

    /// Column-header click: toggle direction or switch field
    pub fn sort_by(&mut self, field: &str) {
        self.sort = Some(SortSpec::toggle(self.sort.as_ref(), field));
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Filtered and sorted items, all pages
    pub fn processed(&self) -> Vec<&T> {
        process(&self.items, &self.filters, self.sort.as_ref())
    }

    /// Items on the current page
    pub fn visible(&self) -> Vec<&T> {
        let processed = self.processed();
        self.paginator.slice(&processed).to_vec()
    }

    pub fn meta(&self) -> PaginationMeta {
        self.paginator.meta(self.processed().len())
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.processed().len();
        self.paginator.next(len)
    }

    pub fn previous_page(&mut self) -> bool {
        self.paginator.previous()
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to(page);
    }
}

impl<T: Listable> Default for ListView<T> {
    fn default() -> Self {
        Self::new(Paginator::DEFAULT_ITEMS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        group: String,
        score: f64,
    }

    impl Listable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name]
        }

        fn filter_value(&self, field: &str) -> Option<String> {
            match field {
                "group" => Some(self.group.clone()),
                _ => None,
            }
        }

        fn sort_key(&self, field: &str) -> Option<FieldValue> {
            match field {
                "name" => Some(FieldValue::text(&self.name)),
                "score" => Some(FieldValue::number(self.score)),
                _ => None,
            }
        }
    }

    fn row(name: &str, group: &str, score: f64) -> Row {
        Row {
            name: name.to_string(),
            group: group.to_string(),
            score,
        }
    }

    fn names<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<&'a str> {
        rows.into_iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_empty_filters_are_noop() {
        let rows = vec![row("b", "x", 1.0), row("a", "y", 2.0)];
        let filters = Filters::new().with_search("").with_equals("group", "");
        assert!(filters.is_empty());
        assert_eq!(names(filters.apply(&rows)), vec!["b", "a"]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let rows = vec![
            row("Alpha", "x", 1.0),
            row("Alphabet", "y", 2.0),
            row("Beta", "x", 3.0),
        ];
        let filters = Filters::new().with_search("ALPHA").with_equals("group", "x");
        assert_eq!(names(filters.apply(&rows)), vec!["Alpha"]);
    }

    #[test]
    fn test_equality_filter_is_case_sensitive() {
        let rows = vec![row("a", "Listed", 1.0)];
        let filters = Filters::new().with_equals("group", "listed");
        assert!(filters.apply(&rows).is_empty());
    }

    #[test]
    fn test_unknown_filter_field_matches_nothing() {
        let rows = vec![row("a", "x", 1.0)];
        let filters = Filters::new().with_equals("missing", "x");
        assert!(filters.apply(&rows).is_empty());
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(SortSpec::parse("price"), Some(SortSpec::ascending("price")));
        assert_eq!(
            SortSpec::parse("price:desc"),
            Some(SortSpec::descending("price"))
        );
        assert_eq!(SortSpec::parse("price:sideways"), None);
        assert_eq!(SortSpec::parse(":asc"), None);
        assert_eq!(SortSpec::descending("price").to_string(), "price:desc");
    }

    #[test]
    fn test_toggle_semantics() {
        let first = SortSpec::toggle(None, "score");
        assert_eq!(first, SortSpec::ascending("score"));
        let second = SortSpec::toggle(Some(&first), "score");
        assert_eq!(second, SortSpec::descending("score"));
        let other = SortSpec::toggle(Some(&second), "name");
        assert_eq!(other, SortSpec::ascending("name"));
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let rows = vec![row("a", "x", 1.0), row("b", "x", 1.0), row("c", "x", 0.0)];
        let mut asc: Vec<&Row> = rows.iter().collect();
        SortSpec::ascending("score").apply(&mut asc);
        assert_eq!(names(asc), vec!["c", "a", "b"]);

        let mut desc: Vec<&Row> = rows.iter().collect();
        SortSpec::descending("score").apply(&mut desc);
        assert_eq!(names(desc), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let rows = vec![row("b", "x", 1.0), row("a", "x", 2.0)];
        let mut sorted: Vec<&Row> = rows.iter().collect();
        SortSpec::ascending("nope").apply(&mut sorted);
        assert_eq!(names(sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_paginator_bounds() {
        let mut paginator = Paginator::new(10);
        assert_eq!(paginator.total_pages(0), 0);
        assert!(!paginator.can_next(0));
        assert!(!paginator.previous());

        assert!(paginator.next(11));
        assert_eq!(paginator.current_page(), 2);
        assert!(!paginator.next(11));
        assert_eq!(paginator.current_page(), 2);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        let mut paginator = Paginator::new(10);
        paginator.go_to(4);
        assert!(paginator.slice(&items).is_empty());
        assert_eq!(paginator.current_page(), 4);
    }

    #[test]
    fn test_list_view_filter_resets_page() {
        let rows: Vec<Row> = (0..30).map(|i| row(&format!("r{}", i), "x", i as f64)).collect();
        let mut view = ListView::new(10).with_items(rows);
        assert!(view.next_page());
        assert_eq!(view.paginator().current_page(), 2);

        view.set_filter("group", "x");
        assert_eq!(view.paginator().current_page(), 1);
    }

    #[test]
    fn test_list_view_visible_applies_all_stages() {
        let rows = vec![
            row("Gamma", "x", 3.0),
            row("Alpha", "x", 1.0),
            row("Beta", "y", 2.0),
            row("Delta", "x", 4.0),
        ];
        let mut view = ListView::new(2).with_items(rows);
        view.set_filter("group", "x");
        view.sort_by("score");
        assert_eq!(names(view.visible()), vec!["Alpha", "Gamma"]);
        assert!(view.next_page());
        assert_eq!(names(view.visible()), vec!["Delta"]);
        assert!(!view.meta().has_next);
    }
}
