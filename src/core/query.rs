//! Query parameters and pagination metadata

use crate::core::error::RequestError;
use crate::core::listing::{Filters, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameters accepted by list endpoints
///
/// # Example
/// ```text
/// GET /api/tours?search=kailash
/// GET /api/tours?destination=Tibet&sort=price:desc
/// GET /api/admin/tours?status=unlisted&page=2&limit=10
/// ```
///
/// Without `page` the endpoint answers with the whole (filtered, sorted)
/// array. With `page` it answers with a [`PaginatedResponse`].
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Page number (starts at 1), only present when the caller asked for a page
    pub page: Option<usize>,

    /// Number of items per page
    pub limit: Option<usize>,

    /// Free-text search term
    pub search: Option<String>,

    /// Sort expression: `field`, `field:asc` or `field:desc`
    pub sort: Option<String>,

    /// Exact-match filters (`field=value`)
    pub filters: BTreeMap<String, String>,
}

impl QueryParams {
    /// Build from the raw query string pairs
    ///
    /// `page`, `limit`, `search` (alias `q`) and `sort` have a fixed meaning;
    /// every other key becomes an equality filter.
    pub fn from_map(raw: BTreeMap<String, String>) -> Result<Self, RequestError> {
        let mut params = QueryParams::default();

        for (key, value) in raw {
            match key.as_str() {
                "page" => params.page = Some(parse_positive("page", &value)?),
                "limit" => params.limit = Some(parse_positive("limit", &value)?),
                "search" | "q" => params.search = Some(value),
                "sort" => params.sort = Some(value),
                _ => {
                    params.filters.insert(key, value);
                }
            }
        }

        Ok(params)
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Get limit, clamped to `1..=max`
    pub fn limit(&self, default: usize, max: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, max.max(1))
    }

    /// Whether the caller asked for a paginated response
    pub fn is_paginated(&self) -> bool {
        self.page.is_some()
    }

    /// Filter stage built from `search` and the equality filters
    pub fn to_filters(&self) -> Filters {
        let mut filters = Filters::new();
        if let Some(term) = &self.search {
            filters.set_search(term);
        }
        for (field, value) in &self.filters {
            filters.set_equals(field, value);
        }
        filters
    }

    /// Sort stage built from `sort`, if it parses
    pub fn to_sort(&self) -> Option<SortSpec> {
        self.sort.as_deref().and_then(SortSpec::parse)
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize, RequestError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| RequestError::InvalidBody {
            message: format!("query parameter '{}' must be a positive integer", key),
        })
}

/// Paginated response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata, also used to drive previous/next controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = total.div_ceil(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}
