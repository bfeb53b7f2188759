use std::collections::HashMap;

use serde::Serialize;

pub const OFFSET_DEFAULT: u64 = 0;
pub const LIMIT_DEFAULT: u32 = 10;
pub const LIMIT_MIN: u32 = 1;
pub const LIMIT_MAX: u32 = 100;

/// Constraints applied to a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub category: Option<String>,
    /// Exclusive upper bound on the product price. Zero disables the bound.
    pub price_less_than: f64,
}

impl Filter {
    /// Builds a filter from raw query parameters. Anything unusable is
    /// dropped rather than rejected.
    pub fn from_query(values: &HashMap<String, String>) -> Filter {
        let mut filter = Filter::default();

        if let Some(category) = values.get("category") {
            if !category.is_empty() {
                filter.category = Some(category.clone());
            }
        }

        if let Some(price_less_than) = values.get("price_less_than") {
            if let Ok(price_less_than) = price_less_than.parse::<f64>() {
                if price_less_than >= 0.0 {
                    filter.price_less_than = price_less_than;
                }
            }
        }

        filter
    }

    pub fn price_bound(&self) -> Option<f64> {
        if self.price_less_than > 0.0 {
            Some(self.price_less_than)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u32,
    pub total: i32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            offset: OFFSET_DEFAULT,
            limit: LIMIT_DEFAULT,
            total: 0,
        }
    }
}

impl Pagination {
    /// Builds the requested window from raw query parameters.
    ///
    /// An unparsable `limit` falls back to the default while a parsable one
    /// outside `LIMIT_MIN..=LIMIT_MAX` is clamped to the nearest edge.
    pub fn from_query(values: &HashMap<String, String>) -> Pagination {
        let mut pagination = Pagination::default();

        if let Some(offset) = values.get("offset") {
            if let Ok(offset) = offset.parse::<i64>() {
                if offset >= 0 {
                    pagination.offset = offset as u64;
                }
            }
        }

        if let Some(limit) = values.get("limit") {
            if let Ok(limit) = limit.parse::<i64>() {
                pagination.limit = if limit < LIMIT_MIN as i64 {
                    LIMIT_MIN
                } else if limit > LIMIT_MAX as i64 {
                    LIMIT_MAX
                } else {
                    limit as u32
                };
            }
        }

        pagination
    }

    pub fn with_total(self, total: i32) -> Pagination {
        Pagination { total, ..self }
    }
}
