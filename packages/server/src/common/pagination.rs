//! Page-number pagination types
//!
//! Listing queries paginate by page number and page size over a fixed
//! `created_at DESC` ordering. Raw values arrive as strings from the query
//! layer and are validated here before any store access.
//!
//! # Usage
//!
//! ```rust,ignore
//! let args = PageArgs { page: Some("2".into()), limit: Some("10".into()) };
//! let page = args.validate()?; // offset = 10, limit = 10
//!
//! let (items, total) = store.find_page(&query).await?;
//! let meta = Pagination::new(page.page, page.limit, total);
//! ```

use crate::common::errors::CoreError;

/// Default page size when the caller supplies none.
pub const DEFAULT_LIMIT: i64 = 20;

/// Raw pagination input as received from the query string.
#[derive(Debug, Clone, Default)]
pub struct PageArgs {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageArgs {
    /// Validate pagination arguments.
    ///
    /// Missing values fall back to page 1 / limit 20. A page below 1 is
    /// clamped to 1. Non-numeric input is rejected rather than silently
    /// producing an unconstrained query.
    pub fn validate(&self) -> Result<ValidatedPage, CoreError> {
        let page = match &self.page {
            Some(raw) => parse_numeric("page", raw)?.max(1),
            None => 1,
        };
        let limit = match &self.limit {
            Some(raw) => parse_numeric("limit", raw)?.max(1),
            None => DEFAULT_LIMIT,
        };

        Ok(ValidatedPage { page, limit })
    }
}

fn parse_numeric(field: &str, raw: &str) -> Result<i64, CoreError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CoreError::InvalidFilter(format!("{} must be a number, got '{}'", field, raw)))
}

/// Validated pagination arguments.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedPage {
    /// 1-based page number.
    pub page: i64,
    /// Page size.
    pub limit: i64,
}

impl ValidatedPage {
    /// Number of records to skip before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    /// Build metadata from a validated page and the predicate's total count.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        // ceil(total / limit); limit is validated >= 1
        let pages = (total + limit - 1) / limit;
        Pagination {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let validated = PageArgs::default().validate().unwrap();
        assert_eq!(validated.page, 1);
        assert_eq!(validated.limit, 20);
        assert_eq!(validated.offset(), 0);
    }

    #[test]
    fn test_offset_computation() {
        let args = PageArgs {
            page: Some("2".to_string()),
            limit: Some("10".to_string()),
        };
        let validated = args.validate().unwrap();
        assert_eq!(validated.offset(), 10);
        assert_eq!(validated.limit, 10);
    }

    #[test]
    fn test_page_clamped_to_one() {
        for raw in ["0", "-3"] {
            let args = PageArgs {
                page: Some(raw.to_string()),
                limit: None,
            };
            let validated = args.validate().unwrap();
            assert_eq!(validated.page, 1);
            assert_eq!(validated.offset(), 0);
        }
    }

    #[test]
    fn test_non_numeric_page_rejected() {
        let args = PageArgs {
            page: Some("first".to_string()),
            limit: None,
        };
        assert!(matches!(
            args.validate(),
            Err(CoreError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_pages_is_ceiling() {
        assert_eq!(Pagination::new(1, 20, 0).pages, 0);
        assert_eq!(Pagination::new(1, 20, 20).pages, 1);
        assert_eq!(Pagination::new(1, 20, 21).pages, 2);
        assert_eq!(Pagination::new(1, 10, 95).pages, 10);
    }
}
