//! Listing filter validation and predicate construction.
//!
//! Query-string input is loosely typed; this module turns it into a typed
//! clause list the store adapters consume. The Postgres adapter renders the
//! clauses to SQL, the in-memory adapter evaluates them structurally — both
//! see the same predicate.

use serde::Deserialize;

use crate::common::{CoreError, PageArgs, ValidatedPage};
use crate::domains::properties::models::ListingKind;

/// Raw listing filters as received from the caller.
///
/// Unknown query keys are ignored by deserialization (forward-compatible).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilters {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub bhk_type: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PropertyFilters {
    /// Validate the filters into a store predicate plus pagination.
    ///
    /// Numeric values must parse as integers; a malformed value is rejected
    /// rather than silently widening the query. The `is_active` clause is
    /// appended unconditionally, last, and cannot be overridden by input.
    pub fn build(&self) -> Result<ListingQuery, CoreError> {
        let mut clauses = Vec::new();

        if let Some(kind) = &self.kind {
            let kind = ListingKind::parse(kind)
                .ok_or_else(|| CoreError::InvalidFilter(format!("unknown type '{}'", kind)))?;
            clauses.push(FilterClause::Equals {
                field: FilterField::Kind,
                value: kind.as_str().to_string(),
            });
        }
        for (field, value) in [
            (FilterField::State, &self.state),
            (FilterField::City, &self.city),
            (FilterField::Area, &self.area),
            (FilterField::BhkType, &self.bhk_type),
            (FilterField::PropertyType, &self.property_type),
        ] {
            if let Some(value) = value {
                clauses.push(FilterClause::Equals {
                    field,
                    value: value.clone(),
                });
            }
        }

        let min = self
            .min_price
            .as_deref()
            .map(|raw| parse_price("minPrice", raw))
            .transpose()?;
        let max = self
            .max_price
            .as_deref()
            .map(|raw| parse_price("maxPrice", raw))
            .transpose()?;
        if min.is_some() || max.is_some() {
            clauses.push(FilterClause::PriceRange { min, max });
        }

        // Non-overridable: inactive listings are never visible in search.
        clauses.push(FilterClause::Active);

        let page = PageArgs {
            page: self.page.clone(),
            limit: self.limit.clone(),
        }
        .validate()?;

        Ok(ListingQuery { clauses, page })
    }
}

fn parse_price(field: &str, raw: &str) -> Result<i64, CoreError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CoreError::InvalidFilter(format!("{} must be a number, got '{}'", field, raw)))
}

/// Fields a filter clause may constrain. Closed set; column names come from
/// here, never from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Kind,
    State,
    City,
    Area,
    BhkType,
    PropertyType,
}

impl FilterField {
    /// Column name in the properties table.
    pub fn column(&self) -> &'static str {
        match self {
            FilterField::Kind => "kind",
            FilterField::State => "state",
            FilterField::City => "city",
            FilterField::Area => "area",
            FilterField::BhkType => "bhk_type",
            FilterField::PropertyType => "property_type",
        }
    }
}

/// One validated constraint of a listing predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    Equals { field: FilterField, value: String },
    PriceRange { min: Option<i64>, max: Option<i64> },
    Active,
}

impl FilterClause {
    /// Structural evaluation against a record, used by the in-memory store.
    /// Must agree with the SQL rendering in the Postgres adapter.
    pub fn matches(&self, property: &super::models::Property) -> bool {
        match self {
            FilterClause::Equals { field, value } => {
                let actual: Option<&str> = match field {
                    FilterField::Kind => Some(property.kind.as_str()),
                    FilterField::State => Some(property.state.as_str()),
                    FilterField::City => Some(property.city.as_str()),
                    FilterField::Area => Some(property.area.as_str()),
                    FilterField::BhkType => property.bhk_type.as_deref(),
                    FilterField::PropertyType => Some(property.property_type.as_str()),
                };
                actual == Some(value.as_str())
            }
            FilterClause::PriceRange { min, max } => match property.price {
                Some(price) => {
                    min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
                }
                // A record without a price never matches a price bound.
                None => false,
            },
            FilterClause::Active => property.is_active,
        }
    }
}

/// A validated listing predicate plus pagination.
#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub clauses: Vec<FilterClause>,
    pub page: ValidatedPage,
}

impl ListingQuery {
    pub fn offset(&self) -> i64 {
        self.page.offset()
    }

    pub fn limit(&self) -> i64 {
        self.page.limit
    }
}
