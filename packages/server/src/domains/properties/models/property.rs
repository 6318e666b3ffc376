use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domains::properties::queries::{FilterClause, FilterField, ListingQuery};

/// Transaction kind of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "listing_kind", rename_all = "kebab-case")]
pub enum ListingKind {
    BuyHouse,
    SellHouse,
    BuyPlot,
    SellLand,
}

impl ListingKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "buy-house" => Some(ListingKind::BuyHouse),
            "sell-house" => Some(ListingKind::SellHouse),
            "buy-plot" => Some(ListingKind::BuyPlot),
            "sell-land" => Some(ListingKind::SellLand),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::BuyHouse => "buy-house",
            ListingKind::SellHouse => "sell-house",
            ListingKind::BuyPlot => "buy-plot",
            ListingKind::SellLand => "sell-land",
        }
    }

    /// Sale listings get a scoring pass; buy listings never do.
    pub fn is_sale(&self) -> bool {
        matches!(self, ListingKind::SellHouse | ListingKind::SellLand)
    }
}

/// Property model - SQL persistence layer
///
/// The owner reference is immutable after insert; no update path binds it.
/// `views` and `saves` are only ever mutated through atomic single-statement
/// SQL (view increment here, save counter in the saved_property model).
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub kind: ListingKind,

    // Location
    pub state: String,
    pub city: String,
    pub area: String,
    pub landmark: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // Structure
    pub property_type: String,
    pub bhk_type: Option<String>,
    pub total_area: Option<f64>,
    pub price: Option<i64>,
    pub price_per_sqft: Option<i64>,
    pub total_floors: Option<i32>,
    pub property_floor: Option<i32>,
    pub age: Option<String>,
    pub furnishing: Option<String>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,

    // AI fields, unset until a scoring pass populates them
    pub predicted_price: Option<f64>,
    pub ai_score: Option<f64>,
    pub price_range_min: Option<f64>,
    pub price_range_max: Option<f64>,

    // Status
    pub is_verified: bool,
    pub is_active: bool,
    pub views: i64,
    pub saves: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creatable attributes of a listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub state: String,
    pub city: String,
    pub area: String,
    pub landmark: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: String,
    pub bhk_type: Option<String>,
    pub total_area: Option<f64>,
    pub price: Option<i64>,
    pub total_floors: Option<i32>,
    pub property_floor: Option<i32>,
    pub age: Option<String>,
    pub furnishing: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Owner-editable attributes. Absent fields are left unchanged.
///
/// There is deliberately no owner field here: ownership is not reassignable,
/// enforced at the type level rather than by runtime filtering.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    pub state: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub landmark: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub property_type: Option<String>,
    pub bhk_type: Option<String>,
    pub total_area: Option<f64>,
    pub price: Option<i64>,
    pub total_floors: Option<i32>,
    pub property_floor: Option<i32>,
    pub age: Option<String>,
    pub furnishing: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl PropertyPatch {
    /// Whether applying this patch can invalidate the derived price-per-area.
    pub fn touches_pricing(&self) -> bool {
        self.price.is_some() || self.total_area.is_some()
    }
}

impl Property {
    /// Find property by ID without side effects
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Fetch for the detail view, incrementing `views` atomically in the
    /// same statement. Every successful fetch counts exactly once.
    pub async fn fetch_for_detail(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE properties SET views = views + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new property
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO properties (
                id, owner_id, kind,
                state, city, area, landmark, pincode, latitude, longitude,
                property_type, bhk_type, total_area, price, price_per_sqft,
                total_floors, property_floor, age, furnishing, amenities, images,
                predicted_price, ai_score, price_range_min, price_range_max,
                is_verified, is_active
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21,
                     $22, $23, $24, $25, $26, $27)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.owner_id)
        .bind(self.kind)
        .bind(&self.state)
        .bind(&self.city)
        .bind(&self.area)
        .bind(&self.landmark)
        .bind(&self.pincode)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(&self.property_type)
        .bind(&self.bhk_type)
        .bind(self.total_area)
        .bind(self.price)
        .bind(self.price_per_sqft)
        .bind(self.total_floors)
        .bind(self.property_floor)
        .bind(&self.age)
        .bind(&self.furnishing)
        .bind(&self.amenities)
        .bind(&self.images)
        .bind(self.predicted_price)
        .bind(self.ai_score)
        .bind(self.price_range_min)
        .bind(self.price_range_max)
        .bind(self.is_verified)
        .bind(self.is_active)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Persist the mutable columns of an already-merged record.
    ///
    /// Counters and owner_id are intentionally not written here. The derived
    /// price_per_sqft is written together with price and total_area, so a
    /// record is never durable with a stale derivation.
    pub async fn update_record(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE properties SET
                state = $2, city = $3, area = $4, landmark = $5, pincode = $6,
                latitude = $7, longitude = $8, property_type = $9, bhk_type = $10,
                total_area = $11, price = $12, price_per_sqft = $13,
                total_floors = $14, property_floor = $15, age = $16, furnishing = $17,
                amenities = $18, images = $19,
                predicted_price = $20, ai_score = $21,
                price_range_min = $22, price_range_max = $23,
                is_active = $24, updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.state)
        .bind(&self.city)
        .bind(&self.area)
        .bind(&self.landmark)
        .bind(&self.pincode)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(&self.property_type)
        .bind(&self.bhk_type)
        .bind(self.total_area)
        .bind(self.price)
        .bind(self.price_per_sqft)
        .bind(self.total_floors)
        .bind(self.property_floor)
        .bind(&self.age)
        .bind(&self.furnishing)
        .bind(&self.amenities)
        .bind(&self.images)
        .bind(self.predicted_price)
        .bind(self.ai_score)
        .bind(self.price_range_min)
        .bind(self.price_range_max)
        .bind(self.is_active)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Hard delete. Returns the number of rows removed.
    pub async fn delete_by_id(id: Uuid, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Execute a validated listing query: total count over the predicate,
    /// then the requested page, newest first.
    pub async fn find_page(query: &ListingQuery, pool: &PgPool) -> Result<(Vec<Self>, i64)> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM properties");
        push_clauses(&mut count_qb, &query.clauses);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM properties");
        push_clauses(&mut qb, &query.clauses);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(query.limit());
        qb.push(" OFFSET ");
        qb.push_bind(query.offset());

        let properties = qb.build_query_as::<Self>().fetch_all(pool).await?;
        Ok((properties, total))
    }

    /// Properties saved by a principal, most recently saved first.
    pub async fn find_saved_for(principal_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT p.*
             FROM properties p
             JOIN saved_properties sp ON sp.property_id = p.id
             WHERE sp.principal_id = $1
             ORDER BY sp.created_at DESC",
        )
        .bind(principal_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

/// Render the clause list to SQL. Column names come from the closed
/// `FilterField` set, values are always bound parameters.
fn push_clauses(qb: &mut QueryBuilder<Postgres>, clauses: &[FilterClause]) {
    for (i, clause) in clauses.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match clause {
            FilterClause::Equals { field, value } => {
                qb.push(field.column());
                qb.push(" = ");
                qb.push_bind(value.clone());
                // kind is a Postgres enum; the value was validated upstream
                if *field == FilterField::Kind {
                    qb.push("::listing_kind");
                }
            }
            FilterClause::PriceRange { min, max } => {
                qb.push("(");
                if let Some(min) = min {
                    qb.push("price >= ");
                    qb.push_bind(*min);
                }
                if min.is_some() && max.is_some() {
                    qb.push(" AND ");
                }
                if let Some(max) = max {
                    qb.push("price <= ");
                    qb.push_bind(*max);
                }
                qb.push(")");
            }
            FilterClause::Active => {
                qb.push("is_active = true");
            }
        }
    }
}
