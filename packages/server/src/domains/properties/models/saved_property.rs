use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// SavedProperty model - the principal/property "saved" relationship.
///
/// The (principal_id, property_id) pair is unique at the schema level. The
/// denormalized `saves` counter on the property is mutated here and nowhere
/// else, always in the same transaction as the relationship row.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct SavedProperty {
    pub id: Uuid,
    pub principal_id: Uuid,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AlreadySaved,
}

/// Outcome of an unsave attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsaveOutcome {
    Removed,
    NotSaved,
}

impl SavedProperty {
    /// Create the relationship and bump the property's saves counter.
    ///
    /// `ON CONFLICT DO NOTHING` makes the duplicate check and the insert a
    /// single atomic step; the counter is only touched when a row was
    /// actually inserted, so a duplicate save can never inflate it.
    pub async fn save(principal_id: Uuid, property_id: Uuid, pool: &PgPool) -> Result<SaveOutcome> {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO saved_properties (id, principal_id, property_id)
             VALUES ($1, $2, $3)
             ON CONFLICT (principal_id, property_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(principal_id)
        .bind(property_id)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            return Ok(SaveOutcome::AlreadySaved);
        }

        sqlx::query("UPDATE properties SET saves = saves + 1 WHERE id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SaveOutcome::Saved)
    }

    /// Remove the relationship and decrement the saves counter, floored at
    /// zero. A pair that was never saved leaves the counter untouched.
    pub async fn unsave(
        principal_id: Uuid,
        property_id: Uuid,
        pool: &PgPool,
    ) -> Result<UnsaveOutcome> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query(
            "DELETE FROM saved_properties WHERE principal_id = $1 AND property_id = $2",
        )
        .bind(principal_id)
        .bind(property_id)
        .execute(&mut *tx)
        .await?;

        if deleted.rows_affected() == 0 {
            return Ok(UnsaveOutcome::NotSaved);
        }

        sqlx::query("UPDATE properties SET saves = GREATEST(saves - 1, 0) WHERE id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(UnsaveOutcome::Removed)
    }
}
