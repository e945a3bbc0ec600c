//! Prediction history queries

use crate::error::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::SqlitePool;

/// One logged forecast
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryEntry {
    pub id: i64,
    pub date_input: NaiveDate,
    pub city: String,
    pub family: String,
    pub sales_prediction: f64,
    pub timestamp: NaiveDateTime,
}

/// Insert one forecast into the history log
///
/// Stores the request values exactly as submitted, even when the forecast
/// path substituted fallbacks for them.
///
/// # Returns
/// Row id of the inserted entry
pub async fn insert_prediction(
    pool: &SqlitePool,
    date_input: NaiveDate,
    city: &str,
    family: &str,
    sales_prediction: f64,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO prediction_history (date_input, city, family, sales_prediction)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(date_input)
    .bind(city)
    .bind(family)
    .bind(sales_prediction)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Fetch the most recent history entries, newest first
pub async fn recent_predictions(pool: &SqlitePool, limit: i64) -> Result<Vec<HistoryEntry>> {
    let entries = sqlx::query_as::<_, HistoryEntry>(
        r#"
        SELECT id, date_input, city, family, sales_prediction, timestamp
        FROM prediction_history
        ORDER BY timestamp DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Total number of logged forecasts
pub async fn prediction_count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prediction_history")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
