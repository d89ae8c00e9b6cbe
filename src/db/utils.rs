use anyhow::{Context, Result};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::models::{AssetRecord, AssetType, RecordId};

pub async fn get_assets(connection: &Pool<Sqlite>, user_id: &str) -> Result<Vec<AssetRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, symbol, amount, type
        FROM assets
        WHERE user_id = ?
        ORDER BY amount DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(connection)
    .await
    .with_context(|| format!("Failed to read assets for user {}", user_id))?;

    rows.iter().map(row_to_asset).collect()
}

fn row_to_asset(row: &SqliteRow) -> Result<AssetRecord> {
    let id: i64 = row.try_get("id")?;
    let amount: f64 = row.try_get("amount")?;
    let asset_type: String = row.try_get("type")?;

    Ok(AssetRecord::new(
        RecordId::Int(id),
        row.try_get("name")?,
        row.try_get("symbol")?,
        Decimal::from_f64(amount)
            .with_context(|| format!("Failed to convert amount {} of asset {}", amount, id))?,
        AssetType::from_str(&asset_type),
    ))
}
