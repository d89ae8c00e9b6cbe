use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteQueryResult};

pub async fn connect(database_path: &str) -> Result<SqlitePool> {
    let db_connect_options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true);

    let connection = SqlitePool::connect_with(db_connect_options)
        .await
        .with_context(|| format!("Failed to open database at {}", database_path))?;

    create_assets(&connection).await?;

    Ok(connection)
}

pub async fn create_assets(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS assets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            symbol TEXT NOT NULL,
            amount REAL NOT NULL,
            type TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}
