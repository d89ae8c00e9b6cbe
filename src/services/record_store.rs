use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use sqlx::SqlitePool;

use crate::{
    api::supabase,
    db,
    models::{AssetRecord, Identity},
};

/// Read access to the rows owned by an identity, largest amount first.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_records(&self, identity: &Identity) -> Result<Vec<AssetRecord>>;
}

/// Rows served by Supabase PostgREST; row level security scopes them to the
/// token's user.
#[derive(Clone, Debug)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(client: Client, base_url: String, anon_key: String) -> Self {
        Self {
            client,
            base_url,
            anon_key,
        }
    }
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn fetch_records(&self, identity: &Identity) -> Result<Vec<AssetRecord>> {
        let access_token = identity
            .access_token()
            .as_deref()
            .with_context(|| format!("Identity {} has no access token", identity.user_id()))?;

        supabase::fetch_assets(access_token, &self.client, &self.base_url, &self.anon_key).await
    }
}

#[derive(Clone, Debug)]
pub struct SqliteStore {
    connection: SqlitePool,
}

impl SqliteStore {
    pub fn new(connection: SqlitePool) -> Self {
        Self { connection }
    }

    pub async fn open(database_path: &str) -> Result<Self> {
        Ok(Self::new(db::connect(database_path).await?))
    }

    pub fn connection(&self) -> &SqlitePool {
        &self.connection
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn fetch_records(&self, identity: &Identity) -> Result<Vec<AssetRecord>> {
        db::utils::get_assets(&self.connection, identity.user_id()).await
    }
}
