use std::{env, str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow};
use derive_getters::Getters;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::api::yahoo;

const DEFAULT_DATABASE_PATH: &str = "wealth.db";
const DEFAULT_PRICE_RELAY: &str = "https://api.allorigins.win/get?url=";
const DEFAULT_QUOTE_TIMEOUT_SECS: u64 = 10;

#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    Supabase,
    Sqlite,
}

#[derive(Clone, Debug, Getters)]
pub struct Settings {
    store_backend: StoreBackend,
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    database_path: String,
    yahoo_base_url: String,
    price_relay_url: Option<String>,
    quote_timeout: Duration,
}

impl Settings {
    /// Reads settings from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store_backend = match var("RECORD_STORE") {
            Some(value) => StoreBackend::from_str(value.trim()).map_err(|_| {
                anyhow!(
                    "Unknown RECORD_STORE '{}', expected one of: {}",
                    value,
                    StoreBackend::iter()
                        .map(|backend| backend.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?,
            None => StoreBackend::Supabase,
        };

        let database_path = var("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.into());
        let database_path = shellexpand::tilde(&database_path).into_owned();

        let price_relay_url = match lookup("PRICE_RELAY_URL") {
            None => Some(DEFAULT_PRICE_RELAY.to_string()),
            Some(value) if value.trim().is_empty() || value.trim() == "none" => None,
            Some(value) => Some(value.trim().to_string()),
        };

        let quote_timeout = match var("QUOTE_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Failed to parse QUOTE_TIMEOUT_SECS '{}'", value))?,
            None => DEFAULT_QUOTE_TIMEOUT_SECS,
        };

        Ok(Self {
            store_backend,
            supabase_url: var("SUPABASE_URL").map(|url| url.trim_end_matches('/').to_string()),
            supabase_anon_key: var("SUPABASE_ANON_KEY"),
            database_path,
            yahoo_base_url: var("YAHOO_BASE_URL").unwrap_or_else(|| yahoo::BASE_URL.into()),
            price_relay_url,
            quote_timeout: Duration::from_secs(quote_timeout),
        })
    }

    /// Project URL and anon key, both required by the supabase backend.
    pub fn supabase(&self) -> Result<(&str, &str)> {
        let url = self
            .supabase_url
            .as_deref()
            .with_context(|| "Missing SUPABASE_URL in environment")?;
        let anon_key = self
            .supabase_anon_key
            .as_deref()
            .with_context(|| "Missing SUPABASE_ANON_KEY in environment")?;
        Ok((url, anon_key))
    }
}
