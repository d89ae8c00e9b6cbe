use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::{api::yahoo, config::Settings, models::AssetType};

/// Best-effort unit price for a symbol. Implementations must settle within
/// their own timeout; the valuation engine never waits on them beyond that.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn price(&self, symbol: &str, asset_type: &AssetType) -> Result<Decimal>;
}

/// Yahoo Finance chart quotes, optionally routed through a CORS relay.
#[derive(Clone, Debug)]
pub struct YahooPriceService {
    client: Client,
    base_url: String,
    relay: Option<String>,
    timeout: Duration,
}

impl YahooPriceService {
    pub fn new(base_url: String, relay: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            relay,
            timeout,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.yahoo_base_url().clone(),
            settings.price_relay_url().clone(),
            *settings.quote_timeout(),
        )
    }
}

#[async_trait]
impl PriceLookup for YahooPriceService {
    async fn price(&self, symbol: &str, asset_type: &AssetType) -> Result<Decimal> {
        if *asset_type == AssetType::Cash {
            return Ok(dec!(1));
        }

        debug!(symbol, relayed = self.relay.is_some(), "fetching quote");

        let price = tokio::time::timeout(
            self.timeout,
            yahoo::get_market_price(symbol, &self.client, &self.base_url, self.relay.as_deref()),
        )
        .await
        .with_context(|| format!("Yahoo ({}): timed out after {:?}", symbol, self.timeout))??;

        Ok(price)
    }
}
