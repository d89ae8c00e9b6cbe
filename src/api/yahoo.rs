use anyhow::{Context, Result, bail};
use reqwest::Client;
use rust_decimal::Decimal;
use urlencoding::encode;

use super::{
    utils::{make_request, parse_response_object},
    yahoo_dto::{RelayEnvelopeDto, YahooChartResponseDto},
};

pub const BASE_URL: &str = "https://query1.finance.yahoo.com";

pub fn chart_url(base_url: &str, symbol: &str) -> String {
    format!("{}/v8/finance/chart/{}", base_url.trim_end_matches('/'), symbol)
}

pub fn relay_url(relay: &str, target: &str) -> String {
    format!("{}{}", relay, encode(target))
}

/// Latest regular market price for `symbol`. A quote without a price yields
/// zero rather than an error.
pub async fn get_market_price(
    symbol: &str,
    client: &Client,
    base_url: &str,
    relay: Option<&str>,
) -> Result<Decimal> {
    let target = chart_url(base_url, symbol);

    match relay {
        Some(relay) => {
            let body = make_request(client, &relay_url(relay, &target))
                .await
                .with_context(|| format!("Relay ({})", symbol))?;
            parse_relayed_price(&body, symbol)
        }
        None => {
            let body = make_request(client, &target)
                .await
                .with_context(|| format!("Yahoo ({})", symbol))?;
            parse_chart_price(&body, symbol)
        }
    }
}

pub fn parse_relayed_price(body: &str, symbol: &str) -> Result<Decimal> {
    let envelope = parse_response_object::<RelayEnvelopeDto>(
        body,
        &format!("Relay ({}): unexpected envelope", symbol),
    )?;
    let contents = envelope
        .contents()
        .as_deref()
        .with_context(|| format!("Relay ({}): no contents", symbol))?;

    parse_chart_price(contents, symbol)
}

pub fn parse_chart_price(body: &str, symbol: &str) -> Result<Decimal> {
    let response = parse_response_object::<YahooChartResponseDto>(
        body,
        &format!("Yahoo ({}): unexpected chart response", symbol),
    )?;

    if let Some(error) = response.chart().error() {
        bail!("Yahoo ({}): {}", symbol, error.message());
    }

    let first = response
        .chart()
        .result()
        .as_ref()
        .and_then(|result| result.first())
        .with_context(|| format!("Yahoo ({}): empty chart result", symbol))?;

    Ok(first.meta().regular_market_price().unwrap_or(Decimal::ZERO))
}
