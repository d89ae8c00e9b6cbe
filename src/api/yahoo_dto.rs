use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Envelope returned by the AllOrigins relay. `contents` holds the upstream
/// body as a string.
#[derive(Debug, Deserialize, Getters)]
pub struct RelayEnvelopeDto {
    contents: Option<String>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooChartResponseDto {
    chart: YahooChartDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooChartDto {
    result: Option<Vec<YahooChartResultDto>>,
    error: Option<YahooChartErrorDto>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooChartResultDto {
    meta: YahooChartMetaDto,
}

#[derive(Debug, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct YahooChartMetaDto {
    symbol: Option<String>,
    currency: Option<String>,
    regular_market_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooChartErrorDto {
    code: String,
    description: Option<String>,
}

impl YahooChartErrorDto {
    pub fn message(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.code)
    }
}
