use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use super::AssetRecord;

/// A record with its live price attached.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAsset {
    #[serde(flatten)]
    record: AssetRecord,
    current_price: Decimal,
    total_value: Decimal,
    price_status: PriceStatus,
}

/// Where `current_price` came from.
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PriceStatus {
    /// Cash, priced at exactly one.
    Fixed,
    Live,
    /// The lookup failed and the price was degraded to zero.
    Unavailable,
}
