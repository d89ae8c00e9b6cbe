use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::{
    models::{AssetRecord, AssetType, EnrichedAsset, PortfolioSummary, PriceStatus},
    services::PriceLookup,
};

/// Prices every record and sums them into a net worth.
///
/// All lookups are issued at once and joined, so latency follows the slowest
/// quote. A failed lookup prices its record at zero and never affects the
/// others, and neither does a `price * amount` outside the `Decimal` range.
/// `items` keep the order of `records`.
///
/// Liabilities keep the unsigned `price * amount` as their `total_value` and
/// only enter the net worth negated.
pub async fn valuate<L>(records: &[AssetRecord], lookup: &L) -> PortfolioSummary
where
    L: PriceLookup + ?Sized,
{
    let items = join_all(records.iter().map(|record| enrich(record, lookup))).await;

    let net_worth = items
        .iter()
        .map(|item| contribution(item.record().asset_type(), *item.total_value()))
        .fold(Decimal::ZERO, |sum, value| {
            sum.checked_add(value).unwrap_or_else(|| {
                warn!(%sum, %value, "net worth out of range, saturating");
                sum.saturating_add(value)
            })
        });

    PortfolioSummary::new(net_worth, items)
}

async fn enrich<L>(record: &AssetRecord, lookup: &L) -> EnrichedAsset
where
    L: PriceLookup + ?Sized,
{
    let (price, status) = match record.asset_type() {
        AssetType::Cash => (dec!(1), PriceStatus::Fixed),
        asset_type => match lookup.price(record.symbol(), asset_type).await {
            Ok(price) if price > Decimal::ZERO => (price, PriceStatus::Live),
            Ok(price) => {
                warn!(symbol = %record.symbol(), %price, "no usable quote, valuing at zero");
                (Decimal::ZERO, PriceStatus::Unavailable)
            }
            Err(err) => {
                warn!(symbol = %record.symbol(), "quote lookup failed: {:#}", err);
                (Decimal::ZERO, PriceStatus::Unavailable)
            }
        },
    };

    let (price, total_value, status) = match price.checked_mul(*record.amount()) {
        Some(total_value) => (price, total_value, status),
        None => {
            warn!(
                symbol = %record.symbol(),
                %price,
                amount = %record.amount(),
                "value out of range, valuing at zero"
            );
            (Decimal::ZERO, Decimal::ZERO, PriceStatus::Unavailable)
        }
    };

    debug!(id = %record.id(), symbol = %record.symbol(), %price, ?status, "priced");

    EnrichedAsset::new(record.clone(), price, total_value, status)
}

fn contribution(asset_type: &AssetType, total_value: Decimal) -> Decimal {
    if asset_type.is_liability() {
        -total_value.abs()
    } else {
        total_value
    }
}
