use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{EnrichedAsset, PriceStatus};

const LIABILITY_COLOR: &str = "#ff4d4d";
const ASSET_PALETTE: [&str; 4] = ["#fff", "#888", "#444", "#222"];

#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    net_worth: Decimal,
    items: Vec<EnrichedAsset>,
}

#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct ChartSlice {
    label: String,
    value: Decimal,
    #[getter(skip)]
    color: &'static str,
}

impl ChartSlice {
    pub fn color(&self) -> &'static str {
        self.color
    }
}

impl PortfolioSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unavailable_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| *item.price_status() == PriceStatus::Unavailable)
            .count()
    }

    /// Slices for the breakdown chart, one per item in list order.
    pub fn breakdown(&self) -> Vec<ChartSlice> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let color = if item.record().asset_type().is_liability() {
                    LIABILITY_COLOR
                } else {
                    ASSET_PALETTE[index % ASSET_PALETTE.len()]
                };
                ChartSlice::new(item.record().name().clone(), *item.total_value(), color)
            })
            .collect()
    }
}
