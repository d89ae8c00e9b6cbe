pub mod asset;
pub mod enriched_asset;
pub mod identity;
pub mod portfolio_summary;

pub use asset::{AssetRecord, AssetType, RecordId};
pub use enriched_asset::{EnrichedAsset, PriceStatus};
pub use identity::{Credentials, Identity};
pub use portfolio_summary::{ChartSlice, PortfolioSummary};
