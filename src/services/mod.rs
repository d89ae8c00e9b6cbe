pub mod identity;
pub mod price_service;
pub mod record_store;

pub use identity::{AuthProvider, IdentityContext, LocalAuth, SupabaseAuth};
pub use price_service::{PriceLookup, YahooPriceService};
pub use record_store::{RecordStore, SqliteStore, SupabaseStore};
