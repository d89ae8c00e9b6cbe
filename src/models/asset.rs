use std::fmt;

use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

const HOME_MARKET_SUFFIX: &str = ".TW";

/// One asset or liability row as stored in the record store.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct AssetRecord {
    id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    name: String,
    symbol: String,
    amount: Decimal,
    #[serde(rename = "type")]
    asset_type: AssetType,
}

impl AssetRecord {
    /// Symbol as shown to the user. Lookups always use `symbol()`.
    pub fn display_symbol(&self) -> String {
        self.symbol.replacen(HOME_MARKET_SUFFIX, "", 1)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// Category of a row. `Cash` and `Liability` get special treatment during
/// valuation, every other tag is kept as-is.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub enum AssetType {
    Cash,
    Liability,
    Asset(String),
}

impl AssetType {
    pub fn from_str(s: &str) -> AssetType {
        match s {
            "cash" => AssetType::Cash,
            "liability" => AssetType::Liability,
            other => AssetType::Asset(other.to_string()),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            AssetType::Cash => "cash",
            AssetType::Liability => "liability",
            AssetType::Asset(tag) => tag,
        }
    }

    pub fn is_liability(&self) -> bool {
        *self == AssetType::Liability
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl From<String> for AssetType {
    fn from(s: String) -> Self {
        AssetType::from_str(&s)
    }
}

impl From<AssetType> for String {
    fn from(asset_type: AssetType) -> Self {
        asset_type.to_str().to_string()
    }
}
