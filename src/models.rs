use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One tradeable item from the catalog. Upstream fields other than `id` and
/// `name` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
}

/// Latest instant-buy (`high`) and instant-sell (`low`) price in GP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub high: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub low: i64,
}

impl Price {
    pub fn new(high: i64, low: i64) -> Self {
        Self { high, low }
    }
}

pub type PriceSnapshot = HashMap<u32, Price>;

/// Items traded per id over the upstream's recent window.
pub type VolumeSnapshot = HashMap<u32, u64>;

/// The wiki API wraps its maps in `{"data": {...}, "timestamp": ...}`. A bare
/// map is passed through untouched.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut fields) => match fields.remove("data") {
            Some(data) => data,
            None => Value::Object(fields),
        },
        other => other,
    }
}

/// Lookups with the defaults applied when an id is missing from a snapshot.
pub fn price_for(prices: &PriceSnapshot, id: u32) -> Price {
    prices.get(&id).copied().unwrap_or_default()
}

pub fn volume_for(volumes: &VolumeSnapshot, id: u32) -> u64 {
    volumes.get(&id).copied().unwrap_or(0)
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Option::unwrap_or_default)
}
