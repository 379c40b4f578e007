//! Static page generator for OSRS Grand Exchange items.
//!
//! Pulls the item catalog, latest prices and trading volumes from the
//! RuneScape Wiki prices API, writes one HTML page per item under `items/`
//! and a `sitemap.xml` covering them all.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod models;
pub mod output;
pub mod page;
pub mod pipeline;
pub mod sitemap;
pub mod slug;

pub use config::{BuildConfig, Endpoints};
pub use error::{BuildError, FetchError, ItemFailure};
pub use fetcher::{MarketSource, WikiClient};
pub use pipeline::{BuildSummary, Pipeline};
