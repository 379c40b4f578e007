use reqwest::blocking::Client;
use reqwest::redirect;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Endpoints;
use crate::error::FetchError;
use crate::models::{Item, PriceSnapshot, VolumeSnapshot, unwrap_envelope};

/// Where the pipeline gets its three collections from.
pub trait MarketSource {
    fn catalog(&self) -> Result<Vec<Item>, FetchError>;
    fn latest_prices(&self) -> Result<PriceSnapshot, FetchError>;
    fn volumes(&self) -> Result<VolumeSnapshot, FetchError>;
}

impl<T: MarketSource + ?Sized> MarketSource for &T {
    fn catalog(&self) -> Result<Vec<Item>, FetchError> {
        (**self).catalog()
    }

    fn latest_prices(&self) -> Result<PriceSnapshot, FetchError> {
        (**self).latest_prices()
    }

    fn volumes(&self) -> Result<VolumeSnapshot, FetchError> {
        (**self).volumes()
    }
}

/// Blocking client for the RuneScape Wiki real-time prices API.
pub struct WikiClient {
    client: Client,
    endpoints: Endpoints,
}

impl WikiClient {
    pub fn new(endpoints: Endpoints, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client, endpoints })
    }

    /// One GET, no retry. The body is read fully before parsing so a
    /// malformed body surfaces as `Parse` rather than `Transport`.
    pub fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        let body = resp.text().map_err(transport)?;
        debug!(%url, %status, bytes = body.len(), "response received");

        parse_json(url, &body)
    }
}

impl MarketSource for WikiClient {
    fn catalog(&self) -> Result<Vec<Item>, FetchError> {
        self.fetch_json(&self.endpoints.mapping)
    }

    fn latest_prices(&self) -> Result<PriceSnapshot, FetchError> {
        self.fetch_json(&self.endpoints.latest)
    }

    fn volumes(&self) -> Result<VolumeSnapshot, FetchError> {
        self.fetch_json(&self.endpoints.volumes)
    }
}

/// Parse a body, unwrapping the `{"data": ...}` envelope if present.
pub fn parse_json<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    let parse_error = |err: serde_json::Error| FetchError::Parse {
        url: url.to_string(),
        message: err.to_string(),
    };

    let value = serde_json::from_str(body).map_err(parse_error)?;
    serde_json::from_value(unwrap_envelope(value)).map_err(parse_error)
}
