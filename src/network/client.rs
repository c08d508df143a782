//! HTTP Client
//!
//! Remote control for a traffic light server, mirroring its wire protocol.

use std::time::Duration;

use reqwest::{StatusCode, Url};

use crate::error::{Result, TrafficLightError};
use crate::protocol::{decode_state, encode_query};
use crate::state::State;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Traffic light network client
///
/// Every call is a single request; nothing is retried.
#[derive(Debug, Clone)]
pub struct Client {
    api_uri: Url,
    http: reqwest::blocking::Client,
}

impl Client {
    /// Create a client for the API at `api_uri` (e.g. `http://host:8080/api/`)
    pub fn new(api_uri: &str) -> Result<Self> {
        Self::with_timeout(api_uri, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_uri: &str, timeout: Duration) -> Result<Self> {
        let api_uri = Url::parse(api_uri)
            .map_err(|e| TrafficLightError::Config(format!("Invalid API URI `{}': {}", api_uri, e)))?;
        let http = reqwest::blocking::Client::builder().timeout(timeout).build()?;

        Ok(Self { api_uri, http })
    }

    pub fn api_uri(&self) -> &str {
        self.api_uri.as_str()
    }

    /// Read the current traffic light state
    pub fn get(&self) -> Result<State> {
        self.request(self.api_uri.clone())
    }

    /// Overwrite all three lights with `state`
    ///
    /// Returns the state the server reports after the write, which need not
    /// equal `state`.
    pub fn set(&self, state: State) -> Result<State> {
        let mut url = self.api_uri.clone();
        url.query_pairs_mut().extend_pairs(encode_query(&state));
        self.request(url)
    }

    fn request(&self, url: Url) -> Result<State> {
        tracing::debug!("GET {}", url);

        let response = self.http.get(url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(TrafficLightError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text()?;
        decode_state(&body)
    }
}
