use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

use crate::search::{SearchRequest, SearchResponse};

/// Pause before the single retry of a throttled (403) request
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

const SEARCH_PATH: &str = "/api/v1.0/search/partnumber";

/// A response the API sent back, but which did not decode into the envelope.
///
/// Transport faults and non-success statuses are not errors at this level;
/// they surface as `Ok(None)` from [`MouserClient::search_by_part`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to decode search response ({status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub retry_delay: Duration,
    /// `None` keeps the transport's own default
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: crate::get_api_base_url(),
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Sends one JSON POST and hands back the status and body.
pub trait Transport {
    fn post_json(&self, url: &Url, body: &SearchRequest) -> Result<RawResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(format!("mpn/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
        })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &Url, body: &SearchRequest) -> Result<RawResponse> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            // the URL carries the API key
            .map_err(reqwest::Error::without_url)
            .context("Failed to send search request")?;

        let status = response.status();
        let body = response
            .text()
            .map_err(reqwest::Error::without_url)
            .context("Failed to read search response body")?;
        Ok(RawResponse { status, body })
    }
}

pub struct MouserClient<T = HttpTransport> {
    transport: T,
    // carries the API key in its query; never log it
    endpoint: Url,
    retry_delay: Duration,
}

impl MouserClient<HttpTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> MouserClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self> {
        Ok(Self {
            transport,
            endpoint: search_endpoint(&config.base_url, &config.api_key)?,
            retry_delay: config.retry_delay,
        })
    }

    /// Look up a `|`-joined list of part numbers.
    ///
    /// A 403 is retried once after the configured delay. `Ok(None)` means no
    /// usable response: the retry failed too, another non-success status came
    /// back, or the request never completed.
    pub fn search_by_part(
        &self,
        part_numbers: &str,
    ) -> std::result::Result<Option<SearchResponse>, FetchError> {
        let request = SearchRequest::new(part_numbers);

        let Some(mut response) = self.send(&request) else {
            return Ok(None);
        };

        if response.status == StatusCode::FORBIDDEN {
            log::warn!(
                "Search request rejected ({}), retrying in {}s",
                response.status,
                self.retry_delay.as_secs_f64()
            );
            std::thread::sleep(self.retry_delay);

            response = match self.send(&request) {
                Some(retried) => retried,
                None => return Ok(None),
            };
        }

        if !response.status.is_success() {
            log::warn!(
                "Search request failed ({}): {}",
                response.status,
                snippet(&response.body)
            );
            return Ok(None);
        }

        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|source| FetchError::Decode {
                status: response.status,
                source,
            })
    }

    fn send(&self, request: &SearchRequest) -> Option<RawResponse> {
        match self.transport.post_json(&self.endpoint, request) {
            Ok(response) => Some(response),
            Err(e) => {
                log::warn!("{e:#}");
                None
            }
        }
    }
}

fn search_endpoint(base_url: &str, api_key: &str) -> Result<Url> {
    let base = Url::parse(base_url).with_context(|| format!("Invalid API URL: {base_url}"))?;
    let mut endpoint = base
        .join(SEARCH_PATH)
        .with_context(|| format!("Invalid API URL: {base_url}"))?;
    endpoint.query_pairs_mut().append_pair("apiKey", api_key);
    Ok(endpoint)
}

fn snippet(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
