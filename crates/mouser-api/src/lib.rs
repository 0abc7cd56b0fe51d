pub mod client;
pub mod search;

pub use reqwest::StatusCode;

pub use client::{
    ClientConfig, FetchError, HttpTransport, MouserClient, RawResponse, Transport,
    DEFAULT_RETRY_DELAY,
};
pub use search::{
    ApiError, ComplianceEntry, Part, ProductAttribute, SearchByPartRequest, SearchRequest,
    SearchResponse, SearchResults,
};

/// Production endpoint host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.mouser.com";

/// Where to obtain an API key; shown whenever one is missing.
pub const API_KEY_SIGNUP_URL: &str = "https://www.mouser.com/api-search/#signup";

pub fn get_api_base_url() -> String {
    if let Ok(url) = std::env::var("MOUSER_API_URL") {
        return url;
    }

    DEFAULT_API_BASE_URL.to_string()
}
