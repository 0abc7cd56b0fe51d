//! Wire types for `POST /api/v1.0/search/partnumber`.
//!
//! The request carries a `|`-joined list of part numbers. Only the response
//! fields consumed downstream are modelled; everything else the API returns
//! is ignored. Fields that are modelled must be present in every part entry,
//! although the API is allowed to send `null` for most of them.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    #[serde(rename = "searchByPartRequest")]
    pub search_by_part_request: SearchByPartRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchByPartRequest {
    #[serde(rename = "mouserPartNumber")]
    pub mouser_part_number: String,
}

impl SearchRequest {
    pub fn new(part_numbers: impl Into<String>) -> Self {
        Self {
            search_by_part_request: SearchByPartRequest {
                mouser_part_number: part_numbers.into(),
            },
        }
    }
}

/// Response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Errors", default, deserialize_with = "null_as_default")]
    pub errors: Vec<ApiError>,
    /// `null` when the request was rejected (bad key, quota exhausted, ...)
    #[serde(rename = "SearchResults", deserialize_with = "nullable")]
    pub search_results: Option<SearchResults>,
}

/// Entry of the envelope's `Errors` list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApiError {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub property_name: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{code}: {message}"),
            (Some(code), None) => write!(f, "{code}"),
            (None, Some(message)) => write!(f, "{message}"),
            (None, None) => write!(f, "unknown error"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResults {
    pub number_of_result: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Part {
    #[serde(deserialize_with = "nullable")]
    pub manufacturer_part_number: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub category: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub manufacturer: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub lifecycle_status: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub lead_time: Option<String>,
    #[serde(rename = "ROHSStatus", deserialize_with = "nullable")]
    pub rohs_status: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub suggested_replacement: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub product_compliance: Vec<ComplianceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub product_attributes: Vec<ProductAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ComplianceEntry {
    pub compliance_name: Option<String>,
    pub compliance_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProductAttribute {
    pub attribute_name: Option<String>,
    pub attribute_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_cost: Option<String>,
}

/// Field must be present, but may be `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
