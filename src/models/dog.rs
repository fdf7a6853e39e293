//! Dog and location models matching the adoption service payloads.

use serde::{Deserialize, Serialize};

/// A single adoptable dog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dog {
    pub id: String,
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
    /// Filled in by a location lookup after the dog is fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Dog {
    /// Copy the city and state of a resolved location onto this record.
    pub fn with_location(mut self, location: &Location) -> Self {
        self.city = Some(location.city.clone());
        self.state = Some(location.state.clone());
        self
    }
}

/// A zip-code location as returned by the adoption service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub zip_code: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub county: String,
}

/// Response of `GET /dogs/search`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_ids: Vec<String>,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// Response of `POST /dogs/match`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchResponse {
    #[serde(default, rename = "match")]
    pub matched: Option<String>,
}

/// Request body for `POST /locations/search`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LocationSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
}

/// Response of `POST /locations/search`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationSearchResponse {
    pub results: Vec<Location>,
    #[serde(default)]
    pub total: u64,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub email: String,
}
