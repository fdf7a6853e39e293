//! HTTP clients for the adoption service and the consent server.
//!
//! Both clients share one `reqwest::Client` with a cookie store, so the
//! session cookie set by login is forwarded on every later call.

mod consent;

pub use consent::*;

use serde::de::DeserializeOwned;

use crate::errors::ClientError;
use crate::models::{
    Dog, Location, LocationSearchRequest, LocationSearchResponse, LoginRequest, MatchResponse,
    SearchResponse,
};

/// Build the shared HTTP client with cookie persistence enabled.
pub fn build_http_client() -> Result<reqwest::Client, ClientError> {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .user_agent(concat!("dog-finder/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Client for the dog adoption REST service.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /auth/login - Establish a session cookie.
    pub async fn login(&self, name: &str, email: &str) -> Result<(), ClientError> {
        tracing::debug!("POST /auth/login for {}", name);
        self.http
            .post(self.url("/auth/login"))
            .json(&LoginRequest {
                name: name.to_string(),
                email: email.to_string(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// POST /auth/logout - End the session.
    pub async fn logout(&self) -> Result<(), ClientError> {
        tracing::debug!("POST /auth/logout");
        self.http
            .post(self.url("/auth/logout"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// GET /dogs/breeds - All breed names.
    pub async fn breeds(&self) -> Result<Vec<String>, ClientError> {
        tracing::debug!("GET /dogs/breeds");
        let request = self.http.get(self.url("/dogs/breeds"));
        read_json(request).await
    }

    /// GET /dogs/search - One page of matching dog identifiers.
    pub async fn search_dogs(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<SearchResponse, ClientError> {
        tracing::debug!("GET /dogs/search {:?}", params);
        let request = self.http.get(self.url("/dogs/search")).query(params);
        read_json(request).await
    }

    /// POST /dogs - Full records for a batch of identifiers.
    pub async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>, ClientError> {
        tracing::debug!("POST /dogs ({} ids)", ids.len());
        let request = self.http.post(self.url("/dogs")).json(ids);
        read_json(request).await
    }

    /// POST /dogs/match - Pick one identifier out of the given set.
    pub async fn match_dogs(&self, ids: &[String]) -> Result<MatchResponse, ClientError> {
        tracing::debug!("POST /dogs/match ({} ids)", ids.len());
        let request = self.http.post(self.url("/dogs/match")).json(ids);
        read_json(request).await
    }

    /// POST /locations/search - Zip codes for a city and/or state.
    pub async fn search_locations(
        &self,
        query: &LocationSearchRequest,
    ) -> Result<LocationSearchResponse, ClientError> {
        tracing::debug!("POST /locations/search {:?}", query);
        let request = self.http.post(self.url("/locations/search")).json(query);
        read_json(request).await
    }

    /// POST /locations - Locations for a batch of zip codes.
    ///
    /// Unknown zip codes come back as `null` entries.
    pub async fn lookup_locations(
        &self,
        zip_codes: &[String],
    ) -> Result<Vec<Option<Location>>, ClientError> {
        tracing::debug!("POST /locations ({} zip codes)", zip_codes.len());
        let request = self.http.post(self.url("/locations")).json(zip_codes);
        read_json(request).await
    }
}

/// Send a request, reject non-success statuses, and decode the JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ClientError> {
    let response = request.send().await?.error_for_status()?;
    Ok(response.json::<T>().await?)
}
