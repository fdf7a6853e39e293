//! Client for the cookie-consent server.

use super::read_json;
use crate::errors::ClientError;
use crate::models::{ConsentStatus, SetConsentRequest, SetConsentResponse};

#[derive(Clone)]
pub struct ConsentClient {
    http: reqwest::Client,
    base_url: String,
}

impl ConsentClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET /check-cookies
    pub async fn check(&self) -> Result<ConsentStatus, ClientError> {
        let request = self.http.get(format!("{}/check-cookies", self.base_url));
        read_json(request).await
    }

    /// POST /allow-cookies with the user's choice.
    pub async fn set(&self, allow: bool) -> Result<SetConsentResponse, ClientError> {
        let request = self
            .http
            .post(format!("{}/allow-cookies", self.base_url))
            .json(&SetConsentRequest {
                allow_cookies: allow,
                alert: None,
            });
        read_json(request).await
    }
}
