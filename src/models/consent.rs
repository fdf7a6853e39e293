//! Cookie-consent payloads shared by the consent server and its client.

use serde::{Deserialize, Serialize};

pub const MESSAGE_ENABLED: &str = "Cookies are enabled";
pub const MESSAGE_DISABLED: &str = "Cookies are disabled";
pub const MESSAGE_ALLOWED: &str = "Cookies allowed";
pub const MESSAGE_DENIED: &str = "Cookies denied";

/// Consent as known to the client for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentState {
    /// Not queried yet.
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Response of `GET /check-cookies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentStatus {
    pub message: String,
    /// Older servers only send `message`; treat a missing flag as "not enabled".
    #[serde(default)]
    pub enabled: bool,
}

impl ConsentStatus {
    pub fn new(enabled: bool) -> Self {
        Self {
            message: if enabled {
                MESSAGE_ENABLED
            } else {
                MESSAGE_DISABLED
            }
            .to_string(),
            enabled,
        }
    }

    /// Only a definitive "enabled" answer counts as consent.
    pub fn is_enabled(&self) -> bool {
        self.enabled || self.message == MESSAGE_ENABLED
    }
}

/// Request body for `POST /allow-cookies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetConsentRequest {
    #[serde(default)]
    pub allow_cookies: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<bool>,
}

impl SetConsentRequest {
    pub fn granted(&self) -> bool {
        self.allow_cookies || self.alert.unwrap_or(false)
    }
}

/// Response of `POST /allow-cookies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetConsentResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_enabled_from_message_only() {
        let legacy: ConsentStatus =
            serde_json::from_str(r#"{"message":"Cookies are enabled"}"#).unwrap();
        assert!(legacy.is_enabled());

        let disabled: ConsentStatus =
            serde_json::from_str(r#"{"message":"Cookies are disabled"}"#).unwrap();
        assert!(!disabled.is_enabled());
    }

    #[test]
    fn test_alert_flag_grants_consent() {
        let req: SetConsentRequest = serde_json::from_str(r#"{"alert":true}"#).unwrap();
        assert!(req.granted());

        let req: SetConsentRequest = serde_json::from_str(r#"{"allowCookies":false}"#).unwrap();
        assert!(!req.granted());
    }
}
