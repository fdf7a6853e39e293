//! Cookie-consent endpoints.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::models::{
    ConsentStatus, SetConsentRequest, SetConsentResponse, MESSAGE_ALLOWED, MESSAGE_DENIED,
};

/// Name of the cookie carrying the user's choice.
pub const CONSENT_COOKIE: &str = "userConsent";

/// Lifetime of the consent cookie.
pub const CONSENT_MAX_AGE_SECS: u64 = 900;

const GRANTED: &str = "granted";
const DENIED: &str = "denied";

/// GET /check-cookies - Report whether consent was granted.
pub async fn check_cookies(headers: HeaderMap) -> Json<ConsentStatus> {
    let enabled = read_cookie(&headers, CONSENT_COOKIE).as_deref() == Some(GRANTED);
    tracing::debug!("Consent check: enabled={}", enabled);
    Json(ConsentStatus::new(enabled))
}

/// POST /allow-cookies - Record the user's choice in a short-lived cookie.
pub async fn allow_cookies(
    payload: Result<Json<SetConsentRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let (value, message) = if request.granted() {
        (GRANTED, MESSAGE_ALLOWED)
    } else {
        (DENIED, MESSAGE_DENIED)
    };
    tracing::info!("Consent recorded: {}", value);

    let cookie = HeaderValue::from_str(&consent_cookie(value))?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SetConsentResponse {
            message: message.to_string(),
        }),
    )
        .into_response())
}

fn consent_cookie(value: &str) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        CONSENT_COOKIE, value, CONSENT_MAX_AGE_SECS
    )
}

/// Find a cookie by name across all `Cookie` headers.
fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for cookie in cookies {
            map.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        map
    }

    #[test]
    fn test_read_cookie() {
        let map = headers(&["theme=dark; userConsent=granted", "other=1"]);
        assert_eq!(read_cookie(&map, "userConsent").as_deref(), Some("granted"));
        assert_eq!(read_cookie(&map, "other").as_deref(), Some("1"));
        assert!(read_cookie(&map, "missing").is_none());
        assert!(read_cookie(&HeaderMap::new(), "userConsent").is_none());
    }

    #[test]
    fn test_consent_cookie_attributes() {
        let cookie = consent_cookie(GRANTED);
        assert!(cookie.starts_with("userConsent=granted;"));
        assert!(cookie.contains("Max-Age=900"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_check_cookies_requires_granted_value() {
        let Json(status) = check_cookies(headers(&["userConsent=denied"])).await;
        assert!(!status.enabled);
        assert_eq!(status.message, "Cookies are disabled");

        let Json(status) = check_cookies(headers(&["userConsent=granted"])).await;
        assert!(status.enabled);
        assert_eq!(status.message, "Cookies are enabled");
    }
}
